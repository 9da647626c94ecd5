//! Breadth-first frontier generation.
//!
//! Expands the root level by level until enough open nodes exist to hand out
//! as independent subtrees. Each popped node is checked against the best
//! known at that moment, so a frontier built after an early solution is
//! already trimmed.

use std::collections::VecDeque;

use knights_core::{successors, Board, SearchNode};
use log::debug;

use crate::engine::{install, should_prune};
use crate::incumbent::BestSolution;
use crate::stats::SearchStats;

/// Builds a frontier of at most roughly `target` open nodes.
///
/// Returns an empty queue when the whole problem was settled during the
/// expansion (including a root that is already complete). Completed children
/// are installed into `best` as they appear and never enter the queue.
pub fn build_frontier(
    board: &Board,
    target: usize,
    best: &BestSolution,
    stats: &mut SearchStats,
) -> VecDeque<SearchNode> {
    let root = board.root();
    if root.is_complete() {
        install(best, &root, stats);
        return VecDeque::new();
    }

    let mut queue = VecDeque::from([root]);
    while queue.len() < target {
        let Some(node) = queue.pop_front() else {
            break;
        };
        if should_prune(board, &node, best.length()) {
            stats.pruned += 1;
            continue;
        }

        stats.expanded += 1;
        for child in successors(board, &node) {
            if child.is_complete() {
                install(best, &child, stats);
            } else {
                queue.push_back(child);
            }
        }
    }

    debug!(
        "frontier: {} open nodes (target {target}), best {}",
        queue.len(),
        best.length()
    );
    queue
}

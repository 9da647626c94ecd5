//! Branch-and-bound depth-first search over one subtree.
//!
//! The engine is a plain function of `(board, root, best)`. It does not know
//! whether it runs alone, on a rayon task next to other subtrees, or inside
//! a worker agent that received `root` over the wire.

use knights_core::{successors, Board, SearchNode};
use log::trace;

use crate::incumbent::BestSolution;
use crate::stats::SearchStats;

/// Whether `node` can be discarded without expansion.
///
/// `best_length` must be read fresh for every node; caching it across
/// nodes would miss improvements installed in the meantime.
#[inline]
pub fn should_prune(board: &Board, node: &SearchNode, best_length: usize) -> bool {
    // each outstanding piece costs at least one more move
    node.lower_bound() >= best_length || node.moves() >= board.upper_bound()
}

/// Explores the subtree under `root` to exhaustion, installing every
/// strictly better complete path into `best`.
///
/// Children are pushed in move-table order and popped last-first, so the
/// most recently generated child is always explored next.
pub fn explore(board: &Board, root: SearchNode, best: &BestSolution, stats: &mut SearchStats) {
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.is_complete() {
            // only a root can be complete here; children are handled below
            install(best, &node, stats);
            continue;
        }
        if should_prune(board, &node, best.length()) {
            stats.pruned += 1;
            continue;
        }

        stats.expanded += 1;
        for child in successors(board, &node) {
            if child.is_complete() {
                install(best, &child, stats);
            } else {
                stack.push(child);
            }
        }
    }
}

pub(crate) fn install(best: &BestSolution, node: &SearchNode, stats: &mut SearchStats) {
    if best.try_install(node.path()) {
        stats.improvements += 1;
        trace!("new best: {} moves {:?}", node.moves(), node.path());
    }
}

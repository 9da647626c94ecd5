//! Exact reference solvers.
//!
//! Neither of these is meant to be fast. [`solve_exhaustive`] walks every
//! knight path up to the upper bound with no pruning at all and is only
//! usable for small bounds. [`solve_bfs`] runs breadth-first over
//! `(cell, visited pieces)` states, which finds the shortest covering walk
//! directly and scales to boards with a handful of pieces.

use std::collections::{HashMap, VecDeque};

use knights_core::{knight_targets, Board, Cell, Solution};

/// Largest piece count `solve_bfs` will accept (state space is
/// `cells * 2^pieces`).
pub const MAX_BFS_PIECES: usize = 20;

/// Unpruned bounded DFS. Every path of at most `upper_bound` moves is
/// enumerated; the first shortest complete one in enumeration order wins.
pub fn solve_exhaustive(board: &Board) -> Solution {
    let mut best: Option<Vec<Cell>> = None;
    let mut path = vec![board.start()];
    let mut counts = HashMap::new();
    if board.is_piece(board.start()) {
        counts.insert(board.start(), 1usize);
    }
    walk(board, &mut path, &mut counts, &mut best);

    match best {
        Some(path) => Solution::found(path),
        None => Solution::unsolved(board.upper_bound()),
    }
}

fn walk(
    board: &Board,
    path: &mut Vec<Cell>,
    counts: &mut HashMap<Cell, usize>,
    best: &mut Option<Vec<Cell>>,
) {
    if counts.len() == board.piece_count() {
        if best.as_ref().map_or(true, |b| path.len() < b.len()) {
            *best = Some(path.clone());
        }
        return;
    }
    if path.len() - 1 >= board.upper_bound() {
        return;
    }

    let last = path[path.len() - 1];
    for next in knight_targets(board.dimension(), last) {
        path.push(next);
        if board.is_piece(next) {
            *counts.entry(next).or_insert(0) += 1;
        }

        walk(board, path, counts, best);

        if board.is_piece(next) {
            if let Some(c) = counts.get_mut(&next) {
                *c -= 1;
                if *c == 0 {
                    counts.remove(&next);
                }
            }
        }
        path.pop();
    }
}

/// Breadth-first search over `(cell, visited piece mask)`.
///
/// # Panics
///
/// Panics if the board has more than [`MAX_BFS_PIECES`] pieces.
pub fn solve_bfs(board: &Board) -> Solution {
    let pieces: Vec<Cell> = board.pieces().ones().collect();
    assert!(
        pieces.len() <= MAX_BFS_PIECES,
        "bfs reference supports at most {MAX_BFS_PIECES} pieces, board has {}",
        pieces.len()
    );

    let bit_of = |cell: Cell| pieces.iter().position(|&p| p == cell).map(|i| 1u32 << i);
    let full: u32 = if pieces.is_empty() {
        0
    } else {
        u32::MAX >> (32 - pieces.len())
    };

    let start_mask = bit_of(board.start()).unwrap_or(0);
    let start = (board.start(), start_mask);

    // parent pointers double as the visited set
    let mut parent: HashMap<(Cell, u32), Option<(Cell, u32)>> = HashMap::new();
    parent.insert(start, None);
    let mut queue = VecDeque::from([(start, 0usize)]);

    while let Some((state @ (cell, mask), depth)) = queue.pop_front() {
        if mask == full {
            return Solution::found(unwind(&parent, state));
        }
        if depth >= board.upper_bound() {
            continue;
        }
        for next in knight_targets(board.dimension(), cell) {
            let next_state = (next, mask | bit_of(next).unwrap_or(0));
            if let std::collections::hash_map::Entry::Vacant(slot) = parent.entry(next_state) {
                slot.insert(Some(state));
                queue.push_back((next_state, depth + 1));
            }
        }
    }

    Solution::unsolved(board.upper_bound())
}

fn unwind(parent: &HashMap<(Cell, u32), Option<(Cell, u32)>>, end: (Cell, u32)) -> Vec<Cell> {
    let mut path = vec![end.0];
    let mut cursor = end;
    while let Some(Some(prev)) = parent.get(&cursor) {
        path.push(prev.0);
        cursor = *prev;
    }
    path.reverse();
    path
}

use fixedbitset::FixedBitSet;

use crate::board::{Board, PathViolation};
use crate::Cell;

/// A partial solution: the path walked so far and the pieces still
/// outstanding.
///
/// Nodes are never mutated once built. Branching clones the parent's path and
/// `unclaimed` set into the child, so sibling subtrees share nothing and can be
/// explored on different threads or shipped to another process as a plain
/// path prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    path: Vec<Cell>,
    remaining: usize,
    unclaimed: FixedBitSet,
}

impl SearchNode {
    pub(crate) fn root(board: &Board) -> Self {
        let mut unclaimed = board.pieces().clone();
        unclaimed.set(board.start(), false);
        Self {
            path: vec![board.start()],
            remaining: unclaimed.count_ones(..),
            unclaimed,
        }
    }

    /// Rebuilds the node reached by walking `prefix` from the root.
    ///
    /// An empty prefix denotes the root itself. Otherwise the prefix must
    /// begin at the start cell and consist of legal knight moves.
    pub fn from_path(board: &Board, prefix: &[Cell]) -> Result<Self, PathViolation> {
        let mut node = Self::root(board);
        if prefix.is_empty() {
            return Ok(node);
        }
        board.check_moves(prefix)?;
        for &cell in &prefix[1..] {
            node = node.child(cell);
        }
        Ok(node)
    }

    /// The node one jump further, landing on `cell`.
    pub fn child(&self, cell: Cell) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(cell);

        let mut unclaimed = self.unclaimed.clone();
        let remaining = if unclaimed.contains(cell) {
            unclaimed.set(cell, false);
            self.remaining - 1
        } else {
            self.remaining
        };
        debug_assert_eq!(remaining, unclaimed.count_ones(..));

        Self {
            path,
            remaining,
            unclaimed,
        }
    }

    #[inline]
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn into_path(self) -> Vec<Cell> {
        self.path
    }

    #[inline]
    pub fn last(&self) -> Cell {
        // paths always hold at least the start cell
        self.path[self.path.len() - 1]
    }

    /// Number of jumps taken, `path.len() - 1`.
    #[inline]
    pub fn moves(&self) -> usize {
        self.path.len() - 1
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn unclaimed(&self) -> &FixedBitSet {
        &self.unclaimed
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Admissible lower bound on the length of any completion: every
    /// outstanding piece costs at least one more jump.
    #[inline]
    pub fn lower_bound(&self) -> usize {
        self.moves() + self.remaining
    }
}

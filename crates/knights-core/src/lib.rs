//! Core types for the knight-move piece collection problem.
//!
//! A single knight starts on a square grid and must visit every marked
//! "piece" cell at least once, in as few moves as possible and never more
//! than the board's upper bound. This crate holds the problem description
//! and the search-state primitives shared by every solver.

pub mod board;
pub mod loader;
pub mod moves;
pub mod node;
pub mod solution;

/// Row-major cell index, `y * dimension + x`.
pub type Cell = usize;

pub use board::{Board, BoardError, PathViolation};
pub use fixedbitset::FixedBitSet;
pub use loader::{load_board, parse_board};
pub use moves::{is_knight_move, knight_targets, successors, KNIGHT_OFFSETS};
pub use node::SearchNode;
pub use solution::{SolveReport, Solution};

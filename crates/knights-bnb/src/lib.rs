//! Branch-and-bound search for the knight-move piece collection problem.
//!
//! [`explore`] is the engine: depth-first over one subtree, pruning every node
//! whose `moves + remaining pieces` cannot beat the shared [`BestSolution`].
//! [`build_frontier`] splits the root into independent subtrees, which
//! [`solve_parallel`] hands to a rayon pool and `knights-farm` hands to worker
//! agents.

pub mod config;
pub mod engine;
pub mod frontier;
pub mod incumbent;
pub mod solver;
pub mod stats;

pub use config::SearchConfig;
pub use engine::{explore, should_prune};
pub use frontier::build_frontier;
pub use incumbent::BestSolution;
pub use solver::{solve_parallel, solve_sequential, SearchError};
pub use stats::SearchStats;

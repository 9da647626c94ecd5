use std::fmt;
use std::time::Instant;

use knights_core::{Board, SolveReport};
use log::info;
use rayon::prelude::*;

use crate::config::SearchConfig;
use crate::engine::explore;
use crate::frontier::build_frontier;
use crate::incumbent::BestSolution;
use crate::stats::SearchStats;

/// Single-threaded B&B from the root.
pub fn solve_sequential(board: &Board) -> SolveReport {
    let started = Instant::now();
    let best = BestSolution::new(board.upper_bound());
    let mut stats = SearchStats::default();

    explore(board, board.root(), &best, &mut stats);

    let report = SolveReport {
        solution: best.to_solution(),
        work_units: 1,
        nodes: stats.expanded,
        elapsed: started.elapsed(),
    };
    info!(
        "sequential: length {} valid {} nodes {} in {:?}",
        report.solution.length(),
        report.solution.is_valid(),
        stats.expanded,
        report.elapsed
    );
    report
}

/// Shared-memory B&B: a breadth-first frontier, then one engine run per
/// frontier node on a rayon pool, all sharing a single [`BestSolution`].
pub fn solve_parallel(board: &Board, config: &SearchConfig) -> Result<SolveReport, SearchError> {
    let started = Instant::now();
    let best = BestSolution::new(board.upper_bound());
    let mut stats = SearchStats::default();

    let frontier = build_frontier(board, config.frontier_size, &best, &mut stats);
    let work_units = frontier.len() as u64;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .thread_name(|i| format!("knights-bnb-{i}"))
        .build()
        .map_err(SearchError::ThreadPool)?;

    let subtree_stats = pool.install(|| {
        frontier
            .into_par_iter()
            .map(|node| {
                let mut local = SearchStats::default();
                explore(board, node, &best, &mut local);
                local
            })
            .reduce(SearchStats::default, SearchStats::merged)
    });
    stats += subtree_stats;

    let report = SolveReport {
        solution: best.to_solution(),
        work_units,
        nodes: stats.expanded,
        elapsed: started.elapsed(),
    };
    info!(
        "parallel: length {} valid {} over {} subtrees, nodes {} in {:?}",
        report.solution.length(),
        report.solution.is_valid(),
        work_units,
        stats.expanded,
        report.elapsed
    );
    Ok(report)
}

#[derive(Debug)]
pub enum SearchError {
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::ThreadPool(err) => write!(f, "cannot start search threads: {err}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::ThreadPool(err) => Some(err),
        }
    }
}

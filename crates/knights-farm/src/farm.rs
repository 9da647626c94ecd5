use std::thread;

use knights_core::{Board, SolveReport};

use crate::config::FarmConfig;
use crate::coordinator::Coordinator;
use crate::error::TransportError;
use crate::transport::channel_links;
use crate::worker::run_worker;

/// Runs a coordinator on the calling thread and `config.workers` worker
/// agents on their own threads, each with its own copy of the board.
///
/// The reported node count includes the workers' expansions.
pub fn solve_farm(board: &Board, config: &FarmConfig) -> Result<SolveReport, TransportError> {
    let (mut hub, ends) = channel_links(config.workers);

    thread::scope(|scope| {
        let handles: Vec<_> = ends
            .into_iter()
            .map(|mut end| {
                let local = board.clone();
                thread::Builder::new()
                    .name(format!("knights-worker-{}", end.id()))
                    .spawn_scoped(scope, move || run_worker(&local, &mut end))
            })
            .collect::<Result<_, _>>()?;

        let outcome = Coordinator::new(board, config.frontier_size).run(&mut hub);
        let mut report = match outcome {
            Ok(report) => report,
            Err(err) => {
                // workers blocked on recv see the hang-up and return
                drop(hub);
                return Err(err);
            }
        };

        // the hub outlives the workers: one that starts late still has to
        // send its `ready` before it reads `finish`
        for (id, handle) in handles.into_iter().enumerate() {
            let summary = handle
                .join()
                .map_err(|_| TransportError::WorkerPanicked(id))??;
            report.nodes += summary.stats.expanded;
        }
        Ok(report)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farm_solves_small_board() {
        let board = Board::new(5, [4, 20, 24], 0, 8).unwrap();
        let config = FarmConfig {
            workers: 3,
            frontier_size: 10,
        };
        let report = solve_farm(&board, &config).unwrap();
        assert!(report.solution.is_valid());
        assert_eq!(board.validate_path(report.solution.path()), Ok(()));
        assert!(report.work_units >= 10);
    }

    #[test]
    fn settled_board_with_many_workers_finishes_cleanly() {
        let board = Board::new(3, [7], 0, 5).unwrap();
        let config = FarmConfig {
            workers: 4,
            frontier_size: 64,
        };
        for _ in 0..200 {
            let report = solve_farm(&board, &config).unwrap();
            assert_eq!(report.solution.path(), &[0, 7]);
            assert_eq!(report.work_units, 0);
        }
    }

    #[test]
    fn more_workers_than_frontier_items() {
        let board = Board::new(5, [4, 20, 24], 0, 8).unwrap();
        let config = FarmConfig {
            workers: 6,
            frontier_size: 2,
        };
        for _ in 0..50 {
            let report = solve_farm(&board, &config).unwrap();
            assert_eq!(board.validate_path(report.solution.path()), Ok(()));
        }
    }

    #[test]
    fn farm_without_workers_degrades_to_local() {
        let board = Board::new(5, [4, 20, 24], 0, 8).unwrap();
        let config = FarmConfig {
            workers: 0,
            frontier_size: 10,
        };
        let report = solve_farm(&board, &config).unwrap();
        assert!(report.solution.is_valid());
    }
}

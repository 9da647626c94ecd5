//! The task-farming master.
//!
//! Owns the only authoritative [`BestSolution`] of a distributed solve. It
//! builds the frontier, then answers every `ready`/`done` with the next
//! frontier item until the frontier is empty (distributing), keeps
//! collecting results until nothing is outstanding (draining), and finally
//! broadcasts `finish` (done). All of this runs on one thread, so the best
//! is never contended.
//!
//! A worker that hangs up before the run is over ends it with
//! [`TransportError::Disconnected`]; its work is not re-issued.

use std::collections::{BTreeSet, VecDeque};
use std::time::Instant;

use knights_bnb::{build_frontier, explore, BestSolution, SearchStats};
use knights_core::{Board, Cell, SearchNode, SolveReport};
use log::{debug, info, trace, warn};

use crate::error::TransportError;
use crate::message::{CoordinatorMessage, WorkerMessage};
use crate::transport::{CoordinatorLink, WorkerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Distributing,
    Draining,
    Done,
}

pub struct Coordinator<'a> {
    board: &'a Board,
    best: BestSolution,
    stats: SearchStats,
    frontier: VecDeque<SearchNode>,
    /// Workers currently holding a work item.
    busy: BTreeSet<WorkerId>,
    work_units: u64,
    phase: Phase,
    started: Instant,
}

impl<'a> Coordinator<'a> {
    /// Builds the frontier for `board`. The coordinator starts out
    /// distributing, or draining if the frontier already settled the board.
    pub fn new(board: &'a Board, frontier_size: usize) -> Self {
        let started = Instant::now();
        let best = BestSolution::new(board.upper_bound());
        let mut stats = SearchStats::default();
        let frontier = build_frontier(board, frontier_size, &best, &mut stats);
        let phase = if frontier.is_empty() {
            Phase::Draining
        } else {
            Phase::Distributing
        };

        Self {
            board,
            best,
            stats,
            frontier,
            busy: BTreeSet::new(),
            work_units: 0,
            phase,
            started,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outstanding(&self) -> usize {
        self.busy.len()
    }

    pub fn pending(&self) -> usize {
        self.frontier.len()
    }

    pub fn best(&self) -> &BestSolution {
        &self.best
    }

    /// Runs the protocol to completion over `link` and reports the
    /// aggregated best. With no workers the frontier is solved locally.
    pub fn run<L: CoordinatorLink>(mut self, link: &mut L) -> Result<SolveReport, TransportError> {
        let workers = link.worker_count();
        debug!(
            "coordinator: {} frontier items for {workers} workers",
            self.frontier.len()
        );

        if workers == 0 {
            self.solve_locally();
        } else {
            while !self.is_finished() {
                let (worker, message) = link.recv()?;
                self.handle(link, worker, message)?;
            }
        }

        self.phase = Phase::Done;
        for worker in 0..workers {
            // results are all in by now
            if let Err(err) = link.send(worker, CoordinatorMessage::Finish) {
                warn!("could not send finish to worker {worker}: {err}");
            }
        }

        let report = SolveReport {
            solution: self.best.to_solution(),
            work_units: self.work_units,
            nodes: self.stats.expanded,
            elapsed: self.started.elapsed(),
        };
        info!(
            "farm: length {} valid {} over {} work units in {:?}",
            report.solution.length(),
            report.solution.is_valid(),
            report.work_units,
            report.elapsed
        );
        Ok(report)
    }

    fn is_finished(&self) -> bool {
        self.frontier.is_empty() && self.busy.is_empty()
    }

    fn handle<L: CoordinatorLink>(
        &mut self,
        link: &mut L,
        worker: WorkerId,
        message: WorkerMessage,
    ) -> Result<(), TransportError> {
        match message {
            WorkerMessage::Ready => {
                if self.busy.contains(&worker) {
                    return Err(TransportError::Protocol(format!(
                        "worker {worker} asked for work while holding some"
                    )));
                }
            }
            WorkerMessage::Done { path } => {
                if !self.busy.remove(&worker) {
                    return Err(TransportError::Protocol(format!(
                        "worker {worker} reported a result without holding work"
                    )));
                }
                self.work_units += 1;
                if let Some(path) = path {
                    self.accept(worker, &path);
                }
            }
        }

        // a ready or done is a request for the next item
        if let Some(node) = self.frontier.pop_front() {
            let path = if node.moves() == 0 {
                Vec::new()
            } else {
                node.into_path()
            };
            trace!("work -> worker {worker}: {path:?}");
            link.send(worker, CoordinatorMessage::Work { path })?;
            self.busy.insert(worker);
        }

        if self.frontier.is_empty() && self.phase == Phase::Distributing {
            debug!(
                "coordinator: frontier drained, {} outstanding",
                self.busy.len()
            );
            self.phase = Phase::Draining;
        }
        Ok(())
    }

    fn accept(&mut self, worker: WorkerId, path: &[Cell]) {
        if let Err(violation) = self.board.validate_path(path) {
            warn!("ignoring result from worker {worker}: {violation}");
            return;
        }
        if self.best.try_install(path) {
            self.stats.improvements += 1;
            trace!("new best from worker {worker}: {} moves", path.len() - 1);
        }
    }

    fn solve_locally(&mut self) {
        self.phase = Phase::Draining;
        while let Some(node) = self.frontier.pop_front() {
            explore(self.board, node, &self.best, &mut self.stats);
            self.work_units += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{channel_links, StreamHub, WorkerLink};
    use crossbeam_channel::{unbounded, Receiver};
    use std::io::{self, Cursor, Read};

    /// A stream that stays open, yielding nothing, until its sender drops.
    struct Quiet(Receiver<u8>);

    impl Read for Quiet {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.recv() {
                Ok(byte) => {
                    buf[0] = byte;
                    Ok(1)
                }
                Err(_) => Ok(0),
            }
        }
    }

    #[test]
    fn zero_workers_solves_locally() {
        let board = Board::new(5, [4, 20, 24], 0, 8).unwrap();
        let (mut hub, _) = channel_links(0);
        let coordinator = Coordinator::new(&board, 4);
        let pending = coordinator.pending() as u64;
        let report = coordinator.run(&mut hub).unwrap();
        assert!(report.solution.is_valid());
        assert_eq!(report.work_units, pending);
    }

    #[test]
    fn frontier_settled_problem_finishes_without_messages() {
        let board = Board::new(3, [7], 0, 5).unwrap();
        let (mut hub, mut workers) = channel_links(1);
        let coordinator = Coordinator::new(&board, 100);
        assert_eq!(coordinator.pending(), 0);
        assert_eq!(coordinator.phase(), Phase::Draining);

        let report = coordinator.run(&mut hub).unwrap();
        assert_eq!(report.solution.path(), &[0, 7]);
        assert_eq!(report.work_units, 0);
        assert_eq!(workers[0].recv().ok(), Some(CoordinatorMessage::Finish));
    }

    #[test]
    fn hands_out_work_on_ready_and_done() {
        let board = Board::new(5, [4, 20, 24], 0, 8).unwrap();
        let (mut hub, mut workers) = channel_links(1);
        let mut coordinator = Coordinator::new(&board, 1);
        assert_eq!(coordinator.pending(), 1);

        coordinator
            .handle(&mut hub, 0, WorkerMessage::Ready)
            .unwrap();
        assert_eq!(coordinator.outstanding(), 1);
        assert_eq!(coordinator.phase(), Phase::Draining);
        // the root travels as an empty prefix
        assert_eq!(
            workers[0].recv().ok(),
            Some(CoordinatorMessage::Work { path: vec![] })
        );

        coordinator
            .handle(&mut hub, 0, WorkerMessage::Done { path: None })
            .unwrap();
        assert_eq!(coordinator.outstanding(), 0);
        assert!(coordinator.is_finished());
    }

    #[test]
    fn done_without_work_is_a_protocol_error() {
        let board = Board::new(5, [4, 20, 24], 0, 8).unwrap();
        let (mut hub, _workers) = channel_links(1);
        let mut coordinator = Coordinator::new(&board, 1);
        let err = coordinator
            .handle(&mut hub, 0, WorkerMessage::Done { path: None })
            .unwrap_err();
        assert!(matches!(err, TransportError::Protocol(_)));
    }

    #[test]
    fn done_from_a_worker_without_work_is_rejected_while_another_holds_some() {
        let board = Board::new(5, [4, 20, 24], 0, 8).unwrap();
        let (mut hub, _workers) = channel_links(2);
        let mut coordinator = Coordinator::new(&board, 1);
        coordinator
            .handle(&mut hub, 0, WorkerMessage::Ready)
            .unwrap();
        assert_eq!(coordinator.outstanding(), 1);

        let err = coordinator
            .handle(&mut hub, 1, WorkerMessage::Done { path: None })
            .unwrap_err();
        assert!(matches!(err, TransportError::Protocol(_)));
        let err = coordinator
            .handle(&mut hub, 0, WorkerMessage::Ready)
            .unwrap_err();
        assert!(matches!(err, TransportError::Protocol(_)));
    }

    #[test]
    fn worker_dying_with_work_ends_the_run() {
        let board = Board::new(5, [4, 20, 24], 0, 8).unwrap();
        // worker 0 asks for work and then closes its stream; worker 1 stays
        // connected but silent
        let dead: Box<dyn Read + Send> =
            Box::new(Cursor::new(b"{\"type\":\"ready\"}\n".to_vec()));
        let (keep_open, quiet) = unbounded();
        let silent: Box<dyn Read + Send> = Box::new(Quiet(quiet));
        let mut hub = StreamHub::new([(dead, Vec::new()), (silent, Vec::new())]);

        let result = Coordinator::new(&board, 1).run(&mut hub);
        assert!(matches!(result, Err(TransportError::Disconnected)));

        drop(keep_open);
        hub.join();
    }

    #[test]
    fn dropped_channel_worker_ends_the_run() {
        let board = Board::new(5, [4, 20, 24], 0, 8).unwrap();
        let (mut hub, mut workers) = channel_links(2);
        workers[0].send(WorkerMessage::Ready).unwrap();
        drop(workers.remove(0));

        let result = Coordinator::new(&board, 4).run(&mut hub);
        assert!(matches!(result, Err(TransportError::Disconnected)));
    }

    #[test]
    fn invalid_results_are_ignored_and_better_ones_installed() {
        let board = Board::new(4, [3, 13], 0, 8).unwrap();
        let (mut hub, _workers) = channel_links(1);
        let mut coordinator = Coordinator::new(&board, 1);
        coordinator
            .handle(&mut hub, 0, WorkerMessage::Ready)
            .unwrap();

        // misses piece 3
        coordinator.accept(0, &[0, 6, 13]);
        assert!(!coordinator.best().is_defined());

        coordinator.accept(0, &[0, 6, 13, 11, 5, 3]);
        assert_eq!(coordinator.best().length(), 5);
        // equal length does not replace
        coordinator.accept(0, &[0, 6, 13, 11, 5, 3]);
        assert_eq!(coordinator.best().improvements(), vec![5]);
    }
}

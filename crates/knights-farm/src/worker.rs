//! Worker agent: pull a subtree, exhaust it, report, repeat.

use knights_bnb::{explore, BestSolution, SearchStats};
use knights_core::{Board, SearchNode};
use log::{debug, trace};

use crate::error::TransportError;
use crate::message::{CoordinatorMessage, WorkerMessage};
use crate::transport::WorkerLink;

/// What one worker did over its lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    pub work_units: u64,
    pub stats: SearchStats,
}

/// Runs the worker side of the protocol until `finish` arrives.
///
/// Every work item gets a fresh local [`BestSolution`]; a worker never sees
/// the coordinator's global best, nor anything from a previous item.
pub fn run_worker<L: WorkerLink>(
    board: &Board,
    link: &mut L,
) -> Result<WorkerSummary, TransportError> {
    let mut summary = WorkerSummary::default();
    link.send(WorkerMessage::Ready)?;

    loop {
        match link.recv()? {
            CoordinatorMessage::Work { path } => {
                let root = SearchNode::from_path(board, &path).map_err(|violation| {
                    TransportError::Protocol(format!("unusable work prefix {path:?}: {violation}"))
                })?;
                trace!("exploring subtree under {path:?}");

                let best = BestSolution::new(board.upper_bound());
                explore(board, root, &best, &mut summary.stats);
                summary.work_units += 1;

                link.send(WorkerMessage::Done {
                    path: best.snapshot(),
                })?;
            }
            CoordinatorMessage::Finish => {
                debug!(
                    "worker finished after {} work units, {} nodes",
                    summary.work_units, summary.stats.expanded
                );
                return Ok(summary);
            }
        }
    }
}

//! The four protocol messages, split by direction.
//!
//! On the wire every message is one JSON object tagged by `"type"`:
//!
//! ```text
//! {"type":"ready"}
//! {"type":"work","path":[0,7,14]}
//! {"type":"done","path":[0,7,14,5]}
//! {"type":"done","path":null}
//! {"type":"finish"}
//! ```
//!
//! A `work` message whose path is empty denotes the root, i.e. the node
//! holding only the start cell.

use knights_core::Cell;
use serde::{Deserialize, Serialize};

/// Sent by a worker agent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerMessage {
    /// Idle and asking for work. Sent once, on start-up.
    Ready,
    /// Finished the assigned subtree. `None` means no complete path was
    /// found in it. Doubles as the request for the next item.
    Done { path: Option<Vec<Cell>> },
}

/// Sent by the coordinator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CoordinatorMessage {
    /// Explore the subtree under this path prefix.
    Work { path: Vec<Cell> },
    /// No more work will come; stop.
    Finish,
}

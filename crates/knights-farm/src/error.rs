use std::fmt;

use crate::transport::WorkerId;

/// Failures at the messaging boundary.
///
/// The protocol assumes a reliable, ordered transport; these errors end the
/// solve rather than trigger any retry.
#[derive(Debug)]
pub enum TransportError {
    Io(std::io::Error),
    Codec(serde_json::Error),
    /// The peer hung up (all workers, or the coordinator).
    Disconnected,
    /// A peer sent something the protocol does not allow at this point.
    Protocol(String),
    WorkerPanicked(WorkerId),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Io(err) => write!(f, "transport i/o failed: {err}"),
            TransportError::Codec(err) => write!(f, "malformed message: {err}"),
            TransportError::Disconnected => write!(f, "peer disconnected"),
            TransportError::Protocol(what) => write!(f, "protocol violation: {what}"),
            TransportError::WorkerPanicked(id) => write!(f, "worker {id} panicked"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Io(err) => Some(err),
            TransportError::Codec(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        TransportError::Io(err)
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Codec(err)
    }
}

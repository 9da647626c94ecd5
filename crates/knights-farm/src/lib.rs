//! Pull-based task farming for the knight-move search.
//!
//! One [`Coordinator`] splits the problem into a frontier of subtrees and
//! hands them out on request; any number of workers ([`run_worker`]) each
//! exhaust one subtree at a time with their own local best and report back.
//! The coordinator alone compares results across subtrees.

pub mod codec;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod farm;
pub mod message;
pub mod transport;
pub mod worker;

pub use config::FarmConfig;
pub use coordinator::{Coordinator, Phase};
pub use error::TransportError;
pub use farm::solve_farm;
pub use message::{CoordinatorMessage, WorkerMessage};
pub use transport::{
    channel_links, ChannelHub, ChannelWorker, CoordinatorLink, StreamHub, StreamWorker, WorkerId,
    WorkerLink,
};
pub use worker::{run_worker, WorkerSummary};

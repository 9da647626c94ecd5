//! Message-passing seams between the coordinator and its workers.
//!
//! The coordinator only ever needs a fan-in receive ("next message from any
//! worker") and an addressed send. A worker only talks to the coordinator.
//! Two implementations exist: crossbeam channels between threads of one
//! process, and JSON lines over byte streams (child process pipes).

use std::io::{BufRead, BufReader, Read, Write};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::debug;

use crate::codec::{read_message, write_message};
use crate::error::TransportError;
use crate::message::{CoordinatorMessage, WorkerMessage};

/// Position of a worker in the coordinator's link, `0..worker_count()`.
pub type WorkerId = usize;

pub trait CoordinatorLink {
    fn worker_count(&self) -> usize;

    /// Blocks until any worker sends something.
    fn recv(&mut self) -> Result<(WorkerId, WorkerMessage), TransportError>;

    fn send(&mut self, worker: WorkerId, message: CoordinatorMessage)
        -> Result<(), TransportError>;
}

pub trait WorkerLink {
    fn send(&mut self, message: WorkerMessage) -> Result<(), TransportError>;

    /// Blocks until the coordinator sends something.
    fn recv(&mut self) -> Result<CoordinatorMessage, TransportError>;
}

/// What reaches a coordinator's fan-in channel: a message, or the error
/// that ended a worker's side of the link. A worker that goes away always
/// leaves one `Err` behind.
type Inbound = (WorkerId, Result<WorkerMessage, TransportError>);

fn take_inbound(inbox: &Receiver<Inbound>) -> Result<(WorkerId, WorkerMessage), TransportError> {
    let (id, message) = inbox.recv().map_err(|_| TransportError::Disconnected)?;
    match message {
        Ok(message) => Ok((id, message)),
        Err(err) => {
            debug!("worker {id} is gone: {err}");
            Err(err)
        }
    }
}

/// Coordinator end of an in-process farm.
#[derive(Debug)]
pub struct ChannelHub {
    inbox: Receiver<Inbound>,
    outboxes: Vec<Sender<CoordinatorMessage>>,
}

/// Worker end of an in-process farm. Dropping it tells the hub the worker
/// has hung up.
#[derive(Debug)]
pub struct ChannelWorker {
    id: WorkerId,
    outbox: Sender<Inbound>,
    inbox: Receiver<CoordinatorMessage>,
}

impl ChannelWorker {
    pub fn id(&self) -> WorkerId {
        self.id
    }
}

impl Drop for ChannelWorker {
    fn drop(&mut self) {
        // the hub may already be gone
        let _ = self
            .outbox
            .send((self.id, Err(TransportError::Disconnected)));
    }
}

/// Wires one hub to `workers` worker ends.
///
/// The hub reports [`TransportError::Disconnected`] as soon as any worker
/// end is dropped, and keeps doing so once all of them are.
pub fn channel_links(workers: usize) -> (ChannelHub, Vec<ChannelWorker>) {
    let (to_hub, inbox) = unbounded();
    let mut outboxes = Vec::with_capacity(workers);
    let mut ends = Vec::with_capacity(workers);
    for id in 0..workers {
        let (to_worker, worker_inbox) = unbounded();
        outboxes.push(to_worker);
        ends.push(ChannelWorker {
            id,
            outbox: to_hub.clone(),
            inbox: worker_inbox,
        });
    }
    (ChannelHub { inbox, outboxes }, ends)
}

impl CoordinatorLink for ChannelHub {
    fn worker_count(&self) -> usize {
        self.outboxes.len()
    }

    fn recv(&mut self) -> Result<(WorkerId, WorkerMessage), TransportError> {
        take_inbound(&self.inbox)
    }

    fn send(
        &mut self,
        worker: WorkerId,
        message: CoordinatorMessage,
    ) -> Result<(), TransportError> {
        let outbox = self
            .outboxes
            .get(worker)
            .ok_or_else(|| TransportError::Protocol(format!("no worker {worker}")))?;
        outbox
            .send(message)
            .map_err(|_| TransportError::Disconnected)
    }
}

impl WorkerLink for ChannelWorker {
    fn send(&mut self, message: WorkerMessage) -> Result<(), TransportError> {
        self.outbox
            .send((self.id, Ok(message)))
            .map_err(|_| TransportError::Disconnected)
    }

    fn recv(&mut self) -> Result<CoordinatorMessage, TransportError> {
        self.inbox.recv().map_err(|_| TransportError::Disconnected)
    }
}

/// Coordinator end over byte streams, one `(reader, writer)` pair per
/// worker. A reader thread per worker decodes lines into a shared fan-in
/// channel and reports end of stream as a hang-up; sends write straight to
/// the worker's stream.
pub struct StreamHub<W: Write> {
    inbox: Receiver<Inbound>,
    writers: Vec<W>,
    readers: Vec<JoinHandle<()>>,
}

impl<W: Write> StreamHub<W> {
    pub fn new<R>(streams: impl IntoIterator<Item = (R, W)>) -> Self
    where
        R: Read + Send + 'static,
    {
        let (forward, inbox) = unbounded::<Inbound>();
        let mut writers = Vec::new();
        let mut readers = Vec::new();

        for (id, (reader, writer)) in streams.into_iter().enumerate() {
            writers.push(writer);
            let forward = forward.clone();
            readers.push(thread::spawn(move || {
                let mut reader = BufReader::new(reader);
                loop {
                    match read_message::<_, WorkerMessage>(&mut reader) {
                        Ok(Some(message)) => {
                            if forward.send((id, Ok(message))).is_err() {
                                break;
                            }
                        }
                        Ok(None) => {
                            let _ = forward.send((id, Err(TransportError::Disconnected)));
                            break;
                        }
                        Err(err) => {
                            let _ = forward.send((id, Err(err)));
                            break;
                        }
                    }
                }
            }));
        }

        Self {
            inbox,
            writers,
            readers,
        }
    }

    /// Waits for every reader thread, i.e. for every worker to close its
    /// output.
    pub fn join(self) {
        drop(self.writers);
        for handle in self.readers {
            let _ = handle.join();
        }
    }
}

impl<W: Write> CoordinatorLink for StreamHub<W> {
    fn worker_count(&self) -> usize {
        self.writers.len()
    }

    fn recv(&mut self) -> Result<(WorkerId, WorkerMessage), TransportError> {
        take_inbound(&self.inbox)
    }

    fn send(
        &mut self,
        worker: WorkerId,
        message: CoordinatorMessage,
    ) -> Result<(), TransportError> {
        let writer = self
            .writers
            .get_mut(worker)
            .ok_or_else(|| TransportError::Protocol(format!("no worker {worker}")))?;
        write_message(writer, &message)
    }
}

/// Worker end over byte streams, e.g. a process's stdin and stdout.
pub struct StreamWorker<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StreamWorker<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> WorkerLink for StreamWorker<R, W> {
    fn send(&mut self, message: WorkerMessage) -> Result<(), TransportError> {
        write_message(&mut self.writer, &message)
    }

    fn recv(&mut self) -> Result<CoordinatorMessage, TransportError> {
        read_message(&mut self.reader)?.ok_or(TransportError::Disconnected)
    }
}

//! Farm over child processes: each worker is this binary in `worker` mode,
//! talking the wire protocol on its stdin and stdout.

use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use anyhow::{anyhow, Context};
use knights_core::{Board, SolveReport};
use knights_farm::{Coordinator, FarmConfig, StreamHub};
use log::{debug, warn};

pub fn solve_with_processes(
    board_path: &Path,
    board: &Board,
    config: &FarmConfig,
) -> anyhow::Result<SolveReport> {
    let mut children = Vec::with_capacity(config.workers);
    let mut streams = Vec::with_capacity(config.workers);

    let outcome = match spawn_workers(board_path, config.workers, &mut children, &mut streams) {
        Ok(()) => {
            let mut hub = StreamHub::new(streams);
            let outcome = Coordinator::new(board, config.frontier_size).run(&mut hub);
            hub.join();
            outcome.map_err(anyhow::Error::from)
        }
        Err(err) => {
            // closing the pipes stops the workers that did start
            drop(streams);
            Err(err)
        }
    };

    reap(children);
    outcome
}

/// Starts `count` workers. Every child that starts is pushed to `children`
/// before anything else can fail, so the caller can always reap it.
fn spawn_workers(
    board_path: &Path,
    count: usize,
    children: &mut Vec<Child>,
    streams: &mut Vec<(ChildStdout, ChildStdin)>,
) -> anyhow::Result<()> {
    let exe = std::env::current_exe().context("locating the knights executable")?;

    for _ in 0..count {
        let mut child = Command::new(&exe)
            .arg("worker")
            .arg(board_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("spawning worker {}", exe.display()))?;
        debug!("spawned worker process {}", child.id());
        let pipes = child.stdout.take().zip(child.stdin.take());
        children.push(child);

        let pipes = pipes.ok_or_else(|| anyhow!("worker pipes not captured"))?;
        streams.push(pipes);
    }
    Ok(())
}

fn reap(children: Vec<Child>) {
    for mut child in children {
        // a child whose pipes were never handed to the hub
        drop(child.stdin.take());
        match child.wait() {
            Ok(status) if !status.success() => warn!("worker {} exited with {status}", child.id()),
            Ok(_) => {}
            Err(err) => warn!("could not reap worker {}: {err}", child.id()),
        }
    }
}

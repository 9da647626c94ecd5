use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use knights_bnb::{solve_parallel, solve_sequential};
use knights_core::{load_board, Board, SolveReport};
use knights_farm::{run_worker, solve_farm, StreamWorker};

mod cli;
mod config;
mod processes;

use cli::{Cli, Command, Regime, SolveArgs};
use config::RunConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Solve(args) => solve(&args),
        Command::Worker { board } => worker(&board),
    }
}

fn solve(args: &SolveArgs) -> anyhow::Result<()> {
    let config = RunConfig::resolve(args)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.json && !args.no_header {
        writeln!(out, "{}", SolveReport::CSV_HEADER)?;
    }

    for path in &args.boards {
        let board = load_board(path).with_context(|| format!("loading {}", path.display()))?;
        let report = run(&config, path, &board)
            .with_context(|| format!("solving {}", path.display()))?;

        if args.json {
            writeln!(out, "{}", report.to_json()?)?;
        } else {
            writeln!(out, "{}", report.csv_row(&path.display().to_string()))?;
        }
    }
    Ok(())
}

fn run(config: &RunConfig, path: &Path, board: &Board) -> anyhow::Result<SolveReport> {
    Ok(match config.regime {
        Regime::Sequential => solve_sequential(board),
        Regime::Parallel => solve_parallel(board, &config.search)?,
        Regime::Farm => solve_farm(board, &config.farm)?,
        Regime::Processes => processes::solve_with_processes(path, board, &config.farm)?,
    })
}

fn worker(path: &Path) -> anyhow::Result<()> {
    let board = load_board(path).with_context(|| format!("loading {}", path.display()))?;
    // stdout carries the protocol; logging goes to stderr
    let mut link = StreamWorker::new(io::stdin().lock(), io::stdout().lock());
    run_worker(&board, &mut link)?;
    Ok(())
}

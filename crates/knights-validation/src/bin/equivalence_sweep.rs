//! Runs random boards through every solver and writes one CSV row per
//! instance to stdout. Exits non-zero if any instance disagrees.

use std::io::{self, Write};

use anyhow::bail;
use clap::Parser;
use knights_bnb::SearchConfig;
use knights_brute_force::MAX_BFS_PIECES;
use knights_farm::FarmConfig;
use knights_validation::{compare, random_board, InstanceSpace, SweepRow};
use log::{info, warn};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

#[derive(Parser)]
#[command(name = "equivalence-sweep")]
#[command(about = "Compare sequential, parallel and farmed search against brute force")]
struct Args {
    #[arg(long, default_value_t = 200)]
    instances: usize,

    #[arg(long, default_value_t = 1)]
    seed: u64,

    #[arg(long, default_value_t = 6)]
    max_dimension: usize,

    #[arg(long, default_value_t = 5)]
    max_pieces: usize,

    #[arg(long, default_value_t = 10)]
    max_upper_bound: usize,

    #[arg(long, default_value_t = 4)]
    workers: usize,

    #[arg(long, default_value_t = 32)]
    frontier: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.max_pieces > MAX_BFS_PIECES {
        bail!("--max-pieces is capped at {MAX_BFS_PIECES} by the BFS reference");
    }

    let space = InstanceSpace {
        max_dimension: args.max_dimension,
        max_pieces: args.max_pieces,
        max_upper_bound: args.max_upper_bound,
        ..InstanceSpace::default()
    };
    let search = SearchConfig {
        frontier_size: args.frontier,
        ..SearchConfig::default()
    };
    let farm = FarmConfig {
        workers: args.workers,
        frontier_size: args.frontier,
    };
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(args.seed);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", SweepRow::CSV_HEADER)?;

    let mut mismatches = 0;
    for instance in 0..args.instances {
        let board = random_board(&mut rng, &space);
        let row = compare(instance, &board, &search, &farm)?;
        if !row.agree() || !row.paths_valid {
            warn!("instance {instance} disagrees: {board:?}");
            mismatches += 1;
        }
        writeln!(out, "{}", row.csv())?;
    }

    info!("{} instances, {mismatches} mismatches", args.instances);
    if mismatches > 0 {
        bail!("{mismatches} of {} instances disagree", args.instances);
    }
    Ok(())
}

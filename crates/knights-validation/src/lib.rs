//! Cross-checks every solver on random boards.
//!
//! Each instance is solved by the BFS reference, the sequential engine, the
//! rayon driver and the thread farm. A row records all four lengths and
//! whether they agree; any disagreement is a bug in one of them.

use std::time::Instant;

use knights_bnb::{solve_parallel, solve_sequential, SearchConfig};
use knights_brute_force::solve_bfs;
use knights_core::Board;
use knights_farm::{solve_farm, FarmConfig};
use rand::Rng;

/// Shape of the random instances.
#[derive(Clone, Debug)]
pub struct InstanceSpace {
    pub min_dimension: usize,
    pub max_dimension: usize,
    pub max_pieces: usize,
    pub max_upper_bound: usize,
}

impl Default for InstanceSpace {
    fn default() -> Self {
        Self {
            min_dimension: 3,
            max_dimension: 6,
            max_pieces: 5,
            max_upper_bound: 10,
        }
    }
}

pub fn random_board<R: Rng>(rng: &mut R, space: &InstanceSpace) -> Board {
    let dimension = rng.gen_range(space.min_dimension..=space.max_dimension);
    let cells = dimension * dimension;
    let pieces: Vec<usize> = (0..rng.gen_range(0..=space.max_pieces))
        .map(|_| rng.gen_range(0..cells))
        .collect();
    let start = rng.gen_range(0..cells);
    let upper_bound = rng.gen_range(0..=space.max_upper_bound);
    // dimension >= 1 and every index is drawn below `cells`
    Board::new(dimension, pieces, start, upper_bound)
        .unwrap_or_else(|err| unreachable!("generated board is well-formed: {err}"))
}

#[derive(Clone, Debug)]
pub struct SweepRow {
    pub instance: usize,
    pub dimension: usize,
    pub pieces: usize,
    pub upper_bound: usize,
    pub reference: usize,
    pub sequential: usize,
    pub parallel: usize,
    pub farm: usize,
    pub paths_valid: bool,
    pub sequential_ms: f64,
    pub parallel_ms: f64,
    pub farm_ms: f64,
}

impl SweepRow {
    pub const CSV_HEADER: &'static str = "instance,dimension,pieces,upper_bound,reference,sequential,parallel,farm,agree,paths_valid,sequential_ms,parallel_ms,farm_ms";

    pub fn agree(&self) -> bool {
        self.sequential == self.reference
            && self.parallel == self.reference
            && self.farm == self.reference
    }

    pub fn csv(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{:.3},{:.3},{:.3}",
            self.instance,
            self.dimension,
            self.pieces,
            self.upper_bound,
            self.reference,
            self.sequential,
            self.parallel,
            self.farm,
            self.agree(),
            self.paths_valid,
            self.sequential_ms,
            self.parallel_ms,
            self.farm_ms,
        )
    }
}

pub fn compare(
    instance: usize,
    board: &Board,
    search: &SearchConfig,
    farm: &FarmConfig,
) -> anyhow::Result<SweepRow> {
    let reference = solve_bfs(board);

    let t = Instant::now();
    let seq = solve_sequential(board);
    let sequential_ms = t.elapsed().as_secs_f64() * 1e3;

    let t = Instant::now();
    let par = solve_parallel(board, search)?;
    let parallel_ms = t.elapsed().as_secs_f64() * 1e3;

    let t = Instant::now();
    let farmed = solve_farm(board, farm)?;
    let farm_ms = t.elapsed().as_secs_f64() * 1e3;

    let paths_valid = [&seq.solution, &par.solution, &farmed.solution]
        .iter()
        .all(|s| !s.is_valid() || board.validate_path(s.path()).is_ok());

    Ok(SweepRow {
        instance,
        dimension: board.dimension(),
        pieces: board.piece_count(),
        upper_bound: board.upper_bound(),
        reference: reference.length(),
        sequential: seq.solution.length(),
        parallel: par.solution.length(),
        farm: farmed.solution.length(),
        paths_valid,
        sequential_ms,
        parallel_ms,
        farm_ms,
    })
}

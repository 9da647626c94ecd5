use knights_bnb::{
    build_frontier, explore, solve_parallel, solve_sequential, BestSolution, SearchConfig,
    SearchStats,
};
use knights_brute_force::{solve_bfs, solve_exhaustive};
use knights_core::Board;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

fn random_board(rng: &mut Xoshiro256PlusPlus, max_bound: usize) -> Board {
    let dimension = rng.gen_range(3..=5);
    let cells = dimension * dimension;
    let piece_count = rng.gen_range(0..=4);
    let pieces: Vec<usize> = (0..piece_count).map(|_| rng.gen_range(0..cells)).collect();
    let start = rng.gen_range(0..cells);
    let upper_bound = rng.gen_range(0..=max_bound);
    Board::new(dimension, pieces, start, upper_bound).unwrap()
}

#[test]
fn matches_unpruned_search_on_small_bounds() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x6b6e_6967);
    for _ in 0..60 {
        let board = random_board(&mut rng, 6);
        let reference = solve_exhaustive(&board);
        let report = solve_sequential(&board);

        assert_eq!(report.solution.is_valid(), reference.is_valid(), "{board:?}");
        assert_eq!(report.solution.length(), reference.length(), "{board:?}");
        if report.solution.is_valid() {
            assert_eq!(board.validate_path(report.solution.path()), Ok(()));
        }
    }
}

#[test]
fn sequential_parallel_and_bfs_agree() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    for round in 0..40 {
        let board = random_board(&mut rng, 8);
        let reference = solve_bfs(&board);
        let seq = solve_sequential(&board);
        let config = SearchConfig {
            frontier_size: 1 + round % 17,
            threads: 3,
        };
        let par = solve_parallel(&board, &config).unwrap();

        assert_eq!(seq.solution.length(), reference.length(), "{board:?}");
        assert_eq!(par.solution.length(), reference.length(), "{board:?}");
        assert_eq!(par.solution.is_valid(), reference.is_valid(), "{board:?}");
        if par.solution.is_valid() {
            assert_eq!(board.validate_path(par.solution.path()), Ok(()));
        }
    }
}

#[test]
fn installed_lengths_strictly_decrease() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    for _ in 0..20 {
        let board = random_board(&mut rng, 8);
        let best = BestSolution::new(board.upper_bound());
        let mut stats = SearchStats::default();
        for node in build_frontier(&board, 12, &best, &mut stats) {
            explore(&board, node, &best, &mut stats);
        }

        let history = best.improvements();
        assert!(history.windows(2).all(|w| w[0] > w[1]), "{history:?}");
        assert_eq!(history.len() as u64, stats.improvements);
        assert_eq!(history.last().copied().unwrap_or(best.length()), best.length());
    }
}

#[test]
fn frontier_then_sequential_subtrees_equals_plain_dfs() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(99);
    for _ in 0..20 {
        let board = random_board(&mut rng, 7);
        let best = BestSolution::new(board.upper_bound());
        let mut stats = SearchStats::default();
        for node in build_frontier(&board, 5, &best, &mut stats) {
            explore(&board, node, &best, &mut stats);
        }
        assert_eq!(best.length(), solve_sequential(&board).solution.length());
    }
}

#[test]
fn documented_scenarios() {
    // single jump (0,0) -> (1,2)
    let jump = solve_sequential(&Board::new(3, [7], 0, 5).unwrap());
    assert!(jump.solution.is_valid());
    assert_eq!(jump.solution.path(), &[0, 7]);

    // the centre of a 3x3 grid has no knight moves at all
    let centre = solve_sequential(&Board::new(3, [4], 0, 5).unwrap());
    assert!(!centre.solution.is_valid());
    assert_eq!(centre.solution.length(), 6);

    let empty = solve_sequential(&Board::new(4, [], 6, 3).unwrap());
    assert_eq!(empty.solution.path(), &[6]);
    assert_eq!(empty.solution.length(), 0);

    let zero = solve_sequential(&Board::new(4, [15], 0, 0).unwrap());
    assert!(!zero.solution.is_valid());
}

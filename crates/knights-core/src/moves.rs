//! Knight move generation.
//!
//! The offset table is fixed. Successors are always produced in table
//! order, which the DFS engine relies on: children are pushed in this order
//! and popped in reverse.

use crate::board::Board;
use crate::node::SearchNode;
use crate::Cell;

/// `(dx, dy)` jumps, in enumeration order.
pub const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// In-bounds knight targets of `cell` on a `dimension`-sided grid, in
/// [`KNIGHT_OFFSETS`] order.
pub fn knight_targets(dimension: usize, cell: Cell) -> impl Iterator<Item = Cell> {
    let x = (cell % dimension) as isize;
    let y = (cell / dimension) as isize;
    let side = dimension as isize;

    KNIGHT_OFFSETS.into_iter().filter_map(move |(dx, dy)| {
        let (nx, ny) = (x + dx, y + dy);
        if (0..side).contains(&nx) && (0..side).contains(&ny) {
            Some((ny * side + nx) as Cell)
        } else {
            None
        }
    })
}

#[inline]
pub fn is_knight_move(dimension: usize, from: Cell, to: Cell) -> bool {
    let (fx, fy) = ((from % dimension) as isize, (from / dimension) as isize);
    let (tx, ty) = ((to % dimension) as isize, (to / dimension) as isize);
    KNIGHT_OFFSETS.contains(&(tx - fx, ty - fy))
}

/// Child nodes of `node`, one per legal jump from its last cell.
pub fn successors<'a>(
    board: &'a Board,
    node: &'a SearchNode,
) -> impl Iterator<Item = SearchNode> + 'a {
    knight_targets(board.dimension(), node.last()).map(move |cell| node.child(cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_of_three_by_three_has_two_targets_in_table_order() {
        // (0,0): (1,2) = 7 and (2,1) = 5
        assert_eq!(knight_targets(3, 0).collect::<Vec<_>>(), vec![7, 5]);
    }

    #[test]
    fn centre_of_three_by_three_is_isolated() {
        assert_eq!(knight_targets(3, 4).count(), 0);
    }

    #[test]
    fn interior_cell_enumerates_all_eight_in_order() {
        // (2,2) on a 5x5 grid
        let targets: Vec<_> = knight_targets(5, 12).collect();
        assert_eq!(targets, vec![23, 19, 9, 3, 1, 5, 15, 21]);
    }

    #[test]
    fn no_target_wraps_around_a_row() {
        // (4,0) on 5x5: (x+1) or (x+2) would wrap into the next row
        let targets: Vec<_> = knight_targets(5, 4).collect();
        assert_eq!(targets, vec![7, 13]);
        for t in targets {
            assert!(is_knight_move(5, 4, t));
        }
    }

    #[test]
    fn one_by_one_grid_has_no_moves() {
        assert_eq!(knight_targets(1, 0).count(), 0);
    }

    #[test]
    fn is_knight_move_rejects_wrapping_and_short_steps() {
        assert!(is_knight_move(8, 0, 17));
        assert!(!is_knight_move(8, 0, 1));
        assert!(!is_knight_move(8, 0, 9));
        // (7,0) -> (1,1) would be dx +2 if the board wrapped
        assert!(!is_knight_move(8, 7, 9));
    }

    #[test]
    fn successors_extend_path_and_claim_pieces() {
        let board = Board::new(3, [7], 0, 4).unwrap();
        let root = board.root();
        let children: Vec<_> = successors(&board, &root).collect();

        assert_eq!(children.len(), 2);
        assert_eq!(children[0].path(), &[0, 7]);
        assert_eq!(children[0].remaining(), 0);
        assert_eq!(children[1].path(), &[0, 5]);
        assert_eq!(children[1].remaining(), 1);
        // parent untouched
        assert_eq!(root.remaining(), 1);
        assert_eq!(root.path(), &[0]);
    }
}

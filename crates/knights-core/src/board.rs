use std::fmt;

use fixedbitset::FixedBitSet;

use crate::moves::is_knight_move;
use crate::node::SearchNode;
use crate::Cell;

/// Immutable description of one problem instance.
///
/// Cells are numbered row-major: `cell = y * dimension + x`. A `Board` is
/// never mutated after construction, so it can be shared by reference across
/// any number of search threads, or cloned into worker agents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    dimension: usize,
    pieces: FixedBitSet,
    start: Cell,
    upper_bound: usize,
}

impl Board {
    /// Builds a board, checking that every index fits on the grid.
    pub fn new(
        dimension: usize,
        pieces: impl IntoIterator<Item = Cell>,
        start: Cell,
        upper_bound: usize,
    ) -> Result<Self, BoardError> {
        if dimension == 0 {
            return Err(BoardError::EmptyGrid);
        }
        let cells = dimension
            .checked_mul(dimension)
            .ok_or(BoardError::EmptyGrid)?;
        if start >= cells {
            return Err(BoardError::CellOutOfRange { cell: start, cells });
        }

        let mut set = FixedBitSet::with_capacity(cells);
        for piece in pieces {
            if piece >= cells {
                return Err(BoardError::CellOutOfRange { cell: piece, cells });
            }
            set.insert(piece);
        }

        Ok(Self {
            dimension,
            pieces: set,
            start,
            upper_bound,
        })
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.dimension * self.dimension
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    /// Maximum number of moves a solution may use.
    #[inline]
    pub fn upper_bound(&self) -> usize {
        self.upper_bound
    }

    #[inline]
    pub fn is_piece(&self, cell: Cell) -> bool {
        self.pieces.contains(cell)
    }

    pub fn pieces(&self) -> &FixedBitSet {
        &self.pieces
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.count_ones(..)
    }

    /// `(x, y)` of a cell: column then row.
    #[inline]
    pub fn coords(&self, cell: Cell) -> (usize, usize) {
        (cell % self.dimension, cell / self.dimension)
    }

    #[inline]
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        y * self.dimension + x
    }

    /// The node every search starts from: the path `[start]` with the start
    /// cell already claimed.
    pub fn root(&self) -> SearchNode {
        SearchNode::root(self)
    }

    /// Checks that `path` starts at the start cell and that every step is a
    /// legal in-bounds knight move. Says nothing about piece coverage.
    pub fn check_moves(&self, path: &[Cell]) -> Result<(), PathViolation> {
        let first = *path.first().ok_or(PathViolation::Empty)?;
        if first != self.start {
            return Err(PathViolation::WrongStart {
                expected: self.start,
                found: first,
            });
        }
        for (index, &cell) in path.iter().enumerate() {
            if cell >= self.cell_count() {
                return Err(PathViolation::OutOfRange { index, cell });
            }
        }
        for (index, pair) in path.windows(2).enumerate() {
            if !is_knight_move(self.dimension, pair[0], pair[1]) {
                return Err(PathViolation::IllegalMove {
                    index: index + 1,
                    from: pair[0],
                    to: pair[1],
                });
            }
        }
        Ok(())
    }

    /// Full solution check: legal moves, every piece visited, and no more
    /// than `upper_bound` moves.
    pub fn validate_path(&self, path: &[Cell]) -> Result<(), PathViolation> {
        self.check_moves(path)?;

        let moves = path.len() - 1;
        if moves > self.upper_bound {
            return Err(PathViolation::TooLong {
                moves,
                upper_bound: self.upper_bound,
            });
        }

        let mut visited = FixedBitSet::with_capacity(self.cell_count());
        visited.extend(path.iter().copied());
        if let Some(cell) = self.pieces.ones().find(|&p| !visited.contains(p)) {
            return Err(PathViolation::MissingPiece { cell });
        }
        Ok(())
    }
}

/// Reasons a board cannot be constructed or loaded.
#[derive(Debug)]
pub enum BoardError {
    Io(std::io::Error),
    EmptyGrid,
    CellOutOfRange { cell: Cell, cells: usize },
    BadHeader { line: String },
    RowCount { expected: usize, found: usize },
    RowWidth { row: usize, expected: usize, found: usize },
    UnknownMarker { row: usize, column: usize, marker: char },
    MissingStart,
    DuplicateStart { first: Cell, second: Cell },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Io(err) => write!(f, "cannot read board: {err}"),
            BoardError::EmptyGrid => write!(f, "board dimension must be positive"),
            BoardError::CellOutOfRange { cell, cells } => {
                write!(f, "cell {cell} is outside a board of {cells} cells")
            }
            BoardError::BadHeader { line } => write!(
                f,
                "expected header `<dimension> <upper bound>`, found `{line}`"
            ),
            BoardError::RowCount { expected, found } => {
                write!(f, "expected {expected} grid rows, found {found}")
            }
            BoardError::RowWidth {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            BoardError::UnknownMarker {
                row,
                column,
                marker,
            } => write!(f, "unknown cell marker {marker:?} at row {row}, column {column}"),
            BoardError::MissingStart => write!(f, "board has no start cell"),
            BoardError::DuplicateStart { first, second } => {
                write!(f, "board has two start cells: {first} and {second}")
            }
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BoardError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BoardError {
    fn from(err: std::io::Error) -> Self {
        BoardError::Io(err)
    }
}

/// First rule a path breaks, as reported by [`Board::validate_path`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathViolation {
    Empty,
    WrongStart { expected: Cell, found: Cell },
    OutOfRange { index: usize, cell: Cell },
    IllegalMove { index: usize, from: Cell, to: Cell },
    MissingPiece { cell: Cell },
    TooLong { moves: usize, upper_bound: usize },
}

impl fmt::Display for PathViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathViolation::Empty => write!(f, "path is empty"),
            PathViolation::WrongStart { expected, found } => {
                write!(f, "path starts at {found}, board starts at {expected}")
            }
            PathViolation::OutOfRange { index, cell } => {
                write!(f, "path[{index}] = {cell} is off the board")
            }
            PathViolation::IllegalMove { index, from, to } => {
                write!(f, "path[{index}]: {from} -> {to} is not a knight move")
            }
            PathViolation::MissingPiece { cell } => write!(f, "piece {cell} is never visited"),
            PathViolation::TooLong { moves, upper_bound } => {
                write!(f, "path uses {moves} moves, bound is {upper_bound}")
            }
        }
    }
}

impl std::error::Error for PathViolation {}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        // 4x4, pieces at (3,0) and (1,3)
        Board::new(4, [3, 13], 0, 6).unwrap()
    }

    #[test]
    fn new_rejects_out_of_range_cells() {
        assert!(matches!(Board::new(0, [], 0, 1), Err(BoardError::EmptyGrid)));
        assert!(matches!(
            Board::new(3, [], 9, 1),
            Err(BoardError::CellOutOfRange { cell: 9, cells: 9 })
        ));
        assert!(matches!(
            Board::new(3, [2, 11], 0, 1),
            Err(BoardError::CellOutOfRange { cell: 11, cells: 9 })
        ));
    }

    #[test]
    fn duplicate_pieces_count_once() {
        let b = Board::new(4, [3, 13, 3], 0, 6).unwrap();
        assert_eq!(b.piece_count(), 2);
        assert_eq!(b.pieces().ones().collect::<Vec<_>>(), vec![3, 13]);
        assert!(b.is_piece(13));
        assert!(!b.is_piece(12));
    }

    #[test]
    fn coords_are_column_then_row() {
        let b = board();
        assert_eq!(b.coords(0), (0, 0));
        assert_eq!(b.coords(6), (2, 1));
        assert_eq!(b.cell_at(2, 1), 6);
        assert_eq!(b.cell_at(3, 3), 15);
    }

    #[test]
    fn validate_accepts_covering_path() {
        // (0,0) (2,1) (1,3) (3,2) (1,1) (3,0)
        let path = [0, 6, 13, 11, 5, 3];
        assert_eq!(board().validate_path(&path), Ok(()));
    }

    #[test]
    fn validate_reports_first_violation() {
        let b = board();
        assert_eq!(b.validate_path(&[]), Err(PathViolation::Empty));
        assert_eq!(
            b.validate_path(&[1, 8]),
            Err(PathViolation::WrongStart {
                expected: 0,
                found: 1
            })
        );
        assert_eq!(
            b.validate_path(&[0, 16]),
            Err(PathViolation::OutOfRange { index: 1, cell: 16 })
        );
        assert_eq!(
            b.validate_path(&[0, 6, 7]),
            Err(PathViolation::IllegalMove {
                index: 2,
                from: 6,
                to: 7
            })
        );
        assert_eq!(
            b.validate_path(&[0, 6, 13]),
            Err(PathViolation::MissingPiece { cell: 3 })
        );
    }

    #[test]
    fn validate_enforces_upper_bound() {
        let tight = Board::new(4, [3, 13], 0, 4).unwrap();
        assert_eq!(
            tight.validate_path(&[0, 6, 13, 11, 5, 3]),
            Err(PathViolation::TooLong {
                moves: 5,
                upper_bound: 4
            })
        );
    }
}

//! Board text format.
//!
//! ```text
//! 3 5
//! 300
//! 000
//! 010
//! ```
//!
//! The header holds the grid dimension and the move upper bound. Each of the
//! following `dimension` rows has one marker per cell: `0` empty, `1` piece,
//! `3` start. Trailing blank lines are ignored.

use std::path::Path;

use crate::board::{Board, BoardError};

const EMPTY: char = '0';
const PIECE: char = '1';
const START: char = '3';

pub fn parse_board(text: &str) -> Result<Board, BoardError> {
    let mut lines = text.lines().map(|l| l.trim_end_matches('\r'));

    let header = lines.next().unwrap_or_default();
    let (dimension, upper_bound) = parse_header(header)?;
    if dimension == 0 {
        return Err(BoardError::EmptyGrid);
    }

    let rows: Vec<&str> = lines.collect();
    let rows = match rows.iter().rposition(|r| !r.trim().is_empty()) {
        Some(last) => &rows[..=last],
        None => &rows[..0],
    };
    if rows.len() != dimension {
        return Err(BoardError::RowCount {
            expected: dimension,
            found: rows.len(),
        });
    }

    let mut pieces = Vec::new();
    let mut start = None;
    for (y, row) in rows.iter().enumerate() {
        let width = row.chars().count();
        if width != dimension {
            return Err(BoardError::RowWidth {
                row: y,
                expected: dimension,
                found: width,
            });
        }
        for (x, marker) in row.chars().enumerate() {
            let cell = y * dimension + x;
            match marker {
                EMPTY => {}
                PIECE => pieces.push(cell),
                START => match start {
                    None => start = Some(cell),
                    Some(first) => {
                        return Err(BoardError::DuplicateStart {
                            first,
                            second: cell,
                        })
                    }
                },
                _ => {
                    return Err(BoardError::UnknownMarker {
                        row: y,
                        column: x,
                        marker,
                    })
                }
            }
        }
    }

    let start = start.ok_or(BoardError::MissingStart)?;
    Board::new(dimension, pieces, start, upper_bound)
}

pub fn load_board(path: impl AsRef<Path>) -> Result<Board, BoardError> {
    let text = std::fs::read_to_string(path)?;
    parse_board(&text)
}

fn parse_header(line: &str) -> Result<(usize, usize), BoardError> {
    let bad = || BoardError::BadHeader {
        line: line.to_string(),
    };
    let mut fields = line.split_whitespace();
    let dimension = fields.next().and_then(|f| f.parse().ok()).ok_or_else(bad)?;
    let upper_bound = fields.next().and_then(|f| f.parse().ok()).ok_or_else(bad)?;
    if fields.next().is_some() {
        return Err(bad());
    }
    Ok((dimension, upper_bound))
}

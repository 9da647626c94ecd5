use std::time::Duration;

use serde::Serialize;

use crate::Cell;

/// Final answer for one board.
///
/// When no path within the board's upper bound visits every piece, the
/// solution is invalid, `length` holds the sentinel `upper_bound + 1` and the
/// path is empty. That is a normal outcome, not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Solution {
    valid: bool,
    length: usize,
    path: Vec<Cell>,
}

impl Solution {
    pub fn found(path: Vec<Cell>) -> Self {
        debug_assert!(!path.is_empty());
        Self {
            valid: true,
            length: path.len() - 1,
            path,
        }
    }

    pub fn unsolved(upper_bound: usize) -> Self {
        Self {
            valid: false,
            length: upper_bound.saturating_add(1),
            path: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Number of moves, or the sentinel when invalid.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn into_path(self) -> Vec<Cell> {
        self.path
    }
}

/// A solution plus the auxiliary metrics of the run that produced it.
#[derive(Clone, Debug, Serialize)]
pub struct SolveReport {
    pub solution: Solution,
    /// Frontier items explored (1 for a plain sequential run).
    pub work_units: u64,
    /// Search nodes expanded, where the regime can observe them.
    pub nodes: u64,
    pub elapsed: Duration,
}

impl SolveReport {
    pub const CSV_HEADER: &'static str = "file,valid,length,path,work_units,nodes,elapsed_ms";

    /// One CSV row; the path is space separated so it stays a single field.
    pub fn csv_row(&self, label: &str) -> String {
        let path = self
            .solution
            .path()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{},{},{},{},{},{},{:.3}",
            label,
            self.solution.is_valid(),
            self.solution.length(),
            path,
            self.work_units,
            self.nodes,
            self.elapsed.as_secs_f64() * 1e3,
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

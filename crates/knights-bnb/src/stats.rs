use std::ops::AddAssign;

use serde::Serialize;

/// Counters collected by one engine run. Runs on different threads keep
/// their own copy and are summed afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes whose children were generated.
    pub expanded: u64,
    /// Nodes discarded by the lower bound or the move ceiling.
    pub pruned: u64,
    /// Successful installs into the shared best.
    pub improvements: u64,
}

impl SearchStats {
    pub fn merged(mut self, other: SearchStats) -> SearchStats {
        self += other;
        self
    }
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: SearchStats) {
        self.expanded += other.expanded;
        self.pruned += other.pruned;
        self.improvements += other.improvements;
    }
}

use serde::{Deserialize, Serialize};

/// Shape of a farm solve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FarmConfig {
    /// Worker agents. `0` makes the coordinator solve the frontier itself.
    pub workers: usize,
    /// Open nodes to generate before distribution starts.
    pub frontier_size: usize,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            frontier_size: 64,
        }
    }
}

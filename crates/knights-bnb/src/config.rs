use serde::{Deserialize, Serialize};

/// Tuning knobs for the shared-memory driver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Open nodes the frontier generator aims for before handing subtrees
    /// to the thread pool.
    pub frontier_size: usize,
    /// Worker threads; `0` uses rayon's default (one per core).
    pub threads: usize,
}

impl SearchConfig {
    pub const DEFAULT_FRONTIER_SIZE: usize = 64;
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            frontier_size: Self::DEFAULT_FRONTIER_SIZE,
            threads: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: SearchConfig = serde_json::from_str(r#"{ "threads": 3 }"#).unwrap();
        assert_eq!(cfg.threads, 3);
        assert_eq!(cfg.frontier_size, SearchConfig::DEFAULT_FRONTIER_SIZE);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<SearchConfig>(r#"{ "depth": 3 }"#).is_err());
    }
}

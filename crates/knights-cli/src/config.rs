use std::path::Path;

use anyhow::Context;
use knights_bnb::SearchConfig;
use knights_farm::FarmConfig;
use serde::Deserialize;

use crate::cli::{Regime, SolveArgs};

/// Everything `knights solve` can be told, after merging file and flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub regime: Regime,
    pub search: SearchConfig,
    pub farm: FarmConfig,
}

impl RunConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn resolve(args: &SolveArgs) -> anyhow::Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(args);
        Ok(config)
    }

    fn apply(&mut self, args: &SolveArgs) {
        if let Some(regime) = args.regime {
            self.regime = regime;
        }
        if let Some(workers) = args.workers {
            self.farm.workers = workers;
        }
        if let Some(threads) = args.threads {
            self.search.threads = threads;
        }
        if let Some(frontier) = args.frontier {
            self.search.frontier_size = frontier;
            self.farm.frontier_size = frontier;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;

    fn solve_args(argv: &[&str]) -> SolveArgs {
        match Cli::parse_from(argv).command {
            Command::Solve(args) => args,
            Command::Worker { .. } => panic!("expected solve"),
        }
    }

    #[test]
    fn file_values_are_overridden_by_flags() {
        let mut config: RunConfig = serde_json::from_str(
            r#"{ "regime": "farm", "farm": { "workers": 8 }, "search": { "frontier_size": 5 } }"#,
        )
        .unwrap();
        assert_eq!(config.regime, Regime::Farm);
        assert_eq!(config.farm.frontier_size, FarmConfig::default().frontier_size);

        config.apply(&solve_args(&["knights", "solve", "b.txt", "-n", "2", "--frontier", "9"]));
        assert_eq!(config.regime, Regime::Farm);
        assert_eq!(config.farm.workers, 2);
        assert_eq!(config.search.frontier_size, 9);
        assert_eq!(config.farm.frontier_size, 9);
    }

    #[test]
    fn defaults_without_file() {
        let config = RunConfig::resolve(&solve_args(&["knights", "solve", "b.txt"])).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.regime, Regime::Parallel);
    }

    #[test]
    fn regime_flag_parses() {
        let args = solve_args(&["knights", "solve", "a", "b", "--regime", "processes", "--json"]);
        assert_eq!(args.regime, Some(Regime::Processes));
        assert_eq!(args.boards.len(), 2);
        assert!(args.json);
    }
}

//! Command line configuration.

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;

use crate::{game::Scenario, random::RngSource};

/// Options accepted on the command line.
#[derive(Debug, Parser, PartialEq, Eq)]
#[command(version, about)]
pub struct Config {
    /// Number of rooms along each side of the grid.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(5..=12))]
    pub size: u8,
    /// Seed for the random source, for games that can be replayed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// File to write the game log to. Logging is off without it.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 5,
            seed: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Returns the starting layout for the configured grid size.
    #[must_use]
    pub fn scenario(&self) -> Scenario {
        Scenario::classic(usize::from(self.size))
    }

    /// Returns a random source, seeded when a seed was given.
    #[must_use]
    pub fn random_source(&self) -> RngSource<StdRng> {
        self.seed.map_or_else(
            RngSource::<StdRng>::from_entropy,
            RngSource::<StdRng>::seeded,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn test_command_definition() {
        Config::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["hunt-the-wampus"]).expect("no arguments is valid");

        assert_eq!(config, Config::default());
        assert_eq!(config.scenario().size(), 5);
    }

    #[test]
    fn test_all_options() {
        let config = Config::try_parse_from([
            "hunt-the-wampus",
            "--size",
            "7",
            "--seed",
            "42",
            "--log-file",
            "wampus.log",
        ])
        .expect("valid arguments");

        assert_eq!(config.size, 7);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_file, Some(PathBuf::from("wampus.log")));
        assert_eq!(config.scenario().size(), 7);
    }

    #[test]
    fn test_size_out_of_range() {
        assert!(Config::try_parse_from(["hunt-the-wampus", "--size", "4"]).is_err());
        assert!(Config::try_parse_from(["hunt-the-wampus", "--size", "13"]).is_err());
    }
}

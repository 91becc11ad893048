//! Logger setup.
//!
//! The terminal belongs to the user interface, so log records go to a file instead of stderr.

use std::fs::File;

use color_eyre::eyre::Result;
use env_logger::{Builder, Env, Target};

use crate::config::Config;

/// Installs the global logger when a log file is configured.
///
/// The filter is read from `RUST_LOG` and defaults to `info`. Without a log file nothing is
/// installed and every log call is a no-op.
///
/// # Errors
///
/// This function may return errors if:
/// - The log file cannot be created
/// - A global logger is already installed
pub fn init(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_init_without_log_file() {
        assert!(init(&Config::default()).is_ok());
    }

    #[test]
    fn test_init_with_unwritable_log_file() {
        let config = Config {
            log_file: Some(PathBuf::from("/nonexistent-directory/wampus.log")),
            ..Config::default()
        };

        assert!(init(&config).is_err());
    }
}

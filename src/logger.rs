use anyhow::{anyhow, Result};
use log::LevelFilter;

const CRATE_NAME: &str = env!("CARGO_CRATE_NAME");

/// Logs go to stderr; stdout carries the post itself.
///
/// Our own messages are shown at `level`, dependencies only warn.
/// `RUST_LOG` overrides both.
pub fn init_logger(level: LevelFilter) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module(CRATE_NAME, level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .try_init()
        .map_err(|e| anyhow!("Could not initialize logger: {}", e))
}

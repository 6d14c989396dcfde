//! Logging setup.

use log::LevelFilter;

/// Enable console log with specified level.
/// `RUST_LOG` overrides the level.
pub fn enable_console_log(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

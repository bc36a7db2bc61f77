//! # GeoRef CLI
//!
//! The `georef` binary: loads the layered configuration, applies command-line overrides,
//! opens the registry and prints the requested objects on stdout. Logs go to stderr.

pub mod args;
mod commands;

pub use commands::run;

use georef::domain::config::LoggingConfig;
use georef_logger::{LevelFilter, Logger, parse_level};
use std::io::IsTerminal;

/// Initialises logging from the configured settings, raised by `-v` flags.
///
/// # Errors
/// Invalid level or filter strings, an unusable log directory, or a subscriber that is
/// already installed.
pub fn init_logging(config: &LoggingConfig, verbose: u8) -> anyhow::Result<Logger> {
    let level = match verbose {
        0 => parse_level(&config.level)?,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let builder = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .level(level)
        .ansi(std::io::stderr().is_terminal());
    let builder = match &config.filter {
        Some(filter) => builder.env_filter(filter.clone()),
        None => builder,
    };

    let logger = match &config.directory {
        Some(directory) if config.json => builder.path(directory).json().init()?,
        Some(directory) => builder.path(directory).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}

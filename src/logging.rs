// src/logging.rs
// =============================================================================
// Sets up `env_logger` for progress and diagnostic messages.
//
// Logs always go to stderr, so stdout only ever carries the report (text or
// JSON) and can be piped straight into another tool.
//
// RUST_LOG is read first; the --log-level flag then sets the level for this
// crate. The HTML parser crates are noisy at debug level, so they are capped.
// =============================================================================

use anyhow::{Context, Result};
use log::LevelFilter;
use std::io::Write;

pub fn init_logger(level: LevelFilter) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("archive_guardian", level);

    builder.format(|buf, record| {
        writeln!(buf, "[{}] {}", record.level(), record.args())
    });

    builder
        .try_init()
        .context("Failed to initialize the logger")?;
    Ok(())
}

// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr)
// 3. Open the archive and run the selected checks
// 4. Write the report (text or JSON) to stdout
// 5. Exit with proper code (0 = all good, 1 = errors found, 2 = could not check)
// =============================================================================

mod archive;  // src/archive/ - read-only access to the archive
mod checks;   // src/checks/ - the integrity checks
mod cli;      // src/cli.rs - command-line parsing
mod links;    // src/links/ - link extraction and resolution
mod logging;  // src/logging.rs - env_logger setup
mod report;   // src/report/ - report model and output

use anyhow::{Context, Result};
use archive::{Archive, DirArchive};
use clap::Parser;
use cli::Cli;
use report::{ErrorLogger, OutputMode};

fn main() {
    let exit_code = match run() {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns the overall status: true when no ERROR-level check failed.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    logging::init_logger(cli.log_level)?;

    let archive = DirArchive::open(&cli.archive)
        .with_context(|| format!("Failed to open archive {}", cli.archive.display()))?;
    log::info!(
        "Checking {} ({} entries)",
        cli.archive.display(),
        archive.entry_count()
    );

    let checks = cli.enabled_checks();
    let stdout = std::io::stdout().lock();
    let mut reporter = ErrorLogger::open(cli.output_mode(), stdout)
        .context("Failed to write the report")?;

    checks::run_checks(&archive, checks, &mut reporter);

    reporter.finish().context("Failed to write the report")?;

    let passed = reporter.overall_status();
    if reporter.mode() == OutputMode::Text {
        log::info!("Overall Test Status: {}", if passed { "Pass" } else { "Fail" });
    }
    Ok(passed)
}

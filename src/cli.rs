// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using Rust
// structs and attributes (the #[...] things).
//
// Each check has its own flag. Giving no check flag at all runs every check,
// so `archive-guardian ./my-archive` is a full check.
// =============================================================================

use crate::checks::EnabledChecks;
use crate::report::{CheckCategory, OutputMode};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "archive-guardian",
    version = "0.1.0",
    about = "Checks a content archive for broken links, empty entries and redundant data",
    long_about = "archive-guardian walks every entry of a content archive and reports broken internal \
                  links, external dependencies, empty entries, duplicated payloads and missing \
                  metadata. It's perfect for CI/CD pipelines that publish offline content."
)]
pub struct Cli {
    /// Archive to check (an unpacked archive directory)
    pub archive: PathBuf,

    /// Run every check (the default when no check flag is given)
    #[arg(short = 'A', long)]
    pub all: bool,

    /// Look for empty articles and assets
    #[arg(short = '0', long)]
    pub empty: bool,

    /// Verify the archive checksum
    #[arg(short = 'C', long)]
    pub checksum: bool,

    /// Verify the low-level structure of the archive
    #[arg(short = 'I', long)]
    pub integrity: bool,

    /// Look for the required metadata entries
    #[arg(short = 'M', long)]
    pub metadata: bool,

    /// Look for a favicon
    #[arg(short = 'F', long)]
    pub favicon: bool,

    /// Check that the main page exists
    #[arg(short = 'P', long = "main")]
    pub main_page: bool,

    /// Look for entries with identical content
    #[arg(short = 'R', long)]
    pub redundant: bool,

    /// Look for internal links to missing entries
    #[arg(short = 'U', long)]
    pub url_internal: bool,

    /// Look for resources loaded from outside the archive
    #[arg(short = 'X', long)]
    pub url_external: bool,

    /// Write the report as JSON instead of text
    ///
    /// The JSON document is written as the checks run, so a partial report
    /// is still valid JSON.
    #[arg(short = 'J', long)]
    pub json: bool,

    /// Log verbosity: off, error, warn, info, debug or trace
    ///
    /// Logs go to stderr; RUST_LOG is read first and this flag overrides it.
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

impl Cli {
    /// The checks selected on the command line.
    pub fn enabled_checks(&self) -> EnabledChecks {
        let flags = [
            (self.checksum, CheckCategory::Checksum),
            (self.integrity, CheckCategory::Integrity),
            (self.empty, CheckCategory::Empty),
            (self.metadata, CheckCategory::Metadata),
            (self.favicon, CheckCategory::Favicon),
            (self.main_page, CheckCategory::MainPage),
            (self.redundant, CheckCategory::Redundant),
            (self.url_internal, CheckCategory::InternalUrl),
            (self.url_external, CheckCategory::ExternalUrl),
        ];

        let mut checks = EnabledChecks::none();
        for (set, category) in flags {
            if set {
                checks.enable(category);
            }
        }
        if self.all || checks.is_empty() {
            return EnabledChecks::all();
        }
        checks
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `short = '0'`?
//    - clap derives the short flag from the first letter of the field by
//      default; here we pick the letters ourselves
//
// 2. How does `log_level: LevelFilter` get parsed?
//    - LevelFilter implements FromStr, and clap uses FromStr for any
//      field type that has it
//
// 3. Why return EnabledChecks instead of the booleans?
//    - The rest of the program only asks "is this check on?", so it should
//      not need to know about command-line flags at all
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["archive-guardian"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_no_check_flag_means_all() {
        let cli = parse(&["archive"]);
        assert_eq!(cli.enabled_checks(), EnabledChecks::all());
        assert_eq!(cli.output_mode(), OutputMode::Text);
        assert_eq!(cli.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_selected_checks() {
        let cli = parse(&["-U", "-R", "--json", "archive"]);
        let checks = cli.enabled_checks();
        assert!(checks.is_enabled(CheckCategory::InternalUrl));
        assert!(checks.is_enabled(CheckCategory::Redundant));
        assert!(!checks.is_enabled(CheckCategory::Empty));
        assert_eq!(cli.output_mode(), OutputMode::Json);
    }

    #[test]
    fn test_all_overrides_selection() {
        let cli = parse(&["-0", "--all", "archive"]);
        assert_eq!(cli.enabled_checks(), EnabledChecks::all());
    }

    #[test]
    fn test_long_flags() {
        let cli = parse(&["--main", "--url-external", "--log-level", "debug", "archive"]);
        let checks = cli.enabled_checks();
        assert!(checks.is_enabled(CheckCategory::MainPage));
        assert!(checks.is_enabled(CheckCategory::ExternalUrl));
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_archive_is_required() {
        assert!(Cli::try_parse_from(["archive-guardian"]).is_err());
    }
}

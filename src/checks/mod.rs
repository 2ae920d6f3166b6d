// src/checks/mod.rs
// =============================================================================
// This module runs the integrity checks against an archive.
//
// Submodules:
// - archive_checks: checksum, structure, metadata, favicon, main page
// - entries: the walk over every entry (empty entries, links)
// - redundancy: duplicate payload detection
//
// `run_checks` is the entry point. It never fails: every problem it finds is
// recorded in the report, and the whole archive is always walked.
// =============================================================================

mod archive_checks;
mod entries;
mod redundancy;

use crate::archive::Archive;
use crate::report::{CheckCategory, ErrorLogger};
use std::io::Write;

/// Which checks a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnabledChecks([bool; CheckCategory::COUNT]);

impl EnabledChecks {
    pub fn all() -> Self {
        EnabledChecks([true; CheckCategory::COUNT])
    }

    pub fn none() -> Self {
        EnabledChecks([false; CheckCategory::COUNT])
    }

    #[cfg(test)]
    pub fn with(mut self, category: CheckCategory) -> Self {
        self.enable(category);
        self
    }

    pub fn enable(&mut self, category: CheckCategory) {
        self.0[category.index()] = true;
    }

    pub fn is_enabled(&self, category: CheckCategory) -> bool {
        self.0[category.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|enabled| !enabled)
    }

    /// Whether the entry walk is needed at all.
    fn needs_entry_walk(&self) -> bool {
        [
            CheckCategory::Empty,
            CheckCategory::Redundant,
            CheckCategory::InternalUrl,
            CheckCategory::ExternalUrl,
        ]
        .into_iter()
        .any(|c| self.is_enabled(c))
    }
}

/// Runs every enabled check and records the findings in `reporter`.
pub fn run_checks<A, W>(archive: &A, checks: EnabledChecks, reporter: &mut ErrorLogger<W>)
where
    A: Archive + ?Sized,
    W: Write,
{
    if checks.is_enabled(CheckCategory::Checksum) {
        archive_checks::check_checksum(archive, reporter);
    }
    if checks.is_enabled(CheckCategory::Integrity) {
        archive_checks::check_integrity(archive, reporter);
    }
    if checks.is_enabled(CheckCategory::Metadata) {
        archive_checks::check_metadata(archive, reporter);
    }
    if checks.is_enabled(CheckCategory::Favicon) {
        archive_checks::check_favicon(archive, reporter);
    }
    if checks.is_enabled(CheckCategory::MainPage) {
        archive_checks::check_main_page(archive, reporter);
    }
    if checks.needs_entry_walk() {
        entries::check_entries(archive, checks, reporter);
    }
}

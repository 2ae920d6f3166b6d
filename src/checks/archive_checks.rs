// src/checks/archive_checks.rs
// =============================================================================
// Checks that look at the archive as a whole rather than at its entries:
// checksum, low-level structure, required metadata, favicon and main page.
// =============================================================================

use crate::archive::Archive;
use crate::report::{CheckCategory, ErrorLogger, MessageId, ReportMessage};
use log::info;
use std::io::Write;

/// Metadata every archive must carry.
pub const REQUIRED_METADATA: [&str; 6] = [
    "Title",
    "Creator",
    "Publisher",
    "Date",
    "Description",
    "Language",
];

/// Where legacy archives keep their favicon.
const FAVICON_PATHS: [&str; 4] = ["-/favicon.png", "I/favicon.png", "I/favicon", "-/favicon"];

/// Unified-scheme archives store the favicon as an illustration.
const FAVICON_ILLUSTRATION: &str = "Illustration_48x48@1";

pub fn check_checksum<A, W>(archive: &A, reporter: &mut ErrorLogger<W>)
where
    A: Archive + ?Sized,
    W: Write,
{
    info!("Verifying internal checksum...");
    if !archive.has_checksum() {
        info!("  Archive has no checksum, skipping");
        return;
    }
    if !archive.verify_checksum() {
        reporter.add_msg(
            ReportMessage::new(MessageId::Checksum).with("archive_checksum", archive.checksum()),
        );
    }
}

pub fn check_integrity<A, W>(archive: &A, reporter: &mut ErrorLogger<W>)
where
    A: Archive + ?Sized,
    W: Write,
{
    info!("Verifying archive structure integrity...");
    let valid = archive.validate_structure();
    reporter.set_result(CheckCategory::Integrity, valid);
}

pub fn check_metadata<A, W>(archive: &A, reporter: &mut ErrorLogger<W>)
where
    A: Archive + ?Sized,
    W: Write,
{
    info!("Searching for metadata entries...");
    let existing = archive.metadata_keys();
    for key in REQUIRED_METADATA {
        if !existing.iter().any(|k| k == key) {
            reporter.add_msg(ReportMessage::new(MessageId::MissingMetadata).with("metadata_type", key));
        }
    }
}

pub fn check_favicon<A, W>(archive: &A, reporter: &mut ErrorLogger<W>)
where
    A: Archive + ?Sized,
    W: Write,
{
    info!("Searching for favicon...");
    if FAVICON_PATHS.iter().any(|p| archive.has_entry_by_path(p)) {
        return;
    }
    if archive.uses_unified_namespace()
        && archive
            .metadata_keys()
            .iter()
            .any(|k| k == FAVICON_ILLUSTRATION)
    {
        return;
    }
    reporter.force_fail(CheckCategory::Favicon);
}

pub fn check_main_page<A, W>(archive: &A, reporter: &mut ErrorLogger<W>)
where
    A: Archive + ?Sized,
    W: Write,
{
    info!("Searching for main page...");
    if let Err(e) = archive.main_entry() {
        log::debug!("Main entry lookup failed: {}", e);
        let index = archive
            .main_entry_index()
            .map(|i| i.to_string())
            .unwrap_or_else(|| "none".to_string());
        reporter.add_msg(ReportMessage::new(MessageId::MainPage).with("main_page_index", index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryArchive;
    use crate::report::OutputMode;

    fn reporter() -> ErrorLogger<Vec<u8>> {
        ErrorLogger::open(OutputMode::Text, Vec::new()).unwrap()
    }

    fn full_metadata(archive: MemoryArchive) -> MemoryArchive {
        REQUIRED_METADATA
            .iter()
            .fold(archive, |archive, key| archive.metadata(key, "x"))
    }

    #[test]
    fn test_checksum_mismatch_is_reported() {
        let archive = MemoryArchive::new().checksum("0123abcd", false);
        let mut reporter = reporter();
        check_checksum(&archive, &mut reporter);
        let messages = reporter.model().messages(CheckCategory::Checksum);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].param("archive_checksum"), Some("0123abcd"));
    }

    #[test]
    fn test_missing_or_valid_checksum_passes() {
        let mut reporter = reporter();
        check_checksum(&MemoryArchive::new(), &mut reporter);
        check_checksum(&MemoryArchive::new().checksum("ok", true), &mut reporter);
        assert!(reporter.model().passed(CheckCategory::Checksum));
    }

    #[test]
    fn test_integrity_follows_archive() {
        let mut reporter = reporter();
        check_integrity(&MemoryArchive::new().broken_structure(), &mut reporter);
        assert!(!reporter.model().passed(CheckCategory::Integrity));
        assert!(reporter.model().messages(CheckCategory::Integrity).is_empty());
    }

    #[test]
    fn test_each_missing_metadata_key_is_reported() {
        let archive = MemoryArchive::new()
            .metadata("Title", "Test")
            .metadata("Language", "eng");
        let mut reporter = reporter();
        check_metadata(&archive, &mut reporter);
        let missing: Vec<&str> = reporter
            .model()
            .messages(CheckCategory::Metadata)
            .iter()
            .filter_map(|m| m.param("metadata_type"))
            .collect();
        assert_eq!(missing, vec!["Creator", "Publisher", "Date", "Description"]);
    }

    #[test]
    fn test_complete_metadata_passes() {
        let archive = full_metadata(MemoryArchive::new());
        let mut reporter = reporter();
        check_metadata(&archive, &mut reporter);
        assert!(reporter.model().passed(CheckCategory::Metadata));
    }

    #[test]
    fn test_favicon() {
        let mut reporter = reporter();
        check_favicon(&MemoryArchive::new().item("-/favicon", "image/png", "png"), &mut reporter);
        assert!(reporter.model().passed(CheckCategory::Favicon));

        check_favicon(&MemoryArchive::new(), &mut reporter);
        assert!(!reporter.model().passed(CheckCategory::Favicon));
    }

    #[test]
    fn test_unified_favicon_illustration() {
        let archive = MemoryArchive::new()
            .unified()
            .metadata("Illustration_48x48@1", "png");
        let mut reporter = reporter();
        check_favicon(&archive, &mut reporter);
        assert!(reporter.model().passed(CheckCategory::Favicon));
    }

    #[test]
    fn test_missing_main_page_is_recorded() {
        let archive = MemoryArchive::new().main_page("A/Gone");
        let mut reporter = reporter();
        check_main_page(&archive, &mut reporter);
        let messages = reporter.model().messages(CheckCategory::MainPage);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].param("main_page_index"), Some("none"));
    }

    #[test]
    fn test_main_page_through_redirect() {
        let archive = MemoryArchive::new()
            .html("A/Home", "<p>home</p>")
            .redirect("A/Start", "A/Home")
            .main_page("A/Start");
        let mut reporter = reporter();
        check_main_page(&archive, &mut reporter);
        assert!(reporter.model().passed(CheckCategory::MainPage));
    }
}

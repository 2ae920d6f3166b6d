// src/checks/entries.rs
// =============================================================================
// The per-entry checks and the walk that drives them.
//
// For every entry, in archive storage order:
// 1. Skip redirects and metadata entries
// 2. Report empty articles and assets (if enabled)
// 3. Stop at empty payloads, there is nothing else to look at
// 4. Read the payload only if redundancy hashing or link checking needs it
// 5. Hash the payload for the redundancy check
// 6. Stop unless the entry is HTML
// 7. Extract links and run the internal/external link checks
//
// After the walk, the redundancy detector compares the hash buckets.
// =============================================================================

use super::redundancy::{RedundancyDetector, ResolvedItem};
use super::EnabledChecks;
use crate::archive::{Archive, ArchiveError, Entry, Namespace};
use crate::links::{extract_links, find_external_dependency, LinkValidator};
use crate::report::{CheckCategory, ErrorLogger, MessageId, ReportMessage};
use log::{debug, info, warn};
use std::io::Write;

// How often the walk reports progress at debug level
const PROGRESS_EVERY: usize = 10_000;

pub struct EntryChecker<'a, A: Archive + ?Sized> {
    archive: &'a A,
    checks: EnabledChecks,
    unified: bool,
    validator: LinkValidator,
    redundancy: Option<RedundancyDetector>,
}

impl<'a, A: Archive + ?Sized> EntryChecker<'a, A> {
    pub fn new(archive: &'a A, checks: EnabledChecks) -> Self {
        let redundancy = checks
            .is_enabled(CheckCategory::Redundant)
            .then(RedundancyDetector::new);
        EntryChecker {
            archive,
            checks,
            unified: archive.uses_unified_namespace(),
            validator: LinkValidator::new(),
            redundancy,
        }
    }

    pub fn check_entry<W: Write>(&mut self, entry: &Entry, reporter: &mut ErrorLogger<W>) {
        if entry.is_redirect() {
            return;
        }
        let namespace = Namespace::of_path(&entry.path, self.unified);
        if namespace == Namespace::Metadata {
            return;
        }
        let Ok(item) = entry.item() else {
            return;
        };

        if self.checks.is_enabled(CheckCategory::Empty) && namespace.is_content() && item.size == 0 {
            reporter.add_msg(ReportMessage::new(MessageId::EmptyEntry).with("path", entry.path.as_str()));
        }
        if item.size == 0 {
            return;
        }

        if self.redundancy.is_none() && !item.is_html() {
            return;
        }
        let data = match self.archive.item_data(item) {
            Ok(data) => data,
            Err(e) => {
                warn!("Cannot read {}: {}", entry.path, e);
                return;
            }
        };

        if let Some(detector) = self.redundancy.as_mut() {
            detector.record_payload(item.index, &data);
        }

        if !item.is_html() {
            return;
        }

        let internal = self.checks.is_enabled(CheckCategory::InternalUrl);
        let external = self.checks.is_enabled(CheckCategory::ExternalUrl);
        if !internal && !external {
            return;
        }
        let links = extract_links(&data);

        if internal {
            let archive = self.archive;
            let outcome = self
                .validator
                .validate(&entry.path, item.index, &links, |path| archive.has_entry_by_path(path));
            if outcome.new_section {
                debug!("Dangling links in {}", entry.path);
            }
            for msg in outcome.messages(&entry.path) {
                reporter.add_msg(msg);
            }
        }

        if external {
            if let Some(link) = find_external_dependency(&links) {
                reporter.add_msg(
                    ReportMessage::new(MessageId::ExternalLink)
                        .with("link", link.link.as_str())
                        .with("path", entry.path.as_str()),
                );
            }
        }
    }

    /// Runs the second phase: compares the hash buckets built during the walk.
    pub fn finish<W: Write>(self, reporter: &mut ErrorLogger<W>) {
        if self.validator.sections() > 0 {
            info!(
                "Dangling links found in {} article section(s)",
                self.validator.sections()
            );
        }

        let Some(detector) = self.redundancy else {
            return;
        };
        info!("Searching for redundant articles...");
        info!("  Verifying {} content buckets for redundancies...", detector.bucket_count());

        let archive = self.archive;
        let pairs = detector.detect(|index| resolve_item(archive, index));
        for pair in pairs {
            reporter.add_msg(
                ReportMessage::new(MessageId::RedundantItems)
                    .with("path1", pair.first)
                    .with("path2", pair.second),
            );
        }
    }
}

fn resolve_item<A: Archive + ?Sized>(archive: &A, index: u32) -> Result<ResolvedItem, ArchiveError> {
    let entry = archive.entry_by_index(index)?;
    let data = archive.item_data(entry.item()?)?;
    Ok(ResolvedItem {
        path: entry.path,
        title: entry.title,
        data,
    })
}

/// Walks every entry of the archive once, then runs the redundancy phase.
pub fn check_entries<A, W>(archive: &A, checks: EnabledChecks, reporter: &mut ErrorLogger<W>)
where
    A: Archive + ?Sized,
    W: Write,
{
    info!("Verifying articles' content...");
    let total = archive.entry_count();
    let mut checker = EntryChecker::new(archive, checks);

    for (n, entry) in archive.entries().enumerate() {
        checker.check_entry(&entry, reporter);
        if (n + 1) % PROGRESS_EVERY == 0 {
            debug!("  {}/{} entries checked", n + 1, total);
        }
    }

    checker.finish(reporter);
}

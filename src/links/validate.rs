// src/links/validate.rs
// =============================================================================
// Checks the links of one HTML entry against the archive's own paths.
//
// How it works:
// 1. Keep internal links; count the empty ones, skip "#..." and "?..." links
// 2. Normalize each link; links climbing above the root are reported at once
// 3. Group the remaining links by the path they resolve to
// 4. Look each group's path up once; every missing path is one dangling group
//
// External dependencies are a separate, simpler scan (see
// `find_external_dependency`).
// =============================================================================

use super::extract::LinkOccurrence;
use super::normalize::{normalize, OutOfBounds};
use crate::report::{MessageId, ReportMessage};
use std::collections::HashMap;

/// Links of one entry that all resolve to the same missing path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingGroup {
    pub normalized: String,
    /// Raw links as written in the markup, duplicates included
    pub links: Vec<String>,
}

/// Everything wrong with the internal links of one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub empty_links: usize,
    pub out_of_bounds: Vec<OutOfBounds>,
    pub dangling: Vec<DanglingGroup>,
    /// True when this entry's dangling links open a new article section.
    /// Only used for logging.
    pub new_section: bool,
}

impl ValidationOutcome {
    #[cfg(test)]
    pub fn is_clean(&self) -> bool {
        self.empty_links == 0 && self.out_of_bounds.is_empty() && self.dangling.is_empty()
    }

    /// Report messages for this outcome: out-of-bounds links first, one per
    /// occurrence, then the empty-link count, then one message per dangling group.
    pub fn messages(&self, path: &str) -> Vec<ReportMessage> {
        let mut messages = Vec::new();

        for oob in &self.out_of_bounds {
            messages.push(
                ReportMessage::new(MessageId::OutOfBoundsLink)
                    .with("link", oob.link.as_str())
                    .with("path", path),
            );
        }

        if self.empty_links > 0 {
            messages.push(
                ReportMessage::new(MessageId::EmptyLinks)
                    .with("count", self.empty_links.to_string())
                    .with("path", path),
            );
        }

        for group in &self.dangling {
            let links: String = group
                .links
                .iter()
                .map(|link| format!("- {}\n", link))
                .collect();
            messages.push(
                ReportMessage::new(MessageId::DanglingLinks)
                    .with("path", path)
                    .with("normalized_link", group.normalized.as_str())
                    .with("links", links),
            );
        }

        messages
    }
}

/// Validates internal links entry after entry.
///
/// The validator also counts article sections: a dangling report from a
/// different entry than the previous one opens a new section. The count only
/// feeds progress logging. It never changes which messages an entry gets;
/// every dangling group is reported regardless of sections.
#[derive(Debug, Default)]
pub struct LinkValidator {
    previous_index: Option<u32>,
    sections: usize,
}

impl LinkValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of article sections opened so far.
    pub fn sections(&self) -> usize {
        self.sections
    }

    pub fn validate<F>(
        &mut self,
        entry_path: &str,
        entry_index: u32,
        links: &[LinkOccurrence],
        mut exists: F,
    ) -> ValidationOutcome
    where
        F: FnMut(&str) -> bool,
    {
        let mut outcome = ValidationOutcome::default();

        // normalized path -> position in `groups`, to keep first-seen order
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<DanglingGroup> = Vec::new();

        for occurrence in links.iter().filter(|l| l.is_internal) {
            let raw = occurrence.link.as_str();
            if raw.is_empty() {
                outcome.empty_links += 1;
                continue;
            }
            if raw.starts_with('#') || raw.starts_with('?') {
                continue;
            }

            match normalize(raw, entry_path) {
                Ok(normalized) => match positions.get(&normalized) {
                    Some(&pos) => groups[pos].links.push(raw.to_string()),
                    None => {
                        positions.insert(normalized.clone(), groups.len());
                        groups.push(DanglingGroup {
                            normalized,
                            links: vec![raw.to_string()],
                        });
                    }
                },
                Err(oob) => outcome.out_of_bounds.push(oob),
            }
        }

        outcome.dangling = groups
            .into_iter()
            .filter(|group| !exists(&group.normalized))
            .collect();

        if !outcome.dangling.is_empty() && self.previous_index != Some(entry_index) {
            self.previous_index = Some(entry_index);
            self.sections += 1;
            outcome.new_section = true;
        }

        outcome
    }
}

/// The first external resource loaded through a `src` attribute, if any.
///
/// Plain external hyperlinks (`href`) are fine; embedded external resources
/// make the archive depend on the network.
pub fn find_external_dependency(links: &[LinkOccurrence]) -> Option<&LinkOccurrence> {
    links
        .iter()
        .find(|l| l.is_external && l.attribute == "src")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn href(link: &str) -> LinkOccurrence {
        LinkOccurrence::new(link, "href")
    }

    #[test]
    fn test_all_links_present() {
        let mut validator = LinkValidator::new();
        let links = vec![href("Cargo"), href("../I/logo.png"), href("#top")];
        let outcome = validator.validate("A/Rust", 0, &links, |_| true);
        assert!(outcome.is_clean());
        assert!(!outcome.new_section);
        assert_eq!(validator.sections(), 0);
    }

    #[test]
    fn test_empty_links_are_counted_once() {
        let mut validator = LinkValidator::new();
        let links = vec![href(""), href("Cargo"), href("")];
        let outcome = validator.validate("A/Rust", 0, &links, |_| true);
        assert_eq!(outcome.empty_links, 2);

        let messages = outcome.messages("A/Rust");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].expand(), "Found 2 empty links in article: A/Rust");
    }

    #[test]
    fn test_out_of_bounds_skips_lookup() {
        let mut validator = LinkValidator::new();
        let looked_up = RefCell::new(Vec::new());
        let links = vec![href("../../x")];
        let outcome = validator.validate("A/sub", 3, &links, |p| {
            looked_up.borrow_mut().push(p.to_string());
            false
        });

        assert!(looked_up.borrow().is_empty());
        assert!(outcome.dangling.is_empty());
        let messages = outcome.messages("A/sub");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].param("link"), Some("../../x"));
        assert_eq!(messages[0].param("path"), Some("A/sub"));
    }

    #[test]
    fn test_groups_keep_every_raw_form() {
        let mut validator = LinkValidator::new();
        let links = vec![href("Missing"), href("./Missing#a"), href("Missing")];
        let lookups = RefCell::new(0);
        let outcome = validator.validate("A/Rust", 0, &links, |_| {
            *lookups.borrow_mut() += 1;
            false
        });

        assert_eq!(*lookups.borrow(), 1);
        assert_eq!(
            outcome.dangling,
            vec![DanglingGroup {
                normalized: "A/Missing".to_string(),
                links: vec![
                    "Missing".to_string(),
                    "./Missing#a".to_string(),
                    "Missing".to_string()
                ],
            }]
        );
        let messages = outcome.messages("A/Rust");
        assert_eq!(
            messages[0].expand(),
            "The following links:\n- Missing\n- ./Missing#a\n- Missing\n(A/Missing) were not found in article A/Rust"
        );
    }

    #[test]
    fn test_two_groups_of_one_entry_are_two_messages() {
        let mut validator = LinkValidator::new();
        let links = vec![href("One"), href("Two"), href("One")];
        let outcome = validator.validate("A/Rust", 7, &links, |_| false);

        let messages = outcome.messages("A/Rust");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].param("normalized_link"), Some("A/One"));
        assert_eq!(messages[0].param("links"), Some("- One\n- One\n"));
        assert_eq!(messages[1].param("normalized_link"), Some("A/Two"));
        assert_eq!(messages[1].param("links"), Some("- Two\n"));
    }

    #[test]
    fn test_sections_follow_previous_entry() {
        let mut validator = LinkValidator::new();
        let broken = vec![href("Nope")];

        assert!(validator.validate("A/a", 1, &broken, |_| false).new_section);
        // same entry again: no new section
        assert!(!validator.validate("A/a", 1, &broken, |_| false).new_section);
        // a clean entry in between does not reset the previous index
        assert!(!validator.validate("A/b", 2, &broken, |_| true).new_section);
        assert!(!validator.validate("A/a", 1, &broken, |_| false).new_section);
        assert!(validator.validate("A/c", 3, &broken, |_| false).new_section);
        assert_eq!(validator.sections(), 2);
    }

    #[test]
    fn test_sections_do_not_change_messages() {
        let mut validator = LinkValidator::new();
        let broken = vec![href("Nope"), href("Gone")];

        let first = validator.validate("A/a", 1, &broken, |_| false);
        let again = validator.validate("A/a", 1, &broken, |_| false);
        assert!(first.new_section);
        assert!(!again.new_section);
        assert_eq!(first.messages("A/a"), again.messages("A/a"));
        assert_eq!(again.messages("A/a").len(), 2);
    }

    #[test]
    fn test_external_links_are_ignored_by_validation() {
        let mut validator = LinkValidator::new();
        let links = vec![href("https://example.com/missing")];
        let outcome = validator.validate("A/Rust", 0, &links, |_| false);
        assert!(outcome.is_clean());
    }

    #[test]
    fn test_external_dependency_needs_src() {
        let links = vec![
            href("https://example.com"),
            LinkOccurrence::new("../I/local.png", "src"),
            LinkOccurrence::new("https://cdn.example.com/a.js", "src"),
            LinkOccurrence::new("https://cdn.example.com/b.js", "src"),
        ];
        let found = find_external_dependency(&links).unwrap();
        assert_eq!(found.link, "https://cdn.example.com/a.js");

        assert!(find_external_dependency(&links[..2]).is_none());
    }
}

// src/links/extract.rs
// =============================================================================
// This module extracts link occurrences from HTML entries.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Decodes entities, so "a&amp;b" comes back as "a&b"
//
// Every href, src and poster attribute becomes one LinkOccurrence, in document
// order. Nothing is resolved here; the raw attribute value is kept because the
// report has to show links exactly as they appear in the markup.
// =============================================================================

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Attributes that can point at another entry.
const LINK_ATTRIBUTES: [&str; 3] = ["href", "src", "poster"];

/// Schemes that are neither archive paths nor external resources.
const RESERVED_SCHEMES: [&str; 8] = [
    "about",
    "data",
    "javascript",
    "mailto",
    "tel",
    "geo",
    "sms",
    "blob",
];

// The selector is a constant, so parsing it can only fail on a programmer error.
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[href], [src], [poster]").unwrap());

/// One link as it appears in an HTML entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence {
    /// The attribute value, untouched
    pub link: String,
    /// Which attribute it came from ("href", "src" or "poster")
    pub attribute: String,
    pub is_internal: bool,
    pub is_external: bool,
}

impl LinkOccurrence {
    pub fn new(link: impl Into<String>, attribute: impl Into<String>) -> Self {
        let link = link.into();
        let is_external = is_external_url(&link);
        let is_internal = !is_external && !is_reserved_url(&link);
        LinkOccurrence {
            link,
            attribute: attribute.into(),
            is_internal,
            is_external,
        }
    }
}

/// Extracts every link occurrence from an HTML payload.
///
/// Invalid UTF-8 is replaced rather than rejected; a broken byte in the middle
/// of a page should not hide the links around it.
pub fn extract_links(html: &[u8]) -> Vec<LinkOccurrence> {
    let text = String::from_utf8_lossy(html);
    let document = Html::parse_document(&text);

    let mut links = Vec::new();
    for element in document.select(&LINK_SELECTOR) {
        for attribute in LINK_ATTRIBUTES {
            if let Some(value) = element.value().attr(attribute) {
                links.push(LinkOccurrence::new(value, attribute));
            }
        }
    }
    links
}

// "https://x", "ftp://x" and protocol-relative "//x" leave the archive.
fn is_external_url(link: &str) -> bool {
    link.starts_with("//") || link.contains("://")
}

// "mailto:a@b", "data:image/png;base64,..." and friends.
//
// Only a successful parse counts: a relative path like "Foo_(bar)" fails to
// parse and stays internal.
fn is_reserved_url(link: &str) -> bool {
    Url::parse(link)
        .map(|url| RESERVED_SCHEMES.contains(&url.scheme()))
        .unwrap_or(false)
}

// src/report/category.rs
// =============================================================================
// The fixed set of checks and the fixed set of messages they can produce.
//
// Both tables are plain `match` expressions over enums, so they are decided at
// compile time and can never be changed while the checker runs:
// - CheckCategory -> severity, description, JSON identifier
// - MessageId     -> category, numeric code, message template
// =============================================================================

use serde::Serialize;
use std::fmt;

/// How bad a failing check is.
///
/// Only `Error` failures make the overall run fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// One kind of integrity check.
///
/// The declaration order is the order used when rendering reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CheckCategory {
    Checksum,
    Integrity,
    Empty,
    Metadata,
    Favicon,
    MainPage,
    Redundant,
    InternalUrl,
    ExternalUrl,
}

impl CheckCategory {
    /// Number of categories, used to size the per-category tables.
    pub const COUNT: usize = 9;

    /// Every category, in report order.
    pub const ALL: [CheckCategory; CheckCategory::COUNT] = [
        CheckCategory::Checksum,
        CheckCategory::Integrity,
        CheckCategory::Empty,
        CheckCategory::Metadata,
        CheckCategory::Favicon,
        CheckCategory::MainPage,
        CheckCategory::Redundant,
        CheckCategory::InternalUrl,
        CheckCategory::ExternalUrl,
    ];

    /// Position of the category in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn severity(self) -> Severity {
        match self {
            CheckCategory::Redundant => Severity::Warning,
            CheckCategory::Checksum
            | CheckCategory::Integrity
            | CheckCategory::Empty
            | CheckCategory::Metadata
            | CheckCategory::Favicon
            | CheckCategory::MainPage
            | CheckCategory::InternalUrl
            | CheckCategory::ExternalUrl => Severity::Error,
        }
    }

    /// Header line shown in the text report.
    pub fn description(self) -> &'static str {
        match self {
            CheckCategory::Checksum => "Invalid checksum",
            CheckCategory::Integrity => "Invalid low-level structure",
            CheckCategory::Empty => "Empty articles",
            CheckCategory::Metadata => "Missing metadata entries",
            CheckCategory::Favicon => "Missing favicon",
            CheckCategory::MainPage => "Missing mainpage",
            CheckCategory::Redundant => "Redundant data found",
            CheckCategory::InternalUrl => "Invalid internal links found",
            CheckCategory::ExternalUrl => "Invalid external links found",
        }
    }

    /// Identifier used in the `check` field of the JSON report.
    pub fn as_str(self) -> &'static str {
        match self {
            CheckCategory::Checksum => "checksum",
            CheckCategory::Integrity => "integrity",
            CheckCategory::Empty => "empty",
            CheckCategory::Metadata => "metadata",
            CheckCategory::Favicon => "favicon",
            CheckCategory::MainPage => "main_page",
            CheckCategory::Redundant => "redundant",
            CheckCategory::InternalUrl => "url_internal",
            CheckCategory::ExternalUrl => "url_external",
        }
    }
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a message template.
///
/// The discriminant is the numeric `code` written to the JSON report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    Checksum = 0,
    MainPage = 1,
    EmptyEntry = 2,
    OutOfBoundsLink = 3,
    EmptyLinks = 4,
    DanglingLinks = 5,
    ExternalLink = 6,
    RedundantItems = 7,
    MissingMetadata = 8,
}

impl MessageId {
    pub fn code(self) -> u32 {
        self as u32
    }

    /// The check this message is recorded against.
    pub fn category(self) -> CheckCategory {
        match self {
            MessageId::Checksum => CheckCategory::Checksum,
            MessageId::MainPage => CheckCategory::MainPage,
            MessageId::EmptyEntry => CheckCategory::Empty,
            MessageId::OutOfBoundsLink
            | MessageId::EmptyLinks
            | MessageId::DanglingLinks => CheckCategory::InternalUrl,
            MessageId::ExternalLink => CheckCategory::ExternalUrl,
            MessageId::RedundantItems => CheckCategory::Redundant,
            MessageId::MissingMetadata => CheckCategory::Metadata,
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            MessageId::Checksum => "Archive checksum in archive: {{archive_checksum}}",
            MessageId::MainPage => {
                "Main page index stored in archive header: {{main_page_index}}"
            }
            MessageId::EmptyEntry => "Entry {{path}} is empty",
            MessageId::OutOfBoundsLink => "{{link}} is out of bounds. Article: {{path}}",
            MessageId::EmptyLinks => "Found {{count}} empty links in article: {{path}}",
            MessageId::DanglingLinks => {
                "The following links:\n{{links}}({{normalized_link}}) were not found in article {{path}}"
            }
            MessageId::ExternalLink => "{{link}} is an external dependence in article {{path}}",
            MessageId::RedundantItems => "{{path1}} and {{path2}}",
            MessageId::MissingMetadata => "{{metadata_type}}",
        }
    }
}

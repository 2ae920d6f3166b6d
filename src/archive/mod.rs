// src/archive/mod.rs
// =============================================================================
// This module is the boundary to the content archive being checked.
//
// The checker only ever talks to an archive through the `Archive` trait, so
// it does not care how entries are stored. Two implementations live here:
// - dir: an unpacked archive on disk (one file per entry)
// - memory: an in-memory archive used by the tests
//
// Archives come in two layouts:
// - legacy: every path starts with a one-character namespace ("A/Foo", "I/x.png")
// - unified: paths carry no namespace and every walked entry is content
// =============================================================================

mod dir;
mod error;
#[cfg(test)]
mod memory;
pub mod mime;

pub use dir::DirArchive;
pub use error::ArchiveError;
#[cfg(test)]
pub use memory::MemoryArchive;

/// What kind of content a path holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// Articles: 'C' and 'A'
    Article,
    /// Images and other media: 'I'
    Asset,
    /// Archive metadata: 'M'
    Metadata,
    /// Layout, indexes, well-known entries: '-', 'W', 'X', ...
    Other,
}

impl Namespace {
    pub fn from_char(ns: char) -> Self {
        match ns {
            'C' | 'A' => Namespace::Article,
            'I' => Namespace::Asset,
            'M' => Namespace::Metadata,
            _ => Namespace::Other,
        }
    }

    /// Namespace of a walked entry.
    ///
    /// With the unified scheme every walked entry is content; otherwise the
    /// first character of the path is the namespace.
    pub fn of_path(path: &str, unified: bool) -> Self {
        if unified {
            return Namespace::Article;
        }
        path.chars()
            .next()
            .map(Namespace::from_char)
            .unwrap_or(Namespace::Other)
    }

    /// Articles and assets are expected to have a payload.
    pub fn is_content(self) -> bool {
        matches!(self, Namespace::Article | Namespace::Asset)
    }
}

/// The payload side of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Stable position of the entry in the archive.
    pub index: u32,
    pub size: u64,
    pub mime_type: String,
}

impl Item {
    pub fn is_html(&self) -> bool {
        self.mime_type == mime::HTML
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Redirect { target: String },
    Item(Item),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: String,
    pub title: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn is_redirect(&self) -> bool {
        matches!(self.kind, EntryKind::Redirect { .. })
    }

    /// The item view of the entry. Fails on redirects.
    pub fn item(&self) -> Result<&Item, ArchiveError> {
        match &self.kind {
            EntryKind::Item(item) => Ok(item),
            EntryKind::Redirect { .. } => Err(ArchiveError::NotAnItem(self.path.clone())),
        }
    }
}

/// Read-only access to a content archive.
pub trait Archive {
    /// Whether the archive stores a checksum at all.
    fn has_checksum(&self) -> bool;

    /// The stored checksum, as text. Empty when there is none.
    fn checksum(&self) -> String;

    /// Whether the stored checksum matches the archive content.
    fn verify_checksum(&self) -> bool;

    /// Whether the low-level layout of the archive is sound.
    fn validate_structure(&self) -> bool;

    fn metadata_keys(&self) -> Vec<String>;

    fn has_entry_by_path(&self, path: &str) -> bool;

    fn entry_by_path(&self, path: &str) -> Result<Entry, ArchiveError>;

    fn entry_by_index(&self, index: u32) -> Result<Entry, ArchiveError>;

    /// The main entry, with redirects followed.
    fn main_entry(&self) -> Result<Entry, ArchiveError>;

    /// Main entry index as stored in the archive header, if any.
    fn main_entry_index(&self) -> Option<u32>;

    /// Every entry in storage order.
    fn entries(&self) -> Box<dyn Iterator<Item = Entry> + '_>;

    fn entry_count(&self) -> usize;

    fn uses_unified_namespace(&self) -> bool;

    /// Reads an item's payload. Payloads are only read on demand.
    fn item_data(&self, item: &Item) -> Result<Vec<u8>, ArchiveError>;
}

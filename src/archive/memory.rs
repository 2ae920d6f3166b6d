// src/archive/memory.rs
// In-memory archive for tests. Entries are indexed in insertion order.

use super::{mime, Archive, ArchiveError, Entry, EntryKind, Item};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
pub struct MemoryArchive {
    entries: Vec<Entry>,
    payloads: Vec<Vec<u8>>,
    by_path: HashMap<String, u32>,
    metadata: Vec<(String, String)>,
    main_path: Option<String>,
    unified: bool,
    checksum: Option<(String, bool)>,
    structure_ok: bool,
    unreadable: HashSet<u32>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        MemoryArchive {
            structure_ok: true,
            ..Default::default()
        }
    }

    /// Switches to the unified namespace scheme. Call before adding metadata.
    pub fn unified(mut self) -> Self {
        self.unified = true;
        self
    }

    pub fn item(self, path: &str, mime_type: &str, data: impl Into<Vec<u8>>) -> Self {
        self.push(path, mime_type, data.into())
    }

    /// An HTML item, with a title derived from the path.
    pub fn html(self, path: &str, body: &str) -> Self {
        self.push(path, mime::HTML, body.as_bytes().to_vec())
    }

    pub fn redirect(mut self, path: &str, target: &str) -> Self {
        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            path: path.to_string(),
            title: title_of(path),
            kind: EntryKind::Redirect {
                target: target.to_string(),
            },
        });
        self.payloads.push(Vec::new());
        self.by_path.insert(path.to_string(), index);
        self
    }

    /// Adds a metadata value. Legacy archives also expose it as an "M/" entry.
    pub fn metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.push((key.to_string(), value.to_string()));
        if !self.unified {
            self = self.push(&format!("M/{}", key), "text/plain", value.as_bytes().to_vec());
        }
        self
    }

    pub fn main_page(mut self, path: &str) -> Self {
        self.main_path = Some(path.to_string());
        self
    }

    pub fn checksum(mut self, value: &str, valid: bool) -> Self {
        self.checksum = Some((value.to_string(), valid));
        self
    }

    pub fn broken_structure(mut self) -> Self {
        self.structure_ok = false;
        self
    }

    /// Makes reading this entry's payload fail.
    pub fn unreadable(mut self, path: &str) -> Self {
        if let Some(index) = self.by_path.get(path) {
            self.unreadable.insert(*index);
        }
        self
    }

    fn push(mut self, path: &str, mime_type: &str, data: Vec<u8>) -> Self {
        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            path: path.to_string(),
            title: title_of(path),
            kind: EntryKind::Item(Item {
                index,
                size: data.len() as u64,
                mime_type: mime_type.to_string(),
            }),
        });
        self.payloads.push(data);
        self.by_path.insert(path.to_string(), index);
        self
    }
}

fn title_of(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).replace('_', " ")
}

impl Archive for MemoryArchive {
    fn has_checksum(&self) -> bool {
        self.checksum.is_some()
    }

    fn checksum(&self) -> String {
        self.checksum
            .as_ref()
            .map(|(value, _)| value.clone())
            .unwrap_or_default()
    }

    fn verify_checksum(&self) -> bool {
        self.checksum.as_ref().map(|(_, ok)| *ok).unwrap_or(true)
    }

    fn validate_structure(&self) -> bool {
        self.structure_ok
    }

    fn metadata_keys(&self) -> Vec<String> {
        self.metadata.iter().map(|(key, _)| key.clone()).collect()
    }

    fn has_entry_by_path(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    fn entry_by_path(&self, path: &str) -> Result<Entry, ArchiveError> {
        let index = self
            .by_path
            .get(path)
            .ok_or_else(|| ArchiveError::NotFound(path.to_string()))?;
        self.entry_by_index(*index)
    }

    fn entry_by_index(&self, index: u32) -> Result<Entry, ArchiveError> {
        self.entries
            .get(index as usize)
            .cloned()
            .ok_or(ArchiveError::IndexOutOfRange(index))
    }

    fn main_entry(&self) -> Result<Entry, ArchiveError> {
        let path = self.main_path.as_deref().ok_or(ArchiveError::NoMainEntry)?;
        let mut entry = self.entry_by_path(path)?;
        for _ in 0..16 {
            match &entry.kind {
                EntryKind::Item(_) => return Ok(entry),
                EntryKind::Redirect { target } => {
                    let target = target.clone();
                    entry = self.entry_by_path(&target)?;
                }
            }
        }
        Err(ArchiveError::BrokenRedirect {
            from: path.to_string(),
            reason: "too many redirects".to_string(),
        })
    }

    fn main_entry_index(&self) -> Option<u32> {
        self.main_path
            .as_deref()
            .and_then(|path| self.by_path.get(path).copied())
    }

    fn entries(&self) -> Box<dyn Iterator<Item = Entry> + '_> {
        Box::new(self.entries.iter().cloned())
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }

    fn uses_unified_namespace(&self) -> bool {
        self.unified
    }

    fn item_data(&self, item: &Item) -> Result<Vec<u8>, ArchiveError> {
        if self.unreadable.contains(&item.index) {
            return Err(ArchiveError::Io {
                path: self.entries[item.index as usize].path.clone().into(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, "corrupt cluster"),
            });
        }
        self.payloads
            .get(item.index as usize)
            .cloned()
            .ok_or(ArchiveError::IndexOutOfRange(item.index))
    }
}

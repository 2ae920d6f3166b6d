// src/archive/dir.rs
// =============================================================================
// An archive stored as an unpacked directory tree, one file per entry.
//
// Legacy layout (paths keep their namespace):
//   root/A/Main_Page.html      -> entry "A/Main_Page.html"
//   root/I/logo.png            -> entry "I/logo.png"
//   root/M/Title               -> metadata "Title" (also entry "M/Title")
//   root/W/mainPage            -> redirect to the path written in the file
//
// Unified layout (signalled by a top-level C/ directory):
//   root/C/Main_Page.html      -> entry "Main_Page.html"
//   root/M/Title               -> metadata "Title" (not an entry)
//   root/W/mainPage            -> main page target (not an entry)
//
// Entries are indexed in file-name order, which is also the storage order used
// when walking the archive. Payloads are read from disk only when asked for.
// =============================================================================

use super::{mime, Archive, ArchiveError, Entry, EntryKind, Item};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MAIN_PAGE_FILE: &str = "W/mainPage";

#[derive(Debug)]
pub struct DirArchive {
    root: PathBuf,
    unified: bool,
    entries: Vec<Entry>,
    // disk location of each entry, by index
    files: Vec<PathBuf>,
    by_path: HashMap<String, u32>,
    metadata_keys: Vec<String>,
    main_target: Option<String>,
    layout_problems: Vec<String>,
}

impl DirArchive {
    /// Scans the directory and builds the entry table.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(ArchiveError::Open {
                path: root,
                reason: "not a directory".to_string(),
            });
        }

        let unified = root.join("C").is_dir();
        let mut archive = DirArchive {
            root: root.clone(),
            unified,
            entries: Vec::new(),
            files: Vec::new(),
            by_path: HashMap::new(),
            metadata_keys: Vec::new(),
            main_target: None,
            layout_problems: Vec::new(),
        };

        for dir_entry in WalkDir::new(&root).sort_by_file_name() {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type().is_file() {
                continue;
            }
            let disk_path = dir_entry.path();
            let rel = disk_path.strip_prefix(&root).unwrap_or(disk_path);
            let rel_str = match rel.to_str() {
                Some(s) => s.replace('\\', "/"),
                None => {
                    archive
                        .layout_problems
                        .push(format!("non UTF-8 path: {}", rel.display()));
                    continue;
                }
            };
            archive.add_file(&rel_str, disk_path)?;
        }

        log::debug!(
            "Opened {} ({} entries, {} layout)",
            archive.root.display(),
            archive.entries.len(),
            if unified { "unified" } else { "legacy" }
        );
        Ok(archive)
    }

    fn add_file(&mut self, rel: &str, disk_path: &Path) -> Result<(), ArchiveError> {
        let Some((namespace, rest)) = rel.split_once('/') else {
            self.layout_problems
                .push(format!("file outside any namespace: {}", rel));
            return Ok(());
        };

        if rel == MAIN_PAGE_FILE {
            let target = fs::read_to_string(disk_path)
                .map_err(|source| ArchiveError::Io {
                    path: disk_path.to_path_buf(),
                    source,
                })?
                .trim()
                .to_string();
            if !self.unified {
                self.push(
                    rel,
                    disk_path,
                    EntryKind::Redirect {
                        target: target.clone(),
                    },
                );
            }
            self.main_target = Some(target);
            return Ok(());
        }

        if namespace == "M" {
            self.metadata_keys.push(rest.to_string());
        }

        if self.unified {
            match namespace {
                "C" => self.push_item(rest, disk_path)?,
                "M" | "W" | "X" => {}
                other => self
                    .layout_problems
                    .push(format!("unknown namespace '{}' in unified layout", other)),
            }
        } else {
            if namespace.chars().count() != 1 {
                self.layout_problems
                    .push(format!("namespace '{}' is not a single character", namespace));
            }
            self.push_item(rel, disk_path)?;
        }
        Ok(())
    }

    fn push_item(&mut self, path: &str, disk_path: &Path) -> Result<(), ArchiveError> {
        let size = fs::metadata(disk_path)
            .map_err(|source| ArchiveError::Io {
                path: disk_path.to_path_buf(),
                source,
            })?
            .len();
        let mut mime_type = mime::mime_type_for_path(path);
        if mime::is_fallback(mime_type) && size > 0 {
            let head = read_head(disk_path)?;
            mime_type = mime::mime_type_for_file(path, &head);
        }
        let index = self.entries.len() as u32;
        self.push(
            path,
            disk_path,
            EntryKind::Item(Item {
                index,
                size,
                mime_type: mime_type.to_string(),
            }),
        );
        Ok(())
    }

    fn push(&mut self, path: &str, disk_path: &Path, kind: EntryKind) {
        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            path: path.to_string(),
            title: title_from_path(path),
            kind,
        });
        self.files.push(disk_path.to_path_buf());
        self.by_path.insert(path.to_string(), index);
    }
}

// The first few bytes of a file, enough to recognise HTML without an extension
fn read_head(disk_path: &Path) -> Result<Vec<u8>, ArchiveError> {
    let io_err = |source: std::io::Error| ArchiveError::Io {
        path: disk_path.to_path_buf(),
        source,
    };
    let file = fs::File::open(disk_path).map_err(io_err)?;
    let mut head = Vec::with_capacity(mime::SNIFF_LEN);
    file.take(mime::SNIFF_LEN as u64)
        .read_to_end(&mut head)
        .map_err(io_err)?;
    Ok(head)
}

// "A/Main_Page.html" -> "Main Page"
fn title_from_path(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    stem.replace('_', " ")
}

impl Archive for DirArchive {
    // A plain directory stores no checksum.
    fn has_checksum(&self) -> bool {
        false
    }

    fn checksum(&self) -> String {
        String::new()
    }

    fn verify_checksum(&self) -> bool {
        true
    }

    fn validate_structure(&self) -> bool {
        for problem in &self.layout_problems {
            log::warn!("{}: {}", self.root.display(), problem);
        }
        self.layout_problems.is_empty()
    }

    fn metadata_keys(&self) -> Vec<String> {
        self.metadata_keys.clone()
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
        let target = self.main_target.as_deref().ok_or(ArchiveError::NoMainEntry)?;
        let entry = self.entry_by_path(target)?;
        if let EntryKind::Redirect { .. } = entry.kind {
            return Err(ArchiveError::BrokenRedirect {
                from: MAIN_PAGE_FILE.to_string(),
                reason: format!("'{}' is itself a redirect", target),
            });
        }
        Ok(entry)
    }

    fn main_entry_index(&self) -> Option<u32> {
        self.main_target
            .as_deref()
            .and_then(|target| self.by_path.get(target).copied())
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
        let path = self
            .files
            .get(item.index as usize)
            .ok_or(ArchiveError::IndexOutOfRange(item.index))?;
        fs::read(path).map_err(|source| ArchiveError::Io {
            path: path.clone(),
            source,
        })
    }
}

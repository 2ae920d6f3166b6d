// src/archive/error.rs
// =============================================================================
// Errors reported by the archive access layer.
//
// These are failures to *read* the archive. Problems found *in* the archive
// (missing links, empty entries, ...) are never errors; they end up as report
// messages instead.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    /// The archive root does not exist or is not a directory.
    #[error("Cannot open archive at {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    /// Reading an entry's payload from disk failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the archive directory failed.
    #[error("Cannot list archive contents: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("No entry with path '{0}'")]
    NotFound(String),

    #[error("No entry with index {0}")]
    IndexOutOfRange(u32),

    /// `item()` was called on a redirect.
    #[error("Entry '{0}' is a redirect, not an item")]
    NotAnItem(String),

    #[error("Archive has no main entry")]
    NoMainEntry,

    /// A redirect points to a path that does not exist or loops.
    #[error("Redirect '{from}' cannot be resolved: {reason}")]
    BrokenRedirect { from: String, reason: String },
}

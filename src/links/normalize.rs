// src/links/normalize.rs
// =============================================================================
// Resolves a link found in an entry to the archive path it points at.
//
// Example, for an article stored at "A/Rust":
//   "Cargo"            -> "A/Cargo"
//   "../I/logo.png"    -> "I/logo.png"
//   "./Cargo#install"  -> "A/Cargo"
//   "/A/Cargo?x=1"     -> "A/Cargo"
//   "Caf%C3%A9"        -> "A/Café"
//   "../../x"          -> out of bounds (climbs above the archive root)
//   "%2E%2E/%2E%2E/x"  -> out of bounds too
//
// Pure fragment/query links ("#top", "?q") and empty links are handled by the
// caller and never reach this function.
// =============================================================================

use percent_encoding::percent_decode_str;

/// A link that climbs above the archive root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfBounds {
    pub link: String,
    pub base_path: String,
}

/// The directory part of a path: everything before the last '/'.
pub fn base_directory(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[..pos],
        None => "",
    }
}

/// Resolves `link` against the entry stored at `base_path`.
pub fn normalize(link: &str, base_path: &str) -> Result<String, OutOfBounds> {
    // Drop "#fragment" and "?query"
    let cut = link.find(['#', '?']).unwrap_or(link.len());
    let target = &link[..cut];

    let mut segments: Vec<String> = Vec::new();
    let relative = match target.strip_prefix('/') {
        Some(absolute) => absolute,
        None => {
            segments.extend(
                base_directory(base_path)
                    .split('/')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            );
            target
        }
    };

    for raw in relative.split('/') {
        // decoded first, so "%2E%2E" climbs like ".."
        let segment = percent_decode_str(raw).decode_utf8_lossy();
        match &*segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(OutOfBounds {
                        link: link.to_string(),
                        base_path: base_path.to_string(),
                    });
                }
            }
            other => segments.push(other.to_string()),
        }
    }

    Ok(segments.join("/"))
}

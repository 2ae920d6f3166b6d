// src/links/mod.rs
// =============================================================================
// This module contains all link handling for HTML entries.
//
// Submodules:
// - extract: pulls link occurrences out of HTML
// - normalize: resolves a link to the archive path it points at
// - validate: groups an entry's links and finds the missing targets
// =============================================================================

mod extract;
mod normalize;
mod validate;

pub use extract::extract_links;
pub use validate::{find_external_dependency, LinkValidator};

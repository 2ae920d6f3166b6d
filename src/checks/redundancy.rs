// src/checks/redundancy.rs
// =============================================================================
// Finds entries whose payloads are byte-for-byte identical.
//
// Comparing every pair of entries would be quadratic, so this works in two
// phases:
// 1. During the walk, every payload is hashed (Adler-32) and its entry index
//    is appended to the bucket for that hash.
// 2. After the walk, only entries sharing a bucket are compared, byte by byte.
//
// Inside a bucket the first remaining entry is the pivot. Everything equal to
// the pivot is reported as (pivot, other) and leaves the bucket; everything
// else waits for the next pivot. Three identical entries A, B, C therefore
// give (A, B) and (A, C), never (B, C).
//
// Known limitation: equal payloads always hash equally, so two identical
// entries can never land in different buckets. Entries are never compared
// across buckets.
// =============================================================================

use crate::archive::ArchiveError;
use std::collections::{BTreeMap, VecDeque};

/// An entry as needed to compare and report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem {
    pub path: String,
    pub title: String,
    pub data: Vec<u8>,
}

/// Two distinct entries with identical payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedundantPair {
    pub first: String,
    pub second: String,
}

#[derive(Debug, Default)]
pub struct RedundancyDetector {
    // BTreeMap keeps the report order independent of hashing internals
    buckets: BTreeMap<u32, Vec<u32>>,
}

impl RedundancyDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry to the bucket of its content hash.
    pub fn record(&mut self, index: u32, hash: u32) {
        self.buckets.entry(hash).or_default().push(index);
    }

    /// Hashes a payload with Adler-32 and records it.
    pub fn record_payload(&mut self, index: u32, data: &[u8]) {
        self.record(index, adler2::adler32_slice(data));
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Compares the entries of every bucket and returns the redundant pairs.
    ///
    /// `resolve` fetches an entry by index. Entries that cannot be resolved are
    /// logged and left out of the comparison.
    pub fn detect<F>(self, mut resolve: F) -> Vec<RedundantPair>
    where
        F: FnMut(u32) -> Result<ResolvedItem, ArchiveError>,
    {
        let mut pairs = Vec::new();

        for (hash, indices) in self.buckets {
            if indices.len() < 2 {
                continue;
            }
            log::debug!("Comparing {} entries with hash {:08x}", indices.len(), hash);

            let mut remaining: VecDeque<u32> = indices.into();
            while let Some(pivot_index) = remaining.pop_front() {
                if remaining.is_empty() {
                    break;
                }
                let pivot = match resolve(pivot_index) {
                    Ok(item) => item,
                    Err(e) => {
                        log::warn!("Skipping entry {} in redundancy check: {}", pivot_index, e);
                        continue;
                    }
                };

                let mut different = VecDeque::with_capacity(remaining.len());
                for other_index in remaining.drain(..) {
                    let other = match resolve(other_index) {
                        Ok(item) => item,
                        Err(e) => {
                            log::warn!("Skipping entry {} in redundancy check: {}", other_index, e);
                            continue;
                        }
                    };
                    if other.data == pivot.data {
                        log::debug!("'{}' duplicates '{}'", other.title, pivot.title);
                        pairs.push(RedundantPair {
                            first: pivot.path.clone(),
                            second: other.path,
                        });
                    } else {
                        different.push_back(other_index);
                    }
                }
                remaining = different;
            }
        }

        pairs
    }
}

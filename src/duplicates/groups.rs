//! Duplicate grouping by normalized title key.
//!
//! # Overview
//!
//! Entries are bucketed by [`NormalizedKey`]. Within one collection, any key
//! with two or more entries is a [`DuplicateGroup`]. Across collections, any
//! key present on both sides is a [`CrossDuplicateGroup`], provided the key is
//! long enough to mean something (near-empty titles such as `"A"` would match
//! unrelated garbage).
//!
//! Groups come back sorted by key and members keep manifest order, so two runs
//! over the same input produce identical output.
//!
//! # Example
//!
//! ```
//! use movie_dupecheck::duplicates::group_duplicates;
//! use movie_dupecheck::manifest::{Collection, Entry};
//!
//! let entries = vec![
//!     Entry::new("Alien (1979)", Collection::Hd),
//!     Entry::new("Alien.1979.Extended", Collection::Hd),
//!     Entry::new("Heat (1995)", Collection::Hd),
//! ];
//!
//! let (groups, stats) = group_duplicates(&entries);
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].key.as_str(), "Alien (1979)");
//! assert_eq!(groups[0].len(), 2);
//! assert_eq!(stats.total_entries, 3);
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::manifest::{Collection, Entry};
use crate::title::NormalizedKey;

/// Entries of one collection sharing a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// Shared normalized key
    pub key: NormalizedKey,
    /// Members in manifest order (2 or more)
    pub entries: Vec<Entry>,
}

impl DuplicateGroup {
    /// Number of entries in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collection of the members, taken from the first one.
    #[must_use]
    pub fn collection(&self) -> Option<Collection> {
        self.entries.first().map(|e| e.collection)
    }

    /// Number of redundant copies (all but one).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }
}

/// A key listed in both collections.
///
/// Both sides are always non-empty and complete; one HD entry may face several
/// UHD entries and the other way round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossDuplicateGroup {
    /// Shared normalized key
    pub key: NormalizedKey,
    /// HD entries with this key, in manifest order
    pub hd: Vec<Entry>,
    /// UHD entries with this key, in manifest order
    pub uhd: Vec<Entry>,
}

impl CrossDuplicateGroup {
    /// Entries of one side.
    #[must_use]
    pub fn side(&self, collection: Collection) -> &[Entry] {
        match collection {
            Collection::Hd => &self.hd,
            Collection::Uhd => &self.uhd,
        }
    }
}

/// Statistics from grouping one collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of entries processed
    pub total_entries: usize,
    /// Number of distinct keys
    pub unique_keys: usize,
    /// Number of keys with 2+ entries
    pub duplicate_groups: usize,
    /// Number of entries inside those groups
    pub duplicate_entries: usize,
}

/// Bucket entries by key, preserving manifest order inside each bucket.
#[must_use]
pub fn bucket_by_key(entries: &[Entry]) -> BTreeMap<NormalizedKey, Vec<Entry>> {
    let mut buckets: BTreeMap<NormalizedKey, Vec<Entry>> = BTreeMap::new();
    for entry in entries {
        buckets.entry(entry.key()).or_default().push(entry.clone());
    }
    buckets
}

/// Group one collection's entries into duplicate groups.
///
/// Only keys with two or more entries are returned, sorted by key.
#[must_use]
pub fn group_duplicates(entries: &[Entry]) -> (Vec<DuplicateGroup>, GroupingStats) {
    let buckets = bucket_by_key(entries);
    let mut stats = GroupingStats {
        total_entries: entries.len(),
        unique_keys: buckets.len(),
        ..GroupingStats::default()
    };

    let groups: Vec<DuplicateGroup> = buckets
        .into_iter()
        .filter(|(key, members)| {
            if members.len() < 2 {
                return false;
            }
            stats.duplicate_groups += 1;
            stats.duplicate_entries += members.len();
            log::debug!("Duplicate group '{}': {} entries", key, members.len());
            true
        })
        .map(|(key, entries)| DuplicateGroup { key, entries })
        .collect();

    log::info!(
        "Grouped {} entries into {} keys, {} duplicate groups",
        stats.total_entries,
        stats.unique_keys,
        stats.duplicate_groups
    );

    (groups, stats)
}

/// Find keys listed in both collections.
///
/// A key only qualifies when it is longer than `min_key_len` characters.
/// Returned groups are sorted by key.
#[must_use]
pub fn group_cross(hd: &[Entry], uhd: &[Entry], min_key_len: usize) -> Vec<CrossDuplicateGroup> {
    let hd_buckets = bucket_by_key(hd);
    let mut uhd_buckets = bucket_by_key(uhd);

    let groups: Vec<CrossDuplicateGroup> = hd_buckets
        .into_iter()
        .filter_map(|(key, hd_entries)| {
            let uhd_entries = uhd_buckets.remove(&key)?;
            if key.char_len() <= min_key_len {
                log::debug!("Ignoring short cross key '{}'", key);
                return None;
            }
            Some(CrossDuplicateGroup {
                key,
                hd: hd_entries,
                uhd: uhd_entries,
            })
        })
        .collect();

    log::info!("Found {} titles in both HD and UHD", groups.len());
    groups
}

//! Visited-directory tracking for symlink cycle protection.
//!
//! Movie folders on NAS shares sometimes contain symlinks back into the
//! library (`Extras -> ../..`). Following those blindly never terminates, so
//! the size walk records the `(device, inode)` of every directory it enters
//! and refuses to enter a symlinked directory whose target was already seen.
//!
//! # Platform Support
//!
//! - **Unix**: Uses (device_id, inode) pairs from file metadata
//! - **Other**: Tracking is disabled; every directory counts as new and the
//!   walker's own ancestor loop check is the only protection

use std::collections::HashSet;
use std::fs::Metadata;

/// Remembers which directories a walk has entered.
///
/// Not thread-safe; one tracker belongs to one walk.
#[derive(Debug, Default)]
pub struct VisitedDirs {
    seen: HashSet<InodeKey>,
}

impl VisitedDirs {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directory, returning `true` if it had not been seen before.
    ///
    /// `metadata` must describe the directory itself (the symlink target when
    /// the entry is a link). Platforms without inode information always
    /// return `true`.
    pub fn first_visit(&mut self, metadata: &Metadata) -> bool {
        match InodeKey::from_metadata(metadata) {
            Some(key) => self.seen.insert(key),
            None => true,
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.seen.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Inode tracking only exists on unix.
    #[cfg(test)]
    const fn is_supported() -> bool {
        cfg!(unix)
    }
}

/// Platform-specific identity of a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct InodeKey {
    #[cfg(unix)]
    dev: u64,
    #[cfg(unix)]
    ino: u64,
    #[cfg(not(unix))]
    _phantom: (),
}

impl InodeKey {
    #[cfg(unix)]
    fn from_metadata(metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    fn from_metadata(_metadata: &Metadata) -> Option<Self> {
        None
    }
}

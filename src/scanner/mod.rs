//! Scanner module for on-disk size resolution.
//!
//! This module provides functionality for:
//! - Finding the largest video file of a movie entry (ranking)
//! - Summing everything an entry occupies (reclaimable space)
//! - Symlink cycle protection during the walk
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`sizes`]: The two size walks
//! - [`links`]: Visited-directory tracking by inode
//!
//! The decision engine does not call the walks directly. It goes through the
//! [`SizeLookup`] trait so that plans can be computed against fixed sizes in
//! tests; [`FsSizes`] is the filesystem implementation.

pub mod links;
pub mod sizes;

use std::path::Path;

pub use links::VisitedDirs;
pub use sizes::{is_video_file, largest_video_file_size, total_folder_size, VIDEO_EXTENSIONS};

/// Source of entry sizes for ranking and reclaimable-space totals.
///
/// Implementations must not fail: anything that cannot be measured is 0.
pub trait SizeLookup {
    /// Size used to rank copies (largest video file).
    fn ranking_size(&self, root: &Path, name: &str) -> u64;

    /// Bytes freed by deleting the entry.
    fn reclaimable_size(&self, root: &Path, name: &str) -> u64;

    /// Check if the entry is present (following symlinks).
    fn exists(&self, root: &Path, name: &str) -> bool {
        !name.is_empty() && root.join(name).exists()
    }
}

/// [`SizeLookup`] backed by the filesystem walks in [`sizes`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSizes;

impl SizeLookup for FsSizes {
    fn ranking_size(&self, root: &Path, name: &str) -> u64 {
        largest_video_file_size(root, name)
    }

    fn reclaimable_size(&self, root: &Path, name: &str) -> u64 {
        total_folder_size(root, name)
    }
}

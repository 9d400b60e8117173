//! On-disk size resolution for collection entries.
//!
//! # Overview
//!
//! Two measurements with different purposes:
//!
//! - [`largest_video_file_size`] ranks copies against each other. The main
//!   feature file dominates a movie folder, so its size is a decent stand-in
//!   for quality; extras, subtitles and artwork are ignored.
//! - [`total_folder_size`] is what deleting the entry would free. It only
//!   feeds the reclaimable-space figure.
//!
//! Neither function fails. A missing entry, an unreadable directory or a
//! broken link simply contributes zero, so a partially inaccessible library
//! still produces a plan.
//!
//! # Example
//!
//! ```no_run
//! use movie_dupecheck::scanner::{largest_video_file_size, total_folder_size};
//! use std::path::Path;
//!
//! let root = Path::new("/volume1/Movies-HD");
//! let feature = largest_video_file_size(root, "Alien (1979)");
//! let on_disk = total_folder_size(root, "Alien (1979)");
//! println!("feature {} bytes, folder {} bytes", feature, on_disk);
//! ```

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use super::links::VisitedDirs;

/// Container extensions that count as the movie itself (lowercase, no dot).
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "mov", "wmv", "m4v", "mpg", "mpeg", "ts", "m2ts", "iso",
];

/// Check if a path has one of the [`VIDEO_EXTENSIONS`], case-insensitively.
#[must_use]
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
        .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
}

/// Size of the largest video file under `root/name`.
///
/// Symlinked directories are followed, but a directory whose target was
/// already entered during this walk is skipped, so link cycles terminate.
/// Symlinked video files count when their target exists. Returns 0 when the
/// entry is missing or holds no video file.
#[must_use]
pub fn largest_video_file_size(root: &Path, name: &str) -> u64 {
    if name.is_empty() {
        return 0;
    }
    let path = root.join(name);

    let mut visited = VisitedDirs::new();
    let walker = WalkDir::new(&path)
        .follow_links(true)
        .into_iter()
        .filter_entry(move |entry| enter_once(entry, &mut visited));

    let mut largest = 0u64;
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::debug!("Size walk skipped an entry under {}: {}", path.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_video_file(entry.path()) {
            continue;
        }

        match entry.metadata() {
            Ok(meta) => {
                let size = meta.len();
                if size > largest {
                    log::trace!("Largest video so far: {} ({} bytes)", entry.path().display(), size);
                    largest = size;
                }
            }
            Err(e) => log::debug!("Cannot stat {}: {}", entry.path().display(), e),
        }
    }

    largest
}

/// Walk filter: enter each directory at most once. Only a followed symlink
/// can lead back to a directory already entered.
fn enter_once(entry: &DirEntry, visited: &mut VisitedDirs) -> bool {
    if !entry.file_type().is_dir() {
        return true;
    }
    match entry.metadata() {
        Ok(meta) => {
            if visited.first_visit(&meta) {
                return true;
            }
            log::debug!(
                "Skipping directory already walked: {}",
                entry.path().display()
            );
            false
        }
        Err(e) => {
            log::debug!("Cannot stat directory {}: {}", entry.path().display(), e);
            false
        }
    }
}

/// Total bytes of regular files under `root/name`.
///
/// Symlinked files are not counted and symlinked directories are not entered,
/// since removing the entry only removes the links. A single regular file
/// entry counts as its own size.
#[must_use]
pub fn total_folder_size(root: &Path, name: &str) -> u64 {
    if name.is_empty() {
        return 0;
    }
    let path = root.join(name);

    WalkDir::new(&path)
        .follow_links(false)
        .follow_root_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                log::debug!("Size walk skipped an entry under {}: {}", path.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

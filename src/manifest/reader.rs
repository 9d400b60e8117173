//! Manifest parsing for directory listings and text exports.
//!
//! # Directory manifests
//!
//! Every direct child of the directory is one movie. Dotfiles and the
//! Synology thumbnail folder `@eaDir` are skipped. Names are returned sorted so
//! that repeated runs see the same order. Children whose names are not valid
//! UTF-8 are skipped with a warning.
//!
//! # Text manifests
//!
//! One movie per line. Lines exported by NAS tools often look like
//! `12.3G|Alien (1979)/`, so for each line:
//!
//! 1. Trim; skip blank lines.
//! 2. If the line contains `|`, keep only the text after the first `|`.
//! 3. Strip trailing `/`, trim again.
//! 4. Skip the line if it is empty, equal to `\@eaDir`, or starts with `@`.
//!
//! Files are decoded as UTF-8 with invalid sequences replaced.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Collection, Entry, ManifestError};

/// Synology metadata folder present in every shared directory.
const SYNOLOGY_META_DIR: &str = "@eaDir";

/// Result of loading one collection, with the warnings that were raised.
#[derive(Debug, Clone, Default)]
pub struct LoadedCollection {
    /// Entries in manifest order
    pub entries: Vec<Entry>,
    /// Problems encountered while loading (already logged)
    pub warnings: Vec<String>,
}

/// Read a manifest, which may be a directory or a text file.
///
/// Directory children whose names are not valid UTF-8 are left out; see
/// [`load_collection`] for how they are reported.
///
/// # Errors
///
/// - `NotFound` if the path does not exist
/// - `PermissionDenied` / `Io` if it cannot be read
/// - `Unsupported` if it is neither a file nor a directory
pub fn read_manifest(path: &Path) -> Result<Vec<String>, ManifestError> {
    read_names(path).map(|listing| listing.names)
}

/// Names read from a manifest plus the directory children that had to be
/// left out.
#[derive(Debug, Default)]
struct Listing {
    names: Vec<String>,
    non_utf8: Vec<PathBuf>,
}

fn read_names(path: &Path) -> Result<Listing, ManifestError> {
    let metadata = fs::metadata(path).map_err(|e| ManifestError::from_io(path, e))?;

    if metadata.is_dir() {
        list_directory(path)
    } else if metadata.is_file() {
        let bytes = fs::read(path).map_err(|e| ManifestError::from_io(path, e))?;
        Ok(Listing {
            names: parse_listing(&String::from_utf8_lossy(&bytes)),
            non_utf8: Vec::new(),
        })
    } else {
        Err(ManifestError::Unsupported(path.to_path_buf()))
    }
}

/// Names of the direct children of `dir`, sorted, without dotfiles or `@eaDir`.
///
/// A name that is not valid UTF-8 cannot be joined back onto the root once it
/// has been converted, so such children are collected separately.
fn list_directory(dir: &Path) -> Result<Listing, ManifestError> {
    let read_dir = fs::read_dir(dir).map_err(|e| ManifestError::from_io(dir, e))?;

    let mut listing = Listing::default();
    for child in read_dir {
        let child = match child {
            Ok(c) => c,
            Err(e) => {
                log::debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let name = match child.file_name().into_string() {
            Ok(name) => name,
            Err(_) => {
                listing.non_utf8.push(child.path());
                continue;
            }
        };
        if name.starts_with('.') || name == SYNOLOGY_META_DIR {
            log::trace!("Skipping {}", name);
            continue;
        }
        listing.names.push(name);
    }

    listing.names.sort();
    listing.non_utf8.sort();
    Ok(listing)
}

/// Parse a text listing into movie names.
#[must_use]
pub fn parse_listing(text: &str) -> Vec<String> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let line = match line.split_once('|') {
        Some((_tag, rest)) => rest,
        None => line,
    };
    let line = line.trim_end_matches('/').trim();

    if line.is_empty() || line == r"\@eaDir" || line.starts_with('@') {
        return None;
    }
    Some(line.to_string())
}

/// Load one collection, degrading any failure to an empty collection.
///
/// Input errors never abort the run: they are logged as warnings and returned
/// in [`LoadedCollection::warnings`] for the final report. A name listed more
/// than once refers to a single folder and is kept only once.
#[must_use]
pub fn load_collection(path: &Path, collection: Collection) -> LoadedCollection {
    let listing = match read_names(path) {
        Ok(listing) => listing,
        Err(e) => {
            let warning = format!("Could not read {} manifest: {}", collection, e);
            log::warn!("{}", warning);
            return LoadedCollection {
                entries: Vec::new(),
                warnings: vec![warning],
            };
        }
    };

    let mut warnings: Vec<String> = listing
        .non_utf8
        .iter()
        .map(|p| format!("Skipped {} entry with a non-UTF-8 name: {}", collection, p.display()))
        .collect();

    let mut seen = HashSet::new();
    let mut repeated: Vec<String> = Vec::new();
    let mut entries = Vec::with_capacity(listing.names.len());
    for name in listing.names {
        if seen.contains(&name) {
            if !repeated.contains(&name) {
                repeated.push(name);
            }
            continue;
        }
        seen.insert(name.clone());
        entries.push(Entry::new(name, collection));
    }
    warnings.extend(
        repeated
            .iter()
            .map(|name| format!("{} manifest lists {} more than once", collection, name)),
    );

    for warning in &warnings {
        log::warn!("{}", warning);
    }
    log::info!(
        "Loaded {} {} entries from {}",
        entries.len(),
        collection,
        path.display()
    );

    LoadedCollection { entries, warnings }
}

/// Resolve a manifest path, falling back to a file of the same name next to
/// the executable when the given path does not exist.
#[must_use]
pub fn resolve_manifest_path(path: &Path) -> PathBuf {
    if path.exists() {
        return path.to_path_buf();
    }

    let fallback = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .zip(path.file_name())
        .map(|(dir, name)| dir.join(name));

    match fallback {
        Some(candidate) if candidate.exists() => {
            log::debug!(
                "Manifest {} not found, using {}",
                path.display(),
                candidate.display()
            );
            candidate
        }
        _ => path.to_path_buf(),
    }
}

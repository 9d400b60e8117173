//! Collection manifests: where the movie names come from.
//!
//! A collection is either a directory, where every direct child is one movie,
//! or a text listing with one movie per line. See [`reader`] for the parsing
//! rules.
//!
//! # Example
//!
//! ```no_run
//! use movie_dupecheck::manifest::{load_collection, Collection};
//! use std::path::Path;
//!
//! let loaded = load_collection(Path::new("HD"), Collection::Hd);
//! println!("{} HD movies", loaded.entries.len());
//! for warning in &loaded.warnings {
//!     eprintln!("Warning: {}", warning);
//! }
//! ```

pub mod reader;

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

use crate::title::{normalize, NormalizedKey};

pub use reader::{load_collection, read_manifest, LoadedCollection};

/// The two tiers being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ValueEnum)]
pub enum Collection {
    /// HD tier
    #[serde(rename = "HD")]
    Hd,
    /// UHD tier
    #[serde(rename = "UHD")]
    Uhd,
}

impl Collection {
    /// The other tier.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Hd => Self::Uhd,
            Self::Uhd => Self::Hd,
        }
    }

    /// Upper-case label used in reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Hd => "HD",
            Self::Uhd => "UHD",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One movie folder or manifest line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    /// Raw name as listed
    pub name: String,
    /// Collection the name was listed in
    pub collection: Collection,
}

impl Entry {
    /// Create a new entry.
    #[must_use]
    pub fn new(name: impl Into<String>, collection: Collection) -> Self {
        Self {
            name: name.into(),
            collection,
        }
    }

    /// Grouping key for this entry.
    #[must_use]
    pub fn key(&self) -> NormalizedKey {
        normalize(self.name.as_str())
    }
}

/// Errors that can occur while reading a manifest.
#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    /// The manifest path does not exist.
    #[error("Manifest not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the manifest.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path exists but is neither a file nor a directory.
    #[error("Not a file or directory: {0}")]
    Unsupported(PathBuf),

    /// An I/O error occurred while reading the manifest.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Classify an I/O error for `path`.
    #[must_use]
    pub fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

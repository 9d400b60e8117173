//! Confirmed, permanent removal of deletion candidates.
//!
//! # Overview
//!
//! The executor is the only stage that mutates the filesystem:
//! - Nothing happens for an empty candidate list
//! - The reclaimable total is shown through a [`Confirm`] implementation
//! - Only the exact token [`CONFIRM_TOKEN`] (surrounding whitespace ignored)
//!   lets the batch run
//! - Directories are removed recursively, single files directly
//! - A path that is already gone is reported, not counted as a failure
//! - One failing entry never stops the rest of the batch
//!
//! # Safety
//!
//! Removal is permanent; there is no trash. Whoever builds the candidate list
//! is responsible for leaving one copy of every title in place, which the
//! decision engine guarantees.
//!
//! # Example
//!
//! ```no_run
//! use movie_dupecheck::actions::delete::{execute, AlwaysDeny, ExecutionOutcome};
//! use movie_dupecheck::duplicates::DeletionCandidate;
//! use movie_dupecheck::manifest::Collection;
//! use movie_dupecheck::scanner::FsSizes;
//! use std::path::Path;
//!
//! let candidates = vec![DeletionCandidate::new(
//!     Path::new("/volume1/Movies-HD"),
//!     "Alien (1979)",
//!     Collection::Hd,
//! )];
//!
//! match execute(&candidates, &FsSizes, &mut AlwaysDeny, &mut ()) {
//!     ExecutionOutcome::Cancelled { .. } => println!("Nothing was deleted"),
//!     other => println!("{:?}", other),
//! }
//! ```

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::duplicates::{reclaimable_bytes, DeletionCandidate};
use crate::output::format_size;
use crate::scanner::SizeLookup;

/// Literal the user must type to allow deletion.
pub const CONFIRM_TOKEN: &str = "DELETE";

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}

/// What happened to one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The path existed and was removed.
    Removed,
    /// The path did not exist any more.
    AlreadyGone,
}

/// Remove one entry: a directory recursively, anything else directly.
///
/// Symlinks are removed themselves, never their targets.
///
/// # Errors
///
/// Returns a [`DeleteError`] if the entry exists but cannot be removed.
pub fn remove_entry(path: &Path) -> Result<Removal, DeleteError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Removal::AlreadyGone),
        Err(e) => return Err(DeleteError::from_io(path, e)),
    };

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match removed {
        Ok(()) => Ok(Removal::Removed),
        // Lost a race with something else deleting it.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Removal::AlreadyGone),
        Err(e) => Err(DeleteError::from_io(path, e)),
    }
}

/// Result of a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Bytes the entry occupied.
    pub size: u64,
}

/// Results of a batch deletion.
#[derive(Debug, Clone, Default)]
pub struct BatchDeleteResult {
    /// Successfully deleted entries.
    pub successes: Vec<DeleteResult>,
    /// Paths that no longer existed.
    pub already_gone: Vec<PathBuf>,
    /// Failed deletions with their errors.
    pub failures: Vec<(PathBuf, String)>,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

impl BatchDeleteResult {
    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of paths found missing.
    #[must_use]
    pub fn already_gone_count(&self) -> usize {
        self.already_gone.len()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total number of attempted deletions.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.successes.len() + self.already_gone.len() + self.failures.len()
    }

    /// Check if no deletion failed.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Deleted {} of {} entries ({} freed), {} already gone, {} failed",
            self.success_count(),
            self.total_count(),
            format_size(self.bytes_freed),
            self.already_gone_count(),
            self.failure_count()
        )
    }
}

/// Callback trait for deletion progress reporting.
///
/// Every method has an empty default; `()` is the silent implementation.
pub trait DeleteProgressCallback {
    /// Called before each deletion.
    fn on_before_delete(&mut self, _path: &Path, _index: usize, _total: usize) {}

    /// Called after a successful deletion.
    fn on_delete_success(&mut self, _path: &Path, _size: u64) {}

    /// Called when the path was already gone.
    fn on_already_gone(&mut self, _path: &Path) {}

    /// Called after a failed deletion.
    fn on_delete_failure(&mut self, _path: &Path, _error: &str) {}

    /// Called when the batch completes.
    fn on_complete(&mut self, _result: &BatchDeleteResult) {}
}

impl DeleteProgressCallback for () {}

/// Delete every candidate, continuing past failures.
///
/// The size of each entry is measured through `sizes` right before removal,
/// so `bytes_freed` only counts what was actually there.
pub fn delete_batch<S: SizeLookup, C: DeleteProgressCallback>(
    candidates: &[DeletionCandidate],
    sizes: &S,
    progress: &mut C,
) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();
    let total = candidates.len();

    for (index, candidate) in candidates.iter().enumerate() {
        let path = candidate.path();
        progress.on_before_delete(&path, index, total);

        let size = sizes.reclaimable_size(&candidate.root, &candidate.name);
        match remove_entry(&path) {
            Ok(Removal::Removed) => {
                log::info!("Deleted {} ({} bytes)", path.display(), size);
                progress.on_delete_success(&path, size);
                result.bytes_freed += size;
                result.successes.push(DeleteResult { path, size });
            }
            Ok(Removal::AlreadyGone) => {
                log::info!("Already gone: {}", path.display());
                progress.on_already_gone(&path);
                result.already_gone.push(path);
            }
            Err(e) => {
                let error_msg = e.to_string();
                log::warn!("Failed to delete {}: {}", e.path().display(), error_msg);
                progress.on_delete_failure(e.path(), &error_msg);
                result.failures.push((e.path().to_path_buf(), error_msg));
            }
        }
    }

    progress.on_complete(&result);
    log::info!("{}", result.summary());

    result
}

/// Source of the confirmation answer.
pub trait Confirm {
    /// Ask for permission to delete `count` entries worth `reclaimable`
    /// bytes and return the raw answer.
    fn respond(&mut self, count: usize, reclaimable: u64) -> String;
}

/// Check an answer against [`CONFIRM_TOKEN`].
#[must_use]
pub fn is_confirmed(answer: &str) -> bool {
    answer.trim() == CONFIRM_TOKEN
}

/// Interactive confirmation: prompt on stderr, read one line from stdin.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn respond(&mut self, count: usize, reclaimable: u64) -> String {
        let mut stderr = io::stderr().lock();
        let _ = write!(
            stderr,
            "\n{} entries ({}) will be PERMANENTLY deleted.\nType '{}' to confirm: ",
            count,
            format_size(reclaimable),
            CONFIRM_TOKEN
        );
        let _ = stderr.flush();

        let mut answer = String::new();
        if let Err(e) = io::stdin().lock().read_line(&mut answer) {
            log::warn!("Could not read confirmation: {}", e);
            answer.clear();
        }
        answer
    }
}

/// Confirms every batch without asking (`--yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn respond(&mut self, _count: usize, _reclaimable: u64) -> String {
        CONFIRM_TOKEN.to_string()
    }
}

/// Refuses every batch.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysDeny;

impl Confirm for AlwaysDeny {
    fn respond(&mut self, _count: usize, _reclaimable: u64) -> String {
        String::new()
    }
}

/// How a live run ended.
#[derive(Debug, Clone)]
pub enum ExecutionOutcome {
    /// The candidate list was empty.
    NothingToDelete,
    /// The confirmation did not match; nothing was touched.
    Cancelled {
        /// Bytes that would have been freed
        reclaimable: u64,
    },
    /// The batch ran.
    Completed(BatchDeleteResult),
}

/// Confirm and delete a candidate list.
pub fn execute<S, F, C>(
    candidates: &[DeletionCandidate],
    sizes: &S,
    confirm: &mut F,
    progress: &mut C,
) -> ExecutionOutcome
where
    S: SizeLookup,
    F: Confirm,
    C: DeleteProgressCallback,
{
    if candidates.is_empty() {
        log::info!("Nothing to delete");
        return ExecutionOutcome::NothingToDelete;
    }

    let reclaimable = reclaimable_bytes(candidates, sizes);
    let answer = confirm.respond(candidates.len(), reclaimable);
    if !is_confirmed(&answer) {
        log::info!("Deletion cancelled");
        return ExecutionOutcome::Cancelled { reclaimable };
    }

    ExecutionOutcome::Completed(delete_batch(candidates, sizes, progress))
}

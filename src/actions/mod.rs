//! File actions module.
//!
//! # Deletion
//!
//! The delete module turns a deletion plan into filesystem changes:
//! - Confirmation through an injected [`Confirm`] implementation
//! - Recursive removal of movie folders, direct removal of single files
//! - Batch operations that continue past individual failures
//!
//! ```no_run
//! use movie_dupecheck::actions::{execute, StdinConfirm};
//! use movie_dupecheck::scanner::FsSizes;
//!
//! let outcome = execute(&[], &FsSizes, &mut StdinConfirm, &mut ());
//! println!("{:?}", outcome);
//! ```

pub mod delete;

// Re-export commonly used types
pub use delete::{
    delete_batch, execute, is_confirmed, remove_entry, AlwaysConfirm, AlwaysDeny,
    BatchDeleteResult, Confirm, DeleteError, DeleteProgressCallback, DeleteResult,
    ExecutionOutcome, Removal, StdinConfirm, CONFIRM_TOKEN,
};

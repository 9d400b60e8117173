//! Command-line interface definitions for movie-dupecheck.
//!
//! This module defines all CLI arguments using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Report only, from two text listings
//! movie-dupecheck --hd-file HD.txt --uhd-file UHD.txt
//!
//! # Measure sizes and show what would be deleted
//! movie-dupecheck --hd-path /volume1/Movies-HD --uhd-path /volume1/Movies-UHD --dry-run
//!
//! # Plan as JSON for scripting
//! movie-dupecheck --hd-path /volume1/Movies-HD --uhd-path /volume1/Movies-UHD --output json
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::duplicates::plan::{DEFAULT_MIN_CROSS_KEY_LEN, DEFAULT_TIE_WINNER};
use crate::manifest::Collection;
use crate::output::OutputFormat;

/// Find movies listed more than once across HD and UHD collections.
///
/// Titles are matched by normalized name and year. With collection roots
/// given, copies are ranked by the size of their main video file and the
/// smaller ones can be deleted after typing DELETE.
#[derive(Debug, Parser)]
#[command(name = "movie-dupecheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// HD manifest: a text listing or a directory
    #[arg(long, value_name = "PATH", default_value = "HD")]
    pub hd_file: PathBuf,

    /// UHD manifest: a text listing or a directory
    #[arg(long, value_name = "PATH", default_value = "UHD")]
    pub uhd_file: PathBuf,

    /// HD library root, used to measure sizes
    #[arg(long, value_name = "DIR", env = "MOVIE_DUPECHECK_HD_PATH")]
    pub hd_path: Option<PathBuf>,

    /// UHD library root, used to measure sizes
    #[arg(long, value_name = "DIR", env = "MOVIE_DUPECHECK_UHD_PATH")]
    pub uhd_path: Option<PathBuf>,

    /// Show the plan and the space it would free without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the DELETE confirmation prompt
    #[arg(short = 'y', long, conflicts_with = "dry_run")]
    pub yes: bool,

    /// Report format (json never prompts or deletes)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Collection kept when both copies of a title have the same size
    #[arg(long, value_enum, value_name = "COLLECTION", default_value_t = DEFAULT_TIE_WINNER)]
    pub prefer_on_tie: Collection,

    /// Titles shared by HD and UHD must have keys longer than N characters
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MIN_CROSS_KEY_LEN)]
    pub min_key_len: usize,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
}

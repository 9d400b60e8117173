//! Output formatters for duplicate check results.
//!
//! This module provides the two report formats:
//! - Text for people, with sizes and KEEP/DELETE markers
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use movie_dupecheck::duplicates::{build_plan, Analysis, DecisionPolicy, Roots};
//! use movie_dupecheck::output::json::JsonOutput;
//! use movie_dupecheck::scanner::FsSizes;
//!
//! let policy = DecisionPolicy::default();
//! let analysis = Analysis::new(&[], &[], &policy);
//! let plan = build_plan(&analysis, &Roots::default(), &policy, &FsSizes);
//!
//! let output = JsonOutput::new(&analysis, &plan, 0, 0, 0, &[]);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod json;
pub mod text;

use clap::ValueEnum;
use humansize::{FormatSizeOptions, WINDOWS};

// Re-export main types
pub use json::JsonOutput;
pub use text::{ConsoleProgress, ReportContext};

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report; live runs may prompt and delete
    #[default]
    Text,
    /// JSON plan for scripting; never prompts or deletes
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Format bytes in 1024-based units with two decimals (`"2.00 GB"`).
#[must_use]
pub fn format_size(bytes: u64) -> String {
    let options = FormatSizeOptions::from(WINDOWS)
        .decimal_places(2)
        .decimal_zeroes(2);
    humansize::format_size(bytes, options)
}

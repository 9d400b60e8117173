//! Run configuration.
//!
//! All settings come from the command line (with environment fallbacks for
//! the library roots). [`RunConfig`] is the resolved form the pipeline works
//! with: manifest paths after the next-to-executable fallback, empty roots
//! dropped, and the decision policy assembled.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::duplicates::{DecisionPolicy, Roots};
use crate::manifest::reader::resolve_manifest_path;
use crate::output::OutputFormat;

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Report, prompt, delete
    Live {
        /// Skip the confirmation prompt
        assume_yes: bool,
    },
    /// Report and totals only
    DryRun,
    /// JSON plan only
    Json,
}

impl RunMode {
    /// Check if this mode can delete anything.
    #[must_use]
    pub fn may_delete(self) -> bool {
        matches!(self, Self::Live { .. })
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// HD manifest (file or directory)
    pub hd_manifest: PathBuf,
    /// UHD manifest (file or directory)
    pub uhd_manifest: PathBuf,
    /// Collection roots for size resolution
    pub roots: Roots,
    /// Decision heuristics
    pub policy: DecisionPolicy,
    /// Run mode
    pub mode: RunMode,
}

impl RunConfig {
    /// Resolve the configuration from parsed arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let mode = match (cli.output, cli.dry_run) {
            (OutputFormat::Json, _) => RunMode::Json,
            (OutputFormat::Text, true) => RunMode::DryRun,
            (OutputFormat::Text, false) => RunMode::Live {
                assume_yes: cli.yes,
            },
        };

        let config = Self {
            hd_manifest: resolve_manifest_path(&cli.hd_file),
            uhd_manifest: resolve_manifest_path(&cli.uhd_file),
            roots: Roots::new(cli.hd_path.clone(), cli.uhd_path.clone()),
            policy: DecisionPolicy::default()
                .with_min_cross_key_len(cli.min_key_len)
                .with_tie_winner(cli.prefer_on_tie),
            mode,
        };
        log::debug!("Run configuration: {:?}", config);
        config
    }

    /// Check if sizes will be shown without deleting anything.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.mode == RunMode::DryRun
    }
}

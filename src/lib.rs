//! movie-dupecheck - duplicate finder for HD/UHD movie collections
//!
//! Compares two collection manifests (directories or text listings), groups
//! release-name variants of the same title, and recommends which copies to
//! remove, keeping the copy with the largest main video file. Deletion is
//! permanent and only happens after the user types `DELETE`.
//!
//! The pipeline is:
//!
//! 1. [`manifest`]: load entry names for both collections
//! 2. [`title`]: normalize every name to a `Title (Year)` key
//! 3. [`duplicates`]: group keys within and across collections, then decide
//!    what to keep using sizes from [`scanner`]
//! 4. [`output`]: render the report
//! 5. [`actions`]: confirm and delete

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod scanner;
pub mod title;

use std::io::{IsTerminal, Write};

use anyhow::{Context, Result};

use actions::{execute, AlwaysConfirm, Confirm, ExecutionOutcome, StdinConfirm};
use cli::Cli;
use config::{RunConfig, RunMode};
use duplicates::{build_plan, Analysis, DeletionPlan};
use error::ExitCode;
use manifest::{load_collection, Collection};
use output::text::{write_deletion_preview, write_outcome, write_report};
use output::{ConsoleProgress, JsonOutput, ReportContext};
use scanner::{FsSizes, SizeLookup};

/// Everything one run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Grouping results
    pub analysis: Analysis,
    /// Keep/delete plan
    pub plan: DeletionPlan,
    /// Bytes the plan would free
    pub reclaimable: u64,
    /// Result of the deletion stage; `None` unless the mode may delete
    pub outcome: Option<ExecutionOutcome>,
    /// Non-fatal problems met during the run
    pub warnings: Vec<String>,
}

/// Run the whole pipeline, writing the report to `out`.
///
/// Deletion only happens in live mode and only if `confirm` answers with the
/// confirmation token.
///
/// # Errors
///
/// Returns an error only if writing the report fails.
pub fn run<W, F, S>(config: &RunConfig, out: &mut W, confirm: &mut F, sizes: &S) -> Result<RunSummary>
where
    W: Write,
    F: Confirm,
    S: SizeLookup,
{
    let hd = load_collection(&config.hd_manifest, Collection::Hd);
    let uhd = load_collection(&config.uhd_manifest, Collection::Uhd);
    let warnings: Vec<String> = hd.warnings.iter().chain(&uhd.warnings).cloned().collect();

    let analysis = Analysis::new(&hd.entries, &uhd.entries, &config.policy);
    let plan = build_plan(&analysis, &config.roots, &config.policy, sizes);
    let reclaimable = plan.reclaimable_bytes(sizes);

    if config.mode == RunMode::Json {
        JsonOutput::new(
            &analysis,
            &plan,
            hd.entries.len(),
            uhd.entries.len(),
            reclaimable,
            &warnings,
        )
        .write_to(out, true)
        .context("Failed to write JSON report")?;

        return Ok(RunSummary {
            analysis,
            plan,
            reclaimable,
            outcome: None,
            warnings,
        });
    }

    let ctx = ReportContext {
        analysis: &analysis,
        plan: &plan,
        roots: &config.roots,
        hd_movies: hd.entries.len(),
        uhd_movies: uhd.entries.len(),
        dry_run: config.is_dry_run(),
        reclaimable,
        warnings: &warnings,
    };
    write_report(out, &ctx, sizes).context("Failed to write report")?;

    let outcome = if config.mode.may_delete() {
        write_deletion_preview(out, &plan, reclaimable).context("Failed to write report")?;
        // The prompt goes to stderr; everything before it must be visible.
        out.flush().context("Failed to write report")?;

        let mut progress = ConsoleProgress::new(&mut *out);
        let outcome = execute(&plan.candidates, sizes, confirm, &mut progress);
        write_outcome(out, &outcome).context("Failed to write report")?;
        Some(outcome)
    } else {
        None
    };
    out.flush().context("Failed to write report")?;

    Ok(RunSummary {
        analysis,
        plan,
        reclaimable,
        outcome,
        warnings,
    })
}

/// Application entry point behind `main`.
///
/// # Errors
///
/// Returns an error if the report cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let stdout = std::io::stdout();
    if cli.no_color || !stdout.is_terminal() {
        yansi::disable();
    }

    let config = RunConfig::from_cli(&cli);
    let mut out = stdout.lock();

    match config.mode {
        RunMode::Live { assume_yes: true } => {
            run(&config, &mut out, &mut AlwaysConfirm, &FsSizes)?;
        }
        _ => {
            run(&config, &mut out, &mut StdinConfirm, &FsSizes)?;
        }
    }

    Ok(ExitCode::Success)
}

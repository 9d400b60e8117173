//! Human-readable report.
//!
//! The report is written in a fixed order: run header, titles present in
//! both collections, HD duplicates, UHD duplicates, summary, then any
//! warnings. Groups that could be measured show each member's size and a
//! KEEP/DELETE marker; groups without a collection root list names only.
//!
//! Colors come from `yansi` and are switched off globally by the caller when
//! stdout is not a terminal.

use std::io::{self, Write};
use std::path::Path;

use yansi::Paint;

use super::format_size;
use crate::actions::delete::{BatchDeleteResult, DeleteProgressCallback, ExecutionOutcome};
use crate::duplicates::{Analysis, CrossDecision, DeletionPlan, DuplicateGroup, GroupDecision, Roots};
use crate::manifest::{Collection, Entry};
use crate::scanner::SizeLookup;

const RULE: &str =
    "================================================================================";
const SHORT_RULE: &str = "============================================================";

/// Everything the text report needs about one run.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Grouping results
    pub analysis: &'a Analysis,
    /// Decisions and candidates
    pub plan: &'a DeletionPlan,
    /// Collection roots, if given
    pub roots: &'a Roots,
    /// Entries listed in the HD manifest
    pub hd_movies: usize,
    /// Entries listed in the UHD manifest
    pub uhd_movies: usize,
    /// Dry run: nothing will be deleted
    pub dry_run: bool,
    /// Bytes freed by the plan
    pub reclaimable: u64,
    /// Non-fatal problems met during the run
    pub warnings: &'a [String],
}

fn section<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    writeln!(w, "\n{}", RULE)?;
    writeln!(w, " {}", title.bold())?;
    writeln!(w, "{}", RULE)
}

fn size_column(size: u64) -> String {
    format!("{:>12}", format_size(size))
}

/// `[EXISTS]` / `[NOT FOUND]` for dry runs with a known root.
fn existence_tag<S: SizeLookup>(ctx: &ReportContext<'_>, collection: Collection, name: &str, sizes: &S) -> String {
    if !ctx.dry_run {
        return String::new();
    }
    match ctx.roots.get(collection) {
        Some(root) if sizes.exists(root, name) => format!(" [{}]", "EXISTS".green()),
        Some(_) => format!(" [{}]", "NOT FOUND".red()),
        None => String::new(),
    }
}

/// Write the full report.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_report<W: Write, S: SizeLookup>(
    w: &mut W,
    ctx: &ReportContext<'_>,
    sizes: &S,
) -> io::Result<()> {
    section(w, "MOVIE DUPLICATE CHECK RESULTS")?;
    writeln!(w, "\nTotal HD movies: {}", ctx.hd_movies)?;
    writeln!(w, "Total UHD movies: {}", ctx.uhd_movies)?;
    if ctx.dry_run {
        writeln!(w, "\n{}", "[DRY RUN MODE - No changes will be made]".yellow())?;
    }

    write_cross_section(w, ctx, sizes)?;
    for collection in [Collection::Hd, Collection::Uhd] {
        write_group_section(w, ctx, collection, sizes)?;
    }
    write_summary(w, ctx)?;
    write_warnings(w, ctx.warnings)
}

fn write_cross_section<W: Write, S: SizeLookup>(
    w: &mut W,
    ctx: &ReportContext<'_>,
    sizes: &S,
) -> io::Result<()> {
    section(w, "MOVIES IN BOTH HD AND UHD")?;

    let groups = &ctx.analysis.cross;
    if groups.is_empty() {
        return writeln!(w, "\nNo movies found in both HD and UHD lists.");
    }
    writeln!(w, "\nFound {} movies that exist in both HD and UHD:\n", groups.len())?;

    for (i, group) in groups.iter().enumerate() {
        writeln!(w, "{}. {}", i + 1, group.key.display_title().bold())?;
        writeln!(w, "   Normalized ID: {}", group.key)?;

        match ctx.plan.cross.iter().find(|d| d.key == group.key) {
            Some(decision) => write_cross_decision(w, ctx, decision, sizes)?,
            None => {
                for collection in [Collection::Hd, Collection::Uhd] {
                    for entry in group.side(collection) {
                        let label = format!("{}:", collection);
                        let tag = existence_tag(ctx, collection, &entry.name, sizes);
                        writeln!(w, "   {:<4} {}{}", label, entry.name, tag)?;
                    }
                }
            }
        }
        writeln!(w)?;
    }

    if !ctx.roots.both() {
        writeln!(w, "   (Run with --hd-path and --uhd-path to see file sizes)")?;
    }
    Ok(())
}

fn write_cross_decision<W: Write, S: SizeLookup>(
    w: &mut W,
    ctx: &ReportContext<'_>,
    decision: &CrossDecision,
    sizes: &S,
) -> io::Result<()> {
    for collection in [Collection::Hd, Collection::Uhd] {
        for (j, member) in decision.side(collection).iter().enumerate() {
            let label = if j == 0 {
                format!("{:<3} >", collection.label())
            } else {
                "     ".to_string()
            };
            let tag = existence_tag(ctx, collection, &member.entry.name, sizes);
            writeln!(
                w,
                "   {} {} | {}{}",
                label,
                size_column(member.size),
                member.entry.name,
                tag
            )?;
        }
    }

    let tie = if decision.is_tie() { " [equal size]" } else { "" };
    writeln!(
        w,
        "   {} Delete {} version (keep {}){}",
        ">>> RECOMMEND:".bold(),
        decision.delete.red().bold(),
        decision.keep().green().bold(),
        tie
    )
}

fn write_group_section<W: Write, S: SizeLookup>(
    w: &mut W,
    ctx: &ReportContext<'_>,
    collection: Collection,
    sizes: &S,
) -> io::Result<()> {
    section(w, &format!("DUPLICATES IN {} LIST", collection))?;

    let groups = ctx.analysis.groups(collection);
    if groups.is_empty() {
        return writeln!(w, "\nNo duplicates found in {} list.", collection);
    }
    writeln!(
        w,
        "\nFound {} duplicate groups in {} list:\n",
        groups.len(),
        collection
    )?;

    for (i, group) in groups.iter().enumerate() {
        writeln!(
            w,
            "{}. {} ({} copies)",
            i + 1,
            group.key.display_title().bold(),
            group.len()
        )?;
        writeln!(w, "   Normalized ID: {}", group.key)?;

        match ctx.plan.groups(collection).iter().find(|d| d.key == group.key) {
            Some(decision) => write_group_decision(w, ctx, decision, sizes)?,
            None => write_group_names(w, group)?,
        }
        writeln!(w)?;
    }

    if ctx.roots.get(collection).is_none() {
        writeln!(
            w,
            "   (Run with --{}-path to see file sizes)",
            collection.label().to_lowercase()
        )?;
    }
    Ok(())
}

fn write_group_decision<W: Write, S: SizeLookup>(
    w: &mut W,
    ctx: &ReportContext<'_>,
    decision: &GroupDecision,
    sizes: &S,
) -> io::Result<()> {
    for (j, member) in decision.members.iter().enumerate() {
        let marker = if j == 0 {
            "  KEEP >".green().bold().to_string()
        } else {
            "  DELETE".red().bold().to_string()
        };
        let size = if member.size > 0 {
            size_column(member.size)
        } else {
            format!("{:>12}", "NOT FOUND")
        };
        let tag = existence_tag(ctx, decision.collection, &member.entry.name, sizes);
        writeln!(w, "   {} {} | {}{}", marker, size, member.entry.name, tag)?;
    }
    Ok(())
}

fn write_group_names<W: Write>(w: &mut W, group: &DuplicateGroup) -> io::Result<()> {
    for Entry { name, .. } in &group.entries {
        writeln!(w, "   - {}", name)?;
    }
    Ok(())
}

fn write_summary<W: Write>(w: &mut W, ctx: &ReportContext<'_>) -> io::Result<()> {
    section(w, "SUMMARY")?;
    writeln!(w, "\nMovies in both HD and UHD: {}", ctx.analysis.cross.len())?;
    writeln!(w, "Duplicate groups in HD: {}", ctx.analysis.hd.len())?;
    writeln!(w, "Duplicate groups in UHD: {}", ctx.analysis.uhd.len())?;

    if ctx.dry_run {
        if !ctx.plan.is_empty() {
            writeln!(w, "\nFolders to be deleted: {}", ctx.plan.candidates.len())?;
            writeln!(w, "Space to be freed: {}", format_size(ctx.reclaimable))?;
        }
        writeln!(w, "\n{}", "[DRY RUN COMPLETE - No changes made]".yellow())?;
    }
    Ok(())
}

fn write_warnings<W: Write>(w: &mut W, warnings: &[String]) -> io::Result<()> {
    if warnings.is_empty() {
        return Ok(());
    }
    writeln!(w, "\n{}", "Warnings:".yellow().bold())?;
    for warning in warnings {
        writeln!(w, "  - {}", warning)?;
    }
    Ok(())
}

/// List what a live run is about to delete. Writes nothing for an empty plan.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_deletion_preview<W: Write>(
    w: &mut W,
    plan: &DeletionPlan,
    reclaimable: u64,
) -> io::Result<()> {
    if plan.is_empty() {
        return Ok(());
    }
    let total = plan.candidates.len();

    writeln!(w, "\n{}", SHORT_RULE)?;
    writeln!(w, " {}", format!("READY TO DELETE {} FOLDERS:", total).red().bold())?;
    writeln!(w, " Total space to be freed: {}", format_size(reclaimable))?;
    writeln!(w, "{}", SHORT_RULE)?;

    for collection in [Collection::Hd, Collection::Uhd] {
        let paths: Vec<_> = plan.candidates_in(collection).map(|c| c.path()).collect();
        if paths.is_empty() {
            continue;
        }
        writeln!(w, "\n  {} folder ({} folders):", collection, paths.len())?;
        for path in paths {
            writeln!(w, "    - {}", path.display())?;
        }
    }

    writeln!(w, "\n  Total: {} folders will be DELETED", total)?;
    writeln!(w, "{}", SHORT_RULE)
}

/// Report how a live run ended.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_outcome<W: Write>(w: &mut W, outcome: &ExecutionOutcome) -> io::Result<()> {
    match outcome {
        ExecutionOutcome::NothingToDelete => writeln!(w, "\nNo folders to delete."),
        ExecutionOutcome::Cancelled { .. } => {
            writeln!(w, "\n  {}", "Deletion cancelled. No changes made.".yellow())
        }
        // The progress callback already printed the per-entry lines.
        ExecutionOutcome::Completed(_) => Ok(()),
    }
}

/// Prints one line per deleted entry.
#[derive(Debug)]
pub struct ConsoleProgress<W: Write> {
    out: W,
}

impl<W: Write> ConsoleProgress<W> {
    /// Create a progress printer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

// Write errors are ignored here: a broken stdout must not stop the batch.
impl<W: Write> DeleteProgressCallback for ConsoleProgress<W> {
    fn on_before_delete(&mut self, _path: &Path, index: usize, _total: usize) {
        if index == 0 {
            let _ = writeln!(self.out, "\n  Deleting...");
        }
    }

    fn on_delete_success(&mut self, path: &Path, _size: u64) {
        let _ = writeln!(self.out, "    {} {}", "Deleted:".green(), path.display());
    }

    fn on_already_gone(&mut self, path: &Path) {
        let _ = writeln!(
            self.out,
            "    {} {}",
            "Not found (already deleted?):".yellow(),
            path.display()
        );
    }

    fn on_delete_failure(&mut self, path: &Path, error: &str) {
        let _ = writeln!(self.out, "    {} {} - {}", "FAILED:".red().bold(), path.display(), error);
    }

    fn on_complete(&mut self, result: &BatchDeleteResult) {
        let _ = writeln!(
            self.out,
            "\n  Done! Deleted: {}, Failed: {}, Already gone: {}, Freed: {}",
            result.success_count(),
            result.failure_count(),
            result.already_gone_count(),
            format_size(result.bytes_freed)
        );
        let _ = self.out.flush();
    }
}

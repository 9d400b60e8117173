use super::common::{config, listing, run_captured, sparse_file, GB};
use movie_dupecheck::actions::{AlwaysConfirm, AlwaysDeny, ExecutionOutcome};
use movie_dupecheck::config::RunMode;
use movie_dupecheck::duplicates::Roots;
use movie_dupecheck::manifest::Collection;
use std::path::Path;
use tempfile::tempdir;

/// HD and UHD library roots holding one Alien copy each, 2 GB and 4 GB.
fn alien_libraries(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let hd = dir.join("Movies-HD");
    let uhd = dir.join("Movies-UHD");
    sparse_file(&hd.join("Alien (1979)/Alien.1979.1080p.mkv"), 2 * GB);
    sparse_file(&uhd.join("Alien (1979)/Alien.1979.2160p.mkv"), 4 * GB);
    (hd, uhd)
}

#[test]
fn test_manifest_only_dry_run() {
    let dir = tempdir().unwrap();
    let hd = listing(dir.path(), "HD", &["Alien (1979)", "Alien.1979.Extended"]);
    let uhd = listing(dir.path(), "UHD", &[]);

    let cfg = config(&hd, &uhd, Roots::default(), RunMode::DryRun);
    let (summary, report) = run_captured(&cfg, &mut AlwaysConfirm);

    assert_eq!(summary.analysis.hd.len(), 1);
    assert_eq!(summary.analysis.hd[0].key.as_str(), "Alien (1979)");
    assert_eq!(summary.analysis.hd[0].len(), 2);
    assert!(summary.analysis.cross.is_empty());
    assert!(summary.plan.is_empty());
    assert_eq!(summary.reclaimable, 0);
    assert!(summary.outcome.is_none());

    assert!(report.contains("1. Alien (2 copies)"));
    assert!(report.contains("   - Alien (1979)"));
    assert!(report.contains("   - Alien.1979.Extended"));
    assert!(!report.contains("Folders to be deleted"));
    assert!(report.contains("[DRY RUN COMPLETE - No changes made]"));
}

#[test]
fn test_cross_dry_run_recommends_deleting_hd() {
    let dir = tempdir().unwrap();
    let (hd, uhd) = alien_libraries(dir.path());

    let roots = Roots::new(Some(hd.clone()), Some(uhd.clone()));
    let cfg = config(&hd, &uhd, roots, RunMode::DryRun);
    let (summary, report) = run_captured(&cfg, &mut AlwaysConfirm);

    assert_eq!(summary.plan.cross.len(), 1);
    assert_eq!(summary.plan.cross[0].delete, Collection::Hd);
    assert_eq!(summary.plan.candidates.len(), 1);
    assert_eq!(summary.plan.candidates[0].path(), hd.join("Alien (1979)"));
    assert_eq!(summary.reclaimable, 2 * GB);

    assert!(report.contains("   HD  >      2.00 GB | Alien (1979) [EXISTS]"));
    assert!(report.contains("   UHD >      4.00 GB | Alien (1979) [EXISTS]"));
    assert!(report.contains(">>> RECOMMEND: Delete HD version (keep UHD)"));
    assert!(report.contains("Folders to be deleted: 1"));
    assert!(report.contains("Space to be freed: 2.00 GB"));

    // Dry run never touches the libraries.
    assert!(hd.join("Alien (1979)").exists());
    assert!(uhd.join("Alien (1979)").exists());
}

#[test]
fn test_live_run_deletes_smaller_copy() {
    let dir = tempdir().unwrap();
    let (hd, uhd) = alien_libraries(dir.path());

    let roots = Roots::new(Some(hd.clone()), Some(uhd.clone()));
    let cfg = config(&hd, &uhd, roots, RunMode::Live { assume_yes: true });
    let (summary, report) = run_captured(&cfg, &mut AlwaysConfirm);

    match summary.outcome {
        Some(ExecutionOutcome::Completed(result)) => {
            assert_eq!(result.success_count(), 1);
            assert_eq!(result.failure_count(), 0);
            assert_eq!(result.bytes_freed, 2 * GB);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    assert!(!hd.join("Alien (1979)").exists());
    assert!(uhd.join("Alien (1979)/Alien.1979.2160p.mkv").exists());
    assert!(report.contains("READY TO DELETE 1 FOLDERS:"));
    assert!(report.contains("Total space to be freed: 2.00 GB"));
    assert!(report.contains("Deleted: "));
    assert!(report.contains("Done! Deleted: 1, Failed: 0"));
}

#[test]
fn test_live_run_cancelled_changes_nothing() {
    let dir = tempdir().unwrap();
    let (hd, uhd) = alien_libraries(dir.path());

    let roots = Roots::new(Some(hd.clone()), Some(uhd.clone()));
    let cfg = config(&hd, &uhd, roots, RunMode::Live { assume_yes: false });
    let (summary, report) = run_captured(&cfg, &mut AlwaysDeny);

    assert!(matches!(
        summary.outcome,
        Some(ExecutionOutcome::Cancelled { reclaimable }) if reclaimable == 2 * GB
    ));
    assert!(hd.join("Alien (1979)").exists());
    assert!(report.contains("Deletion cancelled. No changes made."));
}

#[test]
fn test_live_run_without_roots_has_nothing_to_delete() {
    let dir = tempdir().unwrap();
    let hd = listing(dir.path(), "HD", &["Alien (1979)", "Alien.1979.Extended"]);
    let uhd = listing(dir.path(), "UHD", &["Alien.1979.2160p"]);

    let cfg = config(&hd, &uhd, Roots::default(), RunMode::Live { assume_yes: true });
    let (summary, report) = run_captured(&cfg, &mut AlwaysConfirm);

    assert!(matches!(summary.outcome, Some(ExecutionOutcome::NothingToDelete)));
    assert_eq!(summary.analysis.cross.len(), 1);
    assert!(report.contains("(Run with --hd-path and --uhd-path to see file sizes)"));
    assert!(report.contains("No folders to delete."));
}

#[test]
fn test_intra_group_keeps_largest_on_disk() {
    let dir = tempdir().unwrap();
    let hd = dir.path().join("Movies-HD");
    sparse_file(&hd.join("Heat (1995)/Heat.mkv"), 1024);
    sparse_file(&hd.join("Heat.1995.1080p.BluRay/Heat.mkv"), 3 * 1024);
    sparse_file(&hd.join("Heat.1995.1080p.BluRay/Heat.srt"), 10);
    sparse_file(&hd.join("Ran (1985)/Ran.mkv"), 1024);
    let uhd = listing(dir.path(), "UHD", &[]);

    let roots = Roots::new(Some(hd.clone()), None);
    let cfg = config(&hd, &uhd, roots, RunMode::Live { assume_yes: true });
    let (summary, report) = run_captured(&cfg, &mut AlwaysConfirm);

    assert_eq!(summary.plan.hd.len(), 1);
    assert_eq!(
        summary.plan.hd[0].kept().unwrap().entry.name,
        "Heat.1995.1080p.BluRay"
    );
    assert!(report.contains("  KEEP >      3.00 kB | Heat.1995.1080p.BluRay"));
    assert!(report.contains("  DELETE      1.00 kB | Heat (1995)"));

    assert!(!hd.join("Heat (1995)").exists());
    assert!(hd.join("Heat.1995.1080p.BluRay").exists());
    assert!(hd.join("Ran (1985)").exists());
}

#[test]
fn test_json_mode_never_deletes() {
    let dir = tempdir().unwrap();
    let (hd, uhd) = alien_libraries(dir.path());

    let roots = Roots::new(Some(hd.clone()), Some(uhd.clone()));
    let cfg = config(&hd, &uhd, roots, RunMode::Json);
    let (summary, report) = run_captured(&cfg, &mut AlwaysConfirm);

    assert!(summary.outcome.is_none());
    assert!(hd.join("Alien (1979)").exists());

    let value: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(value["summary"]["cross_groups"], 1);
    assert_eq!(value["summary"]["reclaimable_bytes"], 2 * GB);
    assert_eq!(value["cross"][0]["delete"], "HD");
}

#[test]
fn test_missing_manifests_are_warnings() {
    let dir = tempdir().unwrap();
    let hd = dir.path().join("no-such-HD");
    let uhd = dir.path().join("no-such-UHD");

    let cfg = config(&hd, &uhd, Roots::default(), RunMode::DryRun);
    let (summary, report) = run_captured(&cfg, &mut AlwaysConfirm);

    assert_eq!(summary.warnings.len(), 2);
    assert!(summary.warnings[0].starts_with("Could not read HD manifest"));
    assert!(summary.warnings[1].starts_with("Could not read UHD manifest"));
    assert!(report.contains("Total HD movies: 0"));
    assert!(report.contains("Warnings:"));
}

#[test]
fn test_report_is_reproducible() {
    let dir = tempdir().unwrap();
    let hd = listing(
        dir.path(),
        "HD",
        &["Zodiac (2007)", "Alien (1979)", "Zodiac.2007.1080p", "Alien - 1979 - Remux"],
    );
    let uhd = listing(dir.path(), "UHD", &["Alien.1979.2160p", "Zodiac (2007)"]);

    let cfg = config(&hd, &uhd, Roots::default(), RunMode::DryRun);
    let (_, first) = run_captured(&cfg, &mut AlwaysConfirm);
    let (_, second) = run_captured(&cfg, &mut AlwaysConfirm);

    assert_eq!(first, second);
    let alien = first.find("1. Alien").unwrap();
    let zodiac = first.find("2. Zodiac").unwrap();
    assert!(alien < zodiac);
}

#[test]
fn test_live_run_with_repeated_manifest_line_keeps_only_copy() {
    let dir = tempdir().unwrap();
    let hd_root = dir.path().join("Movies-HD");
    sparse_file(&hd_root.join("Alien (1979)/a.mkv"), 1024);
    let hd = listing(dir.path(), "HD", &["Alien (1979)", "Alien (1979)"]);
    let uhd = listing(dir.path(), "UHD", &[]);

    let roots = Roots::new(Some(hd_root.clone()), None);
    let cfg = config(&hd, &uhd, roots, RunMode::Live { assume_yes: true });
    let (summary, report) = run_captured(&cfg, &mut AlwaysConfirm);

    assert!(summary.plan.is_empty());
    assert!(matches!(summary.outcome, Some(ExecutionOutcome::NothingToDelete)));
    assert_eq!(summary.warnings, vec!["HD manifest lists Alien (1979) more than once"]);
    assert!(report.contains("No folders to delete."));
    assert!(hd_root.join("Alien (1979)/a.mkv").exists());
}

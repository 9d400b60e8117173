//! Fixtures shared by the integration tests.

use movie_dupecheck::actions::Confirm;
use movie_dupecheck::config::{RunConfig, RunMode};
use movie_dupecheck::duplicates::{DecisionPolicy, Roots};
use movie_dupecheck::scanner::FsSizes;
use movie_dupecheck::{run, RunSummary};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const GB: u64 = 1024 * 1024 * 1024;

/// Create a file of `size` bytes without writing them.
pub fn sparse_file(path: &Path, size: u64) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap().set_len(size).unwrap();
}

/// Write a text manifest and return its path.
pub fn listing(dir: &Path, file: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

pub fn config(hd: &Path, uhd: &Path, roots: Roots, mode: RunMode) -> RunConfig {
    RunConfig {
        hd_manifest: hd.to_path_buf(),
        uhd_manifest: uhd.to_path_buf(),
        roots,
        policy: DecisionPolicy::default(),
        mode,
    }
}

/// Run the pipeline against the real filesystem and capture the report.
pub fn run_captured<F: Confirm>(config: &RunConfig, confirm: &mut F) -> (RunSummary, String) {
    yansi::disable();
    let mut out = Vec::new();
    let summary = run(config, &mut out, confirm, &FsSizes).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

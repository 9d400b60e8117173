use super::common::{sparse_file, GB};
use movie_dupecheck::actions::{
    delete_batch, execute, AlwaysConfirm, Confirm, ExecutionOutcome, CONFIRM_TOKEN,
};
use movie_dupecheck::duplicates::DeletionCandidate;
use movie_dupecheck::manifest::Collection;
use movie_dupecheck::scanner::FsSizes;
use std::fs;
use tempfile::tempdir;

/// Answers with a fixed string and remembers what it was asked.
struct Scripted {
    answer: &'static str,
    asked: Option<(usize, u64)>,
}

impl Scripted {
    fn new(answer: &'static str) -> Self {
        Self { answer, asked: None }
    }
}

impl Confirm for Scripted {
    fn respond(&mut self, count: usize, reclaimable: u64) -> String {
        self.asked = Some((count, reclaimable));
        self.answer.to_string()
    }
}

#[test]
fn test_prompt_receives_count_and_total() {
    let dir = tempdir().unwrap();
    sparse_file(&dir.path().join("A (2000)/a.mkv"), GB);
    sparse_file(&dir.path().join("A (2000)/a.nfo"), 512);
    sparse_file(&dir.path().join("B (2001)/b.mkv"), 2 * GB);

    let candidates = vec![
        DeletionCandidate::new(dir.path(), "A (2000)", Collection::Hd),
        DeletionCandidate::new(dir.path(), "B (2001)", Collection::Uhd),
    ];
    let mut confirm = Scripted::new("no");

    let outcome = execute(&candidates, &FsSizes, &mut confirm, &mut ());

    assert_eq!(confirm.asked, Some((2, 3 * GB + 512)));
    assert!(matches!(outcome, ExecutionOutcome::Cancelled { .. }));
    assert!(dir.path().join("A (2000)").exists());
    assert!(dir.path().join("B (2001)").exists());
}

#[test]
fn test_token_must_match_exactly() {
    for answer in ["delete", "Delete", "DELETE please", "y", ""] {
        let dir = tempdir().unwrap();
        sparse_file(&dir.path().join("A (2000)/a.mkv"), 10);
        let candidates = vec![DeletionCandidate::new(dir.path(), "A (2000)", Collection::Hd)];

        let outcome = execute(&candidates, &FsSizes, &mut Scripted::new(answer), &mut ());

        assert!(
            matches!(outcome, ExecutionOutcome::Cancelled { .. }),
            "answer {:?} must not confirm",
            answer
        );
        assert!(dir.path().join("A (2000)").exists());
    }
}

#[test]
fn test_token_with_whitespace_confirms() {
    let dir = tempdir().unwrap();
    sparse_file(&dir.path().join("A (2000)/a.mkv"), 10);
    let candidates = vec![DeletionCandidate::new(dir.path(), "A (2000)", Collection::Hd)];

    let outcome = execute(&candidates, &FsSizes, &mut Scripted::new("\tDELETE  \n"), &mut ());

    assert!(matches!(outcome, ExecutionOutcome::Completed(_)));
    assert!(!dir.path().join("A (2000)").exists());
    assert_eq!(AlwaysConfirm.respond(0, 0), CONFIRM_TOKEN);
}

#[test]
fn test_missing_candidate_is_not_a_failure() {
    let dir = tempdir().unwrap();
    sparse_file(&dir.path().join("Here (2000)/a.mkv"), 10);

    let candidates = vec![
        DeletionCandidate::new(dir.path(), "Gone (1999)", Collection::Hd),
        DeletionCandidate::new(dir.path(), "Here (2000)", Collection::Hd),
    ];
    let result = delete_batch(&candidates, &FsSizes, &mut ());

    assert_eq!(result.already_gone_count(), 1);
    assert_eq!(result.success_count(), 1);
    assert!(result.all_succeeded());
    assert_eq!(result.bytes_freed, 10);
}

#[test]
fn test_nested_directories_removed_recursively() {
    let dir = tempdir().unwrap();
    let movie = dir.path().join("Blade Runner (1982)");
    sparse_file(&movie.join("BDMV/STREAM/00001.m2ts"), 1024);
    sparse_file(&movie.join("BDMV/STREAM/00002.m2ts"), 1024);
    sparse_file(&movie.join("Extras/Featurette.mkv"), 1024);
    fs::create_dir_all(movie.join("Empty/Deeper")).unwrap();

    let candidates = vec![DeletionCandidate::new(dir.path(), "Blade Runner (1982)", Collection::Uhd)];
    let result = delete_batch(&candidates, &FsSizes, &mut ());

    assert_eq!(result.success_count(), 1);
    assert_eq!(result.bytes_freed, 3 * 1024);
    assert!(!movie.exists());
}

#[test]
fn test_same_candidate_twice_second_is_already_gone() {
    let dir = tempdir().unwrap();
    sparse_file(&dir.path().join("A (2000)/a.mkv"), 10);
    let candidate = DeletionCandidate::new(dir.path(), "A (2000)", Collection::Hd);

    let result = delete_batch(&[candidate.clone(), candidate], &FsSizes, &mut ());

    assert_eq!(result.success_count(), 1);
    assert_eq!(result.already_gone_count(), 1);
    assert_eq!(result.bytes_freed, 10);
}

//! Challenge progress persisted across process restarts

use pipeline_sim::progress::{CompletionOutcome, ProgressState};
use pipeline_sim::{JsonFileStore, Progress, ProgressStore};

use super::common::determinism::test_now;

#[test]
fn test_progress_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("progress.json");

    {
        let mut progress = Progress::open(JsonFileStore::new(path.clone())).unwrap();
        progress.complete(1).unwrap();
        progress.complete(2).unwrap();
    }

    let progress = Progress::open(JsonFileStore::new(path)).unwrap();
    assert_eq!(progress.score(), 250);
    assert_eq!(progress.completed_count(), 2);
    assert_eq!(progress.active_challenge(), Some(3));
    assert_eq!(progress.rank().title, "Builder");
}

#[test]
fn test_full_pipeline_then_reset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let mut progress = Progress::open(JsonFileStore::new(path.clone())).unwrap();

    let mut last = None;
    for challenge in 1..=6 {
        last = Some(progress.complete(challenge).unwrap());
    }
    assert!(matches!(
        last,
        Some(CompletionOutcome::Completed { finished: true, unlocked: None, .. })
    ));
    assert_eq!(progress.score(), 1350);
    assert_eq!(progress.percent(), 100);
    assert_eq!(progress.rank().title, "Champion");

    progress.reset().unwrap();
    assert_eq!(progress.score(), 0);
    assert!(!path.exists());
}

#[test]
fn test_saved_file_is_readable_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let store = JsonFileStore::new(path.clone());
    store
        .save(&ProgressState {
            completed: vec![1],
            score: 100,
            updated_at: Some(test_now()),
        })
        .unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["completed"], serde_json::json!([1]));
    assert_eq!(value["score"], 100);
    assert_eq!(value["updated_at"], "2024-01-01T00:00:00Z");
}

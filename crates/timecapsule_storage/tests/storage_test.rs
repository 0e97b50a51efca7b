//! Tests for output and sample storage.

use chrono::{Local, NaiveDate, TimeZone};
use tempfile::TempDir;
use timecapsule_core::GenerationMode;
use timecapsule_error::{StorageErrorKind, TimeCapsuleErrorKind};
use timecapsule_interface::{BeatExecution, BeatProcessor, StoryExecution};
use timecapsule_storage::{
    COMPLETE_STORY_FILE, OutputStore, RunLabel, SampleStore, model_slug, write_json,
};

fn label() -> RunLabel {
    let started = Local.with_ymd_and_hms(2025, 10, 28, 15, 55, 17).unwrap();
    RunLabel::at("haykgrigo3/TimeCapsuleLLM", GenerationMode::Beats, 42, started)
}

fn beat(i: usize, name: &str, text: &str) -> BeatExecution {
    BeatExecution {
        beat_name: name.to_string(),
        sequence_number: i,
        prompt: String::new(),
        response: text.to_string(),
        continuation: String::new(),
    }
}

#[test]
fn test_run_label_format() {
    assert_eq!(
        label().to_string(),
        "haykgrigo3_TimeCapsuleLLM_beats_42_20251028_155517"
    );
    assert_eq!(model_slug("a/b/c"), "a_b_c");
}

#[tokio::test]
async fn test_single_run_output() {
    let temp_dir = TempDir::new().unwrap();
    let store = OutputStore::new(temp_dir.path().join("outputs")).unwrap();

    let path = store.save_run(&label(), "Once upon a time.").await.unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "haykgrigo3_TimeCapsuleLLM_beats_42_20251028_155517.txt"
    );
    assert_eq!(std::fs::read_to_string(path).unwrap(), "Once upon a time.");
}

#[tokio::test]
async fn test_invalid_file_name_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let store = OutputStore::new(temp_dir.path()).unwrap();

    let err = store.save_text("../escape.txt", "x").await.unwrap_err();
    match err.kind() {
        TimeCapsuleErrorKind::Storage(e) => {
            assert!(matches!(e.kind, StorageErrorKind::InvalidPath(_)))
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_story_directory_layout() {
    let temp_dir = TempDir::new().unwrap();
    let store = OutputStore::new(temp_dir.path()).unwrap();

    let dir = store
        .create_story_dir("The Fogbound Parcel.", &label())
        .await
        .unwrap();
    assert_eq!(
        dir.path().file_name().unwrap().to_str().unwrap(),
        "the_fogbound_parcel_haykgrigo3_TimeCapsuleLLM_beats_42_20251028_155517"
    );

    let story = StoryExecution {
        title: "The Fogbound Parcel.".to_string(),
        beats: vec![beat(0, "Setup", "First."), beat(1, "Rising Action", "Second.")],
    };

    for b in &story.beats {
        dir.process(b).await.unwrap();
    }
    dir.write_complete(&story).await.unwrap();

    let read = |name: &str| std::fs::read_to_string(dir.path().join(name)).unwrap();
    assert_eq!(read("01_setup.txt"), "First.");
    assert_eq!(read("02_rising_action.txt"), "Second.");
    assert_eq!(read(COMPLETE_STORY_FILE), "First.\n\nSecond.");
}

#[tokio::test]
async fn test_samples_layout_and_copy() {
    let temp_dir = TempDir::new().unwrap();
    let samples = SampleStore::new(temp_dir.path().join("samples"));
    samples.ensure_layout().await.unwrap();

    for dir in ["single_pass", "beat_by_beat", "logline"] {
        assert!(samples.root().join(dir).is_dir());
    }

    let date = NaiveDate::from_ymd_opt(2025, 10, 28).unwrap();
    assert_eq!(
        samples.path_for("mistralai/Mistral-7B-Instruct-v0.2", GenerationMode::Logline, 7, date),
        samples
            .root()
            .join("logline")
            .join("mistralai_Mistral7BInstructv0.2_logline_7_20251028.txt")
    );

    let input = temp_dir.path().join("story.txt");
    std::fs::write(&input, "A tale.").unwrap();
    let saved = samples
        .save_existing(&input, "TimeCapsuleLLM", GenerationMode::Single, 42)
        .await
        .unwrap();
    assert!(saved.starts_with(samples.root().join("single_pass")));
    assert_eq!(std::fs::read_to_string(saved).unwrap(), "A tale.");

    let err = samples
        .save_existing(&temp_dir.path().join("missing.txt"), "m", GenerationMode::Single, 1)
        .await
        .unwrap_err();
    match err.kind() {
        TimeCapsuleErrorKind::Storage(e) => {
            assert!(matches!(e.kind, StorageErrorKind::NotFound(_)))
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_write_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested/report.json");
    write_json(&path, &serde_json::json!({ "model": "m", "words": 3 }))
        .await
        .unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value["words"], 3);
}

//! Generated story outputs.

use crate::fs::{ensure_dir, write_text};
use crate::{RunLabel, beat_file_name, slugify};
use async_trait::async_trait;
use derive_getters::Getters;
use std::path::PathBuf;
use timecapsule_error::{StorageError, StorageErrorKind, TimeCapsuleResult};
use timecapsule_interface::{BeatExecution, BeatProcessor, StoryExecution};

/// Name of the file holding every beat joined by blank lines.
pub const COMPLETE_STORY_FILE: &str = "complete_story.txt";

/// Root directory for generated stories.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct OutputStore {
    base_path: PathBuf,
}

impl OutputStore {
    /// Create an output store, creating the base directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryCreation` if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> TimeCapsuleResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %base_path.display(), "Opened output store");
        Ok(Self { base_path })
    }

    /// Write `<base>/<file_name>` and return its path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` for a file name that is empty or contains a
    /// path separator, and `FileWrite` if the write fails.
    #[tracing::instrument(skip(self, text), fields(base = %self.base_path.display()))]
    pub async fn save_text(&self, file_name: &str, text: &str) -> TimeCapsuleResult<PathBuf> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(file_name.to_string())).into());
        }

        let path = self.base_path.join(file_name);
        write_text(&path, text).await?;
        tracing::info!(path = %path.display(), "Saved output");
        Ok(path)
    }

    /// Write a single-pass story as `<base>/<label>.txt`.
    ///
    /// # Errors
    ///
    /// Returns `FileWrite` if the write fails.
    pub async fn save_run(&self, label: &RunLabel, text: &str) -> TimeCapsuleResult<PathBuf> {
        self.save_text(&format!("{}.txt", label), text).await
    }

    /// Create `<base>/<title-slug>_<label>/` for a beat-by-beat story.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryCreation` if the directory cannot be created.
    #[tracing::instrument(skip(self), fields(base = %self.base_path.display(), label = %label))]
    pub async fn create_story_dir(
        &self,
        title: &str,
        label: &RunLabel,
    ) -> TimeCapsuleResult<StoryDirectory> {
        let slug = match slugify(title) {
            s if s.is_empty() => "story".to_string(),
            s => s,
        };
        let path = self.base_path.join(format!("{}_{}", slug, label));
        ensure_dir(&path).await?;
        tracing::info!(path = %path.display(), "Created story directory");
        Ok(StoryDirectory { path })
    }
}

/// Directory holding one beat-by-beat story.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StoryDirectory {
    path: PathBuf,
}

impl StoryDirectory {
    /// Open an existing story directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write `NN_<beat-slug>.txt` for the beat at zero-based `index`.
    ///
    /// # Errors
    ///
    /// Returns `FileWrite` if the write fails.
    pub async fn write_beat(&self, index: usize, name: &str, text: &str) -> TimeCapsuleResult<PathBuf> {
        let path = self.path.join(beat_file_name(index, name));
        write_text(&path, text).await?;
        tracing::info!(beat = %name, path = %path.display(), "Saved beat");
        Ok(path)
    }

    /// Write `complete_story.txt` with every beat joined by a blank line.
    ///
    /// # Errors
    ///
    /// Returns `FileWrite` if the write fails.
    pub async fn write_complete(&self, story: &StoryExecution) -> TimeCapsuleResult<PathBuf> {
        let path = self.path.join(COMPLETE_STORY_FILE);
        write_text(&path, &story.complete_story()).await?;
        tracing::info!(path = %path.display(), beats = story.beats.len(), "Saved complete story");
        Ok(path)
    }
}

#[async_trait]
impl BeatProcessor for StoryDirectory {
    async fn process(&self, beat: &BeatExecution) -> TimeCapsuleResult<()> {
        self.write_beat(beat.sequence_number, &beat.beat_name, &beat.response)
            .await
            .map(|_| ())
    }

    fn name(&self) -> &str {
        "StoryDirectory"
    }
}

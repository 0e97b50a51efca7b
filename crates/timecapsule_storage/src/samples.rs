//! Curated sample outputs, one directory per generation mode.

use crate::fs::{ensure_dir, read_text, write_text};
use crate::sample_file_name;
use chrono::{Local, NaiveDate};
use derive_getters::Getters;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use timecapsule_core::GenerationMode;
use timecapsule_error::TimeCapsuleResult;

/// The `samples/` tree.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SampleStore {
    root: PathBuf,
}

impl SampleStore {
    /// Samples rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the per-mode directories.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryCreation` if a directory cannot be created.
    pub async fn ensure_layout(&self) -> TimeCapsuleResult<()> {
        for mode in GenerationMode::iter() {
            ensure_dir(&self.root.join(mode.sample_dir())).await?;
        }
        Ok(())
    }

    /// Where a sample for these parameters is stored on `date`.
    pub fn path_for(&self, model: &str, mode: GenerationMode, seed: u64, date: NaiveDate) -> PathBuf {
        self.root
            .join(mode.sample_dir())
            .join(sample_file_name(model, mode, seed, date))
    }

    /// Store `text` as today's sample for these parameters.
    ///
    /// # Errors
    ///
    /// Returns `FileWrite` if the write fails.
    #[tracing::instrument(skip(self, text), fields(root = %self.root.display()))]
    pub async fn save_text(
        &self,
        model: &str,
        mode: GenerationMode,
        seed: u64,
        text: &str,
    ) -> TimeCapsuleResult<PathBuf> {
        let path = self.path_for(model, mode, seed, Local::now().date_naive());
        write_text(&path, text).await?;
        tracing::info!(path = %path.display(), "Saved sample");
        Ok(path)
    }

    /// Copy an existing output file into the samples tree.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `input` does not exist, or a read/write error.
    #[tracing::instrument(skip(self), fields(root = %self.root.display(), input = %input.display()))]
    pub async fn save_existing(
        &self,
        input: &Path,
        model: &str,
        mode: GenerationMode,
        seed: u64,
    ) -> TimeCapsuleResult<PathBuf> {
        let text = read_text(input).await?;
        self.save_text(model, mode, seed, &text).await
    }
}

//! File and directory naming.

use chrono::{DateTime, Local, NaiveDate};
use derive_getters::Getters;
use std::fmt;
use timecapsule_core::GenerationMode;

/// File-name form of free text: spaces become `_`, commas and periods are
/// dropped, path separators become `_`, and the result is lowercased.
///
/// ```
/// use timecapsule_storage::slugify;
///
/// assert_eq!(slugify("The Fogbound Parcel, Vol. 1"), "the_fogbound_parcel_vol_1");
/// ```
pub fn slugify(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '.'))
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect::<String>()
        .to_lowercase()
}

/// Model id with `/` replaced so it can appear in a file name.
pub fn model_slug(model: &str) -> String {
    model.replace('/', "_")
}

/// `NN_<slug>.txt` for the beat at zero-based `index`.
///
/// ```
/// use timecapsule_storage::beat_file_name;
///
/// assert_eq!(beat_file_name(0, "Rising Action"), "01_rising_action.txt");
/// ```
pub fn beat_file_name(index: usize, name: &str) -> String {
    format!("{:02}_{}.txt", index + 1, slugify(name))
}

/// Sample file name `<model>_<mode>_<seed>_<YYYYMMDD>.txt`.
///
/// The model name has `/` replaced by `_` and `-` removed.
///
/// ```
/// use chrono::NaiveDate;
/// use timecapsule_core::GenerationMode;
/// use timecapsule_storage::sample_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2025, 10, 28).unwrap();
/// assert_eq!(
///     sample_file_name("microsoft/phi-3-mini-4k-instruct", GenerationMode::Single, 42, date),
///     "microsoft_phi3mini4kinstruct_single_42_20251028.txt"
/// );
/// ```
pub fn sample_file_name(model: &str, mode: GenerationMode, seed: u64, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}_{}.txt",
        model_slug(model).replace('-', ""),
        mode,
        seed,
        date.format("%Y%m%d")
    )
}

/// Identifies one generation run: `<model>_<mode>_<seed>_<YYYYMMDD_HHMMSS>`.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RunLabel {
    /// Model identifier as given
    model: String,
    /// Generation mode
    mode: GenerationMode,
    /// Sampling seed
    seed: u64,
    /// When the run started
    started: DateTime<Local>,
}

impl RunLabel {
    /// Label a run starting now.
    pub fn new(model: impl Into<String>, mode: GenerationMode, seed: u64) -> Self {
        Self::at(model, mode, seed, Local::now())
    }

    /// Label a run with an explicit start time.
    pub fn at(
        model: impl Into<String>,
        mode: GenerationMode,
        seed: u64,
        started: DateTime<Local>,
    ) -> Self {
        Self {
            model: model.into(),
            mode,
            seed,
            started,
        }
    }
}

impl fmt::Display for RunLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            model_slug(&self.model),
            self.mode,
            self.seed,
            self.started.format("%Y%m%d_%H%M%S")
        )
    }
}

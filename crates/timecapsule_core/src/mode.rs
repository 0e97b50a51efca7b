//! Story generation modes.

use serde::{Deserialize, Serialize};

/// How a story is produced.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GenerationMode {
    /// One generation call from a seed scene
    Single,
    /// Beat-by-beat generation from an outline file
    Beats,
    /// Outline generated from a logline, then beat-by-beat
    Logline,
}

impl GenerationMode {
    /// Directory name used for this mode under the samples root.
    pub fn sample_dir(&self) -> &'static str {
        match self {
            Self::Single => "single_pass",
            Self::Beats => "beat_by_beat",
            Self::Logline => "logline",
        }
    }
}

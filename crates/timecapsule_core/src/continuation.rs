//! Bounds for the continuation excerpt carried between beats.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// How much of a beat's output is carried into the next beat's prompt.
///
/// `max_chars` is a hard cap measured in characters. `max_sentences`, when
/// set, further limits the excerpt to its last *n* sentences.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, Builder)]
#[builder(default)]
#[serde(default)]
pub struct ContinuationConfig {
    /// Maximum excerpt length in characters
    max_chars: usize,
    /// Optional cap on the number of trailing sentences
    #[builder(setter(strip_option))]
    max_sentences: Option<usize>,
}

impl Default for ContinuationConfig {
    fn default() -> Self {
        Self {
            max_chars: 120,
            max_sentences: None,
        }
    }
}

impl ContinuationConfig {
    /// Creates a new builder starting from the default values.
    pub fn builder() -> ContinuationConfigBuilder {
        ContinuationConfigBuilder::default()
    }

    /// Creates a character-bounded configuration with no sentence cap.
    pub fn chars(max_chars: usize) -> Self {
        Self {
            max_chars,
            max_sentences: None,
        }
    }
}

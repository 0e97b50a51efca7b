//! Story execution records.
//!
//! These are produced by the executor in `timecapsule_narrative` and consumed
//! by beat processors and the storage layer.

use serde::{Deserialize, Serialize};

/// Execution result for a single beat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatExecution {
    /// Name of the beat (from the outline).
    pub beat_name: String,

    /// Position in the outline (0-indexed).
    pub sequence_number: usize,

    /// The prompt sent to the generator.
    pub prompt: String,

    /// The text returned by the generator.
    pub response: String,

    /// Excerpt of `response` carried into the next beat's prompt.
    pub continuation: String,
}

/// Complete execution result for an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryExecution {
    /// Title of the outline that was executed.
    pub title: String,

    /// Ordered list of beat executions.
    pub beats: Vec<BeatExecution>,
}

impl StoryExecution {
    /// Per-beat texts in beat order.
    pub fn texts(&self) -> Vec<&str> {
        self.beats.iter().map(|b| b.response.as_str()).collect()
    }

    /// Beat texts joined with no separator.
    pub fn concatenated(&self) -> String {
        self.beats.iter().map(|b| b.response.as_str()).collect()
    }

    /// Beat texts joined by a blank line, as written to `complete_story.txt`.
    pub fn complete_story(&self) -> String {
        self.texts().join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beat(i: usize, text: &str) -> BeatExecution {
        BeatExecution {
            beat_name: format!("Beat{i}"),
            sequence_number: i,
            prompt: String::new(),
            response: text.to_string(),
            continuation: String::new(),
        }
    }

    #[test]
    fn test_joins_in_beat_order() {
        let story = StoryExecution {
            title: "T".to_string(),
            beats: vec![beat(0, "One."), beat(1, "Two."), beat(2, "Three.")],
        };
        assert_eq!(story.concatenated(), "One.Two.Three.");
        assert_eq!(story.complete_story(), "One.\n\nTwo.\n\nThree.");
        assert_eq!(story.texts(), vec!["One.", "Two.", "Three."]);
    }

    #[test]
    fn test_empty_story() {
        let story = StoryExecution {
            title: "T".to_string(),
            beats: vec![],
        };
        assert_eq!(story.concatenated(), "");
        assert_eq!(story.complete_story(), "");
    }
}

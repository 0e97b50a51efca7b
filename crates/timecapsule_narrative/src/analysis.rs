//! Lightweight text analysis for generated stories.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use timecapsule_error::{StorageError, StorageErrorKind};

/// Words characteristic of nineteenth-century prose.
pub const PERIOD_TERMS: &[&str] = &[
    "upon", "whilst", "wherein", "thence", "hitherto", "ought", "perchance", "nevertheless",
    "forthwith", "alas", "countenance", "endeavour", "lamentable", "vexation", "particulars",
    "constitution", "impudent", "approbation", "odious", "felicity", "henceforth", "scarcely",
    "indignation", "melancholy", "sentiment", "agreeable", "acquaintance", "perceive", "present",
    "circumstance",
];

/// Terms that would be anachronistic in a Victorian setting.
pub const MODERN_TERMS: &[&str] = &[
    "internet",
    "computer",
    "smartphone",
    "laptop",
    "email",
    "facebook",
    "twitter",
    "social media",
    "ai",
    "artificial intelligence",
    "machine learning",
    "robot",
    "robotic",
    "airplane",
    "jet",
    "radar",
    "television",
    "tv",
    "radio",
    "antibiotic",
    "penicillin",
    "nuclear",
    "submarine",
    "gps",
    "satellite",
    "smart watch",
    "smartwatch",
    "drone",
];

fn word_pattern(terms: &[&str]) -> Result<Regex, regex::Error> {
    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&format!(r"\b(?:{})\b", alternation))
        .case_insensitive(true)
        .build()
}

/// Basic style metrics for a generated text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleReport {
    /// Whitespace-separated words
    pub word_count: usize,
    /// Mean word length in characters
    pub avg_word_length: f64,
    /// Occurrences of `.`, `!` and `?`
    pub sentence_count: usize,
    /// Words per sentence
    pub avg_sentence_length: f64,
    /// Distinct period terms present
    pub period_term_count: usize,
    /// Period terms per 100 words
    pub period_term_density: f64,
}

impl StyleReport {
    /// Compute the metrics for `text`.
    ///
    /// ```
    /// use timecapsule_narrative::StyleReport;
    ///
    /// let report = StyleReport::analyze("Alas, she wept upon the stair. Nevertheless!");
    /// assert_eq!(report.word_count, 7);
    /// assert_eq!(report.sentence_count, 2);
    /// assert_eq!(report.period_term_count, 3);
    /// ```
    pub fn analyze(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let word_count = words.len();
        let letters: usize = words.iter().map(|w| w.chars().count()).sum();
        let sentence_count = text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count();

        let lowered = text.to_lowercase();
        let found: std::collections::HashSet<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| PERIOD_TERMS.contains(w))
            .collect();
        let period_term_count = found.len();

        let words_f = word_count.max(1) as f64;
        Self {
            word_count,
            avg_word_length: letters as f64 / words_f,
            sentence_count,
            avg_sentence_length: word_count as f64 / sentence_count.max(1) as f64,
            period_term_count,
            period_term_density: period_term_count as f64 / words_f * 100.0,
        }
    }
}

/// A line containing a modern term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// 1-based line number
    pub line: usize,
    /// The offending line, trimmed
    pub text: String,
}

/// Whole-word, case-insensitive search for modern vocabulary.
#[derive(Debug, Clone)]
pub struct AnachronismChecker {
    pattern: Option<Regex>,
}

impl AnachronismChecker {
    /// Checker for [`MODERN_TERMS`].
    pub fn new() -> Self {
        Self::with_terms(MODERN_TERMS)
    }

    /// Checker for a custom word list.
    ///
    /// An empty list matches nothing.
    pub fn with_terms(terms: &[&str]) -> Self {
        let pattern = if terms.is_empty() {
            None
        } else {
            word_pattern(terms).ok()
        };
        Self { pattern }
    }

    /// Lines of `text` that contain a listed term.
    pub fn check_text(&self, text: &str) -> Vec<Violation> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };
        text.lines()
            .enumerate()
            .filter(|(_, line)| pattern.is_match(line))
            .map(|(i, line)| Violation {
                line: i + 1,
                text: line.trim().to_string(),
            })
            .collect()
    }

    /// Read `path` and check its contents.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing file and `FileRead` if it cannot be read.
    pub fn check_file(&self, path: &Path) -> Result<Vec<Violation>, StorageError> {
        if !path.exists() {
            return Err(StorageError::new(StorageErrorKind::NotFound(
                path.display().to_string(),
            )));
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(self.check_text(&text))
    }
}

impl Default for AnachronismChecker {
    fn default() -> Self {
        Self::new()
    }
}

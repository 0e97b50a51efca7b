//! Character profile error types.

/// Specific error conditions for character profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CharacterErrorKind {
    /// Failed to read a profile file
    #[display("Failed to read character profile: {}", _0)]
    FileRead(String),
    /// No profile with the given name exists in the library
    #[display("Character profile not found: {}", _0)]
    NotFound(String),
    /// Profile document contains no text
    #[display("Character profile is empty")]
    EmptyProfile,
    /// First non-blank line is not a `# ` title heading
    #[display("Character profile must start with a '# ' title heading")]
    MissingTitle,
    /// Section heading without text
    #[display("Section heading on line {} has no text", line)]
    MalformedHeading {
        /// One-based line number of the heading
        line: usize,
    },
    /// Same section heading appears twice
    #[display("Duplicate section heading: {}", _0)]
    DuplicateSection(String),
}

/// Character profile error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Character Error: {} at line {} in {}", kind, line, file)]
pub struct CharacterError {
    /// The specific error condition
    pub kind: CharacterErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl CharacterError {
    /// Create a new CharacterError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CharacterErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CharacterErrorKind {
        &self.kind
    }
}

//! Prompt composition error types.

/// Specific error conditions for prompt composition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PromptErrorKind {
    /// Persona text is empty or whitespace
    #[display("Persona text is required for prompt composition")]
    MissingPersona,
}

/// Prompt composition error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Prompt Error: {} at line {} in {}", kind, line, file)]
pub struct PromptError {
    /// The specific error condition
    pub kind: PromptErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PromptError {
    /// Create a new PromptError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PromptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PromptErrorKind {
        &self.kind
    }
}

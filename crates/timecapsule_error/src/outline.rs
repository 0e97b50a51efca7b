//! Outline loading error types.

/// Specific error conditions for outline loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum OutlineErrorKind {
    /// Failed to read the outline file
    #[display("Failed to read outline file: {}", _0)]
    FileRead(String),
    /// Required field absent or document not a valid outline
    #[display("Malformed outline: {}", _0)]
    MalformedOutline(String),
    /// The beats sequence has zero elements
    #[display("Outline has no beats")]
    EmptyOutline,
}

/// Error type for outline loading.
///
/// # Examples
///
/// ```
/// use timecapsule_error::{OutlineError, OutlineErrorKind};
///
/// let err = OutlineError::new(OutlineErrorKind::EmptyOutline);
/// assert!(format!("{}", err).contains("no beats"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Outline Error: {} at line {} in {}", kind, line, file)]
pub struct OutlineError {
    /// The specific error condition
    pub kind: OutlineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl OutlineError {
    /// Create a new OutlineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: OutlineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &OutlineErrorKind {
        &self.kind
    }
}

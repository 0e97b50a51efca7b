//! Error types for generation backends.

/// Error kinds for generator operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum GeneratorErrorKind {
    /// HTTP request failed
    #[display("HTTP request failed: {}", _0)]
    Http(String),

    /// Backend returned a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Response body could not be interpreted
    #[display("Failed to deserialize response: {}", _0)]
    Deserialization(String),

    /// Generator is misconfigured
    #[display("Configuration error: {}", _0)]
    Configuration(String),
}

/// Error wrapper with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generator Error: {} at line {} in {}", kind, line, file)]
pub struct GeneratorError {
    /// The error kind
    pub kind: GeneratorErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl GeneratorError {
    /// Create a new GeneratorError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeneratorErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

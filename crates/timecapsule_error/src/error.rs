//! Top-level error wrapper types.

use crate::{
    CharacterError, ConfigError, GeneratorError, OutlineError, PipelineError, PromptError,
    StorageError,
};

/// Every error condition the workspace can surface.
///
/// # Examples
///
/// ```
/// use timecapsule_error::{TimeCapsuleError, TimeCapsuleErrorKind, ConfigError};
///
/// let err: TimeCapsuleError = ConfigError::new("bad seed").into();
/// assert!(matches!(err.kind(), TimeCapsuleErrorKind::Config(_)));
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TimeCapsuleErrorKind {
    /// Outline loading error
    #[from(OutlineError)]
    Outline(OutlineError),
    /// Prompt composition error
    #[from(PromptError)]
    Prompt(PromptError),
    /// Character profile error
    #[from(CharacterError)]
    Character(CharacterError),
    /// Story pipeline error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Generation backend error
    #[from(GeneratorError)]
    Generator(GeneratorError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Output storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// TimeCapsuleWriter error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("TimeCapsule Error: {}", _0)]
pub struct TimeCapsuleError(Box<TimeCapsuleErrorKind>);

impl TimeCapsuleError {
    /// Create a new error from a kind.
    pub fn new(kind: TimeCapsuleErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TimeCapsuleErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to TimeCapsuleErrorKind
impl<T> From<T> for TimeCapsuleError
where
    T: Into<TimeCapsuleErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for TimeCapsuleWriter operations.
pub type TimeCapsuleResult<T> = std::result::Result<T, TimeCapsuleError>;

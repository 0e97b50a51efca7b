//! Story pipeline error types.

/// Specific error conditions for pipeline execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// The generator failed while producing a beat
    #[display("Generation failed at beat {} ('{}'): {}", beat, name, message)]
    GenerationFailed {
        /// Zero-based index of the failing beat
        beat: usize,
        /// Name of the failing beat
        name: String,
        /// Error reported by the generator
        message: String,
    },

    /// One or more beat processors failed
    #[display("Beat processors failed: {}", _0)]
    ProcessorFailed(String),
}

/// Pipeline error with location tracking.
///
/// # Examples
///
/// ```
/// use timecapsule_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::GenerationFailed {
///     beat: 2,
///     name: "Turn".to_string(),
///     message: "out of memory".to_string(),
/// });
/// assert!(format!("{}", err).contains("beat 2"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PipelineErrorKind {
        &self.kind
    }

    /// Index of the beat that failed, if this error is tied to a beat.
    pub fn beat(&self) -> Option<usize> {
        match &self.kind {
            PipelineErrorKind::GenerationFailed { beat, .. } => Some(*beat),
            PipelineErrorKind::ProcessorFailed(_) => None,
        }
    }
}

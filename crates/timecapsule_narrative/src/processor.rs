//! Beat processor registry.
//!
//! Processors are invoked after a beat completes to perform side effects
//! such as writing the beat file.

use timecapsule_error::{PipelineError, PipelineErrorKind, TimeCapsuleResult};
use timecapsule_interface::{BeatExecution, BeatProcessor};

/// Registry of beat processors.
///
/// # Example
///
/// ```rust,ignore
/// use timecapsule_narrative::BeatProcessorRegistry;
///
/// let mut registry = BeatProcessorRegistry::new();
/// registry.register(Box::new(story_dir));
///
/// let executor = StoryExecutor::new(generator, config).with_processors(registry);
/// ```
pub struct BeatProcessorRegistry {
    processors: Vec<Box<dyn BeatProcessor>>,
}

impl BeatProcessorRegistry {
    /// Create a new empty processor registry.
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    /// Register a new processor.
    ///
    /// Processors are invoked in registration order.
    pub fn register(&mut self, processor: Box<dyn BeatProcessor>) {
        self.processors.push(processor);
    }

    /// Run every processor on a completed beat.
    ///
    /// Continues processing even if some processors fail, collecting all errors.
    ///
    /// # Errors
    ///
    /// Returns `ProcessorFailed` listing every processor that failed.
    pub async fn process(&self, beat: &BeatExecution) -> TimeCapsuleResult<()> {
        let mut errors = Vec::new();

        for processor in &self.processors {
            if let Err(e) = processor.process(beat).await {
                tracing::warn!(
                    processor = processor.name(),
                    beat = %beat.beat_name,
                    error = %e,
                    "Processor failed"
                );
                errors.push(format!("{}: {}", processor.name(), e));
            } else {
                tracing::debug!(
                    processor = processor.name(),
                    beat = %beat.beat_name,
                    "Processor succeeded"
                );
            }
        }

        if !errors.is_empty() {
            return Err(
                PipelineError::new(PipelineErrorKind::ProcessorFailed(errors.join("; "))).into(),
            );
        }

        Ok(())
    }

    /// Get the number of registered processors.
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

impl Default for BeatProcessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

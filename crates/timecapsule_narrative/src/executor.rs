//! Story execution logic.
//!
//! The executor walks an outline's beats strictly in order: compose a
//! prompt, call the generator, extract a continuation excerpt, advance.

use crate::{BeatProcessorRegistry, Outline, PromptComposer, extract_continuation};
use derive_builder::Builder;
use derive_getters::Getters;
use timecapsule_core::{ContinuationConfig, GenerateRequest, GenerationConfig};
use timecapsule_error::{PipelineError, PipelineErrorKind, TimeCapsuleResult};
use timecapsule_interface::{BeatExecution, Generator, StoryExecution};

/// Explicit configuration for a story run.
#[derive(Debug, Clone, PartialEq, Default, Getters, Builder)]
#[builder(default)]
pub struct PipelineConfig {
    /// Sampling parameters used for every beat
    generation: GenerationConfig,
    /// Bounds of the excerpt carried between beats
    continuation: ContinuationConfig,
}

impl PipelineConfig {
    /// Create a configuration from its parts.
    pub fn new(generation: GenerationConfig, continuation: ContinuationConfig) -> Self {
        Self {
            generation,
            continuation,
        }
    }

    /// Creates a new builder starting from the default values.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Executes outlines by calling the generator once per beat.
///
/// Beat *i* is composed with the continuation excerpt of beat *i - 1*. A
/// generator failure stops the run; no later beat is requested.
///
/// Optionally, processors can be registered to act on each completed beat
/// (e.g. writing it to disk). Processor failures are logged, not fatal.
pub struct StoryExecutor<G: Generator> {
    generator: G,
    config: PipelineConfig,
    processor_registry: Option<BeatProcessorRegistry>,
}

impl<G: Generator> StoryExecutor<G> {
    /// Create a new story executor.
    pub fn new(generator: G, config: PipelineConfig) -> Self {
        Self {
            generator,
            config,
            processor_registry: None,
        }
    }

    /// Attach processors invoked after each beat.
    pub fn with_processors(mut self, registry: BeatProcessorRegistry) -> Self {
        self.processor_registry = Some(registry);
        self
    }

    /// Execute every beat of `outline` in order.
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` naming the first beat whose generation
    /// failed.
    #[tracing::instrument(
        skip(self, outline, composer),
        fields(title = %outline.title(), beat_count = outline.beats().len(), model = self.generator.model_name())
    )]
    pub async fn execute(
        &self,
        outline: &Outline,
        composer: &PromptComposer,
    ) -> TimeCapsuleResult<StoryExecution> {
        let total = outline.beats().len();
        let mut beats = Vec::with_capacity(total);
        let mut continuation = String::new();

        for (sequence_number, beat) in outline.beats().iter().enumerate() {
            tracing::info!(
                beat = %beat.name(),
                position = sequence_number + 1,
                total,
                "Generating beat"
            );

            let prompt = composer
                .compose_story_beat(outline, sequence_number, &continuation)
                .unwrap_or_else(|| composer.compose_beat(beat, &continuation));

            let request = GenerateRequest::new(prompt.clone(), self.config.generation.clone());
            let response = self.generator.generate(&request).await.map_err(|e| {
                tracing::error!(beat = %beat.name(), error = %e, "Generation failed");
                PipelineError::new(PipelineErrorKind::GenerationFailed {
                    beat: sequence_number,
                    name: beat.name().clone(),
                    message: e.to_string(),
                })
            })?;

            continuation = extract_continuation(&response.text, &self.config.continuation);
            tracing::debug!(
                response_len = response.text.len(),
                continuation_len = continuation.len(),
                "Beat complete"
            );

            let execution = BeatExecution {
                beat_name: beat.name().clone(),
                sequence_number,
                prompt,
                response: response.text,
                continuation: continuation.clone(),
            };

            if let Some(registry) = &self.processor_registry {
                if let Err(e) = registry.process(&execution).await {
                    tracing::error!(
                        beat = %execution.beat_name,
                        error = %e,
                        "Beat processing failed, continuing execution"
                    );
                }
            }

            beats.push(execution);
        }

        Ok(StoryExecution {
            title: outline.title().clone(),
            beats,
        })
    }

    /// Run a single generation with the configured sampling parameters.
    ///
    /// # Errors
    ///
    /// Propagates the generator's error unchanged.
    #[tracing::instrument(skip(self, prompt), fields(prompt_len = prompt.len(), model = self.generator.model_name()))]
    pub async fn generate_once(&self, prompt: &str) -> TimeCapsuleResult<String> {
        let request = GenerateRequest::new(prompt, self.config.generation.clone());
        let response = self.generator.generate(&request).await?;
        Ok(response.text)
    }

    /// Get a reference to the underlying generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Get the run configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

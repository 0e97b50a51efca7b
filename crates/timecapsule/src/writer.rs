//! End-to-end story runs: compose, generate, save.

use derive_getters::Getters;
use std::path::PathBuf;
use std::sync::Arc;
use timecapsule_core::{ContinuationConfig, GenerationConfig, GenerationMode, WriterConfig};
use timecapsule_error::{ConfigError, TimeCapsuleResult};
use timecapsule_interface::Generator;
use timecapsule_narrative::{
    BeatProcessorRegistry, LoglineOutliner, Outline, PipelineConfig, PromptComposer,
    StoryExecutor,
};
use timecapsule_storage::{OutputStore, RunLabel};
use tracing::{info, instrument};

/// Command-line overrides for the configured sampling and continuation
/// parameters. `None` keeps the configured value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplingOverrides {
    /// Random seed
    pub seed: Option<u64>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Nucleus sampling probability mass
    pub top_p: Option<f32>,
    /// Repetition penalty
    pub repetition_penalty: Option<f32>,
    /// Token budget per call
    pub max_new_tokens: Option<u32>,
    /// Continuation excerpt length in characters
    pub continuation_chars: Option<usize>,
}

impl SamplingOverrides {
    /// Merge the overrides over `config` and validate the result.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the merged sampling parameters are out
    /// of range.
    pub fn apply(&self, config: &WriterConfig) -> Result<PipelineConfig, ConfigError> {
        let base = &config.generation;
        let generation = GenerationConfig::builder()
            .temperature(self.temperature.unwrap_or(*base.temperature()))
            .top_p(self.top_p.unwrap_or(*base.top_p()))
            .repetition_penalty(self.repetition_penalty.unwrap_or(*base.repetition_penalty()))
            .max_new_tokens(self.max_new_tokens.unwrap_or(*base.max_new_tokens()))
            .seed(self.seed.unwrap_or(*base.seed()))
            .build()
            .map_err(|e| ConfigError::new(e.to_string()))?;
        generation.validate()?;

        let continuation = match self.continuation_chars {
            Some(max_chars) => {
                let mut builder = ContinuationConfig::builder();
                builder.max_chars(max_chars);
                if let Some(n) = config.continuation.max_sentences() {
                    builder.max_sentences(*n);
                }
                builder.build().map_err(|e| ConfigError::new(e.to_string()))?
            }
            None => config.continuation.clone(),
        };

        Ok(PipelineConfig::new(generation, continuation))
    }
}

/// What to write.
#[derive(Debug, Clone, PartialEq)]
pub enum StoryRequest {
    /// One generation call opening with a seed scene
    Single {
        /// Scene the story begins with
        seed_scene: String,
    },
    /// Beat-by-beat generation from a loaded outline
    Beats {
        /// The outline to follow
        outline: Outline,
    },
    /// Outline requested from the generator, then beat-by-beat
    Logline {
        /// One-sentence story premise
        logline: String,
        /// Instructions describing the outline format
        instructions: String,
    },
}

impl StoryRequest {
    /// Generation mode this request runs in.
    pub fn mode(&self) -> GenerationMode {
        match self {
            Self::Single { .. } => GenerationMode::Single,
            Self::Beats { .. } => GenerationMode::Beats,
            Self::Logline { .. } => GenerationMode::Logline,
        }
    }
}

/// Result of a finished run.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct WriteOutcome {
    /// Run label used for every artifact
    label: RunLabel,
    /// Full story text
    text: String,
    /// Single-pass output file or the beat story's `complete_story.txt`
    path: PathBuf,
    /// Saved outline source, for logline runs
    outline_path: Option<PathBuf>,
}

/// Runs stories against one generator and saves the results.
pub struct StoryWriter<G: Generator> {
    generator: Arc<G>,
    pipeline: PipelineConfig,
    composer: PromptComposer,
    store: OutputStore,
}

impl<G: Generator> StoryWriter<G> {
    /// Create a writer.
    pub fn new(
        generator: G,
        pipeline: PipelineConfig,
        composer: PromptComposer,
        store: OutputStore,
    ) -> Self {
        Self {
            generator: Arc::new(generator),
            pipeline,
            composer,
            store,
        }
    }

    /// Get the run configuration.
    pub fn pipeline(&self) -> &PipelineConfig {
        &self.pipeline
    }

    /// Get the output store.
    pub fn store(&self) -> &OutputStore {
        &self.store
    }

    /// Run `request` and save its artifacts.
    ///
    /// # Errors
    ///
    /// Returns generator, pipeline or storage errors. Beats already written
    /// to disk stay there when a later beat fails.
    #[instrument(skip(self, request), fields(mode = %request.mode(), model = self.generator.model_name()))]
    pub async fn write(&self, request: &StoryRequest) -> TimeCapsuleResult<WriteOutcome> {
        let label = RunLabel::new(
            self.generator.model_name(),
            request.mode(),
            *self.pipeline.generation().seed(),
        );

        match request {
            StoryRequest::Single { seed_scene } => self.write_single(seed_scene, label).await,
            StoryRequest::Beats { outline } => self.write_outline(outline, label, None).await,
            StoryRequest::Logline {
                logline,
                instructions,
            } => self.write_logline(logline, instructions, label).await,
        }
    }

    fn executor(&self) -> StoryExecutor<Arc<G>> {
        StoryExecutor::new(Arc::clone(&self.generator), self.pipeline.clone())
    }

    async fn write_single(&self, seed_scene: &str, label: RunLabel) -> TimeCapsuleResult<WriteOutcome> {
        let prompt = self.composer.compose_scene(seed_scene);
        let text = self.executor().generate_once(&prompt).await?;
        let path = self.store.save_run(&label, &text).await?;
        info!(path = %path.display(), "Single-pass story saved");

        Ok(WriteOutcome {
            label,
            text,
            path,
            outline_path: None,
        })
    }

    async fn write_logline(
        &self,
        logline: &str,
        instructions: &str,
        label: RunLabel,
    ) -> TimeCapsuleResult<WriteOutcome> {
        let accepted = LoglineOutliner::new()
            .outline(&self.executor(), logline, instructions)
            .await?;
        let outline_path = self
            .store
            .save_text(&format!("{}_outline.yaml", label), accepted.source())
            .await?;
        info!(
            path = %outline_path.display(),
            origin = %accepted.origin(),
            "Outline saved"
        );

        self.write_outline(accepted.outline(), label, Some(outline_path))
            .await
    }

    async fn write_outline(
        &self,
        outline: &Outline,
        label: RunLabel,
        outline_path: Option<PathBuf>,
    ) -> TimeCapsuleResult<WriteOutcome> {
        let dir = self.store.create_story_dir(outline.title(), &label).await?;

        let mut registry = BeatProcessorRegistry::new();
        registry.register(Box::new(dir.clone()));

        let story = self
            .executor()
            .with_processors(registry)
            .execute(outline, &self.composer)
            .await?;
        let path = dir.write_complete(&story).await?;

        Ok(WriteOutcome {
            label,
            text: story.complete_story(),
            path,
            outline_path,
        })
    }
}

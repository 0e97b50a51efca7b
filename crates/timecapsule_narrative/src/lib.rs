//! Outline-to-prompt story pipeline for TimeCapsuleWriter.
//!
//! This crate turns a structured outline into a story by prompting a
//! [`Generator`](timecapsule_interface::Generator) once per beat, carrying a
//! short excerpt of each beat's output into the next prompt.
//!
//! # Features
//!
//! - **Outlines**: YAML or TOML documents with title, setting, protagonist and beats
//! - **Character profiles**: heading-structured Markdown woven into every prompt
//! - **Processor system**: act on each beat as it completes (e.g. write it to disk)
//! - **Logline outlining**: ask the model for an outline, with a deterministic fallback
//! - **Text analysis**: style metrics and an anachronism checker
//!
//! # Example
//!
//! ```rust,ignore
//! use timecapsule_narrative::{Outline, PipelineConfig, PromptComposer, StoryExecutor};
//! use timecapsule_models::HuggingFaceGenerator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let outline = Outline::from_file("prompts/beats.yaml")?;
//! let composer = PromptComposer::new(std::fs::read_to_string("prompts/persona_victorian.md")?)?;
//!
//! let generator = HuggingFaceGenerator::new("haykgrigo3/TimeCapsuleLLM")?;
//! let executor = StoryExecutor::new(generator, PipelineConfig::default());
//!
//! let story = executor.execute(&outline, &composer).await?;
//! println!("{}", story.complete_story());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod character;
mod continuation;
mod executor;
mod logline;
mod outline;
mod processor;
mod prompt;

pub use analysis::{AnachronismChecker, MODERN_TERMS, PERIOD_TERMS, StyleReport, Violation};
pub use character::{CharacterLibrary, CharacterProfile, load_profile};
pub use continuation::extract_continuation;
pub use executor::{PipelineConfig, PipelineConfigBuilder, StoryExecutor};
pub use logline::{
    LoglineOutline, LoglineOutliner, OutlineOrigin, accept_outline, compose_outline_request,
    extract_yaml_block, fallback_outline,
};
pub use outline::{Beat, Outline};
pub use processor::BeatProcessorRegistry;
pub use prompt::{PromptComposer, compose_beat_prompt, format_beat, format_characters};

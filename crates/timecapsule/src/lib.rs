//! TimeCapsuleWriter - period-voice short stories from a language model
//!
//! TimeCapsuleWriter drives a text-generation model through a story outline
//! one beat at a time, carrying a short excerpt of each beat into the next
//! prompt so the story stays continuous.
//!
//! # Features
//!
//! - **Three modes**: single pass from a seed scene, beat-by-beat from an
//!   outline, or an outline requested from a one-line logline
//! - **Character profiles**: Markdown profiles injected into every prompt
//! - **Pluggable generators**: any `Generator`; Hugging Face text-generation
//!   endpoints are built in
//! - **Artifacts**: per-beat files, a complete story and a curated samples tree
//! - **Analysis**: style metrics and an anachronism checker
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use timecapsule::{
//!     HuggingFaceGenerator, Outline, OutputStore, PromptComposer, SamplingOverrides,
//!     StoryRequest, StoryWriter, WriterConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WriterConfig::load()?;
//!     let generator = HuggingFaceGenerator::with_base_url(&config.model.id, &config.model.base_url)?;
//!     let pipeline = SamplingOverrides::default().apply(&config)?;
//!     let composer = PromptComposer::new("You are a Victorian novelist.")?;
//!     let store = OutputStore::new(&config.paths.outputs)?;
//!
//!     let writer = StoryWriter::new(generator, pipeline, composer, store);
//!     let outline = Outline::from_file("prompts/beats.yaml")?;
//!     let outcome = writer.write(&StoryRequest::Beats { outline }).await?;
//!     println!("{}", outcome.path().display());
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `api` - Enable tests that call a real text-generation endpoint
//!
//! # Architecture
//!
//! - `timecapsule_error` - Error types
//! - `timecapsule_core` - Sampling, continuation and file configuration
//! - `timecapsule_interface` - `Generator` and `BeatProcessor` traits
//! - `timecapsule_models` - Hugging Face generator
//! - `timecapsule_narrative` - Outlines, profiles, prompts and the executor
//! - `timecapsule_storage` - Output files, run labels and samples
//!
//! This crate (`timecapsule`) re-exports everything for convenience and adds
//! the end-to-end writer, the model sweep and logging setup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bench;
mod observability;
mod writer;

pub use bench::{BenchEntry, BenchReport, run_bench, save_bench_samples};
pub use observability::{ObservabilityConfig, init_observability, init_observability_with_config};
pub use writer::{SamplingOverrides, StoryRequest, StoryWriter, WriteOutcome};

pub use timecapsule_core::*;
pub use timecapsule_error::*;
pub use timecapsule_interface::*;
pub use timecapsule_models::*;
pub use timecapsule_narrative::*;
pub use timecapsule_storage::*;

//! Core data types for TimeCapsuleWriter.
//!
//! This crate provides the foundation data types shared by the outline
//! pipeline, the generation backends and the CLI: sampling parameters,
//! generation requests and responses, and the layered writer configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod continuation;
mod generation;
mod mode;
mod request;
mod settings;

pub use continuation::{ContinuationConfig, ContinuationConfigBuilder};
pub use generation::{GenerationConfig, GenerationConfigBuilder};
pub use mode::GenerationMode;
pub use request::{GenerateRequest, GenerateResponse};
pub use settings::{BenchSettings, ModelAlias, ModelSettings, PathSettings, WriterConfig};

//! Error types for TimeCapsuleWriter.
//!
//! This crate provides the foundation error types used throughout the workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use timecapsule_error::{OutlineError, OutlineErrorKind, TimeCapsuleResult};
//!
//! fn load() -> TimeCapsuleResult<String> {
//!     Err(OutlineError::new(OutlineErrorKind::EmptyOutline))?
//! }
//!
//! match load() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod character;
mod config;
mod error;
mod generator;
mod outline;
mod pipeline;
mod prompt;
mod storage;

pub use character::{CharacterError, CharacterErrorKind};
pub use config::ConfigError;
pub use error::{TimeCapsuleError, TimeCapsuleErrorKind, TimeCapsuleResult};
pub use generator::{GeneratorError, GeneratorErrorKind};
pub use outline::{OutlineError, OutlineErrorKind};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use prompt::{PromptError, PromptErrorKind};
pub use storage::{StorageError, StorageErrorKind};

//! Trait definitions for TimeCapsuleWriter.
//!
//! This crate provides the seams between the outline pipeline and the
//! outside world: the [`Generator`] trait every text-generation backend
//! implements, the [`BeatProcessor`] hook invoked after each beat, and the
//! execution records they exchange.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod execution;
mod traits;

pub use execution::{BeatExecution, StoryExecution};
pub use traits::{BeatProcessor, Generator};

//! Trait definitions for generation backends and beat hooks.

use crate::BeatExecution;
use async_trait::async_trait;
use std::sync::Arc;
use timecapsule_core::{GenerateRequest, GenerateResponse};
use timecapsule_error::TimeCapsuleResult;

/// Core trait that all text-generation backends must implement.
///
/// The pipeline treats the generator as opaque: a prompt and sampling
/// configuration go in, continuation text comes out. Model loading,
/// tokenization and decoding all live on the other side of this boundary.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a continuation for the request's prompt.
    async fn generate(&self, req: &GenerateRequest) -> TimeCapsuleResult<GenerateResponse>;

    /// Provider name (e.g., "huggingface").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "haykgrigo3/TimeCapsuleLLM").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<G: Generator + ?Sized> Generator for Box<G> {
    async fn generate(&self, req: &GenerateRequest) -> TimeCapsuleResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<G: Generator + ?Sized> Generator for Arc<G> {
    async fn generate(&self, req: &GenerateRequest) -> TimeCapsuleResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Hook invoked after a beat completes.
///
/// Processors perform side effects such as writing the beat to disk.
/// Failures are reported by the registry but never abort the story.
///
/// # Example
///
/// ```rust,ignore
/// use timecapsule_interface::{BeatExecution, BeatProcessor};
/// use timecapsule_error::TimeCapsuleResult;
/// use async_trait::async_trait;
///
/// struct Printer;
///
/// #[async_trait]
/// impl BeatProcessor for Printer {
///     async fn process(&self, beat: &BeatExecution) -> TimeCapsuleResult<()> {
///         println!("{}", beat.response);
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "Printer"
///     }
/// }
/// ```
#[async_trait]
pub trait BeatProcessor: Send + Sync {
    /// Handle a completed beat.
    ///
    /// # Errors
    ///
    /// Returns an error if the side effect fails.
    async fn process(&self, beat: &BeatExecution) -> TimeCapsuleResult<()>;

    /// Human-readable name used in logs.
    fn name(&self) -> &str;
}

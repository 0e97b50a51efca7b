//! Request and response types for generation.

use crate::GenerationConfig;
use serde::{Deserialize, Serialize};

/// A composed prompt plus the sampling configuration to use for it.
///
/// # Examples
///
/// ```
/// use timecapsule_core::{GenerateRequest, GenerationConfig};
///
/// let request = GenerateRequest::new("Write a scene.", GenerationConfig::default());
/// assert_eq!(request.prompt, "Write a scene.");
/// assert_eq!(*request.config.max_new_tokens(), 450);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Prompt text
    pub prompt: String,
    /// Sampling parameters
    pub config: GenerationConfig,
}

impl GenerateRequest {
    /// Create a new request.
    pub fn new(prompt: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            prompt: prompt.into(),
            config,
        }
    }
}

/// Text produced by the generator for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated continuation, without the prompt
    pub text: String,
}

impl GenerateResponse {
    /// Create a new response.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

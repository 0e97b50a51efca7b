//! Sampling parameters forwarded to the generator.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use timecapsule_error::ConfigError;

/// Sampling configuration for a single generation call.
///
/// This is an opaque parameter bag from the pipeline's point of view: it is
/// forwarded verbatim to the [`Generator`](https://docs.rs/timecapsule_interface)
/// and never interpreted by prompt composition.
///
/// # Examples
///
/// ```
/// use timecapsule_core::GenerationConfig;
///
/// let config = GenerationConfig::builder()
///     .temperature(0.7)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(*config.temperature(), 0.7);
/// assert_eq!(*config.top_p(), 0.95);
/// assert_eq!(*config.seed(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Builder)]
#[builder(default)]
#[serde(default)]
pub struct GenerationConfig {
    /// Sampling temperature
    temperature: f32,
    /// Nucleus sampling probability mass
    top_p: f32,
    /// Penalty applied to repeated tokens
    repetition_penalty: f32,
    /// Maximum number of new tokens to generate
    max_new_tokens: u32,
    /// Random seed for reproducible sampling
    seed: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_p: 0.95,
            repetition_penalty: 1.1,
            max_new_tokens: 450,
            seed: 42,
        }
    }
}

impl GenerationConfig {
    /// Creates a new builder starting from the default values.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }

    /// Returns a copy with the given seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the sampling parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if temperature, repetition penalty or the token budget
    /// is not positive, or if `top_p` lies outside `(0.0, 1.0]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature <= 0.0 {
            return Err(ConfigError::new(format!(
                "temperature must be positive, got {}",
                self.temperature
            )));
        }
        if self.top_p <= 0.0 || self.top_p > 1.0 {
            return Err(ConfigError::new(format!(
                "top_p must be in (0.0, 1.0], got {}",
                self.top_p
            )));
        }
        if self.repetition_penalty <= 0.0 {
            return Err(ConfigError::new(format!(
                "repetition_penalty must be positive, got {}",
                self.repetition_penalty
            )));
        }
        if self.max_new_tokens == 0 {
            return Err(ConfigError::new("max_new_tokens must be at least 1"));
        }
        Ok(())
    }
}

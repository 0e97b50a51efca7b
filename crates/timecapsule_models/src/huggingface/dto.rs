//! Hugging Face text-generation data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use timecapsule_core::GenerateRequest;
use timecapsule_error::{GeneratorError, GeneratorErrorKind};

/// Sampling parameters in the shape the endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
pub struct HuggingFaceParameters {
    /// Maximum tokens to generate
    max_new_tokens: u32,
    /// Temperature for sampling
    temperature: f32,
    /// Top-p sampling
    top_p: f32,
    /// Repetition penalty
    repetition_penalty: f32,
    /// Random seed
    seed: u64,
    /// Sample instead of greedy decoding
    #[builder(default = "true")]
    do_sample: bool,
    /// Echo the prompt back in the output
    #[builder(default = "false")]
    return_full_text: bool,
}

impl HuggingFaceParameters {
    /// Creates a new builder for `HuggingFaceParameters`.
    pub fn builder() -> HuggingFaceParametersBuilder {
        HuggingFaceParametersBuilder::default()
    }
}

/// Request body for a text-generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct HuggingFaceRequest {
    /// Prompt text
    inputs: String,
    /// Sampling parameters
    parameters: HuggingFaceParameters,
}

impl TryFrom<&GenerateRequest> for HuggingFaceRequest {
    type Error = GeneratorError;

    fn try_from(req: &GenerateRequest) -> Result<Self, Self::Error> {
        let config = &req.config;
        let parameters = HuggingFaceParameters::builder()
            .max_new_tokens(*config.max_new_tokens())
            .temperature(*config.temperature())
            .top_p(*config.top_p())
            .repetition_penalty(*config.repetition_penalty())
            .seed(*config.seed())
            .build()
            .map_err(|e| {
                GeneratorError::new(GeneratorErrorKind::Configuration(format!(
                    "Failed to build parameters: {}",
                    e
                )))
            })?;

        Ok(Self {
            inputs: req.prompt.clone(),
            parameters,
        })
    }
}

/// Generated text extracted from a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct HuggingFaceResponse {
    /// Generated text
    generated_text: String,
}

/// Extracts `generated_text` from either response shape.
///
/// The hosted Inference API answers with `[{"generated_text": ...}]` while a
/// text-generation-inference server answers with `{"generated_text": ...}`.
///
/// # Errors
///
/// Returns a deserialization error if neither shape carries a string
/// `generated_text` field.
pub fn parse_generated_text(body: &Value) -> Result<HuggingFaceResponse, GeneratorError> {
    let field = match body {
        Value::Array(items) => items.first().and_then(|v| v.get("generated_text")),
        Value::Object(_) => body.get("generated_text"),
        _ => None,
    };

    field
        .and_then(Value::as_str)
        .map(|text| HuggingFaceResponse {
            generated_text: text.to_string(),
        })
        .ok_or_else(|| {
            GeneratorError::new(GeneratorErrorKind::Deserialization(
                "Missing generated_text in response".to_string(),
            ))
        })
}

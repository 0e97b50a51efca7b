//! Hugging Face text-generation driver using reqwest.

use crate::huggingface::{HuggingFaceRequest, parse_generated_text};
use async_trait::async_trait;
use reqwest::Client;
use timecapsule_core::{GenerateRequest, GenerateResponse};
use timecapsule_error::{GeneratorError, GeneratorErrorKind, TimeCapsuleResult};
use timecapsule_interface::Generator;
use tracing::{debug, error, instrument};

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Generator backed by a Hugging Face text-generation endpoint.
///
/// Works against the hosted Inference API (`<base_url>/<model>`) or, via
/// [`HuggingFaceGenerator::with_endpoint`], any server speaking the same
/// protocol such as a local text-generation-inference instance.
#[derive(Debug, Clone)]
pub struct HuggingFaceGenerator {
    client: Client,
    api_token: Option<String>,
    model: String,
    url: String,
}

impl HuggingFaceGenerator {
    /// Creates a generator for the hosted Inference API.
    ///
    /// Reads the API token from `HUGGINGFACE_API_TOKEN` if set; public models
    /// can be called anonymously.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the model id is empty.
    #[instrument(skip_all, fields(model = %model.as_ref()))]
    pub fn new(model: impl AsRef<str>) -> TimeCapsuleResult<Self> {
        Self::with_base_url(model, DEFAULT_BASE_URL)
    }

    /// Creates a generator whose URL is `<base_url>/<model>`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the model id is empty.
    pub fn with_base_url(model: impl AsRef<str>, base_url: &str) -> TimeCapsuleResult<Self> {
        let model = model.as_ref();
        let url = format!("{}/{}", base_url.trim_end_matches('/'), model);
        Self::with_endpoint(model, url)
    }

    /// Creates a generator that posts to exactly `url`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the model id is empty.
    pub fn with_endpoint(model: impl AsRef<str>, url: impl Into<String>) -> TimeCapsuleResult<Self> {
        let model = model.as_ref().trim();
        if model.is_empty() {
            return Err(GeneratorError::new(GeneratorErrorKind::Configuration(
                "model id must not be empty".to_string(),
            ))
            .into());
        }

        let api_token = std::env::var("HUGGINGFACE_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        let url = url.into();

        debug!(model = %model, url = %url, authenticated = api_token.is_some(), "Created HuggingFace generator");

        Ok(Self {
            client: Client::new(),
            api_token,
            model: model.to_string(),
            url,
        })
    }

    /// Replaces the API token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Endpoint this generator posts to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Generator for HuggingFaceGenerator {
    #[instrument(skip(self, req), fields(model = %self.model, prompt_len = req.prompt.len()))]
    async fn generate(&self, req: &GenerateRequest) -> TimeCapsuleResult<GenerateResponse> {
        let body = HuggingFaceRequest::try_from(req)?;

        debug!(url = %self.url, "Sending request to HuggingFace");

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = ?e, "HTTP request failed");
            GeneratorError::new(GeneratorErrorKind::Http(format!("Request failed: {}", e)))
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, error = %message, "API error");
            return Err(GeneratorError::new(GeneratorErrorKind::Api {
                status: status.as_u16(),
                message,
            })
            .into());
        }

        let response_text = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read response");
            GeneratorError::new(GeneratorErrorKind::Http(format!(
                "Failed to read response: {}",
                e
            )))
        })?;

        debug!(response_len = response_text.len(), "Received response");

        let response_json: serde_json::Value =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = ?e, response = %response_text, "Failed to parse JSON");
                GeneratorError::new(GeneratorErrorKind::Deserialization(format!(
                    "Failed to parse JSON: {}",
                    e
                )))
            })?;

        let parsed = parse_generated_text(&response_json)?;
        Ok(GenerateResponse::new(parsed.generated_text().clone()))
    }

    fn provider_name(&self) -> &'static str {
        "huggingface"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

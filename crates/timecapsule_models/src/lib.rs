//! Text-generation backends for TimeCapsuleWriter.
//!
//! Each backend implements [`timecapsule_interface::Generator`] and lives
//! behind its own feature flag.
//!
//! # Available Backends
//!
//! - **HuggingFace** - hosted Inference API or a local text-generation-inference
//!   server. Enabled by default with the `huggingface` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "huggingface")]
//! # {
//! use timecapsule_models::HuggingFaceGenerator;
//! use timecapsule_interface::Generator;
//! use timecapsule_core::{GenerateRequest, GenerationConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = HuggingFaceGenerator::new("haykgrigo3/TimeCapsuleLLM")?;
//! let request = GenerateRequest::new("The fog lay thick upon", GenerationConfig::default());
//! let response = generator.generate(&request).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "huggingface")]
mod huggingface;

#[cfg(feature = "huggingface")]
pub use huggingface::{
    HuggingFaceGenerator, HuggingFaceParameters, HuggingFaceParametersBuilder,
    HuggingFaceRequest, HuggingFaceResponse, parse_generated_text,
};

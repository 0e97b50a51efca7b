//! Layered writer configuration.
//!
//! Configuration sources in order of precedence (later sources override earlier):
//! 1. Bundled defaults (`timecapsule.toml` shipped with the workspace)
//! 2. User config in home directory (`~/.config/timecapsule/timecapsule.toml`)
//! 3. User config in current directory (`./timecapsule.toml`)
//! 4. An explicit file passed by the caller
//! 5. Environment variables (`TIMECAPSULE__GENERATION__SEED=7`)

use crate::{ContinuationConfig, GenerationConfig};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use timecapsule_error::{ConfigError, TimeCapsuleError, TimeCapsuleResult};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../timecapsule.toml");

/// A shorthand name for a model identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ModelAlias {
    /// Shorthand (e.g. `TimeCapsuleLLM`)
    pub name: String,
    /// Full model identifier (e.g. `haykgrigo3/TimeCapsuleLLM`)
    pub id: String,
}

/// Which model to call and where.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelSettings {
    /// Default model identifier
    pub id: String,
    /// Base URL of the text-generation endpoint; the model id is appended
    pub base_url: String,
    /// Shorthand names accepted wherever a model id is expected
    #[serde(default)]
    pub aliases: Vec<ModelAlias>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        let alias = |name: &str, id: &str| ModelAlias {
            name: name.to_string(),
            id: id.to_string(),
        };
        Self {
            id: "haykgrigo3/TimeCapsuleLLM".to_string(),
            base_url: "https://api-inference.huggingface.co/models".to_string(),
            aliases: vec![
                alias("TimeCapsuleLLM", "haykgrigo3/TimeCapsuleLLM"),
                alias("Phi3Mini", "microsoft/phi-3-mini-4k-instruct"),
                alias("Mistral7B", "mistralai/Mistral-7B-Instruct-v0.2"),
            ],
        }
    }
}

/// Filesystem locations for prompt assets and outputs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathSettings {
    /// Directory holding persona, seed scene and outline instructions
    pub prompts: PathBuf,
    /// Directory receiving generated stories
    pub outputs: PathBuf,
    /// Directory holding character profile documents
    pub characters: PathBuf,
    /// Root of the curated samples tree
    pub samples: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            prompts: PathBuf::from("prompts"),
            outputs: PathBuf::from("outputs"),
            characters: PathBuf::from("prompts/characters"),
            samples: PathBuf::from("samples"),
        }
    }
}

impl PathSettings {
    /// Resolve a file name inside the prompts directory.
    pub fn prompt_file(&self, name: &str) -> PathBuf {
        self.prompts.join(name)
    }
}

/// Defaults for the model comparison sweep.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BenchSettings {
    /// Models compared when none are given on the command line
    pub models: Vec<String>,
    /// Logline used as the shared prompt
    pub prompt: String,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            models: vec![
                "haykgrigo3/TimeCapsuleLLM".to_string(),
                "microsoft/phi-3-mini-4k-instruct".to_string(),
                "mistralai/Mistral-7B-Instruct-v0.2".to_string(),
            ],
            prompt: "A conscientious clerk in fogbound London must deliver a perilous parcel."
                .to_string(),
        }
    }
}

/// Top-level writer configuration.
///
/// # Example
///
/// ```no_run
/// use timecapsule_core::WriterConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = WriterConfig::load()?;
/// println!("Default model: {}", config.model.id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct WriterConfig {
    /// Model selection
    #[serde(default)]
    pub model: ModelSettings,
    /// Default sampling parameters
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Continuation excerpt bounds
    #[serde(default)]
    pub continuation: ContinuationConfig,
    /// Asset and output locations
    #[serde(default)]
    pub paths: PathSettings,
    /// Model comparison defaults
    #[serde(default)]
    pub bench: BenchSettings,
}

impl WriterConfig {
    /// Load the bundled defaults overridden by a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> TimeCapsuleResult<Self> {
        debug!("Loading configuration from file");

        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                TimeCapsuleError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?;

        Self::finish(config)
    }

    /// Load configuration with precedence: environment > explicit file > current dir > home dir > bundled.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> TimeCapsuleResult<Self> {
        Self::load_with(None)
    }

    /// Like [`WriterConfig::load`], adding an explicit (required) file above the user files.
    #[instrument]
    pub fn load_with(explicit: Option<&Path>) -> TimeCapsuleResult<Self> {
        debug!("Loading configuration with precedence: env > explicit > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/timecapsule/timecapsule.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("timecapsule").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("TIMECAPSULE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(|e| {
            TimeCapsuleError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?;

        Self::finish(config)
    }

    fn finish(config: Config) -> TimeCapsuleResult<Self> {
        let parsed: Self = config.try_deserialize().map_err(|e| {
            TimeCapsuleError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })?;
        parsed.generation.validate()?;
        Ok(parsed)
    }

    /// Resolve a shorthand model name to its full identifier.
    ///
    /// Names without an alias are returned unchanged.
    pub fn resolve_model(&self, name: &str) -> String {
        self.model
            .aliases
            .iter()
            .find(|alias| alias.name == name)
            .map(|alias| alias.id.clone())
            .unwrap_or_else(|| name.to_string())
    }
}

//! Side-by-side model comparison.
//!
//! Each model gets its own generator and runs the same single-pass concept
//! prompt. Models run one after another; a failing model is recorded in the
//! report and the sweep moves on.

use chrono::{DateTime, Local};
use derive_getters::Getters;
use serde::Serialize;
use std::path::{Path, PathBuf};
use timecapsule_error::TimeCapsuleResult;
use timecapsule_interface::Generator;
use timecapsule_narrative::{PipelineConfig, PromptComposer, StoryExecutor, StyleReport};
use timecapsule_storage::write_text;
use tracing::{info, instrument, warn};

/// Outcome for a single model.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct BenchEntry {
    /// Model identifier
    model_id: String,
    /// When the model's run started
    timestamp: DateTime<Local>,
    /// Generated text, when generation succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    output_text: Option<String>,
    /// Style measurements of the generated text
    #[serde(skip_serializing_if = "Option::is_none")]
    quality_metrics: Option<StyleReport>,
    /// Failure message, when generation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Report for a whole sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct BenchReport {
    /// Concept every model was asked to write
    prompt: String,
    /// When the sweep started
    timestamp: DateTime<Local>,
    /// One entry per model, in sweep order
    results: Vec<BenchEntry>,
}

impl BenchReport {
    /// Entries whose generation succeeded.
    pub fn successes(&self) -> impl Iterator<Item = &BenchEntry> {
        self.results.iter().filter(|e| e.error.is_none())
    }
}

/// Run `concept` against every model in `models`.
///
/// `connect` builds the generator for a model id. Connection and generation
/// failures are recorded per model and never abort the sweep.
#[instrument(skip(composer, config, connect), fields(models = models.len()))]
pub async fn run_bench<G, F>(
    models: &[String],
    concept: &str,
    composer: &PromptComposer,
    config: &PipelineConfig,
    mut connect: F,
) -> BenchReport
where
    G: Generator,
    F: FnMut(&str) -> TimeCapsuleResult<G>,
{
    let prompt = composer.compose_concept(concept);
    let mut results = Vec::with_capacity(models.len());

    for model_id in models {
        info!(model = %model_id, "Benchmarking model");
        let timestamp = Local::now();

        let outcome = match connect(model_id) {
            Ok(generator) => {
                StoryExecutor::new(generator, config.clone())
                    .generate_once(&prompt)
                    .await
            }
            Err(e) => Err(e),
        };

        let entry = match outcome {
            Ok(text) => {
                let report = StyleReport::analyze(&text);
                info!(
                    model = %model_id,
                    words = report.word_count,
                    period_density = report.period_term_density,
                    "Model finished"
                );
                BenchEntry {
                    model_id: model_id.clone(),
                    timestamp,
                    output_text: Some(text),
                    quality_metrics: Some(report),
                    error: None,
                }
            }
            Err(e) => {
                warn!(model = %model_id, error = %e, "Model failed");
                BenchEntry {
                    model_id: model_id.clone(),
                    timestamp,
                    output_text: None,
                    quality_metrics: None,
                    error: Some(e.to_string()),
                }
            }
        };
        results.push(entry);
    }

    BenchReport {
        prompt: concept.to_string(),
        timestamp: Local::now(),
        results,
    }
}

/// Write `bench_<model>_<YYYYMMDD_HHMMSS>.txt` into `dir` for every
/// successful entry. `<model>` is the last path segment of the model id.
///
/// # Errors
///
/// Returns `FileWrite` if a sample cannot be written.
pub async fn save_bench_samples(report: &BenchReport, dir: &Path) -> TimeCapsuleResult<Vec<PathBuf>> {
    let stamp = report.timestamp.format("%Y%m%d_%H%M%S");
    let mut paths = Vec::new();

    for entry in report.successes() {
        let Some(text) = &entry.output_text else {
            continue;
        };
        let short = entry.model_id.rsplit('/').next().unwrap_or(&entry.model_id);
        let path = dir.join(format!("bench_{}_{}.txt", short, stamp));
        write_text(&path, &format!("Prompt: {}\n\n{}", report.prompt, text)).await?;
        info!(path = %path.display(), "Saved benchmark sample");
        paths.push(path);
    }

    Ok(paths)
}

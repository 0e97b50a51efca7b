//! Model comparison command handler.

use super::commands::BenchArgs;
use super::write::{connect, load_composer};
use chrono::Local;
use timecapsule::{
    BenchReport, SamplingOverrides, TimeCapsuleResult, WriterConfig, run_bench, save_bench_samples,
    write_json,
};

/// Run the sweep, write the JSON report and print a summary.
pub async fn run_bench_command(config: &WriterConfig, args: &BenchArgs) -> TimeCapsuleResult<BenchReport> {
    let pipeline = SamplingOverrides::from(&args.sampling).apply(config)?;
    let composer = load_composer(config, args.persona.as_deref(), &[]).await?;

    let models: Vec<String> = if args.models.is_empty() {
        config.bench.models.clone()
    } else {
        args.models.clone()
    };
    let concept = args.prompt.as_deref().unwrap_or(&config.bench.prompt);

    let report = run_bench(&models, concept, &composer, &pipeline, |model| {
        connect(config, model)
    })
    .await;

    let report_path = args.output_file.clone().unwrap_or_else(|| {
        config
            .paths
            .outputs
            .join(format!("bench_{}.json", Local::now().format("%Y%m%d_%H%M%S")))
    });
    write_json(&report_path, &report).await?;
    println!("Benchmark results saved to {}", report_path.display());

    if args.save_samples {
        for path in save_bench_samples(&report, &config.paths.samples).await? {
            println!("Sample saved to {}", path.display());
        }
    }

    println!("\nBenchmark summary:");
    for entry in report.results() {
        match (entry.quality_metrics(), entry.error()) {
            (Some(metrics), _) => println!(
                "{}: {} words, {:.2}% period terms",
                entry.model_id(),
                metrics.word_count,
                metrics.period_term_density
            ),
            (None, Some(error)) => println!("{}: Error - {}", entry.model_id(), error),
            (None, None) => println!("{}: no output", entry.model_id()),
        }
    }

    Ok(report)
}

//! TimeCapsuleWriter CLI binary.
//!
//! This binary provides command-line access to TimeCapsuleWriter:
//! - Write stories from a seed scene, an outline or a logline
//! - Curate outputs into the samples tree
//! - Compare models and check texts for anachronisms

use clap::Parser;
use timecapsule::{ObservabilityConfig, WriterConfig, init_observability_with_config};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, list_characters, run_bench_command, run_check, run_snapshot, run_write,
    };

    // Load HUGGINGFACE_API_TOKEN and friends from .env when present
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut observability = ObservabilityConfig::default().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability_with_config(observability)?;

    let config = WriterConfig::load_with(cli.config.as_deref())?;

    // Execute the requested command
    match cli.command {
        Commands::Write(args) => {
            run_write(&config, &args).await?;
        }

        Commands::Characters => {
            list_characters(&config)?;
        }

        Commands::Snapshot(args) => {
            run_snapshot(&config, &args).await?;
        }

        Commands::Bench(args) => {
            run_bench_command(&config, &args).await?;
        }

        Commands::Check { files } => {
            if run_check(&files)? > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

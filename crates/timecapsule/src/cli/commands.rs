//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use timecapsule::{GenerationMode, SamplingOverrides};

/// TimeCapsuleWriter command-line interface
#[derive(Parser, Debug)]
#[command(name = "timecapsule")]
#[command(about = "Period-voice short stories from a language model", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a story
    ///
    /// With --outline the story is written beat by beat; with --logline an
    /// outline is generated first; otherwise a single pass opens with the
    /// seed scene.
    Write(WriteArgs),

    /// List available character profiles
    Characters,

    /// Save an output as a named sample
    Snapshot(SnapshotArgs),

    /// Compare models on the same prompt
    Bench(BenchArgs),

    /// Scan text files for anachronistic terms
    Check {
        /// Files to scan
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Options shared by every command that writes a story.
#[derive(Args, Debug, Clone, Default)]
pub struct WriteArgs {
    /// Outline file (YAML or TOML) for beat-by-beat mode
    #[arg(long, conflicts_with = "logline")]
    pub outline: Option<PathBuf>,

    /// Logline to build an outline from
    #[arg(long)]
    pub logline: Option<String>,

    /// Seed scene for single-pass mode [default: <prompts>/seed_scene.txt]
    #[arg(long)]
    pub seed_scene: Option<PathBuf>,

    /// Persona prompt file [default: <prompts>/persona_victorian.md]
    #[arg(long)]
    pub persona: Option<PathBuf>,

    /// Character profiles to include (e.g. clerk governess)
    #[arg(long, num_args = 1..)]
    pub characters: Vec<String>,

    /// Model id or alias
    #[arg(short, long)]
    pub model: Option<String>,

    #[command(flatten)]
    pub sampling: SamplingArgs,
}

impl WriteArgs {
    /// Mode selected by the outline and logline flags.
    pub fn mode(&self) -> GenerationMode {
        if self.logline.is_some() {
            GenerationMode::Logline
        } else if self.outline.is_some() {
            GenerationMode::Beats
        } else {
            GenerationMode::Single
        }
    }
}

/// Sampling overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct SamplingArgs {
    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Top-p sampling parameter
    #[arg(long)]
    pub top_p: Option<f32>,

    /// Repetition penalty
    #[arg(long)]
    pub repetition_penalty: Option<f32>,

    /// Maximum number of new tokens per generation call
    #[arg(long)]
    pub max_new_tokens: Option<u32>,

    /// Characters of each beat carried into the next prompt
    #[arg(long)]
    pub continuation_chars: Option<usize>,
}

impl From<&SamplingArgs> for SamplingOverrides {
    fn from(args: &SamplingArgs) -> Self {
        Self {
            seed: args.seed,
            temperature: args.temperature,
            top_p: args.top_p,
            repetition_penalty: args.repetition_penalty,
            max_new_tokens: args.max_new_tokens,
            continuation_chars: args.continuation_chars,
        }
    }
}

#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Existing output file to save as a sample
    #[arg(long, conflicts_with = "generate", required_unless_present = "generate")]
    pub input: Option<PathBuf>,

    /// Generate a new story and save it as a sample
    #[arg(long)]
    pub generate: bool,

    /// Model id or alias (e.g. TimeCapsuleLLM, Phi3Mini, Mistral7B)
    #[arg(long)]
    pub model: String,

    /// Generation mode
    #[arg(long, value_enum)]
    pub mode: ModeArg,

    /// Random seed used for generation
    #[arg(long)]
    pub seed: u64,

    /// Outline file for beats mode
    #[arg(long)]
    pub outline: Option<PathBuf>,

    /// Logline for logline mode
    #[arg(long)]
    pub logline: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Maximum number of new tokens per generation call
    #[arg(long)]
    pub max_new_tokens: Option<u32>,
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Models to compare [default: bench.models from config]
    #[arg(long, num_args = 1..)]
    pub models: Vec<String>,

    /// Story concept [default: bench.prompt from config]
    #[arg(long)]
    pub prompt: Option<String>,

    /// Persona prompt file [default: <prompts>/persona_victorian.md]
    #[arg(long)]
    pub persona: Option<PathBuf>,

    /// Report file [default: <outputs>/bench_<timestamp>.json]
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Save each model's output under the samples directory
    #[arg(long)]
    pub save_samples: bool,

    #[command(flatten)]
    pub sampling: SamplingArgs,
}

/// Generation mode as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// One pass from a seed scene
    Single,
    /// Beat by beat from an outline
    Beats,
    /// Outline generated from a logline
    Logline,
}

impl From<ModeArg> for GenerationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Single => GenerationMode::Single,
            ModeArg::Beats => GenerationMode::Beats,
            ModeArg::Logline => GenerationMode::Logline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_flags_select_mode() {
        let cli = Cli::try_parse_from([
            "timecapsule",
            "write",
            "--outline",
            "prompts/beats.yaml",
            "--characters",
            "clerk",
            "governess",
            "--seed",
            "7",
            "--top-p",
            "0.8",
        ])
        .unwrap();

        let Commands::Write(args) = cli.command else {
            panic!("expected write");
        };
        assert_eq!(args.mode(), GenerationMode::Beats);
        assert_eq!(args.characters, ["clerk", "governess"]);

        let overrides = SamplingOverrides::from(&args.sampling);
        assert_eq!(overrides.seed, Some(7));
        assert_eq!(overrides.top_p, Some(0.8));
        assert_eq!(overrides.temperature, None);
    }

    #[test]
    fn test_outline_and_logline_conflict() {
        let result = Cli::try_parse_from([
            "timecapsule",
            "write",
            "--outline",
            "beats.yaml",
            "--logline",
            "A clerk must deliver a parcel.",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "timecapsule",
            "characters",
            "--verbose",
            "--json-logs",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.json_logs);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_snapshot_requires_a_source() {
        assert!(
            Cli::try_parse_from([
                "timecapsule", "snapshot", "--model", "Phi3Mini", "--mode", "single", "--seed", "1",
            ])
            .is_err()
        );

        let cli = Cli::try_parse_from([
            "timecapsule", "snapshot", "--input", "out.txt", "--model", "Phi3Mini", "--mode",
            "beats", "--seed", "1",
        ])
        .unwrap();
        let Commands::Snapshot(args) = cli.command else {
            panic!("expected snapshot");
        };
        assert_eq!(GenerationMode::from(args.mode), GenerationMode::Beats);
        assert!(!args.generate);
    }

    #[test]
    fn test_check_requires_files() {
        assert!(Cli::try_parse_from(["timecapsule", "check"]).is_err());
    }
}

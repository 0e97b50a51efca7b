//! Sample snapshot command handler.

use super::commands::{SamplingArgs, SnapshotArgs, WriteArgs};
use super::write::run_write;
use std::path::PathBuf;
use timecapsule::{ConfigError, GenerationMode, SampleStore, TimeCapsuleResult, WriterConfig};

/// Build the write options for `snapshot --generate`.
fn write_args(args: &SnapshotArgs) -> Result<WriteArgs, ConfigError> {
    let mode = GenerationMode::from(args.mode);
    let mut write = WriteArgs {
        model: Some(args.model.clone()),
        sampling: SamplingArgs {
            seed: Some(args.seed),
            temperature: args.temperature,
            max_new_tokens: args.max_new_tokens,
            ..SamplingArgs::default()
        },
        ..WriteArgs::default()
    };

    match mode {
        GenerationMode::Beats => {
            write.outline = Some(
                args.outline
                    .clone()
                    .ok_or_else(|| ConfigError::new("--mode beats needs --outline"))?,
            );
        }
        GenerationMode::Logline => {
            write.logline = Some(
                args.logline
                    .clone()
                    .ok_or_else(|| ConfigError::new("--mode logline needs --logline"))?,
            );
        }
        GenerationMode::Single => {}
    }
    Ok(write)
}

/// Save an existing output, or a freshly generated one, as a named sample.
pub async fn run_snapshot(config: &WriterConfig, args: &SnapshotArgs) -> TimeCapsuleResult<PathBuf> {
    let mode = GenerationMode::from(args.mode);

    let input = if args.generate {
        let outcome = run_write(config, &write_args(args)?).await?;
        outcome.path().clone()
    } else {
        args.input
            .clone()
            .ok_or_else(|| ConfigError::new("snapshot needs --input or --generate"))?
    };

    let store = SampleStore::new(config.paths.samples.clone());
    store.ensure_layout().await?;
    let path = store
        .save_existing(&input, &args.model, mode, args.seed)
        .await?;

    println!("Successfully saved sample: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::ModeArg;

    fn snapshot(mode: ModeArg) -> SnapshotArgs {
        SnapshotArgs {
            input: None,
            generate: true,
            model: "TimeCapsuleLLM".to_string(),
            mode,
            seed: 7,
            outline: None,
            logline: None,
            temperature: Some(0.5),
            max_new_tokens: None,
        }
    }

    #[test]
    fn test_single_mode_forwards_sampling() {
        let write = write_args(&snapshot(ModeArg::Single)).unwrap();
        assert_eq!(write.mode(), GenerationMode::Single);
        assert_eq!(write.model.as_deref(), Some("TimeCapsuleLLM"));
        assert_eq!(write.sampling.seed, Some(7));
        assert_eq!(write.sampling.temperature, Some(0.5));
    }

    #[test]
    fn test_beats_mode_requires_outline() {
        assert!(write_args(&snapshot(ModeArg::Beats)).is_err());

        let mut args = snapshot(ModeArg::Beats);
        args.outline = Some(PathBuf::from("prompts/beats.yaml"));
        assert_eq!(write_args(&args).unwrap().mode(), GenerationMode::Beats);
    }

    #[test]
    fn test_logline_mode_requires_logline() {
        assert!(write_args(&snapshot(ModeArg::Logline)).is_err());

        let mut args = snapshot(ModeArg::Logline);
        args.logline = Some("A clerk must deliver a parcel.".to_string());
        assert_eq!(write_args(&args).unwrap().mode(), GenerationMode::Logline);
    }
}

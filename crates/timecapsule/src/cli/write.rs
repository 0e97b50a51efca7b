//! Story writing command handler.

use super::commands::WriteArgs;
use std::path::{Path, PathBuf};
use timecapsule::{
    CharacterLibrary, GenerationMode, HuggingFaceGenerator, Outline, OutputStore, PromptComposer,
    SamplingOverrides, StoryRequest, StoryWriter, TimeCapsuleResult, WriteOutcome, WriterConfig,
    read_text,
};

const PERSONA_FILE: &str = "persona_victorian.md";
const SEED_SCENE_FILE: &str = "seed_scene.txt";
const OUTLINE_INSTRUCTIONS_FILE: &str = "outline_instructions.md";

/// Connect to the configured endpoint for `model` (an id or alias).
pub(crate) fn connect(config: &WriterConfig, model: &str) -> TimeCapsuleResult<HuggingFaceGenerator> {
    let id = config.resolve_model(model);
    HuggingFaceGenerator::with_base_url(&id, &config.model.base_url)
}

/// Load the persona and attach the requested character profiles.
pub(crate) async fn load_composer(
    config: &WriterConfig,
    persona: Option<&Path>,
    characters: &[String],
) -> TimeCapsuleResult<PromptComposer> {
    let persona_path = persona
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.paths.prompt_file(PERSONA_FILE));
    let persona = read_text(&persona_path).await?;

    let profiles = CharacterLibrary::new(config.paths.characters.clone()).load_all(characters)?;
    if !profiles.is_empty() {
        tracing::info!(count = profiles.len(), "Loaded character profiles");
    }

    Ok(PromptComposer::new(persona)?.with_profiles(profiles))
}

async fn build_request(config: &WriterConfig, args: &WriteArgs) -> TimeCapsuleResult<StoryRequest> {
    let request = match args.mode() {
        GenerationMode::Logline => StoryRequest::Logline {
            logline: args.logline.clone().unwrap_or_default(),
            instructions: read_text(&config.paths.prompt_file(OUTLINE_INSTRUCTIONS_FILE)).await?,
        },
        GenerationMode::Beats => {
            let path = args.outline.clone().unwrap_or_default();
            tracing::info!(path = %path.display(), "Loading outline");
            StoryRequest::Beats {
                outline: Outline::from_file(&path)?,
            }
        }
        GenerationMode::Single => {
            let path: PathBuf = args
                .seed_scene
                .clone()
                .unwrap_or_else(|| config.paths.prompt_file(SEED_SCENE_FILE));
            StoryRequest::Single {
                seed_scene: read_text(&path).await?,
            }
        }
    };
    Ok(request)
}

/// Write one story as described by `args`.
pub async fn run_write(config: &WriterConfig, args: &WriteArgs) -> TimeCapsuleResult<WriteOutcome> {
    let pipeline = SamplingOverrides::from(&args.sampling).apply(config)?;
    let model = args.model.as_deref().unwrap_or(&config.model.id);
    let generator = connect(config, model)?;

    tracing::info!(
        mode = %args.mode(),
        model = %config.resolve_model(model),
        seed = pipeline.generation().seed(),
        "Writing story"
    );

    let composer = load_composer(config, args.persona.as_deref(), &args.characters).await?;
    let request = build_request(config, args).await?;
    let store = OutputStore::new(&config.paths.outputs)?;

    let writer = StoryWriter::new(generator, pipeline, composer, store);
    let outcome = writer.write(&request).await?;

    if let Some(outline_path) = outcome.outline_path() {
        println!("Saved outline to: {}", outline_path.display());
    }
    println!("Saved output to: {}", outcome.path().display());
    Ok(outcome)
}

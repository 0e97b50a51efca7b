use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use timecapsule::{
    Beat, COMPLETE_STORY_FILE, GenerateRequest, GenerateResponse, Generator, GeneratorError,
    GeneratorErrorKind, GenerationMode, Outline, OutputStore, PipelineConfig, PromptComposer,
    SamplingOverrides, StoryRequest, StoryWriter, TimeCapsuleErrorKind, TimeCapsuleResult,
    WriterConfig,
};

const OUTLINE_YAML: &str = "title: The Parcel\nsetting: London, 1865\nprotagonist: A clerk\nbeats:\n  - name: Setup\n    description: A parcel arrives.\n    key_elements: [fog]\n  - name: Resolution\n    description: The parcel is delivered.\n    key_elements: [relief]\n";

/// Answers outline requests with YAML, beat prompts with `<BEAT:name>` and
/// anything else with a fixed scene.
struct ScriptedGenerator {
    prompts: Arc<Mutex<Vec<String>>>,
    outline_reply: String,
    fail_on: Option<String>,
}

impl ScriptedGenerator {
    fn new() -> Self {
        Self {
            prompts: Arc::new(Mutex::new(Vec::new())),
            outline_reply: OUTLINE_YAML.to_string(),
            fail_on: None,
        }
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, req: &GenerateRequest) -> TimeCapsuleResult<GenerateResponse> {
        self.prompts.lock().unwrap().push(req.prompt.clone());

        if req.prompt.contains("Logline: \"") {
            return Ok(GenerateResponse::new(self.outline_reply.clone()));
        }

        let beat = req
            .prompt
            .lines()
            .rev()
            .find_map(|line| line.strip_prefix("### Beat: "));
        match beat {
            Some(name) if self.fail_on.as_deref() == Some(name) => {
                Err(GeneratorError::new(GeneratorErrorKind::Http("connection reset".to_string())).into())
            }
            Some(name) => Ok(GenerateResponse::new(format!("<BEAT:{}>", name))),
            None => Ok(GenerateResponse::new("The fog lifted over Whitechapel.")),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "stub/model-1"
    }
}

fn pipeline(seed: u64) -> PipelineConfig {
    SamplingOverrides {
        seed: Some(seed),
        ..SamplingOverrides::default()
    }
    .apply(&WriterConfig::default())
    .unwrap()
}

fn writer(generator: ScriptedGenerator, outputs: &std::path::Path) -> StoryWriter<ScriptedGenerator> {
    StoryWriter::new(
        generator,
        pipeline(7),
        PromptComposer::new("You are a Victorian novelist.").unwrap(),
        OutputStore::new(outputs).unwrap(),
    )
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

#[test]
fn test_overrides_replace_only_given_values() {
    let config = WriterConfig::default();
    let merged = SamplingOverrides {
        temperature: Some(0.5),
        continuation_chars: Some(80),
        ..SamplingOverrides::default()
    }
    .apply(&config)
    .unwrap();

    assert_eq!(*merged.generation().temperature(), 0.5);
    assert_eq!(merged.generation().top_p(), config.generation.top_p());
    assert_eq!(merged.generation().seed(), config.generation.seed());
    assert_eq!(*merged.continuation().max_chars(), 80);

    let untouched = SamplingOverrides::default().apply(&config).unwrap();
    assert_eq!(untouched.generation(), &config.generation);
    assert_eq!(untouched.continuation(), &config.continuation);
}

#[test]
fn test_overrides_are_validated() {
    let bad = SamplingOverrides {
        top_p: Some(1.5),
        ..SamplingOverrides::default()
    };
    assert!(bad.apply(&WriterConfig::default()).is_err());

    let zero_tokens = SamplingOverrides {
        max_new_tokens: Some(0),
        ..SamplingOverrides::default()
    };
    assert!(zero_tokens.apply(&WriterConfig::default()).is_err());
}

#[test]
fn test_request_modes() {
    let single = StoryRequest::Single {
        seed_scene: "Fog.".to_string(),
    };
    assert_eq!(single.mode(), GenerationMode::Single);

    let logline = StoryRequest::Logline {
        logline: "A clerk must deliver a parcel.".to_string(),
        instructions: "Outline it.".to_string(),
    };
    assert_eq!(logline.mode(), GenerationMode::Logline);
}

#[tokio::test]
async fn test_single_pass_saves_labelled_file() {
    let dir = tempfile::tempdir().unwrap();
    let writer = writer(ScriptedGenerator::new(), dir.path());

    let outcome = writer
        .write(&StoryRequest::Single {
            seed_scene: "A lamp gutters in the counting-house.".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(outcome.text(), "The fog lifted over Whitechapel.");
    assert!(outcome.outline_path().is_none());
    assert_eq!(outcome.path().parent().unwrap(), dir.path());

    let name = file_name(outcome.path());
    assert!(name.starts_with("stub_model-1_single_7_"), "{}", name);
    assert!(name.ends_with(".txt"));
    assert_eq!(format!("{}.txt", outcome.label()), name);

    let saved = std::fs::read_to_string(outcome.path()).unwrap();
    assert_eq!(saved, "The fog lifted over Whitechapel.");
}

#[tokio::test]
async fn test_single_pass_prompt_opens_with_scene() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ScriptedGenerator::new();
    let prompts = Arc::clone(&generator.prompts);
    let writer = writer(generator, dir.path());

    writer
        .write(&StoryRequest::Single {
            seed_scene: "A lamp gutters.".to_string(),
        })
        .await
        .unwrap();

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].starts_with("You are a Victorian novelist."));
    assert!(prompts[0].ends_with("A lamp gutters."));
}

#[tokio::test]
async fn test_beat_story_writes_each_beat_and_complete_story() {
    let dir = tempfile::tempdir().unwrap();
    let writer = writer(ScriptedGenerator::new(), dir.path());
    let outline = Outline::from_yaml_str(OUTLINE_YAML).unwrap();

    let outcome = writer
        .write(&StoryRequest::Beats { outline })
        .await
        .unwrap();

    assert_eq!(outcome.text(), "<BEAT:Setup>\n\n<BEAT:Resolution>");
    assert_eq!(file_name(outcome.path()), COMPLETE_STORY_FILE);

    let story_dir = outcome.path().parent().unwrap();
    assert_eq!(
        file_name(story_dir),
        format!("the_parcel_{}", outcome.label())
    );
    assert_eq!(
        std::fs::read_to_string(story_dir.join("01_setup.txt")).unwrap(),
        "<BEAT:Setup>"
    );
    assert_eq!(
        std::fs::read_to_string(story_dir.join("02_resolution.txt")).unwrap(),
        "<BEAT:Resolution>"
    );
    assert_eq!(
        std::fs::read_to_string(outcome.path()).unwrap(),
        "<BEAT:Setup>\n\n<BEAT:Resolution>"
    );
}

#[tokio::test]
async fn test_failed_beat_keeps_earlier_beats_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ScriptedGenerator {
        fail_on: Some("Resolution".to_string()),
        ..ScriptedGenerator::new()
    };
    let writer = writer(generator, dir.path());
    let outline = Outline::new(
        "The Parcel",
        "London",
        "A clerk",
        vec![
            Beat::new("Setup", "It begins.", vec![]),
            Beat::new("Resolution", "It ends.", vec![]),
        ],
    );

    let err = writer
        .write(&StoryRequest::Beats { outline })
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), TimeCapsuleErrorKind::Pipeline(_)));

    let story_dirs: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(story_dirs.len(), 1);
    assert!(story_dirs[0].join("01_setup.txt").exists());
    assert!(!story_dirs[0].join("02_resolution.txt").exists());
    assert!(!story_dirs[0].join(COMPLETE_STORY_FILE).exists());
}

#[tokio::test]
async fn test_logline_saves_outline_then_story() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ScriptedGenerator::new();
    let prompts = Arc::clone(&generator.prompts);
    let writer = writer(generator, dir.path());

    let outcome = writer
        .write(&StoryRequest::Logline {
            logline: "A clerk in London must deliver a parcel.".to_string(),
            instructions: "Produce a YAML outline.".to_string(),
        })
        .await
        .unwrap();

    let outline_path = outcome.outline_path().clone().unwrap();
    assert_eq!(
        file_name(&outline_path),
        format!("{}_outline.yaml", outcome.label())
    );
    assert!(file_name(&outline_path).starts_with("stub_model-1_logline_7_"));
    assert_eq!(std::fs::read_to_string(&outline_path).unwrap(), OUTLINE_YAML);

    assert_eq!(outcome.text(), "<BEAT:Setup>\n\n<BEAT:Resolution>");
    assert_eq!(prompts.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_logline_falls_back_when_reply_is_not_an_outline() {
    let dir = tempfile::tempdir().unwrap();
    let generator = ScriptedGenerator {
        outline_reply: "I would rather write a poem.".to_string(),
        ..ScriptedGenerator::new()
    };
    let writer = writer(generator, dir.path());

    let outcome = writer
        .write(&StoryRequest::Logline {
            logline: "A clerk in London must deliver a parcel.".to_string(),
            instructions: "Produce a YAML outline.".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        outcome.text(),
        "<BEAT:Setup>\n\n<BEAT:Complication>\n\n<BEAT:Turn>\n\n<BEAT:Resolution>"
    );
    let saved = std::fs::read_to_string(outcome.outline_path().as_ref().unwrap()).unwrap();
    assert!(Outline::from_yaml_str(&saved).is_ok());
}

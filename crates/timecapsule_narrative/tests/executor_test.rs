use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use timecapsule_core::{ContinuationConfig, GenerateRequest, GenerateResponse, GenerationConfig};
use timecapsule_error::{
    GeneratorError, GeneratorErrorKind, PipelineErrorKind, TimeCapsuleErrorKind,
    TimeCapsuleResult,
};
use timecapsule_interface::{BeatExecution, BeatProcessor, Generator};
use timecapsule_narrative::{
    Beat, BeatProcessorRegistry, Outline, PipelineConfig, PromptComposer, StoryExecutor,
};

/// Echoes `<BEAT:name>` for the beat named in the prompt and records every prompt.
struct EchoGenerator {
    prompts: Arc<Mutex<Vec<String>>>,
    fail_on: Option<String>,
}

impl EchoGenerator {
    fn new() -> Self {
        Self {
            prompts: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
        }
    }

    fn failing_on(name: &str) -> Self {
        Self {
            fail_on: Some(name.to_string()),
            ..Self::new()
        }
    }
}

fn beat_name(prompt: &str) -> String {
    prompt
        .lines()
        .rev()
        .find_map(|line| line.strip_prefix("### Beat: "))
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl Generator for EchoGenerator {
    async fn generate(&self, req: &GenerateRequest) -> TimeCapsuleResult<GenerateResponse> {
        self.prompts.lock().unwrap().push(req.prompt.clone());
        let name = beat_name(&req.prompt);
        if self.fail_on.as_deref() == Some(name.as_str()) {
            return Err(GeneratorError::new(GeneratorErrorKind::Api {
                status: 503,
                message: "model overloaded".to_string(),
            })
            .into());
        }
        Ok(GenerateResponse::new(format!("<BEAT:{}>", name)))
    }

    fn provider_name(&self) -> &'static str {
        "echo"
    }

    fn model_name(&self) -> &str {
        "echo-1"
    }
}

fn outline() -> Outline {
    let beat = |name: &str| {
        Beat::new(
            name,
            format!("{} happens. It matters.", name),
            vec![format!("{} element", name)],
        )
    };
    Outline::new(
        "The Parcel",
        "London, 1865",
        "A clerk",
        vec![
            beat("Setup"),
            beat("Complication"),
            beat("Turn"),
            beat("Resolution"),
        ],
    )
}

fn composer() -> PromptComposer {
    PromptComposer::new("You are a Victorian novelist.").unwrap()
}

#[tokio::test]
async fn test_beats_are_generated_in_order() {
    let generator = EchoGenerator::new();
    let prompts = Arc::clone(&generator.prompts);
    let executor = StoryExecutor::new(generator, PipelineConfig::default());

    let story = executor.execute(&outline(), &composer()).await.unwrap();

    assert_eq!(
        story.concatenated(),
        "<BEAT:Setup><BEAT:Complication><BEAT:Turn><BEAT:Resolution>"
    );
    assert_eq!(story.title, "The Parcel");

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 4);
    let order: Vec<String> = prompts.iter().map(|p| beat_name(p)).collect();
    assert_eq!(order, ["Setup", "Complication", "Turn", "Resolution"]);

    for (i, beat) in story.beats.iter().enumerate() {
        assert_eq!(beat.sequence_number, i);
        assert_eq!(beat.prompt, prompts[i]);
    }
}

#[tokio::test]
async fn test_continuation_is_carried_to_next_beat() {
    let executor = StoryExecutor::new(EchoGenerator::new(), PipelineConfig::default());
    let story = executor.execute(&outline(), &composer()).await.unwrap();

    assert!(!story.beats[0].prompt.contains("## Previously in the story:"));
    assert!(
        story.beats[1]
            .prompt
            .contains("## Previously in the story:\n<BEAT:Setup>")
    );
    assert_eq!(story.beats[3].continuation, "<BEAT:Resolution>");
}

#[tokio::test]
async fn test_generation_failure_stops_the_run() {
    let generator = EchoGenerator::failing_on("Turn");
    let prompts = Arc::clone(&generator.prompts);
    let executor = StoryExecutor::new(generator, PipelineConfig::default());

    let err = executor.execute(&outline(), &composer()).await.unwrap_err();
    match err.kind() {
        TimeCapsuleErrorKind::Pipeline(pipeline) => {
            assert_eq!(pipeline.beat(), Some(2));
            match pipeline.kind() {
                PipelineErrorKind::GenerationFailed { name, message, .. } => {
                    assert_eq!(name, "Turn");
                    assert!(message.contains("model overloaded"));
                }
                other => panic!("unexpected pipeline error: {:?}", other),
            }
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let requested: Vec<String> = prompts.lock().unwrap().iter().map(|p| beat_name(p)).collect();
    assert_eq!(requested, ["Setup", "Complication", "Turn"]);
}

#[tokio::test]
async fn test_config_is_forwarded_verbatim() {
    struct SeedCheck;

    #[async_trait]
    impl Generator for SeedCheck {
        async fn generate(&self, req: &GenerateRequest) -> TimeCapsuleResult<GenerateResponse> {
            Ok(GenerateResponse::new(format!("seed={}. ", req.config.seed())))
        }
        fn provider_name(&self) -> &'static str {
            "seed"
        }
        fn model_name(&self) -> &str {
            "seed"
        }
    }

    let config = PipelineConfig::new(
        GenerationConfig::default().with_seed(1234),
        ContinuationConfig::chars(4),
    );
    let executor = StoryExecutor::new(SeedCheck, config);
    let story = executor.execute(&outline(), &composer()).await.unwrap();
    assert!(story.beats.iter().all(|b| b.response == "seed=1234. "));
    assert!(story.beats.iter().all(|b| b.continuation.chars().count() <= 4));

    assert_eq!(executor.generate_once("hi").await.unwrap(), "seed=1234. ");
}

struct Recorder {
    seen: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

#[async_trait]
impl BeatProcessor for Recorder {
    async fn process(&self, beat: &BeatExecution) -> TimeCapsuleResult<()> {
        self.seen.lock().unwrap().push(beat.beat_name.clone());
        if self.fail {
            return Err(GeneratorError::new(GeneratorErrorKind::Http("disk".to_string())).into());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Recorder"
    }
}

#[tokio::test]
async fn test_processors_run_per_beat_and_failures_are_not_fatal() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut registry = BeatProcessorRegistry::new();
    registry.register(Box::new(Recorder {
        seen: Arc::clone(&seen),
        fail: true,
    }));

    let executor =
        StoryExecutor::new(EchoGenerator::new(), PipelineConfig::default()).with_processors(registry);
    let story = executor.execute(&outline(), &composer()).await.unwrap();

    assert_eq!(story.beats.len(), 4);
    assert_eq!(
        *seen.lock().unwrap(),
        ["Setup", "Complication", "Turn", "Resolution"]
    );
}

#[tokio::test]
async fn test_boxed_generator_works() {
    let generator: Box<dyn Generator> = Box::new(EchoGenerator::new());
    let executor = StoryExecutor::new(generator, PipelineConfig::default());
    let story = executor.execute(&outline(), &composer()).await.unwrap();
    assert_eq!(story.texts().len(), 4);
    assert_eq!(executor.generator().provider_name(), "echo");
}

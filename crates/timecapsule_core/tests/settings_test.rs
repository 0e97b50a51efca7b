use timecapsule_core::{ContinuationConfig, GenerationConfig, WriterConfig};

#[test]
fn defaults_match_bundled_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.toml");
    std::fs::write(&path, "").unwrap();

    let loaded = WriterConfig::from_file(&path).expect("bundled defaults should parse");
    assert_eq!(loaded, WriterConfig::default());
}

#[test]
fn file_overrides_single_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timecapsule.toml");
    std::fs::write(
        &path,
        r#"
        [generation]
        seed = 7
        temperature = 0.5

        [continuation]
        max_chars = 200
        "#,
    )
    .unwrap();

    let config = WriterConfig::from_file(&path).unwrap();
    assert_eq!(*config.generation.seed(), 7);
    assert_eq!(*config.generation.temperature(), 0.5);
    assert_eq!(*config.generation.top_p(), 0.95);
    assert_eq!(*config.generation.max_new_tokens(), 450);
    assert_eq!(*config.continuation.max_chars(), 200);
    assert_eq!(config.model.id, "haykgrigo3/TimeCapsuleLLM");
}

#[test]
fn invalid_sampling_values_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timecapsule.toml");
    std::fs::write(&path, "[generation]\ntop_p = 1.5\n").unwrap();

    assert!(WriterConfig::from_file(&path).is_err());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(WriterConfig::from_file(dir.path().join("absent.toml")).is_err());
}

#[test]
fn aliases_resolve_and_unknown_names_pass_through() {
    let config = WriterConfig::default();
    assert_eq!(
        config.resolve_model("Phi3Mini"),
        "microsoft/phi-3-mini-4k-instruct"
    );
    assert_eq!(config.resolve_model("org/custom"), "org/custom");
}

#[test]
fn generation_validation() {
    assert!(GenerationConfig::default().validate().is_ok());

    let zero_temp = GenerationConfig::builder().temperature(0.0).build().unwrap();
    assert!(zero_temp.validate().is_err());

    let no_tokens = GenerationConfig::builder().max_new_tokens(0).build().unwrap();
    assert!(no_tokens.validate().is_err());

    let full_mass = GenerationConfig::builder().top_p(1.0).build().unwrap();
    assert!(full_mass.validate().is_ok());
}

#[test]
fn continuation_builder_sets_sentence_cap() {
    let config = ContinuationConfig::builder()
        .max_chars(300usize)
        .max_sentences(2usize)
        .build()
        .unwrap();
    assert_eq!(*config.max_chars(), 300);
    assert_eq!(*config.max_sentences(), Some(2));
    assert_eq!(ContinuationConfig::default(), ContinuationConfig::chars(120));
}

use serde_json::json;
use timecapsule_core::{GenerateRequest, GenerationConfig};
use timecapsule_error::GeneratorErrorKind;
use timecapsule_interface::Generator;
use timecapsule_models::{HuggingFaceGenerator, HuggingFaceRequest, parse_generated_text};

#[test]
fn test_request_body_carries_all_sampling_parameters() {
    let config = GenerationConfig::builder()
        .temperature(0.7)
        .max_new_tokens(64)
        .seed(7)
        .build()
        .unwrap();
    let request = GenerateRequest::new("It was a dark night.", config);

    let body = HuggingFaceRequest::try_from(&request).unwrap();
    let value = serde_json::to_value(&body).unwrap();

    assert_eq!(value["inputs"], "It was a dark night.");
    let params = &value["parameters"];
    assert_eq!(params["max_new_tokens"], 64);
    assert_eq!(params["seed"], 7);
    assert_eq!(params["do_sample"], true);
    assert_eq!(params["return_full_text"], false);
    assert!((params["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    assert!((params["top_p"].as_f64().unwrap() - 0.95).abs() < 1e-6);
    assert!((params["repetition_penalty"].as_f64().unwrap() - 1.1).abs() < 1e-6);
}

#[test]
fn test_parses_array_response() {
    let body = json!([{ "generated_text": "The carriage rattled on." }]);
    let parsed = parse_generated_text(&body).unwrap();
    assert_eq!(parsed.generated_text(), "The carriage rattled on.");
}

#[test]
fn test_parses_object_response() {
    let body = json!({ "generated_text": "A letter arrived." });
    let parsed = parse_generated_text(&body).unwrap();
    assert_eq!(parsed.generated_text(), "A letter arrived.");
}

#[test]
fn test_rejects_missing_generated_text() {
    for body in [json!([]), json!({ "error": "loading" }), json!("text")] {
        let err = parse_generated_text(&body).unwrap_err();
        assert!(matches!(err.kind, GeneratorErrorKind::Deserialization(_)));
    }
}

#[test]
fn test_urls() {
    let hosted = HuggingFaceGenerator::new("haykgrigo3/TimeCapsuleLLM").unwrap();
    assert_eq!(
        hosted.url(),
        "https://api-inference.huggingface.co/models/haykgrigo3/TimeCapsuleLLM"
    );
    assert_eq!(hosted.provider_name(), "huggingface");
    assert_eq!(hosted.model_name(), "haykgrigo3/TimeCapsuleLLM");

    let local = HuggingFaceGenerator::with_base_url("tiny", "http://localhost:8080/").unwrap();
    assert_eq!(local.url(), "http://localhost:8080/tiny");

    let tgi = HuggingFaceGenerator::with_endpoint("tiny", "http://localhost:3000/generate").unwrap();
    assert_eq!(tgi.url(), "http://localhost:3000/generate");
}

#[test]
fn test_empty_model_is_rejected() {
    assert!(HuggingFaceGenerator::new("  ").is_err());
}

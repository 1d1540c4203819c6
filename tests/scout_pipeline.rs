//! End-to-end tests of the scan run against a scripted provider.
//!
//! The provider returns canned replies so every path (success, empty,
//! unparseable, throttled, other upstream failure) can be exercised without
//! network access. Each test writes into its own temporary directory.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use naa_scout::config::ScoutConfig;
use naa_scout::error::LlmError;
use naa_scout::llm::{GenerationRequest, GenerationResponse, LlmProvider};
use naa_scout::scout::{Scout, ScoutFailure, Variant};
use serde_json::{json, Value};
use tempfile::TempDir;

enum Reply {
    Text(Option<&'static str>),
    Error(fn() -> LlmError),
}

struct ScriptedProvider {
    reply: Reply,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedProvider {
    fn text(text: &'static str) -> Arc<Self> {
        Self::new(Reply::Text(Some(text)))
    }

    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        self.requests.lock().expect("lock").push(request);
        match &self.reply {
            Reply::Text(text) => Ok(GenerationResponse {
                model: "scripted".to_string(),
                text: text.map(str::to_string),
                ..Default::default()
            }),
            Reply::Error(make) => Err(make()),
        }
    }
}

fn config_in(dir: &TempDir, variant: Variant) -> ScoutConfig {
    ScoutConfig::new("test-key")
        .with_output_path(dir.path().join("top_news.json"))
        .with_variant(variant)
}

fn read_json(path: &Path) -> Value {
    let contents = std::fs::read_to_string(path).expect("output file should exist");
    serde_json::from_str(&contents).expect("output file should be valid JSON")
}

#[tokio::test]
async fn test_fenced_object_is_written_pretty_printed() {
    let dir = TempDir::new().expect("tempdir");
    let provider =
        ScriptedProvider::text("```json\n{\"headline\":\"X\",\"url\":\"http://a\",\"reason\":\"Y\"}\n```");
    let scout = Scout::new(provider, config_in(&dir, Variant::Headline));

    let report = scout.run().await.expect("run should succeed");

    let expected = json!({"headline": "X", "url": "http://a", "reason": "Y"});
    assert_eq!(report.payload.value(), &expected);
    assert_eq!(read_json(&report.output_path), expected);

    let contents = std::fs::read_to_string(&report.output_path).expect("read");
    assert!(contents.starts_with("{\n    \"headline\": \"X\""));
}

#[tokio::test]
async fn test_unfenced_array_is_written() {
    let dir = TempDir::new().expect("tempdir");
    let provider = ScriptedProvider::text(
        r#"[{"category":"AI & Robotics","headline":"A","url":"u","reason":"r"}]"#,
    );
    let scout = Scout::new(provider, config_in(&dir, Variant::Digest));

    let report = scout.run().await.expect("run should succeed");

    let signals = report.payload.signals();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].category.as_deref(), Some("AI & Robotics"));
    assert_eq!(
        read_json(&report.output_path),
        json!([{"category": "AI & Robotics", "headline": "A", "url": "u", "reason": "r"}])
    );
}

#[tokio::test]
async fn test_prose_around_fence_is_ignored() {
    let dir = TempDir::new().expect("tempdir");
    let provider = ScriptedProvider::text(
        "Based on today's search results, here are the signals:\n\n```json\n[\n  {\"category\": \"Longevity Lab\", \"headline\": \"Sleep study\"}\n]\n```\n\nLet me know if you need more detail.",
    );
    let scout = Scout::new(provider, config_in(&dir, Variant::Digest));

    let report = scout.run().await.expect("run should succeed");

    assert_eq!(
        read_json(&report.output_path),
        json!([{"category": "Longevity Lab", "headline": "Sleep study"}])
    );
}

#[tokio::test]
async fn test_request_enables_web_search_with_variant_prompt() {
    let dir = TempDir::new().expect("tempdir");
    let provider = ScriptedProvider::text("[]");
    let scout = Scout::new(
        provider.clone(),
        config_in(&dir, Variant::Digest).with_model("gemini-2.0-flash"),
    );

    scout.scan().await.expect("scan should succeed");

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].web_search);
    assert_eq!(requests[0].model, "gemini-2.0-flash");
    assert_eq!(requests[0].messages[0].content, Variant::Digest.prompt());
}

#[tokio::test]
async fn test_empty_response_writes_nothing() {
    for reply in [Reply::Text(None), Reply::Text(Some("")), Reply::Text(Some("   \n"))] {
        let dir = TempDir::new().expect("tempdir");
        let config = config_in(&dir, Variant::Digest);
        let output = config.output_path.clone();
        let scout = Scout::new(ScriptedProvider::new(reply), config);

        let failure = scout.run().await.unwrap_err();

        assert_eq!(failure, ScoutFailure::EmptyResponse);
        assert!(!output.exists());
    }
}

#[tokio::test]
async fn test_unparseable_response_writes_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let config = config_in(&dir, Variant::Headline);
    let output = config.output_path.clone();
    let scout = Scout::new(
        ScriptedProvider::text("Sure! Here's your answer: N/A"),
        config,
    );

    let failure = scout.run().await.unwrap_err();

    assert_eq!(
        failure,
        ScoutFailure::UnparseableResponse {
            preview: "Sure! Here's your answer: N/A".to_string()
        }
    );
    assert!(!output.exists());
}

#[tokio::test]
async fn test_wrong_shape_is_unparseable() {
    let dir = TempDir::new().expect("tempdir");
    let config = config_in(&dir, Variant::Digest);
    let output = config.output_path.clone();
    let scout = Scout::new(ScriptedProvider::text(r#"{"headline": "X"}"#), config);

    let failure = scout.run().await.unwrap_err();

    assert_eq!(failure.kind(), "unparseable_response");
    assert!(!output.exists());
}

#[tokio::test]
async fn test_failed_run_keeps_previous_output() {
    let dir = TempDir::new().expect("tempdir");
    let config = config_in(&dir, Variant::Digest);
    std::fs::write(&config.output_path, "[\"yesterday\"]").expect("seed");
    let output = config.output_path.clone();
    let scout = Scout::new(ScriptedProvider::text("no json today"), config);

    assert!(scout.run().await.is_err());
    assert_eq!(read_json(&output), json!(["yesterday"]));
}

#[tokio::test]
async fn test_rate_limited_upstream() {
    let dir = TempDir::new().expect("tempdir");
    let scout = Scout::new(
        ScriptedProvider::new(Reply::Error(|| {
            LlmError::RateLimited("Resource has been exhausted (e.g. check quota).".to_string())
        })),
        config_in(&dir, Variant::Digest),
    );

    let failure = scout.run().await.unwrap_err();

    assert_eq!(failure.kind(), "rate_limited");
    assert!(failure.to_string().contains("Suggestion:"));
}

#[tokio::test]
async fn test_rate_limit_detected_from_error_text() {
    let dir = TempDir::new().expect("tempdir");
    let scout = Scout::new(
        ScriptedProvider::new(Reply::Error(|| LlmError::ApiError {
            code: 400,
            message: "429 Too Many Requests".to_string(),
        })),
        config_in(&dir, Variant::Headline),
    );

    assert_eq!(scout.run().await.unwrap_err().kind(), "rate_limited");
}

#[tokio::test]
async fn test_other_upstream_failure() {
    let dir = TempDir::new().expect("tempdir");
    let config = config_in(&dir, Variant::Digest);
    let output = config.output_path.clone();
    let scout = Scout::new(
        ScriptedProvider::new(Reply::Error(|| {
            LlmError::RequestFailed("error sending request: dns error".to_string())
        })),
        config,
    );

    let failure = scout.run().await.unwrap_err();

    assert_eq!(failure.kind(), "upstream_failure");
    assert!(failure.to_string().starts_with("Agent Encountered Error:"));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_unwritable_output_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    let config = config_in(&dir, Variant::Digest)
        .with_output_path(dir.path().join("missing-dir").join("top_news.json"));
    let scout = Scout::new(ScriptedProvider::text("[]"), config);

    let failure = scout.run().await.unwrap_err();

    assert_eq!(failure.kind(), "upstream_failure");
}

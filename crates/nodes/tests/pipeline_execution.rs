//! End-to-end tests for the pipeline driver against a scripted provider.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use nodes::{PipelineExecutor, RunConfig};
use pipeline::{
    ApiKey, BlogState, Completion, CompletionRequest, LlmError, LlmProvider, ModelId,
    PipelineError, ProgressEvent, ProgressSink, Topic,
};

/// Provider stub that consumes a scripted queue of outcomes and records every
/// prompt it receives, in call order.
struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new(responses: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn ok(responses: &[&str]) -> Arc<Self> {
        Self::new(responses.iter().map(|r| Ok((*r).to_string())).collect())
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(
        &self,
        _key: &ApiKey,
        request: CompletionRequest,
    ) -> Result<Completion, LlmError> {
        self.prompts.lock().unwrap().push(request.prompt);
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::transport("no scripted response left")));
        next.map(|text| Completion { text, usage: None })
    }
}

/// Sink that records the events it receives, in order.
#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn notify(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn topic() -> Topic {
    Topic::new("Generative AI in Healthcare").unwrap()
}

fn config() -> RunConfig {
    RunConfig::new(
        ApiKey::new("gsk_test").unwrap(),
        ModelId::new("qwen-2.5-32b").unwrap(),
    )
}

async fn run(provider: Arc<ScriptedProvider>) -> Result<BlogState, PipelineError> {
    PipelineExecutor::new(provider).run(topic(), &config()).await
}

#[tokio::test]
async fn successful_run_produces_expected_artifacts() {
    let provider = ScriptedProvider::ok(&[
        "Title Response",
        "Content Response",
        "Review Response",
        "Revised Response",
    ]);
    let state = run(provider).await.unwrap();

    assert_eq!(state.title(), Some("Title Response"));
    assert_eq!(
        state.drafts().iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["Content Response", "Revised Response"]
    );
    assert_eq!(
        state
            .review_notes()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>(),
        vec!["Review Response"]
    );
    assert_eq!(state.latest_draft(), Some("Revised Response"));
    assert_eq!(state.review_cycles(), 1);
}

#[tokio::test]
async fn successful_run_always_has_the_same_shape() {
    for _ in 0..2 {
        let provider = ScriptedProvider::ok(&["t", "c", "r", "v"]);
        let state = run(provider).await.unwrap();
        assert!(state.title().is_some());
        assert_eq!(state.drafts().len(), 2);
        assert_eq!(state.review_notes().len(), 1);
    }
}

#[tokio::test]
async fn stages_run_in_order_and_reference_prior_outputs() {
    let provider = ScriptedProvider::ok(&[
        "Title Response",
        "Content Response",
        "Review Response",
        "Revised Response",
    ]);
    run(provider.clone()).await.unwrap();

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 4);
    // Title prompt references the topic.
    assert!(prompts[0].contains("Generative AI in Healthcare"));
    // Content prompt references the generated title.
    assert!(prompts[1].contains("Title Response"));
    // Review prompt references the content response.
    assert!(prompts[2].contains("Content Response"));
    // Revision prompt references both the draft and the critique.
    assert!(prompts[3].contains("Content Response"));
    assert!(prompts[3].contains("Review Response"));
}

#[tokio::test]
async fn title_is_first_line_with_quotes_stripped() {
    let provider = ScriptedProvider::ok(&["\"My Great Title\"\nExtra line", "c", "r", "v"]);
    let state = run(provider).await.unwrap();
    assert_eq!(state.title(), Some("My Great Title"));
}

#[tokio::test]
async fn failure_on_content_call_aborts_before_review() {
    let provider = ScriptedProvider::new(vec![
        Ok("Title Response".to_string()),
        Err(LlmError::transport("service unavailable")),
    ]);
    let err = run(provider.clone()).await.unwrap_err();

    match err {
        PipelineError::Llm(LlmError::Transport { message }) => {
            assert_eq!(message, "service unavailable");
        }
        other => panic!("expected the injected transport error, got {other:?}"),
    }
    // Title and content prompts were issued; no review or revision prompt ever was.
    assert_eq!(provider.prompts().len(), 2);
}

#[tokio::test]
async fn auth_failure_on_first_call_surfaces_verbatim() {
    let provider = ScriptedProvider::new(vec![Err(LlmError::auth("invalid api key"))]);
    let err = run(provider.clone()).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Llm(LlmError::Auth { ref message }) if message == "invalid api key"
    ));
    assert_eq!(provider.prompts().len(), 1);
}

#[tokio::test]
async fn progress_events_fire_once_per_stage_in_order() {
    let provider = ScriptedProvider::ok(&["t", "c", "r", "v"]);
    let sink = Arc::new(RecordingSink::default());
    PipelineExecutor::new(provider)
        .with_progress_sink(sink.clone())
        .run(topic(), &config())
        .await
        .unwrap();

    assert_eq!(
        sink.events(),
        vec![
            ProgressEvent::TitleStarted,
            ProgressEvent::ContentStarted,
            ProgressEvent::ReviewStarted,
            ProgressEvent::RevisionStarted,
            ProgressEvent::Completed,
        ]
    );
}

#[tokio::test]
async fn no_completed_event_after_a_failed_run() {
    let provider = ScriptedProvider::new(vec![
        Ok("t".to_string()),
        Ok("c".to_string()),
        Err(LlmError::transport("rate limited")),
    ]);
    let sink = Arc::new(RecordingSink::default());
    let result = PipelineExecutor::new(provider)
        .with_progress_sink(sink.clone())
        .run(topic(), &config())
        .await;

    assert!(result.is_err());
    assert_eq!(
        sink.events(),
        vec![
            ProgressEvent::TitleStarted,
            ProgressEvent::ContentStarted,
            ProgressEvent::ReviewStarted,
        ]
    );
}

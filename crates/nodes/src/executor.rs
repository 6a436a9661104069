//! The pipeline driver.
//!
//! [`PipelineExecutor`] wires the four stages into a fixed chain
//! (title → content → review → revision) and runs it start-to-finish once per
//! request. Control flow is strictly linear: no stage is skipped, retried, or
//! repeated, and the first stage error aborts the run.

use std::sync::Arc;

use pipeline::{
    ApiKey, BlogState, LlmProvider, ModelId, NodeId, NullSink, PipelineError, PipelineRunId,
    ProgressEvent, ProgressSink, Timestamp, TokenCount, TokenUsage, Topic, DEFAULT_MAX_TOKENS,
};
use tracing::Instrument;

use crate::stages;

// ---------------------------------------------------------------------------
// Run phases
// ---------------------------------------------------------------------------

/// Execution phases of one run.
///
/// Exactly one transition per stage, in declaration order; [`RunPhase::Revised`]
/// is terminal. There are no retry transitions and no cycles back to an
/// earlier phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunPhase {
    /// State created; no stage has run.
    Start,
    /// The title stage finished.
    TitleGenerated,
    /// The content stage appended the first draft.
    ContentDrafted,
    /// The review stage appended its critique.
    Reviewed,
    /// The revision stage appended the final draft. Terminal.
    Revised,
}

impl RunPhase {
    /// Returns `true` once the run has produced its final draft.
    pub fn is_terminal(self) -> bool {
        self == RunPhase::Revised
    }
}

/// The fixed stage chain, in execution order.
pub fn stage_chain() -> Vec<NodeId> {
    [
        "title_generator",
        "content_generator",
        "content_reviewer",
        "content_updater",
    ]
    .into_iter()
    .filter_map(NodeId::new)
    .collect()
}

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Per-run generation settings.
///
/// Created fresh for each invocation and threaded into every provider call;
/// nothing here is ever held in process-wide state.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Credential forwarded to the generation service on every call.
    pub api_key: ApiKey,
    /// Model every stage's request is routed to.
    pub model: ModelId,
    /// Completion token cap applied to every stage's request.
    pub max_tokens: u32,
    /// Sampling temperature; `None` uses the service default.
    pub temperature: Option<f32>,
}

impl RunConfig {
    /// Creates a configuration with the default token cap and temperature.
    pub fn new(api_key: ApiKey, model: ModelId) -> Self {
        Self {
            api_key,
            model,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }

    /// Overrides the completion token cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Overrides the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

/// Drives one run of the four-stage pipeline.
///
/// The provider and sink are shared, read-only collaborators; each call to
/// [`PipelineExecutor::run`] owns its [`BlogState`] exclusively, so concurrent
/// runs never interact.
pub struct PipelineExecutor {
    provider: Arc<dyn LlmProvider>,
    sink: Arc<dyn ProgressSink>,
}

impl PipelineExecutor {
    /// Creates an executor with no progress listener.
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            sink: Arc::new(NullSink),
        }
    }

    /// Attaches a progress sink notified before each stage.
    pub fn with_progress_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Runs the pipeline once for `topic`.
    ///
    /// On success the returned state satisfies the completion invariants:
    /// title set, exactly two drafts, exactly one review note. On the first
    /// stage error the partially built state is dropped and the error is
    /// surfaced verbatim.
    pub async fn run(&self, topic: Topic, config: &RunConfig) -> Result<BlogState, PipelineError> {
        let run_id = PipelineRunId::new_random();
        let span = tracing::info_span!(
            "pipeline_run",
            run_id = %run_id,
            topic = %topic,
            model = %config.model,
        );
        self.run_stages(topic, config).instrument(span).await
    }

    async fn run_stages(
        &self,
        topic: Topic,
        config: &RunConfig,
    ) -> Result<BlogState, PipelineError> {
        let started = Timestamp::now();
        let provider = self.provider.as_ref();
        let mut state = BlogState::new(topic);
        let mut phase = RunPhase::Start;
        let mut tokens = TokenCount::new(0);
        tracing::debug!(?phase, started = %started, "pipeline run starting");

        self.sink.notify(ProgressEvent::TitleStarted);
        let usage = stages::generate_title(&mut state, provider, config).await?;
        accumulate(&mut tokens, usage);
        phase = RunPhase::TitleGenerated;
        tracing::info!(?phase, "stage complete");

        self.sink.notify(ProgressEvent::ContentStarted);
        let usage = stages::generate_content(&mut state, provider, config).await?;
        accumulate(&mut tokens, usage);
        phase = RunPhase::ContentDrafted;
        tracing::info!(?phase, "stage complete");

        self.sink.notify(ProgressEvent::ReviewStarted);
        let usage = stages::review_content(&mut state, provider, config).await?;
        accumulate(&mut tokens, usage);
        phase = RunPhase::Reviewed;
        tracing::info!(?phase, "stage complete");

        self.sink.notify(ProgressEvent::RevisionStarted);
        let usage = stages::revise_content(&mut state, provider, config).await?;
        accumulate(&mut tokens, usage);
        phase = RunPhase::Revised;
        tracing::info!(?phase, total_tokens = %tokens, "pipeline run complete");

        self.sink.notify(ProgressEvent::Completed);
        Ok(state)
    }
}

fn accumulate(total: &mut TokenCount, usage: Option<TokenUsage>) {
    if let Some(usage) = usage {
        *total += usage.total();
    }
}

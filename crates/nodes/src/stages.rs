//! The four stage functions.
//!
//! Each stage reads the current [`BlogState`], builds its prompt, issues
//! exactly one generation call, and records the result on the state. Stages
//! perform no presentation; progress notification is the driver's job.
//! Provider failures propagate unchanged and abort the run.

use pipeline::{
    BlogState, CompletionRequest, LlmProvider, PipelineError, TokenUsage,
};

use crate::executor::RunConfig;
use crate::prompts;

fn request_for(config: &RunConfig, prompt: String) -> CompletionRequest {
    let mut request =
        CompletionRequest::new(config.model.clone(), prompt).with_max_tokens(config.max_tokens);
    if let Some(temperature) = config.temperature {
        request = request.with_temperature(temperature);
    }
    request
}

/// First line of a raw title response, with surrounding double quotes stripped.
pub fn extract_title(raw: &str) -> &str {
    raw.lines().next().unwrap_or("").trim().trim_matches('"')
}

/// Title stage: generates title options for the topic and records the first.
pub async fn generate_title(
    state: &mut BlogState,
    provider: &dyn LlmProvider,
    config: &RunConfig,
) -> Result<Option<TokenUsage>, PipelineError> {
    let prompt = prompts::title_prompt(state.topic());
    let completion = provider
        .complete(&config.api_key, request_for(config, prompt))
        .await?;
    let title = extract_title(&completion.text);
    tracing::debug!(node = "title_generator", title, "title generated");
    state.set_title(title);
    Ok(completion.usage)
}

/// Content stage: drafts the full post under the generated title.
pub async fn generate_content(
    state: &mut BlogState,
    provider: &dyn LlmProvider,
    config: &RunConfig,
) -> Result<Option<TokenUsage>, PipelineError> {
    let title = state
        .title()
        .ok_or_else(|| PipelineError::missing_input("title"))?;
    let prompt = prompts::content_prompt(title);
    let completion = provider
        .complete(&config.api_key, request_for(config, prompt))
        .await?;
    tracing::debug!(
        node = "content_generator",
        chars = completion.text.len(),
        "draft generated"
    );
    state.push_draft(completion.text);
    Ok(completion.usage)
}

/// Review stage: critiques the latest draft.
pub async fn review_content(
    state: &mut BlogState,
    provider: &dyn LlmProvider,
    config: &RunConfig,
) -> Result<Option<TokenUsage>, PipelineError> {
    let draft = state
        .latest_draft()
        .ok_or_else(|| PipelineError::missing_input("draft"))?;
    let prompt = prompts::review_prompt(draft);
    let completion = provider
        .complete(&config.api_key, request_for(config, prompt))
        .await?;
    tracing::debug!(node = "content_reviewer", "review produced");
    state.push_review_note(completion.text);
    Ok(completion.usage)
}

/// Revision stage: reworks the latest draft against the latest critique.
///
/// The revised text is appended as a new draft; the prior draft is kept.
pub async fn revise_content(
    state: &mut BlogState,
    provider: &dyn LlmProvider,
    config: &RunConfig,
) -> Result<Option<TokenUsage>, PipelineError> {
    let draft = state
        .latest_draft()
        .ok_or_else(|| PipelineError::missing_input("draft"))?;
    let feedback = state
        .latest_review_note()
        .ok_or_else(|| PipelineError::missing_input("review note"))?;
    let prompt = prompts::revision_prompt(draft, feedback);
    let completion = provider
        .complete(&config.api_key, request_for(config, prompt))
        .await?;
    tracing::debug!(node = "content_updater", "revision produced");
    state.push_draft(completion.text);
    Ok(completion.usage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline::{ApiKey, Completion, LlmError, ModelId, Topic};

    /// Provider that fails the test if any call reaches it.
    struct NoCallProvider;

    #[async_trait::async_trait]
    impl LlmProvider for NoCallProvider {
        async fn complete(
            &self,
            _key: &ApiKey,
            _request: CompletionRequest,
        ) -> Result<Completion, LlmError> {
            panic!("no generation call is allowed for this state");
        }
    }

    fn config() -> RunConfig {
        RunConfig::new(
            ApiKey::new("gsk_test").unwrap(),
            ModelId::new("qwen-2.5-32b").unwrap(),
        )
    }

    #[tokio::test]
    async fn review_requires_an_existing_draft() {
        let mut state = BlogState::new(Topic::new("topic").unwrap());
        let err = review_content(&mut state, &NoCallProvider, &config())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::MissingInput { .. }));
    }

    #[tokio::test]
    async fn revision_requires_a_draft_and_a_review_note() {
        let mut state = BlogState::new(Topic::new("topic").unwrap());
        state.push_draft("a draft");
        let err = revise_content(&mut state, &NoCallProvider, &config())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::MissingInput { .. }));
    }

    #[test]
    fn extract_title_takes_first_line_and_strips_quotes() {
        assert_eq!(
            extract_title("\"My Great Title\"\nExtra line"),
            "My Great Title"
        );
        assert_eq!(extract_title("Plain Title"), "Plain Title");
        assert_eq!(extract_title("\"Quoted\""), "Quoted");
        assert_eq!(extract_title("  spaced  \nrest"), "spaced");
        assert_eq!(extract_title(""), "");
    }

    #[test]
    fn extract_title_handles_windows_line_endings() {
        assert_eq!(extract_title("\"A Title\"\r\nExtra"), "A Title");
    }
}

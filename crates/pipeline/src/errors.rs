//! Top-level error type for the Blogsmith pipeline domain.
//!
//! [`PipelineError`] covers conditions that abort a run. Provider-level
//! failures are defined alongside the port in [`crate::provider`] and wrapped
//! here unchanged; the pipeline itself never retries or recovers — the first
//! error in any stage aborts the remaining stages and is surfaced verbatim to
//! the invoking caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider::LlmError;

/// Errors that abort a pipeline run.
///
/// A failed run yields no partial artefacts: the caller receives this error
/// and may start a fresh run from the beginning. There is no stage-level
/// resume.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum PipelineError {
    /// A required input was empty or absent.
    ///
    /// Produced at the caller boundary before the first stage executes; the
    /// stages themselves assume validated inputs.
    #[error("Missing input: {field}")]
    MissingInput {
        /// Name of the missing input (e.g. `"topic"`, `"api key"`).
        field: String,
    },

    /// A generation call failed.
    ///
    /// Wraps the provider error unchanged — authentication rejections and
    /// transport failures alike are fatal to the run.
    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl PipelineError {
    /// Convenience constructor for [`PipelineError::MissingInput`].
    pub fn missing_input(field: impl Into<String>) -> Self {
        Self::MissingInput {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llm_errors_surface_verbatim() {
        let err: PipelineError = LlmError::auth("invalid api key").into();
        assert_eq!(err.to_string(), "Authentication failed: invalid api key");
    }

    #[test]
    fn missing_input_names_the_field() {
        let err = PipelineError::missing_input("topic");
        assert_eq!(err.to_string(), "Missing input: topic");
    }
}

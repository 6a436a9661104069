//! Progress events for an optional presentation layer.
//!
//! The driver announces each stage before invoking it. Stage functions perform
//! no presentation of their own; a UI subscribes by implementing
//! [`ProgressSink`]. Absence of a listener does not affect correctness —
//! [`NullSink`] discards everything.

use serde::{Deserialize, Serialize};

/// Ordered notifications emitted over the course of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressEvent {
    /// The title stage is about to call the generation service.
    TitleStarted,
    /// The content stage is about to call the generation service.
    ContentStarted,
    /// The review stage is about to call the generation service.
    ReviewStarted,
    /// The revision stage is about to call the generation service.
    RevisionStarted,
    /// All four stages finished; the final state is about to be returned.
    Completed,
}

impl ProgressEvent {
    /// Human-readable status label for this event.
    pub fn label(self) -> &'static str {
        match self {
            ProgressEvent::TitleStarted => "Generating title",
            ProgressEvent::ContentStarted => "Generating content",
            ProgressEvent::ReviewStarted => "Reviewing content",
            ProgressEvent::RevisionStarted => "Revising content",
            ProgressEvent::Completed => "Blog post complete",
        }
    }
}

impl std::fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Consumer of [`ProgressEvent`]s.
///
/// Implementations must not block for long periods; the driver calls
/// [`ProgressSink::notify`] synchronously between stages.
pub trait ProgressSink: Send + Sync {
    /// Receives one progress event.
    fn notify(&self, event: ProgressEvent);
}

/// Sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn notify(&self, _event: ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(ProgressEvent::TitleStarted.to_string(), "Generating title");
        assert_eq!(ProgressEvent::Completed.label(), "Blog post complete");
    }

    #[test]
    fn null_sink_accepts_events() {
        NullSink.notify(ProgressEvent::ReviewStarted);
    }
}

//! Run-scoped pipeline state.
//!
//! [`BlogState`] is the single entity threaded through every stage of a run.
//! It is created fresh with only the topic populated, mutated in place by each
//! stage in fixed order, and discarded when the run ends. No two runs ever
//! share a state instance, so no locking discipline is required.

use serde::{Deserialize, Serialize};

use crate::identifiers::Topic;

// ---------------------------------------------------------------------------
// Append-only sequences
// ---------------------------------------------------------------------------

/// An ordered, append-only sequence.
///
/// The only mutation is [`AppendLog::push`]; existing elements are never
/// replaced or removed. Stages read the *last* element, never by arbitrary
/// index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendLog<T>(Vec<T>);

impl<T> AppendLog<T> {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an element to the end of the log.
    pub fn push(&mut self, value: T) {
        self.0.push(value);
    }

    /// Returns the most recently appended element, if any.
    pub fn last(&self) -> Option<&T> {
        self.0.last()
    }

    /// Returns the number of elements appended so far.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the elements in append order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// Blog state
// ---------------------------------------------------------------------------

/// Mutable record threaded through every stage of one pipeline run.
///
/// At run completion: `title` is set, `drafts` holds exactly two entries
/// (first draft, then the revision), and `review_notes` holds exactly one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogState {
    topic: Topic,
    title: Option<String>,
    drafts: AppendLog<String>,
    review_notes: AppendLog<String>,
}

impl BlogState {
    /// Creates a fresh state for a run about `topic`.
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            title: None,
            drafts: AppendLog::new(),
            review_notes: AppendLog::new(),
        }
    }

    /// The topic this run generates a post about. Immutable after creation.
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    /// The generated title, once the title stage has run.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Records the generated title. Called exactly once, by the title stage.
    pub fn set_title(&mut self, title: impl Into<String>) {
        debug_assert!(self.title.is_none(), "title is set exactly once per run");
        self.title = Some(title.into());
    }

    /// All drafts produced so far, in generation order.
    pub fn drafts(&self) -> &AppendLog<String> {
        &self.drafts
    }

    /// Appends a newly generated draft. The prior draft is kept.
    pub fn push_draft(&mut self, draft: impl Into<String>) {
        self.drafts.push(draft.into());
    }

    /// The most current draft — the final post once the revision stage has run.
    pub fn latest_draft(&self) -> Option<&str> {
        self.drafts.last().map(String::as_str)
    }

    /// All review notes produced so far, in generation order.
    pub fn review_notes(&self) -> &AppendLog<String> {
        &self.review_notes
    }

    /// Appends critique text produced by the review stage.
    pub fn push_review_note(&mut self, note: impl Into<String>) {
        self.review_notes.push(note.into());
    }

    /// The most recent critique, consumed by the revision stage.
    pub fn latest_review_note(&self) -> Option<&str> {
        self.review_notes.last().map(String::as_str)
    }

    /// Number of review cycles completed in this run.
    pub fn review_cycles(&self) -> usize {
        self.review_notes.len()
    }
}

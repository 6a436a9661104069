//! Core generation domain for Blogsmith.
//!
//! This crate contains every domain concept, newtype identifier, shared primitive
//! type, and cross-cutting error type used throughout the pipeline. Infrastructure
//! crates implement the traits defined here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype domain identifiers (`PipelineRunId`, `NodeId`, etc.) |
//! | [`types`] | Shared value types (`TokenCount`, `TokenUsage`, `Timestamp`) |
//! | [`state`] | [`state::BlogState`] and the append-only draft/review logs |
//! | [`errors`] | Top-level pipeline error type |
//! | [`provider`] | The [`provider::LlmProvider`] port and its request/response types |
//! | [`events`] | Progress events consumed by an optional presentation sink |

pub mod errors;
pub mod events;
pub mod identifiers;
pub mod provider;
pub mod state;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::PipelineError;
pub use events::{NullSink, ProgressEvent, ProgressSink};
pub use identifiers::{ModelId, NodeId, PipelineRunId, Topic};
pub use provider::{
    ApiKey, Completion, CompletionRequest, LlmError, LlmProvider, DEFAULT_MAX_TOKENS,
};
pub use state::{AppendLog, BlogState};
pub use types::{Timestamp, TokenCount, TokenUsage};

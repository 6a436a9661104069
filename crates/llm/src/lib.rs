//! Blogsmith generation-provider infrastructure adapter.
//!
//! Implements the [`pipeline::LlmProvider`] trait for Groq's OpenAI-compatible
//! chat-completions API. Additional providers are added as new modules in this
//! crate without any changes to the `pipeline` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** All HTTP transport, request formatting, response
//! parsing, and error classification live here. The [`pipeline`] crate sees
//! only [`pipeline::LlmProvider`].

mod groq;

pub use groq::{GroqProvider, DEFAULT_MODEL};

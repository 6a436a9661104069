//! Blogsmith CLI entry point.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Parse arguments** — topic, credential, and generation settings; the
//!    empty-topic / missing-key boundary is enforced here, before the
//!    pipeline starts.
//! 2. **Wire observability** — configure `tracing-subscriber` with an env
//!    filter, writing to stderr so artifact output stays pipeable.
//! 3. **Construct infrastructure** — create the `GroqProvider` and the
//!    console progress sink and inject them into `PipelineExecutor`.
//! 4. **Run and render** — execute one run and print the title, final post,
//!    and review notes.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use llm::{GroqProvider, DEFAULT_MODEL};
use nodes::{stage_chain, PipelineExecutor, RunConfig};
use pipeline::{
    ApiKey, BlogState, ModelId, PipelineError, ProgressEvent, ProgressSink, Topic,
};

#[derive(Parser)]
#[command(name = "blogsmith")]
#[command(about = "Generate a reviewed and revised blog post about a topic", long_about = None)]
#[command(version)]
struct Cli {
    /// Blog topic to write about (e.g. "Generative AI in Healthcare")
    topic: Option<String>,

    /// Groq API key; falls back to the GROQ_API_KEY environment variable
    #[arg(long)]
    api_key: Option<String>,

    /// Model generation calls are routed to
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Completion token cap per stage call
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Sampling temperature (service default when omitted)
    #[arg(long)]
    temperature: Option<f32>,

    /// Print the fixed stage chain and exit
    #[arg(long)]
    show_pipeline: bool,
}

/// Prints one status line per progress event.
struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn notify(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::Completed => println!("{}", event.label().green().bold()),
            _ => println!("{}...", event.label().cyan()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if cli.show_pipeline {
        print_stage_chain();
        return Ok(());
    }

    let topic = cli
        .topic
        .and_then(|t| Topic::new(t))
        .ok_or(PipelineError::missing_input("topic"))?;
    let api_key = cli
        .api_key
        .or_else(|| std::env::var("GROQ_API_KEY").ok())
        .and_then(|k| ApiKey::new(k))
        .ok_or(PipelineError::missing_input("api key"))?;
    let model = ModelId::new(cli.model).ok_or(PipelineError::missing_input("model"))?;

    let mut config = RunConfig::new(api_key, model);
    if let Some(max_tokens) = cli.max_tokens {
        config = config.with_max_tokens(max_tokens);
    }
    if let Some(temperature) = cli.temperature {
        config = config.with_temperature(temperature);
    }

    let executor = PipelineExecutor::new(Arc::new(GroqProvider::new()))
        .with_progress_sink(Arc::new(ConsoleSink));

    let state = executor
        .run(topic, &config)
        .await
        .context("blog generation failed")?;
    render(&state);
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn print_stage_chain() {
    println!("{}", "Stage chain".bold());
    for (position, node) in stage_chain().iter().enumerate() {
        println!("  {}. {node}", position + 1);
    }
}

fn render(state: &BlogState) {
    section("Generated Title");
    println!("{}", state.title().unwrap_or_default());

    section("Final Blog Post");
    println!("{}", state.latest_draft().unwrap_or_default());

    section("Quality Assurance Report");
    println!("{}", state.latest_review_note().unwrap_or_default());

    println!();
    println!("{} {}", "Topic:".bold(), state.topic());
    println!("{} {}", "Review cycles:".bold(), state.review_cycles());
}

fn section(header: &str) {
    println!();
    println!("{}", "---".dimmed());
    println!("{}", header.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}

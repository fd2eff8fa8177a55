//! Command-line interface definition.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use super::constants::{
    BATCH_SIZE, DEFAULT_MODEL_ID, DEFAULT_SYSTEM_PROMPT_PATH, DEFAULT_TEST_REQUESTS,
    GITHUB_MODELS_ENDPOINT, MAX_CONCURRENT_REQUESTS, RATE_LIMIT_BACKOFF, REQUESTS_PER_MINUTE,
};
use super::types::{AgentSettings, LogFormat, LogLevel, SchedulerConfig};

/// Command-line options.
///
/// Credentials and limits can also come from the environment (or a `.env`
/// file loaded at startup); explicit flags take precedence.
///
/// # Examples
///
/// ```bash
/// # Interactive roadmap chat
/// roadmap_agent
///
/// # Load test the chat API with 20 requests
/// roadmap_agent test --requests 20
///
/// # Render a saved roadmap
/// roadmap_agent render roadmap.json --output roadmap.md
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "roadmap_agent",
    version,
    about = "Builds learning roadmaps with a chat model and load tests the chat API."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// GitHub token used as the chat API credential
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, default_value = "", global = true)]
    pub github_token: String,

    /// Chat model identifier
    #[arg(long, env = "MODEL_ID", default_value = DEFAULT_MODEL_ID, global = true)]
    pub model_id: String,

    /// OpenAI-compatible inference endpoint
    #[arg(long, env = "GITHUB_MODELS_ENDPOINT", default_value = GITHUB_MODELS_ENDPOINT, global = true)]
    pub endpoint: String,

    /// Serper.dev API key for web search
    #[arg(long, env = "SERPER_API_KEY", hide_env_values = true, global = true)]
    pub serper_api_key: Option<String>,

    /// System prompt file for the roadmap agent
    #[arg(long, value_parser, default_value = DEFAULT_SYSTEM_PROMPT_PATH, global = true)]
    pub system_prompt: PathBuf,

    /// Maximum chat requests in flight during a load test
    #[arg(long, env = "MAX_CONCURRENT_REQUESTS", default_value_t = MAX_CONCURRENT_REQUESTS, global = true)]
    pub max_concurrency: usize,

    /// Requests allowed to start in any 60 second window
    #[arg(long, env = "REQUESTS_PER_MINUTE", default_value_t = REQUESTS_PER_MINUTE, global = true)]
    pub requests_per_minute: usize,

    /// Requests dispatched together per batch
    #[arg(long, env = "BATCH_SIZE", default_value_t = BATCH_SIZE, global = true)]
    pub batch_size: usize,

    /// Seconds to wait before retrying a rate-limited request
    #[arg(long, default_value_t = RATE_LIMIT_BACKOFF.as_secs(), global = true)]
    pub retry_backoff_secs: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Chat with the roadmap agent (default)
    Chat,

    /// Run a rate-limited batch load test against the chat API
    Test {
        /// Number of requests to send
        #[arg(long, short = 'n', default_value_t = DEFAULT_TEST_REQUESTS)]
        requests: usize,
    },

    /// Search the web and print the top result
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Find a verified URL for a learning resource
    ResourceUrl {
        #[arg(long)]
        title: String,
        /// Platform hosting the resource, e.g. "YouTube" or "Coursera"
        #[arg(long)]
        platform: String,
        #[arg(long)]
        topic: String,
    },

    /// Check that a URL answers a HEAD request
    ValidateUrl { url: String },

    /// Render a roadmap JSON file as Markdown or normalized JSON
    Render {
        #[arg(value_parser)]
        input: PathBuf,

        #[arg(long, value_enum, default_value_t = RenderFormat::Markdown)]
        format: RenderFormat,

        /// Write to this file instead of stdout
        #[arg(long, value_parser)]
        output: Option<PathBuf>,
    },
}

/// Output format of the `render` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    Markdown,
    Json,
}

impl Cli {
    pub fn agent_settings(&self) -> AgentSettings {
        AgentSettings {
            github_token: self.github_token.clone(),
            model_id: self.model_id.clone(),
            endpoint: self.endpoint.clone(),
            serper_api_key: self.serper_api_key.clone(),
        }
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            max_concurrency: self.max_concurrency,
            requests_per_minute: self.requests_per_minute,
            batch_size: self.batch_size,
            retry_backoff: Duration::from_secs(self.retry_backoff_secs),
            ..SchedulerConfig::default()
        }
    }
}

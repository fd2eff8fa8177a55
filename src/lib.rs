//! roadmap_agent library: a learning-roadmap chat agent and a rate-limited
//! batch load tester for its chat API.
//!
//! The core is the batch scheduler in [`scheduler`]: it fans out independent
//! chat requests under a concurrency ceiling and a per-minute quota, retries
//! rate-limited requests once, and summarizes every outcome.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use roadmap_agent::{run_load_test, ChatClient, SchedulerConfig, SilentReporter};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let http = roadmap_agent::initialization::init_client(std::time::Duration::from_secs(120))?;
//! let client = ChatClient::new(http, "https://models.github.ai/inference", "ghp_token", "gpt-4o");
//!
//! let summary = run_load_test(
//!     Arc::new(client),
//!     10,
//!     &SchedulerConfig::default(),
//!     Arc::new(SilentReporter),
//! )
//! .await?;
//! println!(
//!     "{} of {} succeeded ({:.1}%)",
//!     summary.succeeded, summary.total, summary.success_rate
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod agent;
pub mod app;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod roadmap;
pub mod scheduler;
pub mod search;
pub mod upstream;

// Re-export public API
pub use agent::{AgentThread, RoadmapAgent};
pub use config::{AgentSettings, Cli, Command, LogFormat, LogLevel, SchedulerConfig};
pub use error_handling::{classify_failure, ConfigError, OutcomeKind, UpstreamError};
pub use scheduler::{
    run_load_test, BatchScheduler, ConsoleReporter, RequestId, RequestOutcome, RunReporter,
    RunSummary, SilentReporter,
};
pub use search::{SearchClient, SearchTools};
pub use upstream::{ChatClient, ChatMessage, CompletionClient};

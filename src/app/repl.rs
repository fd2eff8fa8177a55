//! Interactive chat loop.

use std::io::Write;
use std::sync::Arc;

use colored::*;
use log::{error, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio_util::sync::CancellationToken;

use super::load_test::run_console_load_test;
use crate::agent::RoadmapAgent;
use crate::config::{SchedulerConfig, DEFAULT_TEST_REQUESTS};
use crate::search::SearchTools;
use crate::upstream::CompletionClient;

/// One line of REPL input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Run a load test (the count is asked for separately)
    Test,
    /// Start a fresh conversation thread
    NewThread,
    Search(String),
    Help,
    Exit,
    /// Anything else is sent to the agent
    Message(String),
    Empty,
}

pub fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head.to_lowercase().as_str() {
        "/test" => ReplCommand::Test,
        "/new" => ReplCommand::NewThread,
        "/search" => ReplCommand::Search(rest.to_string()),
        "/help" => ReplCommand::Help,
        "/exit" | "/quit" => ReplCommand::Exit,
        _ => ReplCommand::Message(line.to_string()),
    }
}

/// Parses the answer to the request count prompt. Blank, unparseable or zero
/// input falls back to the default.
pub fn parse_request_count(input: &str) -> usize {
    match input.trim().parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => DEFAULT_TEST_REQUESTS,
    }
}

const HELP: &str = "\
  /test            run a batch load test against the chat API
  /new             start a new conversation
  /search <query>  search the web
  /help            show this help
  /exit, /quit     leave";

/// Everything the chat loop needs.
pub struct ChatSession {
    pub agent: RoadmapAgent,
    /// Client used by `/test`
    pub client: Arc<dyn CompletionClient>,
    pub scheduler: SchedulerConfig,
    /// `None` when no search key is configured
    pub tools: Option<SearchTools>,
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}

/// Runs the chat loop until `/exit`, end of input or cancellation.
///
/// # Errors
///
/// Returns an error only if reading input fails. Chat and search failures are
/// reported and the loop continues.
pub async fn run_repl<R>(
    session: &ChatSession,
    input: &mut Lines<R>,
    cancel: &CancellationToken,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    println!("{}", format!("🗺️  {} ({})", session.agent.name(), session.agent.model()).bold());
    println!("Type /help for commands.");
    let mut thread = session.agent.new_thread();

    loop {
        prompt("\nYou: ");
        let line = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            line = input.next_line() => line?,
        };
        let Some(line) = line else { break };

        match parse_command(&line) {
            ReplCommand::Empty => continue,
            ReplCommand::Exit => break,
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::NewThread => {
                thread = session.agent.new_thread();
                println!("{}", "Started a new conversation.".dimmed());
            }
            ReplCommand::Search(query) => search(session, &query).await,
            ReplCommand::Test => {
                prompt(&format!("Number of requests [{}]: ", DEFAULT_TEST_REQUESTS));
                let answer = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    answer = input.next_line() => answer?.unwrap_or_default(),
                };
                let total = parse_request_count(&answer);
                if let Err(e) = run_console_load_test(
                    Arc::clone(&session.client),
                    session.agent.model(),
                    total,
                    &session.scheduler,
                    cancel,
                )
                .await
                {
                    error!("Load test not started: {}", e);
                }
            }
            ReplCommand::Message(text) => match session.agent.run(&text, &mut thread).await {
                Ok(reply) => println!("\n{} {}", "Agent:".cyan().bold(), reply),
                Err(e) => {
                    error!("Chat request failed: {}", e);
                    println!("{}", format!("Error: {}", e).red());
                }
            },
        }
    }

    info!("Chat session ended");
    Ok(())
}

async fn search(session: &ChatSession, query: &str) {
    if query.is_empty() {
        println!("Usage: /search <query>");
        return;
    }
    match &session.tools {
        Some(tools) => {
            let result = tools.web_search(query).await;
            println!(
                "{}",
                serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string())
            );
        }
        None => println!("{}", "Web search is unavailable: SERPER_API_KEY is not set.".yellow()),
    }
}

//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `roadmap_agent` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Dispatching subcommands and user-facing output
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};

use roadmap_agent::app::{cancel_on_ctrl_c, run_console_load_test, run_repl, ChatSession};
use roadmap_agent::config::{RenderFormat, CHAT_TIMEOUT_SECS, SEARCH_MAX_RESULTS};
use roadmap_agent::initialization::{
    init_chat_client, init_client, init_logger_with, init_validation_client,
};
use roadmap_agent::roadmap::{json, markdown};
use roadmap_agent::search::validate_url;
use roadmap_agent::{AgentSettings, Cli, Command, RoadmapAgent, SearchClient, SearchTools};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try the current directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    let log_level = cli.log_level.clone();
    let log_format = cli.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if let Err(e) = run(cli).await {
        eprintln!("roadmap_agent error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let settings = cli.agent_settings();
    let scheduler = cli.scheduler_config();
    let http = init_client(Duration::from_secs(CHAT_TIMEOUT_SECS))
        .context("Failed to initialize HTTP client")?;

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => {
            let chat = init_chat_client(&settings, http.clone())?;
            let agent = RoadmapAgent::from_prompt_file(chat.clone(), &cli.system_prompt)?;
            let tools = search_tools(&settings, &http)?;
            if tools.is_none() {
                info!("SERPER_API_KEY not set, web search disabled");
            }
            let session = ChatSession {
                agent,
                client: Arc::new(chat),
                scheduler,
                tools,
            };

            let cancel = cancel_on_ctrl_c();
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            run_repl(&session, &mut lines, &cancel)
                .await
                .context("Failed to read input")?;
        }
        Command::Test { requests } => {
            let chat = init_chat_client(&settings, http)?;
            let model = chat.model().to_string();
            let cancel = cancel_on_ctrl_c();
            let summary =
                run_console_load_test(Arc::new(chat), &model, requests, &scheduler, &cancel)
                    .await?;
            if summary.is_none() {
                println!("Load test cancelled.");
            }
        }
        Command::Search { query } => {
            let client = SearchClient::new(http, settings.require_serper_key()?);
            let query = query.join(" ");
            match client.search(&query, SEARCH_MAX_RESULTS).await? {
                Some(hit) => {
                    println!("{}", hit.title);
                    println!("{}", hit.url);
                    if !hit.description.is_empty() {
                        println!("{}", hit.description);
                    }
                }
                None => println!("No results found for {:?}", query),
            }
        }
        Command::ResourceUrl {
            title,
            platform,
            topic,
        } => {
            let client = SearchClient::new(http, settings.require_serper_key()?);
            match client.search_resource_url(&title, &platform, &topic).await? {
                Some(url) => println!("{}", url),
                None => println!("No verified URL found for '{}' on {}", title, platform),
            }
        }
        Command::ValidateUrl { url } => {
            let validator = init_validation_client()?;
            let check = validate_url(&validator, &url).await;
            println!("{}", serde_json::to_string_pretty(&check)?);
        }
        Command::Render {
            input,
            format,
            output,
        } => {
            let roadmap = json::load_from_file(&input)
                .await
                .with_context(|| format!("Failed to load roadmap from {}", input.display()))?;
            match (format, output) {
                (RenderFormat::Markdown, Some(path)) => {
                    markdown::save_to_file(&roadmap, &path).await?;
                    println!("Roadmap saved to {}", path.display());
                }
                (RenderFormat::Json, Some(path)) => {
                    json::save_to_file(&roadmap, &path).await?;
                    println!("Roadmap saved to {}", path.display());
                }
                (RenderFormat::Markdown, None) => print!("{}", markdown::format_roadmap(&roadmap)),
                (RenderFormat::Json, None) => println!("{}", json::to_json(&roadmap)?),
            }
        }
    }

    Ok(())
}

fn search_tools(settings: &AgentSettings, http: &reqwest::Client) -> Result<Option<SearchTools>> {
    let Ok(key) = settings.require_serper_key() else {
        return Ok(None);
    };
    let client = SearchClient::new(http.clone(), key);
    Ok(Some(SearchTools::new(client, init_validation_client()?)))
}

//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON)
//! - HTTP clients for the chat API, web search and URL validation
//! - The upstream chat client built from `AgentSettings`

mod client;
mod logger;

// Re-export public API
pub use client::{init_chat_client, init_client, init_validation_client};
pub use logger::init_logger_with;

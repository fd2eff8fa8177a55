//! Configuration types and constants.
//!
//! This module provides:
//! - Default limits and endpoints (`constants`)
//! - Settings structs consumed by the library (`SchedulerConfig`, `AgentSettings`)
//! - The command-line interface (`Cli`)

mod cli;
mod constants;
mod types;

// Re-export public API
pub use cli::{Cli, Command, RenderFormat};
pub use constants::*;
pub use types::{AgentSettings, LogFormat, LogLevel, SchedulerConfig};

//! Web search for learning resources.
//!
//! `SearchClient` queries Serper.dev, `platforms` knows which domains belong to
//! which learning platform, and `SearchTools` wraps both into the JSON answers
//! the agent consumes.

mod client;
mod platforms;
mod tools;

pub use client::{validate_url, SearchClient, SearchResult, UrlCheck};
pub use platforms::{is_valid_platform_url, platform_domains, site_filter};
pub use tools::SearchTools;

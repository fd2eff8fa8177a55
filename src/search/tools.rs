//! JSON payloads returned to the agent by the search tools.

use log::warn;
use serde_json::{json, Value};

use super::client::{validate_url, SearchClient};
use crate::config::SEARCH_MAX_RESULTS;

/// Search, resource lookup and URL validation, each answering with a JSON
/// object the model can read back.
#[derive(Debug, Clone)]
pub struct SearchTools {
    search: SearchClient,
    validator: reqwest::Client,
}

impl SearchTools {
    pub fn new(search: SearchClient, validator: reqwest::Client) -> Self {
        SearchTools { search, validator }
    }

    /// Looks up a verified URL for a resource.
    ///
    /// `success: false` tells the model to drop the resource and pick another.
    pub async fn search_resource_url(&self, title: &str, platform: &str, topic: &str) -> Value {
        let found = match self.search.search_resource_url(title, platform, topic).await {
            Ok(found) => found,
            Err(e) => {
                warn!("Resource lookup for {:?} failed: {}", title, e);
                None
            }
        };

        match found {
            Some(url) => json!({
                "success": true,
                "url": url,
                "resourceTitle": title,
                "platform": platform,
                "message": "URL verified. You can include this resource in the roadmap.",
            }),
            None => json!({
                "success": false,
                "message": format!(
                    "Could not find a verified URL for '{}' on {}. DO NOT include this resource in the roadmap. Try searching for a different resource instead.",
                    title, platform
                ),
                "resourceTitle": title,
                "platform": platform,
            }),
        }
    }

    pub async fn web_search(&self, query: &str) -> Value {
        match self.search.search(query, SEARCH_MAX_RESULTS).await {
            Ok(Some(hit)) => json!({
                "success": true,
                "title": hit.title,
                "url": hit.url,
                "description": hit.description,
            }),
            Ok(None) => json!({
                "success": false,
                "message": "No results found for the query",
            }),
            Err(e) => {
                warn!("Web search for {:?} failed: {}", query, e);
                json!({
                    "success": false,
                    "message": "No results found for the query",
                })
            }
        }
    }

    pub async fn validate_url(&self, url: &str) -> Value {
        let check = validate_url(&self.validator, url).await;
        serde_json::to_value(&check).unwrap_or_else(|_| json!({ "valid": false, "url": url }))
    }
}

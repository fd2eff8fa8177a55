//! Serper.dev (Google Search) client.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use url::Url;

use super::platforms::{is_valid_platform_url, site_filter};
use crate::config::{SEARCH_MAX_RESULTS, SERPER_API_URL};
use crate::error_handling::SearchError;

/// Top organic result of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

/// Web search backed by the Serper.dev API.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl SearchClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        SearchClient {
            http,
            api_key: api_key.into(),
            api_url: SERPER_API_URL.to_string(),
        }
    }

    /// Points the client at a different search endpoint.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Runs a search and returns its first organic result, if any.
    ///
    /// # Errors
    ///
    /// - `SearchError::Transport` if the request fails or the body does not decode
    /// - `SearchError::Status` for non-success HTTP statuses
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Option<SearchResult>, SearchError> {
        debug!("Searching for {:?}", query);
        let response = self
            .http
            .post(&self.api_url)
            .header("X-API-KEY", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&SearchRequest {
                q: query,
                num: max_results,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Search API returned {} for {:?}", status, query);
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed.organic.into_iter().next().map(|hit| SearchResult {
            title: hit.title.unwrap_or_default(),
            url: hit.link.unwrap_or_default(),
            description: hit.snippet.unwrap_or_default(),
        }))
    }

    /// Finds a URL for a learning resource hosted on `platform`.
    ///
    /// Tries `"{title} {topic}"` first, then a looser query with the title
    /// alone. Known platforms are restricted with a `site:` filter and the
    /// returned URL must belong to one of the platform's domains. A failed
    /// query is logged and the next one is still tried.
    ///
    /// # Errors
    ///
    /// Returns the last `SearchError` only when every query failed. Otherwise
    /// `Ok(None)` means no query yielded an acceptable URL.
    pub async fn search_resource_url(
        &self,
        title: &str,
        platform: &str,
        topic: &str,
    ) -> Result<Option<String>, SearchError> {
        let filter = site_filter(platform);
        let queries = match filter {
            Some(site) => [
                format!("{} {} site:{}", title, topic, site),
                format!("{} site:{}", title, site),
            ],
            None => [
                format!("{} {}", title, topic),
                format!("{} {}", title, platform),
            ],
        };

        let mut last_error = None;
        let mut answered = false;
        for query in &queries {
            let hit = match self.search(query, SEARCH_MAX_RESULTS).await {
                Ok(hit) => hit,
                Err(e) => {
                    warn!("Resource search {:?} failed: {}", query, e);
                    last_error = Some(e);
                    continue;
                }
            };
            answered = true;
            if let Some(hit) = hit {
                if is_valid_platform_url(&hit.url, platform) {
                    return Ok(Some(hit.url));
                }
                debug!("Discarding {} (not on {})", hit.url, platform);
            }
        }

        match last_error {
            Some(e) if !answered => Err(e),
            _ => Ok(None),
        }
    }
}

/// Result of a HEAD check against a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlCheck {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Checks that `url` answers a HEAD request with a success status.
///
/// Never fails; malformed URLs and transport errors are reported in
/// `UrlCheck::error`. Only http and https URLs are requested. The timeout is
/// whatever `http` was built with.
pub async fn validate_url(http: &reqwest::Client, url: &str) -> UrlCheck {
    let rejected = |error: String| UrlCheck {
        valid: false,
        status_code: None,
        url: url.to_string(),
        error: Some(error),
    };

    let parsed = match Url::parse(url.trim()) {
        Ok(parsed) => parsed,
        Err(e) => return rejected(format!("Invalid URL: {}", e)),
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return rejected(format!("Unsupported URL scheme: {}", parsed.scheme()));
    }

    match http.head(parsed).send().await {
        Ok(response) => UrlCheck {
            valid: response.status().is_success(),
            status_code: Some(response.status().as_u16()),
            url: url.to_string(),
            error: None,
        },
        Err(e) => {
            debug!("HEAD {} failed: {}", url, e);
            rejected(e.to_string())
        }
    }
}

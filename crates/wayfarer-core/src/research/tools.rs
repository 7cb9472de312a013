//! External tools available to the research agent.
//!
//! Tools follow a free-text contract: the agent hands them a query string
//! and gets a text observation back. Two tools are provided:
//!
//! * [`DuckDuckGoSearch`] — scrapes the DuckDuckGo HTML search page
//!   (no API key needed) and returns titles, URLs, and snippets.
//! * [`WikipediaLookup`] — queries the MediaWiki search API and returns
//!   plain-text intro extracts of the top matching pages.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use scraper::{Html, Selector};
use thiserror::Error;

use crate::config::ResearchConfig;

/// Errors that can occur while executing a tool.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Tool request failed with HTTP {0}")]
    Http(u16),

    #[error("Failed to parse tool response: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for ToolError {
    fn from(err: reqwest::Error) -> Self {
        ToolError::Network(err.to_string())
    }
}

/// A free-text tool the research agent can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, as the agent must spell it in its action lines.
    fn name(&self) -> &str;

    /// One-line description rendered into the agent instructions.
    fn description(&self) -> &str;

    /// Execute the tool with a free-text input and return a text observation.
    async fn call(&self, input: &str) -> Result<String, ToolError>;
}

fn build_client(config: &ResearchConfig) -> Result<reqwest::Client, ToolError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.tool_timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| ToolError::Client(e.to_string()))
}

/// Web search via the DuckDuckGo HTML endpoint.
pub struct DuckDuckGoSearch {
    client: reqwest::Client,
    max_results: usize,
}

impl DuckDuckGoSearch {
    /// Creates a search tool using the research configuration.
    pub fn new(config: &ResearchConfig) -> Result<Self, ToolError> {
        Ok(Self {
            client: build_client(config)?,
            max_results: config.search_results,
        })
    }
}

#[async_trait]
impl Tool for DuckDuckGoSearch {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for current information such as events, schedules, and prices. Input: a search query. Returns result titles, URLs, and snippets."
    }

    async fn call(&self, input: &str) -> Result<String, ToolError> {
        let url = format!(
            "https://html.duckduckgo.com/html/?q={}",
            urlencoding::encode(input)
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Http(status.as_u16()));
        }

        let body = response.text().await?;
        let results = parse_search_results(&body, self.max_results);

        if results.is_empty() {
            Ok(format!("No search results found for: {}", input))
        } else {
            Ok(results.join("\n\n"))
        }
    }
}

/// Extract result titles, destination URLs, and snippets from the
/// DuckDuckGo HTML search page.
///
/// `scraper::Html` is !Send, so parsing stays in a synchronous helper
/// that never lives across an await point.
fn parse_search_results(html: &str, max_results: usize) -> Vec<String> {
    let doc = Html::parse_document(html);

    let result_sel = Selector::parse(".result").expect("static selector");
    let link_sel = Selector::parse("a.result__a").expect("static selector");
    let snippet_sel =
        Selector::parse("a.result__snippet, .result__snippet").expect("static selector");

    let mut results = Vec::new();
    for result in doc.select(&result_sel).take(max_results) {
        let title = result
            .select(&link_sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default();
        let title = title.trim();

        let href = result
            .select(&link_sel)
            .next()
            .and_then(|el| el.value().attr("href"))
            .unwrap_or("");
        let url = extract_redirect_url(href);

        let snippet = result
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default();
        let snippet = snippet.trim();

        if !title.is_empty() {
            results.push(format!("{title}\n  {url}\n  {snippet}"));
        }
    }

    results
}

/// DuckDuckGo wraps result URLs in redirect links like
/// `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`.
/// Extract and percent-decode the actual destination URL.
fn extract_redirect_url(href: &str) -> String {
    if let Some(pos) = href.find("uddg=") {
        let start = pos + 5;
        let end = href[start..]
            .find('&')
            .map(|i| start + i)
            .unwrap_or(href.len());
        let encoded = &href[start..end];
        if !encoded.is_empty() {
            return percent_decode_str(encoded)
                .decode_utf8_lossy()
                .into_owned();
        }
    }
    href.to_string()
}

/// Encyclopedic lookup via the MediaWiki API.
pub struct WikipediaLookup {
    client: reqwest::Client,
    max_pages: usize,
}

impl WikipediaLookup {
    const API_URL: &'static str = "https://en.wikipedia.org/w/api.php";

    /// Creates a lookup tool using the research configuration.
    pub fn new(config: &ResearchConfig) -> Result<Self, ToolError> {
        Ok(Self {
            client: build_client(config)?,
            max_pages: config.lookup_results,
        })
    }

    /// Find page titles matching the query.
    async fn search_titles(&self, query: &str) -> Result<Vec<String>, ToolError> {
        let limit = self.max_pages.to_string();
        let response = self
            .client
            .get(Self::API_URL)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", limit.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Http(status.as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ToolError::ParseError(e.to_string()))?;

        let titles = json["query"]["search"]
            .as_array()
            .map(|hits| {
                hits.iter()
                    .filter_map(|hit| hit["title"].as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(titles)
    }

    /// Fetch the plain-text intro extract of a page.
    async fn fetch_extract(&self, title: &str) -> Result<Option<String>, ToolError> {
        let response = self
            .client
            .get(Self::API_URL)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("titles", title),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Http(status.as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ToolError::ParseError(e.to_string()))?;

        let extract = json["query"]["pages"]
            .as_object()
            .and_then(|pages| pages.values().next())
            .and_then(|page| page["extract"].as_str())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        Ok(extract)
    }
}

#[async_trait]
impl Tool for WikipediaLookup {
    fn name(&self) -> &str {
        "wikipedia"
    }

    fn description(&self) -> &str {
        "Look up background knowledge about places, attractions, and history on Wikipedia. Input: a topic. Returns plain-text summaries of the top matching pages."
    }

    async fn call(&self, input: &str) -> Result<String, ToolError> {
        let titles = self.search_titles(input).await?;

        if titles.is_empty() {
            return Ok(format!("No encyclopedia entries found for: {}", input));
        }

        let mut sections = Vec::new();
        for title in &titles {
            if let Some(extract) = self.fetch_extract(title).await? {
                sections.push(format!("{title}\n{extract}"));
            }
        }

        if sections.is_empty() {
            Ok(format!("No encyclopedia entries found for: {}", input))
        } else {
            Ok(sections.join("\n\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_redirect_url() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fvienna&rut=abc";
        assert_eq!(extract_redirect_url(href), "https://example.com/vienna");
    }

    #[test]
    fn test_extract_redirect_url_passthrough() {
        assert_eq!(
            extract_redirect_url("https://example.com/direct"),
            "https://example.com/direct"
        );
    }

    #[test]
    fn test_parse_search_results() {
        let html = r#"
            <div class="result">
              <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fvienna.info%2F">Vienna Tourist Board</a>
              <a class="result__snippet">Official travel guide for Vienna.</a>
            </div>
            <div class="result">
              <a class="result__a" href="https://example.com">Other</a>
              <a class="result__snippet">Snippet two.</a>
            </div>
        "#;
        let results = parse_search_results(html, 5);
        assert_eq!(results.len(), 2);
        assert!(results[0].contains("Vienna Tourist Board"));
        assert!(results[0].contains("https://vienna.info/"));
        assert!(results[0].contains("Official travel guide"));
    }

    #[test]
    fn test_parse_search_results_respects_limit() {
        let html = r##"
            <div class="result"><a class="result__a" href="#">One</a></div>
            <div class="result"><a class="result__a" href="#">Two</a></div>
            <div class="result"><a class="result__a" href="#">Three</a></div>
        "##;
        let results = parse_search_results(html, 2);
        assert_eq!(results.len(), 2);
    }
}

//! Source page fetching and text extraction.

use std::time::Duration;

use scraper::{Html, Selector};

use crate::config::IngestConfig;

use super::document::SourceDocument;
use super::error::RetrievalError;

/// Fetches a web page and extracts its readable text.
pub struct PageLoader {
    client: reqwest::Client,
}

impl PageLoader {
    /// Creates a loader from the ingestion configuration.
    pub fn new(config: &IngestConfig) -> Result<Self, RetrievalError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RetrievalError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetches the page and returns its extracted plain text.
    pub async fn load(&self, url: &str) -> Result<SourceDocument, RetrievalError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Fetch(format!("HTTP {status} from {url}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response.text().await?;

        let text = if content_type.contains("text/html") || looks_like_html(&body) {
            html_to_text(&body)
        } else {
            body
        };

        Ok(SourceDocument::new(url, text))
    }
}

fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    head.starts_with("<!DOCTYPE") || head.starts_with("<!doctype") || head.starts_with("<html")
}

/// Parse HTML and extract readable body text.
///
/// Strategy:
/// 1. Try `<article>` or `<main>` for the content region.
/// 2. Fall back to `<body>` with noisy subtrees (`<script>`, `<style>`,
///    `<nav>`, `<header>`, `<footer>`, ...) skipped.
/// 3. Collapse whitespace runs.
pub(crate) fn html_to_text(html: &str) -> String {
    let doc = Html::parse_document(html);

    let content_selectors = ["article", "main", "[role=\"main\"]"];
    for sel_str in &content_selectors {
        if let Ok(sel) = Selector::parse(sel_str) {
            if let Some(el) = doc.select(&sel).next() {
                let text = extract_text(&el);
                if text.len() >= 100 {
                    return text;
                }
            }
        }
    }

    if let Ok(body_sel) = Selector::parse("body") {
        if let Some(body) = doc.select(&body_sel).next() {
            return extract_text(&body);
        }
    }

    let raw: String = doc.root_element().text().collect();
    collapse_whitespace(&raw)
}

/// Recursively extract text from an element, skipping noisy subtrees.
fn extract_text(el: &scraper::ElementRef<'_>) -> String {
    let skip_tags: &[&str] = &[
        "script", "style", "nav", "header", "footer", "noscript", "svg", "aside", "form",
        "iframe",
    ];
    let block_tags: &[&str] = &[
        "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "td", "th",
        "article", "section", "main", "blockquote", "pre",
    ];

    let mut buf = String::new();
    collect_text(el, &mut buf, skip_tags, block_tags);
    collapse_whitespace(&buf)
}

fn collect_text(
    node: &scraper::ElementRef<'_>,
    buf: &mut String,
    skip_tags: &[&str],
    block_tags: &[&str],
) {
    use scraper::Node;

    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                buf.push_str(text);
            }
            Node::Element(el) => {
                let tag = el.name();
                if skip_tags.contains(&tag) {
                    continue;
                }
                if block_tags.contains(&tag) {
                    buf.push('\n');
                }
                if let Some(child_ref) = scraper::ElementRef::wrap(child) {
                    collect_text(&child_ref, buf, skip_tags, block_tags);
                }
            }
            _ => {}
        }
    }
}

/// Collapse runs of whitespace into single spaces / newlines.
fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_space = true;
    let mut consecutive_newlines = 0u32;

    for ch in text.chars() {
        if ch == '\n' {
            consecutive_newlines += 1;
            if consecutive_newlines <= 2 {
                result.push('\n');
            }
            prev_was_space = true;
        } else if ch.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
            consecutive_newlines = 0;
        } else {
            result.push(ch);
            prev_was_space = false;
            consecutive_newlines = 0;
        }
    }

    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_extracts_body() {
        let html = "<html><body><p>Vienna is the capital of Austria.</p></body></html>";
        assert_eq!(html_to_text(html), "Vienna is the capital of Austria.");
    }

    #[test]
    fn test_html_to_text_skips_scripts_and_styles() {
        let html = r#"<html><body>
            <script>var x = 1;</script>
            <style>.a { color: red; }</style>
            <p>Visible text.</p>
        </body></html>"#;
        let text = html_to_text(html);
        assert!(text.contains("Visible text."));
        assert!(!text.contains("var x"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn test_html_to_text_prefers_article() {
        let filler = "Travel guide content. ".repeat(10);
        let html = format!(
            "<html><body><nav>Menu items</nav><article>{filler}</article></body></html>"
        );
        let text = html_to_text(&html);
        assert!(text.contains("Travel guide content."));
        assert!(!text.contains("Menu items"));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a   b\n\n\n\nc"), "a b\n\nc");
    }

    #[test]
    fn test_looks_like_html() {
        assert!(looks_like_html("<!DOCTYPE html><html></html>"));
        assert!(!looks_like_html("plain text content"));
    }
}

//! Plain-text rendering of search results for use as an observation.
//!
//! The only channel back to the model is text appended to the transcript, so results are
//! flattened into a compact block with a header, source counts and one section per hit.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use url::Url;

pub const DEFAULT_HEADER: &str = "\n-- Internet Search Results --";
pub const DEFAULT_MAX_ITEMS: usize = 3;
pub const DEFAULT_SNIPPET_CHARS: usize = 600;

const PLACEHOLDER: &str = "...";

/// A search result as returned by the search backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub raw_content: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
}

/// Formatting options for [`format_results`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub header: String,
    pub max_items: usize,
    pub snippet_chars: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            max_items: DEFAULT_MAX_ITEMS,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
        }
    }
}

/// Collapse whitespace and shorten `text` to at most `width` characters.
///
/// Words are dropped from the end until the rest plus `...` fits. A single word longer
/// than the budget is cut mid-word.
pub fn shorten(text: &str, width: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let collapsed = words.join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(PLACEHOLDER.len());
    let mut kept = String::new();
    for word in &words {
        let separator = usize::from(!kept.is_empty());
        if kept.chars().count() + separator + word.chars().count() > budget {
            break;
        }
        if separator == 1 {
            kept.push(' ');
        }
        kept.push_str(word);
    }

    // A first word longer than the budget is cut mid-word rather than dropped,
    // unlike textwrap-style shortening which would leave only the placeholder
    if kept.is_empty() {
        kept = collapsed.chars().take(budget).collect();
    }

    kept.push_str(PLACEHOLDER);
    kept
}

/// Network location of `url` (host plus explicit port), or the input when it has none.
pub fn domain(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match (parsed.host_str(), parsed.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            _ => url.to_string(),
        },
        Err(_) => url.to_string(),
    }
}

/// Normalize a publish date to `YYYY-MM-DD` when it is in a recognizable format.
fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Render search results into a single plain-text block.
pub fn format_results(results: &[SearchResult], options: &FormatOptions) -> String {
    let results = &results[..results.len().min(options.max_items)];
    if results.is_empty() {
        return format!("{}:\n\nNo search results found.", options.header);
    }

    let unique_domains: HashSet<String> =
        results.iter().filter_map(|r| non_empty(&r.url)).map(domain).collect();

    let mut lines = vec![
        format!("{}\n", options.header),
        format!("Websites searched: {}", unique_domains.len()),
        format!("Results returned: {}", results.len()),
        String::new(),
    ];

    for (i, result) in results.iter().enumerate() {
        let title = non_empty(&result.title).unwrap_or("(no title)");
        let url = non_empty(&result.url).unwrap_or("(no url)");
        let content = non_empty(&result.content).or(non_empty(&result.raw_content)).unwrap_or("");

        lines.push(format!("Result {}: {}", i + 1, title));
        if let Some(date) = non_empty(&result.published_date) {
            lines.push(format!("Date: {}", format_date(date)));
        }
        lines.push(format!("URL: {}", url));
        lines.push(format!("Content: {}", shorten(content, options.snippet_chars)));
        lines.push(String::new());
    }

    lines.join("\n").trim_end().to_string()
}

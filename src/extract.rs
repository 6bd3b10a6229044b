//! Pulls display fields out of raw capture text with plain pattern matching.
//!
//! Capture payloads are WARC records (headers, HTTP response headers, then the
//! page), so no attempt is made to parse them as a document. Only the first
//! `<title>` and the first `<body>` are looked at.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

pub const SNIPPET_CHARS: usize = 200;

// The title may not span a line break of any kind, `\r` included.
static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<title>([^\r\n\x{2028}\x{2029}]*?)</title>").expect("title pattern is valid")
});
static BODY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<body[^>]*>([\s\S]*?)</body>").expect("body pattern is valid")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

/// First `<title>` on a single line, trimmed. `None` if missing or blank.
pub fn extract_title(text: &str) -> Option<String> {
    let title = TITLE_RE.captures(text)?.get(1)?.as_str().trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

pub fn extract_snippet(text: &str) -> String {
    let Some(body) = BODY_RE.captures(text).and_then(|c| c.get(1)) else {
        return String::new();
    };
    let stripped = TAG_RE.replace_all(body.as_str(), "");
    stripped.chars().take(SNIPPET_CHARS).collect()
}

/// Host part of an absolute url, e.g. `https://www.example.com/a` -> `www.example.com`.
pub fn displayed_link(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(|h| h.to_string())
}

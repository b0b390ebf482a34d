//! `[url]` markup scanning and rendering.
//!
//! Two forms are recognized, case-insensitively:
//! - `[url=TARGET]label[/url]` (the target may be wrapped in `'` or `"`)
//! - `[url]TARGET[/url]`
//!
//! Anything without a literal `[/url]` closing tag is left alone.

use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::OnceLock;

/// Markup kind name checked against the allowed-markup list.
pub const LINK_KIND: &str = "url";

const LINK_PATTERN: &str = r#"(?i)\[url(?:=['"]?([^\]"']+)['"]?\]([^\[]+)|\]([^\[]+))\[/url\]"#;

fn link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(LINK_PATTERN).expect("link pattern is valid"))
}

/// One occurrence of link markup in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkMatch {
    /// The whole matched markup, exactly as written.
    pub full_text: String,
    pub url: String,
    /// Label of the attribute form; `None` for `[url]TARGET[/url]`.
    pub label: Option<String>,
}

impl LinkMatch {
    /// True when the link displays its own URL: no label, or a label equal to the URL.
    pub fn is_self_labelled(&self) -> bool {
        match &self.label {
            None => true,
            Some(label) => label == &self.url,
        }
    }

    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let full_text = caps.get(0)?.as_str().to_string();
        if let (Some(url), Some(label)) = (caps.get(1), caps.get(2)) {
            return Some(Self {
                full_text,
                url: url.as_str().to_string(),
                label: Some(label.as_str().to_string()),
            });
        }
        let url = caps.get(3)?.as_str().to_string();
        Some(Self {
            full_text,
            url,
            label: None,
        })
    }
}

/// Scans `text` for link markup, left to right.
///
/// The iterator borrows `text` and does not modify it; call again to restart.
pub fn scan(text: &str) -> impl Iterator<Item = LinkMatch> + '_ {
    link_regex()
        .captures_iter(text)
        .filter_map(|caps| LinkMatch::from_captures(&caps))
}

/// Renders the attribute form written back into rewritten text.
pub fn render_link(url: &str, title: &str) -> String {
    format!("[url='{}']{}[/url]", url, title)
}

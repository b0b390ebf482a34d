//! `<title>` extraction from raw HTML bytes.

use regex::bytes::Regex;
use std::sync::OnceLock;

// Byte-oriented (no Unicode mode) so titles in legacy charsets survive untouched.
const TITLE_PATTERN: &str = r"(?is-u)<title(?:\s[^>]*)?>(.*?)</title\s*>";

fn title_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TITLE_PATTERN).expect("title pattern is valid"))
}

/// Inner bytes of the first `<title>` element, or an empty slice if there is none.
pub fn html_title(body: &[u8]) -> &[u8] {
    title_regex()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_bytes())
        .unwrap_or_default()
}

//! Filename extraction from URL path.

use std::borrow::Cow;

/// Extracts the percent-decoded last path segment of a URL, used as the title
/// of non-HTML resources.
///
/// Falls back to the host when the path is empty or root, and to the raw
/// text after the last `/` when the URL cannot be parsed.
pub fn filename_from_url(url: &str) -> Option<String> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let segment = parsed
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last());
            match segment {
                Some(s) => Some(percent_decode(s).into_owned()),
                None => parsed.host_str().map(str::to_string),
            }
        }
        Err(_) => {
            let trimmed = url.trim_end_matches('/');
            let last = trimmed.rsplit('/').next()?;
            if last.is_empty() {
                None
            } else {
                Some(percent_decode(last).into_owned())
            }
        }
    }
    .filter(|s| !s.is_empty() && s != "." && s != "..")
}

/// Form-style percent-decode (`+` is a space), keeping malformed escapes as-is.
/// Invalid UTF-8 is replaced.
fn percent_decode(input: &str) -> Cow<'_, str> {
    if !input.contains(['%', '+']) {
        return Cow::Borrowed(input);
    }
    let mut out = Vec::with_capacity(input.len());
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(h), Some(l)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                out.push(h << 4 | l);
                i += 3;
                continue;
            }
        }
        out.push(if bytes[i] == b'+' { b' ' } else { bytes[i] });
        i += 1;
    }
    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

//! Parse HTTP response header lines collected by curl.

use std::collections::HashMap;

/// Parse collected header lines into a lowercased name -> value map.
///
/// curl reports the headers of every response in a redirect chain; only the
/// block after the last status line is kept. Repeated names keep the last value.
pub(crate) fn parse_headers(lines: &[String]) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            headers.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            headers.insert(name.to_ascii_lowercase(), value.trim().to_string());
        }
    }

    headers
}

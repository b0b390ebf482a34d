//! Blocking GET over libcurl.

use std::collections::HashMap;
use std::str;
use std::time::Duration;

use super::parse::parse_headers;
use super::{FetchError, FetchReply, Fetcher};

/// Transport limits applied to every fetch.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    /// Upper bound for the whole transfer, redirects included.
    pub timeout: Duration,
    pub max_redirects: u32,
    /// Body bytes kept; the remainder is read and dropped.
    pub max_body_bytes: usize,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(20),
            max_redirects: 5,
            max_body_bytes: 512 * 1024,
        }
    }
}

/// [`Fetcher`] backed by a fresh curl easy handle per request.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: CurlOptions,
}

impl CurlFetcher {
    pub fn new(opts: CurlOptions) -> Self {
        Self { opts }
    }
}

impl Fetcher for CurlFetcher {
    /// Performs a GET and returns status, headers of the final response, and the (capped) body.
    ///
    /// Follows redirects. Runs in the current thread.
    fn fetch(
        &self,
        url: &str,
        custom_headers: &HashMap<String, String>,
    ) -> Result<FetchReply, FetchError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        let cap = self.opts.max_body_bytes;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.opts.max_redirects)?;
        easy.connect_timeout(self.opts.connect_timeout)?;
        easy.timeout(self.opts.timeout)?;
        easy.accept_encoding("")?;

        let mut list = curl::easy::List::new();
        for (k, v) in custom_headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if !custom_headers.is_empty() {
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                let room = cap.saturating_sub(body.len());
                body.extend_from_slice(&data[..data.len().min(room)]);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Status(status));
        }

        tracing::debug!(url, status, bytes = body.len(), "fetched");

        Ok(FetchReply {
            status,
            headers: parse_headers(&header_lines),
            body,
        })
    }
}

//! HTTP fetch capability.
//!
//! The title resolver only depends on the [`Fetcher`] trait; [`CurlFetcher`]
//! is the libcurl-backed implementation used outside of tests.

mod error;
mod parse;
mod transport;

pub use error::{classify_curl_error, FetchError};
pub use transport::{CurlFetcher, CurlOptions};

use std::collections::HashMap;

/// Response of a completed fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchReply {
    pub status: u32,
    /// Header names are stored lowercased; use [`FetchReply::header`] for lookups.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl FetchReply {
    /// Builds a reply from header name/value pairs (names are case-insensitive).
    pub fn new<I, K, V>(status: u32, headers: I, body: Vec<u8>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            status,
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.as_ref().trim().to_ascii_lowercase(), v.into()))
                .collect(),
            body,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// `Content-Type` value, if present and non-empty.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type").filter(|v| !v.trim().is_empty())
    }
}

/// Something that can perform a blocking GET.
pub trait Fetcher {
    fn fetch(&self, url: &str, headers: &HashMap<String, String>)
        -> Result<FetchReply, FetchError>;
}

impl<F> Fetcher for F
where
    F: Fn(&str, &HashMap<String, String>) -> Result<FetchReply, FetchError>,
{
    fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<FetchReply, FetchError> {
        self(url, headers)
    }
}

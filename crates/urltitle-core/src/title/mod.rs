//! Title resolution for linked resources.
//!
//! HTML pages contribute their `<title>`; any other resource with a content
//! type contributes its filename. The resolver never fails: every transport
//! or extraction problem is logged and reported as "no title".

mod extract;
mod normalize;
mod path;

pub use extract::html_title;
pub use normalize::{detect, normalize, to_utf8, Charset, CANDIDATES};
pub use path::filename_from_url;

use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use crate::fetch::{FetchReply, Fetcher};

/// Outbound `User-Agent`: `<feature> (<product>/<version>; <locale>)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent {
    pub feature: String,
    pub product: String,
    pub version: String,
    pub locale: String,
}

impl UserAgent {
    /// User agent for this build of the crate.
    pub fn new(feature: &str, locale: &str) -> Self {
        Self {
            feature: feature.to_string(),
            product: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            locale: locale.to_string(),
        }
    }
}

impl Default for UserAgent {
    fn default() -> Self {
        Self::new("URL title rewrite", "en")
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{}; {})",
            self.feature, self.product, self.version, self.locale
        )
    }
}

/// Prepends `http://` when `url` has no `scheme://` prefix.
pub fn with_default_scheme(url: &str) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("scheme pattern is valid")
    });
    if re.is_match(url) {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("http://{}", url))
    }
}

/// Derives the raw title bytes of a reply; `None` when the reply offers nothing usable.
fn raw_title<'r>(url: &str, reply: &'r FetchReply) -> Option<Cow<'r, [u8]>> {
    let content_type = reply.content_type()?;
    if reply.status > 0 && content_type.to_ascii_lowercase().contains("text/html") {
        return Some(Cow::Borrowed(html_title(&reply.body)));
    }
    filename_from_url(url).map(|name| Cow::Owned(name.into_bytes()))
}

/// Fetches linked resources and turns them into display titles.
pub struct TitleResolver<'a> {
    fetcher: &'a dyn Fetcher,
    headers: HashMap<String, String>,
}

impl<'a> TitleResolver<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, user_agent: &UserAgent) -> Self {
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), user_agent.to_string());
        Self { fetcher, headers }
    }

    /// Resolves the display title of `url`; `None` if it has none or cannot be fetched.
    pub fn resolve(&self, url: &str) -> Option<String> {
        let url = with_default_scheme(url);

        let reply = match self.fetcher.fetch(&url, &self.headers) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "title fetch failed");
                return None;
            }
        };

        let raw = raw_title(&url, &reply)?;
        if raw.is_empty() {
            tracing::debug!(url = %url, "no title in response");
            return None;
        }

        let title = normalize(&raw);
        if title.is_empty() {
            return None;
        }
        tracing::debug!(url = %url, title = %title, "resolved title");
        Some(title)
    }
}

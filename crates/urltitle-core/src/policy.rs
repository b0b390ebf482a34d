//! Collaborators consulted before a link is rewritten.
//!
//! The rewriter only depends on these traits. Closures implement them too,
//! which keeps callers and tests free of boilerplate types.

use crate::title::with_default_scheme;

/// Answers whether a markup kind is usable given the allowed-kinds list of the context.
pub trait MarkupPolicy {
    fn is_allowed(&self, kind: &str, allowed: &[String]) -> bool;
}

impl<F> MarkupPolicy for F
where
    F: Fn(&str, &[String]) -> bool,
{
    fn is_allowed(&self, kind: &str, allowed: &[String]) -> bool {
        self(kind, allowed)
    }
}

/// Answers whether a URL belongs to the hosting site.
pub trait UrlClassifier {
    fn is_internal(&self, url: &str) -> bool;
}

impl<F> UrlClassifier for F
where
    F: Fn(&str) -> bool,
{
    fn is_internal(&self, url: &str) -> bool {
        self(url)
    }
}

/// Allowed-kinds list semantics of the forum: `all` allows everything,
/// `none` denies everything, otherwise the kind must be listed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowListPolicy;

impl MarkupPolicy for AllowListPolicy {
    fn is_allowed(&self, kind: &str, allowed: &[String]) -> bool {
        let listed = |name: &str| allowed.iter().any(|k| k.trim().eq_ignore_ascii_case(name));
        if listed("all") {
            return true;
        }
        if listed("none") {
            return false;
        }
        listed(kind)
    }
}

/// Treats every URL under one of the configured site base URLs as internal.
///
/// A prefix without a trailing `/` only matches at a URL boundary, so
/// `http://forum.example` does not cover `http://forum.example.net/`.
#[derive(Debug, Clone, Default)]
pub struct InternalPrefixes {
    prefixes: Vec<String>,
}

impl InternalPrefixes {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefixes = prefixes
            .into_iter()
            .map(|p| with_default_scheme(p.as_ref().trim()).to_ascii_lowercase())
            .filter(|p| {
                let has_host = url::Url::parse(p)
                    .map(|u| u.host_str().is_some_and(|h| !h.is_empty()))
                    .unwrap_or(false);
                if !has_host && p != "http://" {
                    tracing::warn!(prefix = %p, "ignoring internal prefix without a host");
                }
                has_host
            })
            .collect();
        Self { prefixes }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl UrlClassifier for InternalPrefixes {
    fn is_internal(&self, url: &str) -> bool {
        if self.prefixes.is_empty() {
            return false;
        }
        let url = with_default_scheme(url.trim()).to_ascii_lowercase();
        self.prefixes.iter().any(|p| match url.strip_prefix(p.as_str()) {
            Some(rest) => p.ends_with('/') || rest.is_empty() || rest.starts_with(['/', '?', '#']),
            None => false,
        })
    }
}

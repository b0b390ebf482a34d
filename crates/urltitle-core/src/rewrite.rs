//! Rewrites bare `[url]` markup with the titles of the linked pages.
//!
//! Only links that display their own URL are eligible: `[url]TARGET[/url]`
//! and `[url=TARGET]TARGET[/url]`. Links to our own site and links with an
//! author-chosen label are never touched.

use regex::{NoExpand, RegexBuilder};

use crate::fetch::Fetcher;
use crate::markup::{render_link, scan, LinkMatch, LINK_KIND};
use crate::policy::{MarkupPolicy, UrlClassifier};
use crate::title::{TitleResolver, UserAgent};

/// Outcome of processing one link occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// URL belongs to our own site.
    Internal,
    /// Author already chose a label.
    CustomLabel,
    /// Fetch or extraction produced no title.
    NoTitle,
    /// Replaced with the given title.
    Titled(String),
}

/// Drives matching, eligibility checks, title resolution and substitution.
pub struct Rewriter<'a> {
    policy: &'a dyn MarkupPolicy,
    classifier: &'a dyn UrlClassifier,
    resolver: TitleResolver<'a>,
}

impl<'a> Rewriter<'a> {
    pub fn new(
        policy: &'a dyn MarkupPolicy,
        classifier: &'a dyn UrlClassifier,
        fetcher: &'a dyn Fetcher,
        user_agent: &UserAgent,
    ) -> Self {
        Self {
            policy,
            classifier,
            resolver: TitleResolver::new(fetcher, user_agent),
        }
    }

    /// Returns `text` with every eligible link relabelled by its page title.
    ///
    /// `allowed` is the allowed-markup list of the context; `None` means no
    /// restriction. Never fails: links that cannot be resolved stay as written.
    pub fn rewrite(&self, text: &str, allowed: Option<&[String]>) -> String {
        self.rewrite_with_report(text, allowed).0
    }

    /// Like [`Rewriter::rewrite`], also reporting what happened to each match in scan order.
    pub fn rewrite_with_report(
        &self,
        text: &str,
        allowed: Option<&[String]>,
    ) -> (String, Vec<(LinkMatch, LinkOutcome)>) {
        if text.is_empty() {
            return (String::new(), Vec::new());
        }
        if let Some(allowed) = allowed {
            if !self.policy.is_allowed(LINK_KIND, allowed) {
                tracing::debug!("url markup not allowed here, leaving text unchanged");
                return (text.to_string(), Vec::new());
            }
        }

        let mut current = text.to_string();
        let mut report = Vec::new();

        for link in scan(text) {
            let outcome = self.process(&link);
            if let LinkOutcome::Titled(title) = &outcome {
                let replacement = render_link(&link.url, title);
                current = replace_ignore_case(&current, &link.full_text, &replacement);
            }
            report.push((link, outcome));
        }

        (current, report)
    }

    fn process(&self, link: &LinkMatch) -> LinkOutcome {
        if self.classifier.is_internal(&link.url) {
            tracing::debug!(url = %link.url, "skipping internal link");
            return LinkOutcome::Internal;
        }
        if !link.is_self_labelled() {
            tracing::debug!(url = %link.url, "skipping link with custom label");
            return LinkOutcome::CustomLabel;
        }
        match self.resolver.resolve(&link.url) {
            Some(title) => LinkOutcome::Titled(title),
            None => LinkOutcome::NoTitle,
        }
    }
}

/// One-shot form of [`Rewriter::rewrite`].
pub fn rewrite(
    text: &str,
    allowed: Option<&[String]>,
    policy: &dyn MarkupPolicy,
    classifier: &dyn UrlClassifier,
    fetcher: &dyn Fetcher,
    user_agent: &UserAgent,
) -> String {
    Rewriter::new(policy, classifier, fetcher, user_agent).rewrite(text, allowed)
}

/// Replaces every case-insensitive occurrence of `needle` in `haystack`.
///
/// `replacement` is inserted literally.
pub fn replace_ignore_case(haystack: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    match RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re.replace_all(haystack, NoExpand(replacement)).into_owned(),
        Err(e) => {
            tracing::warn!(error = %e, "could not build replacement pattern");
            haystack.to_string()
        }
    }
}

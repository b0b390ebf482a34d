//! `urltitle rewrite [PATH]` – rewrite links and print the text.

use anyhow::Result;
use std::path::Path;
use urltitle_core::config::RewriteConfig;
use urltitle_core::fetch::CurlFetcher;
use urltitle_core::policy::{AllowListPolicy, InternalPrefixes};
use urltitle_core::rewrite::{LinkOutcome, Rewriter};

use super::read_input;

pub fn run_rewrite(
    cfg: &RewriteConfig,
    path: Option<&Path>,
    allow: Option<Vec<String>>,
    internal: &[String],
) -> Result<()> {
    let text = read_input(path)?;

    let fetcher = CurlFetcher::new(cfg.curl_options());
    let classifier = InternalPrefixes::new(cfg.internal_prefixes.iter().chain(internal));
    let allowed = allow.or_else(|| cfg.allowed_markup.clone());
    let rewriter = Rewriter::new(&AllowListPolicy, &classifier, &fetcher, &cfg.user_agent());

    let (out, report) = rewriter.rewrite_with_report(&text, allowed.as_deref());
    let titled = report
        .iter()
        .filter(|(_, outcome)| matches!(outcome, LinkOutcome::Titled(_)))
        .count();
    tracing::info!(links = report.len(), titled, "rewrite finished");

    print!("{}", out);
    Ok(())
}

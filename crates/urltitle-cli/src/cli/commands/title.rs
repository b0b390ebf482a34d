//! `urltitle title <url>` – resolve the title of one link target.

use anyhow::Result;
use urltitle_core::config::RewriteConfig;
use urltitle_core::fetch::CurlFetcher;
use urltitle_core::title::TitleResolver;

pub fn run_title(cfg: &RewriteConfig, url: &str) -> Result<()> {
    let fetcher = CurlFetcher::new(cfg.curl_options());
    let resolver = TitleResolver::new(&fetcher, &cfg.user_agent());
    match resolver.resolve(url) {
        Some(title) => {
            println!("{}", title);
            Ok(())
        }
        None => anyhow::bail!("no title for {}", url),
    }
}

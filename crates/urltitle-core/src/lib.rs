//! Replaces bare `[url]` markup in user-authored text with the titles of the linked pages.
//!
//! ```no_run
//! use urltitle_core::fetch::CurlFetcher;
//! use urltitle_core::policy::{AllowListPolicy, InternalPrefixes};
//! use urltitle_core::rewrite::Rewriter;
//! use urltitle_core::title::UserAgent;
//!
//! let fetcher = CurlFetcher::default();
//! let internal = InternalPrefixes::new(["https://forum.example.org/"]);
//! let rewriter = Rewriter::new(&AllowListPolicy, &internal, &fetcher, &UserAgent::default());
//! let text = rewriter.rewrite("[url]example.com[/url]", None);
//! ```

pub mod config;
pub mod logging;

pub mod fetch;
pub mod markup;
pub mod policy;
pub mod rewrite;
pub mod title;

pub use markup::LinkMatch;
pub use rewrite::{rewrite, Rewriter};

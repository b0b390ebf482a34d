//! CLI command handlers. Each command is in its own file.

mod rewrite;
mod scan;
mod title;

pub use rewrite::run_rewrite;
pub use scan::run_scan;
pub use title::run_title;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Reads the whole input text from `path`, or from stdin when no path is given.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("read {}", p.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("read stdin")?;
            Ok(text)
        }
    }
}

//! `urltitle scan [PATH]` – list link markup as JSON lines.

use anyhow::Result;
use std::path::Path;
use urltitle_core::markup;

use super::read_input;

pub fn run_scan(path: Option<&Path>) -> Result<()> {
    let text = read_input(path)?;
    for link in markup::scan(&text) {
        println!("{}", serde_json::to_string(&link)?);
    }
    Ok(())
}

//! CLI for the urltitle link rewriter.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use urltitle_core::config::{self, RewriteConfig};

use commands::{run_rewrite, run_scan, run_title};

/// Top-level CLI for the urltitle link rewriter.
#[derive(Debug, Parser)]
#[command(name = "urltitle")]
#[command(about = "Replace bare [url] links with the titles of the linked pages", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/urltitle/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Rewrite the links of a text and print the result.
    Rewrite {
        /// Input file; reads stdin when omitted.
        path: Option<PathBuf>,

        /// Allowed markup kinds, comma separated (e.g. "url,b,i" or "all"). Overrides the config.
        #[arg(long, value_delimiter = ',', value_name = "KINDS")]
        allow: Option<Vec<String>>,

        /// Base URL of our own site; links under it are left alone. Repeatable.
        #[arg(long = "internal", value_name = "PREFIX")]
        internal: Vec<String>,
    },

    /// Print the title a single URL would be given.
    Title {
        /// Link target as written in the markup (scheme optional).
        url: String,
    },

    /// List the link markup found in a text as JSON lines.
    Scan {
        /// Input file; reads stdin when omitted.
        path: Option<PathBuf>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        cli.command.run(&cfg)
    }

    fn run(self, cfg: &RewriteConfig) -> Result<()> {
        match self {
            CliCommand::Rewrite {
                path,
                allow,
                internal,
            } => run_rewrite(cfg, path.as_deref(), allow, &internal),
            CliCommand::Title { url } => run_title(cfg, &url),
            CliCommand::Scan { path } => run_scan(path.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::CurlOptions;
use crate::title::UserAgent;

/// Global configuration loaded from `~/.config/urltitle/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Seconds allowed for establishing the connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for the whole fetch, redirects included.
    pub timeout_secs: u64,
    /// Maximum number of redirects followed per fetch.
    pub max_redirects: u32,
    /// Response bytes kept per fetch; the rest of the body is discarded.
    pub max_body_bytes: usize,
    /// Locale code sent in the User-Agent.
    pub locale: String,
    /// Feature name leading the User-Agent.
    pub feature_name: String,
    /// Base URLs of our own site; links under them are never rewritten.
    #[serde(default)]
    pub internal_prefixes: Vec<String>,
    /// Allowed markup kinds (e.g. `["url", "b"]`, or `["all"]`). Absent = no restriction.
    #[serde(default)]
    pub allowed_markup: Option<Vec<String>>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            timeout_secs: 20,
            max_redirects: 5,
            max_body_bytes: 512 * 1024,
            locale: "en".to_string(),
            feature_name: "URL title rewrite".to_string(),
            internal_prefixes: Vec::new(),
            allowed_markup: None,
        }
    }
}

impl RewriteConfig {
    /// Transport options for [`crate::fetch::CurlFetcher`].
    pub fn curl_options(&self) -> CurlOptions {
        CurlOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            max_redirects: self.max_redirects,
            max_body_bytes: self.max_body_bytes,
        }
    }

    /// User-Agent identifying this feature, this build, and the configured locale.
    pub fn user_agent(&self) -> UserAgent {
        UserAgent::new(&self.feature_name, &self.locale)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urltitle")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RewriteConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RewriteConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<RewriteConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: RewriteConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

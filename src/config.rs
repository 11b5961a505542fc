use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Session credentials and client identity, loaded from `config.json`.
///
/// Cookies come from an authenticated LinkedIn browser session
/// (DevTools → Application → Cookies → linkedin.com).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub cookies: Cookies,
    #[serde(rename = "userAgent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cookies {
    pub li_at: String,
    #[serde(rename = "JSESSIONID")]
    pub jsessionid: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }
}

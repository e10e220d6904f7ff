//! Data source configuration parsing from environment variables.
//!
//! This module handles where the dashboard reads its CSV files from:
//! repository coordinates, the raw-content host and the two file paths.

use anyhow::{Context, Result};
use std::env;
use url::Url;

pub const DEFAULT_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_PORTFOLIO_PATH: &str = "data/portfolio.csv";
pub const DEFAULT_TRADES_PATH: &str = "data/trades.csv";

/// Repository coordinates and file locations
#[derive(Debug, Clone)]
pub struct SourceEnvConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub raw_base_url: String,
    pub portfolio_path: String,
    pub trades_path: String,
}

impl SourceEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup` so callers can layer overrides over the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let owner = required(&lookup, "DASHBOARD_OWNER")?;
        let repo = required(&lookup, "DASHBOARD_REPO")?;

        let raw_base_url = lookup("DASHBOARD_RAW_BASE_URL")
            .unwrap_or_else(|| DEFAULT_RAW_BASE_URL.to_string());
        let raw_base_url = normalize_base_url(&raw_base_url)?;

        Ok(Self {
            owner,
            repo,
            branch: lookup("DASHBOARD_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            raw_base_url,
            portfolio_path: lookup("DASHBOARD_PORTFOLIO_PATH")
                .unwrap_or_else(|| DEFAULT_PORTFOLIO_PATH.to_string()),
            trades_path: lookup("DASHBOARD_TRADES_PATH")
                .unwrap_or_else(|| DEFAULT_TRADES_PATH.to_string()),
        })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    let value = lookup(key).with_context(|| format!("{} must be set", key))?;
    if value.trim().is_empty() {
        anyhow::bail!("{} must not be empty", key);
    }
    Ok(value.trim().to_string())
}

/// Checks that the raw-content host is an absolute http(s) URL and strips
/// any trailing slash so paths can be appended with a single `/`.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw.trim())
        .with_context(|| format!("Invalid DASHBOARD_RAW_BASE_URL: {}", raw))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => anyhow::bail!(
            "Invalid DASHBOARD_RAW_BASE_URL scheme: {}. Must be 'http' or 'https'",
            other
        ),
    }
    Ok(raw.trim().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_slash() {
        let base = normalize_base_url("https://raw.githubusercontent.com/").unwrap();
        assert_eq!(base, "https://raw.githubusercontent.com");
    }

    #[test]
    fn test_normalize_keeps_port_and_prefix() {
        let base = normalize_base_url("http://127.0.0.1:8080/mirror").unwrap();
        assert_eq!(base, "http://127.0.0.1:8080/mirror");
    }

    #[test]
    fn test_lookup_defaults() {
        let config = SourceEnvConfig::from_lookup(|key| match key {
            "DASHBOARD_OWNER" => Some("octo".to_string()),
            "DASHBOARD_REPO" => Some(" ledger ".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.repo, "ledger");
        assert_eq!(config.branch, DEFAULT_BRANCH);
        assert_eq!(config.raw_base_url, DEFAULT_RAW_BASE_URL);
        assert_eq!(config.trades_path, DEFAULT_TRADES_PATH);
    }

    #[test]
    fn test_lookup_rejects_blank_owner() {
        let result = SourceEnvConfig::from_lookup(|key| match key {
            "DASHBOARD_OWNER" => Some("  ".to_string()),
            "DASHBOARD_REPO" => Some("ledger".to_string()),
            _ => None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_rejects_relative_and_foreign_schemes() {
        assert!(normalize_base_url("raw.githubusercontent.com").is_err());
        assert!(normalize_base_url("ftp://example.com").is_err());
    }
}

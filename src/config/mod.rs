//! Configuration module for the portfolio dashboard.
//!
//! Configuration is loaded once at startup from environment variables (and a
//! `.env` file, loaded by the binaries) and then passed explicitly to the
//! URL resolver and the dashboard loader.

mod display_config;
mod source_config;

pub use display_config::{DEFAULT_GOAL, DEFAULT_MAX_TRADES, DisplayEnvConfig};
pub use source_config::{
    DEFAULT_BRANCH, DEFAULT_PORTFOLIO_PATH, DEFAULT_RAW_BASE_URL, DEFAULT_TRADES_PATH,
    SourceEnvConfig, normalize_base_url,
};

use crate::domain::locale::Locale;
use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // Source
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub raw_base_url: String,
    pub portfolio_path: String,
    pub trades_path: String,

    // Display
    pub goal_target: f64,
    pub locale: Locale,
    pub max_trades: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let source = SourceEnvConfig::from_env().context("Failed to load source config")?;
        let display = DisplayEnvConfig::from_env().context("Failed to load display config")?;

        Ok(Self::from_parts(source, display))
    }

    /// Like [`Config::from_env`], reading every key through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let source = SourceEnvConfig::from_lookup(&lookup).context("Failed to load source config")?;
        let display =
            DisplayEnvConfig::from_lookup(&lookup).context("Failed to load display config")?;

        Ok(Self::from_parts(source, display))
    }

    pub fn from_parts(source: SourceEnvConfig, display: DisplayEnvConfig) -> Self {
        Self {
            owner: source.owner,
            repo: source.repo,
            branch: source.branch,
            raw_base_url: source.raw_base_url,
            portfolio_path: source.portfolio_path,
            trades_path: source.trades_path,

            goal_target: display.goal_target,
            locale: display.locale,
            max_trades: display.max_trades,
        }
    }

    /// Config pointing at `owner/repo` with every other setting at its default.
    pub fn for_repo(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        let display = DisplayEnvConfig::default();
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: DEFAULT_BRANCH.to_string(),
            raw_base_url: DEFAULT_RAW_BASE_URL.to_string(),
            portfolio_path: DEFAULT_PORTFOLIO_PATH.to_string(),
            trades_path: DEFAULT_TRADES_PATH.to_string(),
            goal_target: display.goal_target,
            locale: display.locale,
            max_trades: display.max_trades,
        }
    }

    pub fn with_goal(mut self, goal_target: f64) -> Self {
        self.goal_target = goal_target;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

//! Display configuration parsing from environment variables.
//!
//! Goal target, formatting locale and how many trades the table shows.

use crate::domain::locale::Locale;
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_GOAL: f64 = 10_000.0;
pub const DEFAULT_MAX_TRADES: usize = 50;

#[derive(Debug, Clone)]
pub struct DisplayEnvConfig {
    pub goal_target: f64,
    pub locale: Locale,
    pub max_trades: usize,
}

impl Default for DisplayEnvConfig {
    fn default() -> Self {
        Self {
            goal_target: DEFAULT_GOAL,
            locale: Locale::default(),
            max_trades: DEFAULT_MAX_TRADES,
        }
    }
}

impl DisplayEnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let goal_target = lookup("DASHBOARD_GOAL")
            .unwrap_or_else(|| DEFAULT_GOAL.to_string())
            .trim()
            .parse::<f64>()
            .context("Failed to parse DASHBOARD_GOAL")?;
        if !goal_target.is_finite() {
            anyhow::bail!("DASHBOARD_GOAL must be a finite number, got {}", goal_target);
        }

        let locale_str = lookup("DASHBOARD_LOCALE").unwrap_or_else(|| "en-US".to_string());
        let locale = Locale::from_str(&locale_str)?;

        let max_trades = lookup("DASHBOARD_MAX_TRADES")
            .unwrap_or_else(|| DEFAULT_MAX_TRADES.to_string())
            .trim()
            .parse::<usize>()
            .context("Failed to parse DASHBOARD_MAX_TRADES")?;

        Ok(Self {
            goal_target,
            locale,
            max_trades,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_config_defaults() {
        let config = DisplayEnvConfig::from_lookup(|_| None).unwrap();
        assert!((config.goal_target - DEFAULT_GOAL).abs() < f64::EPSILON);
        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.max_trades, DEFAULT_MAX_TRADES);
    }

    #[test]
    fn test_display_config_rejects_negative_trade_limit() {
        let result = DisplayEnvConfig::from_lookup(|key| {
            (key == "DASHBOARD_MAX_TRADES").then(|| "-1".to_string())
        });
        assert!(result.is_err());
    }
}

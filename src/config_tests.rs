use crate::config::{Config, DEFAULT_MAX_TRADES};
use crate::domain::locale::Locale;
use std::env;
use std::sync::Mutex;
use std::sync::OnceLock;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const KEYS: [&str; 9] = [
    "DASHBOARD_OWNER",
    "DASHBOARD_REPO",
    "DASHBOARD_BRANCH",
    "DASHBOARD_RAW_BASE_URL",
    "DASHBOARD_PORTFOLIO_PATH",
    "DASHBOARD_TRADES_PATH",
    "DASHBOARD_GOAL",
    "DASHBOARD_LOCALE",
    "DASHBOARD_MAX_TRADES",
];

fn clear_env() {
    for key in KEYS {
        unsafe { env::remove_var(key) };
    }
}

fn set(key: &str, value: &str) {
    unsafe { env::set_var(key, value) };
}

#[test]
fn test_config_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    set("DASHBOARD_OWNER", "octo");
    set("DASHBOARD_REPO", "ledger");

    let config = Config::from_env().unwrap();

    assert_eq!(config.owner, "octo");
    assert_eq!(config.repo, "ledger");
    assert_eq!(config.branch, "main");
    assert_eq!(config.raw_base_url, "https://raw.githubusercontent.com");
    assert_eq!(config.portfolio_path, "data/portfolio.csv");
    assert_eq!(config.trades_path, "data/trades.csv");
    assert!((config.goal_target - 10_000.0).abs() < f64::EPSILON);
    assert_eq!(config.locale, Locale::EnUs);
    assert_eq!(config.max_trades, DEFAULT_MAX_TRADES);

    clear_env();
}

#[test]
fn test_config_overrides() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    set("DASHBOARD_OWNER", "octo");
    set("DASHBOARD_REPO", "ledger");
    set("DASHBOARD_BRANCH", "gh-pages");
    set("DASHBOARD_RAW_BASE_URL", "http://localhost:9000/");
    set("DASHBOARD_PORTFOLIO_PATH", "snapshots/equity.csv");
    set("DASHBOARD_GOAL", "2500.5");
    set("DASHBOARD_LOCALE", "de-DE");
    set("DASHBOARD_MAX_TRADES", "10");

    let config = Config::from_env().unwrap();

    assert_eq!(config.branch, "gh-pages");
    assert_eq!(config.raw_base_url, "http://localhost:9000");
    assert_eq!(config.portfolio_path, "snapshots/equity.csv");
    assert_eq!(config.trades_path, "data/trades.csv");
    assert!((config.goal_target - 2500.5).abs() < f64::EPSILON);
    assert_eq!(config.locale, Locale::DeDe);
    assert_eq!(config.max_trades, 10);

    clear_env();
}

#[test]
fn test_config_requires_repository() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    set("DASHBOARD_OWNER", "octo");

    let err = Config::from_env().unwrap_err();
    assert!(format!("{:#}", err).contains("DASHBOARD_REPO"));

    clear_env();
}

#[test]
fn test_config_rejects_bad_values() {
    let _guard = get_env_lock().lock().unwrap();
    clear_env();
    set("DASHBOARD_OWNER", "octo");
    set("DASHBOARD_REPO", "ledger");

    set("DASHBOARD_GOAL", "lots");
    assert!(Config::from_env().is_err());

    set("DASHBOARD_GOAL", "inf");
    assert!(Config::from_env().is_err());

    set("DASHBOARD_GOAL", "2000");
    set("DASHBOARD_LOCALE", "xx-YY");
    assert!(Config::from_env().is_err());

    clear_env();
}

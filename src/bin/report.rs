//! Headless dashboard report
//!
//! Loads the portfolio and trade files once and prints what the dashboard
//! would show, either as aligned text or as JSON.
//!
//! # Usage
//! ```sh
//! cargo run --bin report -- --owner octocat --repo trading-journal --locale en-GB
//! ```
//!
//! Options fall back to the `DASHBOARD_*` environment variables.

use anyhow::Result;
use clap::Parser;
use portfolio_dashboard::application::dashboard::{DashboardLoader, LoadOutcome};
use portfolio_dashboard::config::Config;
use portfolio_dashboard::infrastructure::ReqwestTransport;
use portfolio_dashboard::interfaces::console::render_report;
use portfolio_dashboard::interfaces::view_models::DashboardState;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Repository owner (DASHBOARD_OWNER)
    #[arg(long)]
    owner: Option<String>,

    /// Repository name (DASHBOARD_REPO)
    #[arg(long)]
    repo: Option<String>,

    /// Branch holding the data files (DASHBOARD_BRANCH)
    #[arg(long)]
    branch: Option<String>,

    /// Goal amount in USD (DASHBOARD_GOAL)
    #[arg(long)]
    goal: Option<f64>,

    /// Display locale, e.g. en-US, en-GB, fr-FR, de-DE (DASHBOARD_LOCALE)
    #[arg(long)]
    locale: Option<String>,

    /// Maximum number of trades listed (DASHBOARD_MAX_TRADES)
    #[arg(long)]
    max_trades: Option<usize>,

    /// Print the dashboard state as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn lookup(&self, key: &str) -> Option<String> {
        let value = match key {
            "DASHBOARD_OWNER" => self.owner.clone(),
            "DASHBOARD_REPO" => self.repo.clone(),
            "DASHBOARD_BRANCH" => self.branch.clone(),
            "DASHBOARD_GOAL" => self.goal.map(|g| g.to_string()),
            "DASHBOARD_LOCALE" => self.locale.clone(),
            "DASHBOARD_MAX_TRADES" => self.max_trades.map(|n| n.to_string()),
            _ => None,
        };
        value.or_else(|| std::env::var(key).ok())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays a clean report
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_lookup(|key| cli.lookup(key))?;
    info!(
        "Report for {}/{}@{} ({})",
        config.owner, config.repo, config.branch, config.locale
    );

    let loader = DashboardLoader::new(&config, Arc::new(ReqwestTransport::new()));
    let mut state = DashboardState::new();
    let outcome = loader.load(&mut state).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print!("{}", render_report(&state));
    }

    match outcome {
        LoadOutcome::Rendered => Ok(()),
        LoadOutcome::Failed | LoadOutcome::AlreadyRunning => anyhow::bail!(
            "{}",
            state.latest_alert().unwrap_or("Dashboard load did not complete")
        ),
    }
}

use crate::application::csv_fetcher::CsvFetcher;
use crate::application::formatting::{
    FALLBACK_GLYPH, format_grouped, format_money, format_money_text, format_short_date,
    parse_date, parse_number, to_fixed,
};
use crate::application::url_resolver::RawUrlResolver;
use crate::config::Config;
use crate::domain::errors::Result;
use crate::domain::locale::Locale;
use crate::domain::ports::{
    ChartSeries, DashboardView, HttpTransport, PlClass, TextTarget, TradeRow,
};
use crate::domain::records::CsvRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};

/// The only message a user ever sees when loading fails
pub const LOAD_FAILED_MESSAGE: &str =
    "Dashboard couldn't load data yet. Make sure /data files exist in the repo.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadOutcome {
    Rendered,
    /// An error reached the boundary and the alert was shown
    Failed,
    /// Another load on the same loader was still in flight
    AlreadyRunning,
}

/// Fetches the portfolio history and trade log and pushes them into a view.
pub struct DashboardLoader {
    fetcher: CsvFetcher,
    portfolio_path: String,
    trades_path: String,
    goal_target: f64,
    locale: Locale,
    max_trades: usize,
    in_flight: AtomicBool,
}

impl DashboardLoader {
    pub fn new(config: &Config, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            fetcher: CsvFetcher::new(RawUrlResolver::from_config(config), transport),
            portfolio_path: config.portfolio_path.clone(),
            trades_path: config.trades_path.clone(),
            goal_target: config.goal_target,
            locale: config.locale,
            max_trades: config.max_trades,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Runs one full load.
    ///
    /// Portfolio data is fetched and rendered before the trade log is
    /// requested. Any error ends the load: it is logged, a single alert is
    /// raised on `view`, and whatever was rendered so far stays in place.
    pub async fn load(&self, view: &mut dyn DashboardView) -> LoadOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Dashboard load already in progress, ignoring request");
            return LoadOutcome::AlreadyRunning;
        }
        let _in_flight = InFlight(&self.in_flight);

        info!("Loading dashboard from {}", self.fetcher.resolver().base());

        match self.render(view).await {
            Ok(()) => {
                info!("Dashboard rendered");
                LoadOutcome::Rendered
            }
            Err(e) => {
                error!(
                    "Dashboard load failed ({}): {}",
                    e.path().unwrap_or("render"),
                    e
                );
                view.alert(LOAD_FAILED_MESSAGE);
                LoadOutcome::Failed
            }
        }
    }

    async fn render(&self, view: &mut dyn DashboardView) -> Result<()> {
        self.render_portfolio(view).await?;
        self.render_trades(view).await
    }

    async fn render_portfolio(&self, view: &mut dyn DashboardView) -> Result<()> {
        let mut snapshots = self.fetcher.fetch(&self.portfolio_path).await?;
        sort_snapshots(&mut snapshots);

        let series = portfolio_series(&snapshots, self.locale);
        let latest = snapshots.last();
        debug!(
            "Portfolio history: {} snapshots, latest {:?}",
            snapshots.len(),
            latest.map(|r| r.text("date"))
        );

        view.set_text(TextTarget::PortfolioValue, &portfolio_value_text(latest, self.locale))?;
        view.set_text(
            TextTarget::GoalProgress,
            &goal_progress_text(latest, self.goal_target, self.locale),
        )?;
        view.set_text(TextTarget::LastUpdated, &last_updated_text(latest, self.locale))?;
        view.render_chart(series)
    }

    async fn render_trades(&self, view: &mut dyn DashboardView) -> Result<()> {
        let mut trades = self.fetcher.fetch(&self.trades_path).await?;
        sort_trades(&mut trades);

        let rows: Vec<TradeRow> = trades
            .iter()
            .take(self.max_trades)
            .map(|record| trade_row(record, self.locale))
            .collect();
        debug!("Trade log: {} records, showing {}", trades.len(), rows.len());

        view.render_table(rows)
    }
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Oldest first. Rows whose date does not parse sort ahead of all dated rows.
pub fn sort_snapshots(records: &mut [CsvRecord]) {
    records.sort_by_cached_key(|r| parse_date(r.text("date")));
}

/// Newest first. Rows whose date does not parse sort after all dated rows.
pub fn sort_trades(records: &mut [CsvRecord]) {
    records.sort_by_cached_key(|r| Reverse(parse_date(r.text("date"))));
}

pub fn portfolio_series(snapshots: &[CsvRecord], locale: Locale) -> ChartSeries {
    ChartSeries {
        labels: snapshots
            .iter()
            .map(|r| format_short_date(r.text("date"), locale))
            .collect(),
        values: snapshots
            .iter()
            .map(|r| parse_number(r.text("value")))
            .collect(),
    }
}

fn latest_value(latest: Option<&CsvRecord>) -> Option<&str> {
    latest.map(|r| r.text("value")).filter(|v| !v.is_empty())
}

pub fn portfolio_value_text(latest: Option<&CsvRecord>, locale: Locale) -> String {
    let amount = match latest_value(latest) {
        Some(value) => format_money_text(value, locale),
        None => format_money(0.0, locale),
    };
    format!("Portfolio: {}", amount)
}

/// Latest value as a share of the goal, capped at 100, one decimal.
/// `"0"` when there is no value to compare.
pub fn goal_progress_pct(latest: Option<&CsvRecord>, goal_target: f64) -> String {
    let Some(value) = latest_value(latest) else {
        return "0".to_string();
    };

    let pct = parse_number(value) / goal_target * 100.0;
    if pct.is_nan() {
        return "0".to_string();
    }
    to_fixed(pct.min(100.0), 1)
}

pub fn goal_progress_text(latest: Option<&CsvRecord>, goal_target: f64, locale: Locale) -> String {
    format!(
        "Goal: ${} ({}%)",
        format_grouped(goal_target, locale),
        goal_progress_pct(latest, goal_target)
    )
}

pub fn last_updated_text(latest: Option<&CsvRecord>, locale: Locale) -> String {
    let date = latest
        .map(|r| r.text("date"))
        .filter(|d| !d.is_empty())
        .map(|d| format_short_date(d, locale))
        .unwrap_or_else(|| FALLBACK_GLYPH.to_string());
    format!("Updated: {}", date)
}

pub fn trade_row(record: &CsvRecord, locale: Locale) -> TradeRow {
    let pl = parse_number(record.text("pl"));
    TradeRow {
        date: format_short_date(record.text("date"), locale),
        symbol: record.text("symbol").to_string(),
        side: record.text("side").to_string(),
        qty: record.text("qty").to_string(),
        entry: record.text("entry").to_string(),
        exit: record.text("exit").to_string(),
        pl: format_money(pl, locale),
        pl_class: PlClass::for_value(pl),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> CsvRecord {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_sort_snapshots_oldest_first() {
        let mut records = vec![
            record(&[("date", "2024-03-01"), ("value", "3")]),
            record(&[("date", "2024-01-01"), ("value", "1")]),
            record(&[("date", "2024-02-01"), ("value", "2")]),
        ];
        sort_snapshots(&mut records);
        let values: Vec<&str> = records.iter().map(|r| r.text("value")).collect();
        assert_eq!(values, ["1", "2", "3"]);
    }

    #[test]
    fn test_sort_trades_newest_first_with_undated_last() {
        let mut records = vec![
            record(&[("date", "garbage"), ("symbol", "X")]),
            record(&[("date", "2024-01-01"), ("symbol", "A")]),
            record(&[("date", "2024-05-01"), ("symbol", "C")]),
            record(&[("date", "2024-03-01"), ("symbol", "B")]),
        ];
        sort_trades(&mut records);
        let symbols: Vec<&str> = records.iter().map(|r| r.text("symbol")).collect();
        assert_eq!(symbols, ["C", "B", "A", "X"]);
    }

    #[test]
    fn test_goal_progress_caps_and_defaults() {
        let half = record(&[("value", "1000")]);
        let over = record(&[("value", "5000")]);
        let blank = record(&[("value", "")]);
        let zero = record(&[("value", "0")]);
        let junk = record(&[("value", "n/a")]);

        assert_eq!(goal_progress_pct(Some(&half), 2000.0), "50.0");
        assert_eq!(goal_progress_pct(Some(&over), 2000.0), "100.0");
        assert_eq!(goal_progress_pct(Some(&zero), 2000.0), "0.0");
        assert_eq!(goal_progress_pct(Some(&blank), 2000.0), "0");
        assert_eq!(goal_progress_pct(Some(&junk), 2000.0), "0");
        assert_eq!(goal_progress_pct(None, 2000.0), "0");
    }

    #[test]
    fn test_goal_progress_with_infinite_ratio() {
        let up = record(&[("value", "Infinity")]);
        let down = record(&[("value", "-Infinity")]);
        let some = record(&[("value", "1000")]);

        assert_eq!(goal_progress_pct(Some(&up), 2000.0), "100.0");
        assert_eq!(goal_progress_pct(Some(&down), 2000.0), "-Infinity");
        assert_eq!(goal_progress_pct(Some(&some), 0.0), "100.0");
    }

    #[test]
    fn test_summary_texts_without_data() {
        assert_eq!(portfolio_value_text(None, Locale::EnUs), "Portfolio: $0.00");
        assert_eq!(last_updated_text(None, Locale::EnUs), "Updated: —");
        assert_eq!(
            goal_progress_text(None, 10_000.0, Locale::EnUs),
            "Goal: $10,000 (0%)"
        );
    }

    #[test]
    fn test_portfolio_value_text_with_unparseable_value() {
        let latest = record(&[("date", "2024-01-01"), ("value", "abc")]);
        assert_eq!(portfolio_value_text(Some(&latest), Locale::EnUs), "Portfolio: —");
    }

    #[test]
    fn test_trade_row_pl_styling() {
        let loss = trade_row(&record(&[("date", "2024-02-03"), ("pl", "-5.00")]), Locale::EnUs);
        assert_eq!(loss.pl, "-$5.00");
        assert_eq!(loss.pl_class, PlClass::Negative);

        let missing = trade_row(
            &record(&[("date", "2024-02-03"), ("symbol", "TSLA")]),
            Locale::EnUs,
        );
        assert_eq!(missing.pl, "$0.00");
        assert_eq!(missing.pl_class, PlClass::Positive);
        assert_eq!(missing.side, "");

        let junk = trade_row(&record(&[("pl", "oops")]), Locale::EnUs);
        assert_eq!(junk.pl, FALLBACK_GLYPH);
        assert_eq!(junk.pl_class, PlClass::Negative);
        assert_eq!(junk.date, "");

        let rounded_loss = trade_row(&record(&[("pl", "-0.001")]), Locale::EnUs);
        assert_eq!(rounded_loss.pl, "-$0.00");
        assert_eq!(rounded_loss.pl_class, PlClass::Negative);
    }
}

use crate::domain::errors::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status and body of a completed GET request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// Need async_trait for async functions in traits
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issues a GET and reads the full body. Errors cover the network and
    /// body-read failures only; a non-2xx status is a successful response.
    async fn get(&self, url: &str) -> anyhow::Result<HttpResponse>;
}

/// Text fields the dashboard writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextTarget {
    PortfolioValue,
    GoalProgress,
    LastUpdated,
}

impl TextTarget {
    pub const ALL: [TextTarget; 3] = [
        TextTarget::PortfolioValue,
        TextTarget::GoalProgress,
        TextTarget::LastUpdated,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TextTarget::PortfolioValue => "portfolioVal",
            TextTarget::GoalProgress => "goalProg",
            TextTarget::LastUpdated => "lastUpdated",
        }
    }
}

impl fmt::Display for TextTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Line chart input, labels and values aligned by index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Sign styling of a profit/loss cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlClass {
    #[serde(rename = "pl-pos")]
    Positive,
    #[serde(rename = "pl-neg")]
    Negative,
}

impl PlClass {
    /// `NaN` fails the `>= 0` test and is styled negative.
    pub fn for_value(pl: f64) -> Self {
        if pl >= 0.0 {
            PlClass::Positive
        } else {
            PlClass::Negative
        }
    }
}

/// One rendered row of the recent-trades table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRow {
    pub date: String,
    pub symbol: String,
    pub side: String,
    pub qty: String,
    pub entry: String,
    pub exit: String,
    pub pl: String,
    pub pl_class: PlClass,
}

impl TradeRow {
    pub const HEADERS: [&'static str; 7] = ["Date", "Symbol", "Side", "Qty", "Entry", "Exit", "P/L"];

    pub fn cells(&self) -> [&str; 7] {
        [
            &self.date,
            &self.symbol,
            &self.side,
            &self.qty,
            &self.entry,
            &self.exit,
            &self.pl,
        ]
    }
}

/// Presentation layer the dashboard writes into.
///
/// Implementations own the actual widgets; the loader only pushes values.
pub trait DashboardView {
    fn set_text(&mut self, target: TextTarget, value: &str) -> Result<()>;
    /// Replaces any previously rendered chart.
    fn render_chart(&mut self, series: ChartSeries) -> Result<()>;
    /// Replaces the table body.
    fn render_table(&mut self, rows: Vec<TradeRow>) -> Result<()>;
    fn alert(&mut self, message: &str);
}

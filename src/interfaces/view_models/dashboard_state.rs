use crate::domain::errors::Result;
use crate::domain::ports::{ChartSeries, DashboardView, TextTarget, TradeRow};
use crate::interfaces::channel_view::ViewUpdate;
use serde::Serialize;

/// Everything the dashboard currently shows.
///
/// Used directly as the view by the headless report, and as the UI-side
/// mirror of updates coming from the background loader.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    pub portfolio_value: Option<String>,
    pub goal_progress: Option<String>,
    pub last_updated: Option<String>,
    pub chart: Option<ChartSeries>,
    /// Bumped each time the chart is replaced
    pub chart_generation: u64,
    pub trades: Vec<TradeRow>,
    pub alerts: Vec<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, target: TextTarget) -> Option<&str> {
        match target {
            TextTarget::PortfolioValue => self.portfolio_value.as_deref(),
            TextTarget::GoalProgress => self.goal_progress.as_deref(),
            TextTarget::LastUpdated => self.last_updated.as_deref(),
        }
    }

    fn text_slot(&mut self, target: TextTarget) -> &mut Option<String> {
        match target {
            TextTarget::PortfolioValue => &mut self.portfolio_value,
            TextTarget::GoalProgress => &mut self.goal_progress,
            TextTarget::LastUpdated => &mut self.last_updated,
        }
    }

    pub fn latest_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }

    /// Applies an update received from a [`ChannelView`](crate::interfaces::channel_view::ChannelView).
    pub fn apply(&mut self, update: ViewUpdate) {
        match update {
            ViewUpdate::Text(target, value) => *self.text_slot(target) = Some(value),
            ViewUpdate::Chart(series) => self.replace_chart(series),
            ViewUpdate::Table(rows) => self.trades = rows,
            ViewUpdate::Alert(message) => self.alerts.push(message),
            ViewUpdate::Finished(_) => {}
        }
    }

    fn replace_chart(&mut self, series: ChartSeries) {
        self.chart = Some(series);
        self.chart_generation += 1;
    }
}

impl DashboardView for DashboardState {
    fn set_text(&mut self, target: TextTarget, value: &str) -> Result<()> {
        *self.text_slot(target) = Some(value.to_string());
        Ok(())
    }

    fn render_chart(&mut self, series: ChartSeries) -> Result<()> {
        self.replace_chart(series);
        Ok(())
    }

    fn render_table(&mut self, rows: Vec<TradeRow>) -> Result<()> {
        self.trades = rows;
        Ok(())
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard::LoadOutcome;
    use crate::domain::ports::PlClass;

    fn row(symbol: &str) -> TradeRow {
        TradeRow {
            date: "01/02/24".to_string(),
            symbol: symbol.to_string(),
            side: "BUY".to_string(),
            qty: "1".to_string(),
            entry: "10".to_string(),
            exit: "11".to_string(),
            pl: "$1.00".to_string(),
            pl_class: PlClass::Positive,
        }
    }

    #[test]
    fn test_apply_updates_each_target() {
        let mut state = DashboardState::new();
        state.apply(ViewUpdate::Text(
            TextTarget::GoalProgress,
            "Goal: $2,000 (75.0%)".to_string(),
        ));
        state.apply(ViewUpdate::Chart(ChartSeries {
            labels: vec!["01/01/24".to_string()],
            values: vec![1000.0],
        }));
        state.apply(ViewUpdate::Finished(LoadOutcome::Rendered));

        assert_eq!(state.text(TextTarget::GoalProgress), Some("Goal: $2,000 (75.0%)"));
        assert_eq!(state.text(TextTarget::PortfolioValue), None);
        assert_eq!(state.chart_generation, 1);
        assert!(state.alerts.is_empty());
    }

    #[test]
    fn test_table_and_chart_are_replaced() {
        let mut state = DashboardState::new();
        state.render_table(vec![row("AAPL"), row("MSFT")]).unwrap();
        state.render_table(vec![row("NVDA")]).unwrap();
        assert_eq!(state.trades.len(), 1);
        assert_eq!(state.trades[0].symbol, "NVDA");

        state.render_chart(ChartSeries::default()).unwrap();
        state.render_chart(ChartSeries::default()).unwrap();
        assert_eq!(state.chart_generation, 2);
    }

    #[test]
    fn test_alerts_accumulate() {
        let mut state = DashboardState::new();
        state.alert("first");
        state.apply(ViewUpdate::Alert("second".to_string()));
        assert_eq!(state.alerts.len(), 2);
        assert_eq!(state.latest_alert(), Some("second"));
    }
}

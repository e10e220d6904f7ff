use crate::domain::ports::ChartSeries;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

pub const SERIES_NAME: &str = "Portfolio Value (USD)";

/// Line chart of portfolio value over the snapshot labels.
///
/// The plot id carries `generation`, so a reload discards the previous
/// chart state (zoom, pan) instead of layering over it.
pub fn render_portfolio_chart(
    ui: &mut egui::Ui,
    series: Option<&ChartSeries>,
    generation: u64,
    height: f32,
) {
    let Some(series) = series.filter(|s| !s.is_empty()) else {
        ui.label(
            egui::RichText::new("No portfolio history yet.")
                .italics()
                .color(DesignSystem::TEXT_MUTED),
        );
        return;
    };

    let labels = series.labels.clone();
    let line = Line::new(SERIES_NAME, PlotPoints::from(chart_points(series)))
        .color(DesignSystem::ACCENT_PRIMARY)
        .width(2.0);

    Plot::new(format!("portfolio_chart_{}", generation))
        .height(height)
        .show_grid([false, true])
        .x_axis_formatter(move |mark, _range| axis_label(&labels, mark.value))
        .y_axis_formatter(|mark, _range| format!("${}", mark.value))
        .show(ui, |plot_ui| {
            plot_ui.line(line);
        });
}

/// Index-based points. Non-finite values are left out of the line.
pub fn chart_points(series: &ChartSeries) -> Vec<[f64; 2]> {
    series
        .values
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_finite())
        .map(|(i, value)| [i as f64, *value])
        .collect()
}

/// Label for an x grid mark; marks between points get none.
pub fn axis_label(labels: &[String], position: f64) -> String {
    if position < 0.0 || position.fract() != 0.0 {
        return String::new();
    }
    labels.get(position as usize).cloned().unwrap_or_default()
}

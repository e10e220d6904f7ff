//! Plain-text rendering of the dashboard for the headless report.

use crate::domain::ports::{PlClass, TextTarget, TradeRow};
use crate::interfaces::view_models::DashboardState;
use std::fmt::Write;

pub fn render_report(state: &DashboardState) -> String {
    let mut out = String::new();

    for target in TextTarget::ALL {
        let _ = writeln!(out, "{}", state.text(target).unwrap_or("—"));
    }

    let _ = writeln!(out);
    match &state.chart {
        Some(series) if !series.is_empty() => {
            let _ = writeln!(out, "Portfolio Value (USD)");
            let width = series.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
            for (label, value) in series.labels.iter().zip(&series.values) {
                let _ = writeln!(out, "  {:<width$}  ${}", label, value);
            }
        }
        _ => {
            let _ = writeln!(out, "Portfolio Value (USD): no data");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Recent trades ({})", state.trades.len());
    if !state.trades.is_empty() {
        out.push_str(&render_trades_table(&state.trades));
    }

    out
}

/// Column-aligned table. Losing rows are marked with a trailing `-`.
pub fn render_trades_table(rows: &[TradeRow]) -> String {
    let mut widths = TradeRow::HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &TradeRow::HEADERS, &widths, "");
    for row in rows {
        let marker = match row.pl_class {
            PlClass::Positive => "",
            PlClass::Negative => " -",
        };
        push_line(&mut out, &row.cells(), &widths, marker);
    }
    out
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize], suffix: &str) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}{}", line.trim_end(), suffix);
}

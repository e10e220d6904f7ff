use crate::domain::ports::TradeRow;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

pub fn render_trades_table(ui: &mut egui::Ui, rows: &[TradeRow], max_height: f32) {
    if rows.is_empty() {
        ui.label(
            egui::RichText::new("No trades to show.")
                .italics()
                .color(DesignSystem::TEXT_MUTED),
        );
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("trades_scroll")
        .max_height(max_height)
        .show(ui, |ui| {
            egui::Grid::new("trades_grid")
                .striped(true)
                .num_columns(TradeRow::HEADERS.len())
                .spacing([20.0, 8.0])
                .show(ui, |ui| {
                    for header in TradeRow::HEADERS {
                        ui.label(
                            egui::RichText::new(header)
                                .size(11.0)
                                .strong()
                                .color(DesignSystem::TEXT_SECONDARY),
                        );
                    }
                    ui.end_row();

                    for row in rows {
                        ui.label(&row.date);
                        ui.label(egui::RichText::new(&row.symbol).strong());
                        ui.label(&row.side);
                        ui.label(&row.qty);
                        ui.label(&row.entry);
                        ui.label(&row.exit);
                        ui.colored_label(DesignSystem::pl_color(row.pl_class), &row.pl);
                        ui.end_row();
                    }
                });
        });
}

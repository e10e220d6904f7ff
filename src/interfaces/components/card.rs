use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Card container with standard styling
pub struct Card {
    min_width: f32,
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}

impl Card {
    pub fn new() -> Self {
        Self { min_width: 0.0 }
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width;
        self
    }

    pub fn show<R>(
        self,
        ui: &mut egui::Ui,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> egui::InnerResponse<R> {
        DesignSystem::card_frame().show(ui, |ui| {
            if self.min_width > 0.0 {
                ui.set_min_width(self.min_width);
            }

            add_contents(ui)
        })
    }
}

/// One of the three summary texts. Shows a placeholder until the first load lands.
pub fn render_summary_card(ui: &mut egui::Ui, text: Option<&str>, color: egui::Color32) {
    Card::new().min_width(220.0).show(ui, |ui| {
        match text {
            Some(text) => ui.label(egui::RichText::new(text).size(18.0).strong().color(color)),
            None => ui.label(
                egui::RichText::new("Loading…")
                    .size(18.0)
                    .italics()
                    .color(DesignSystem::TEXT_MUTED),
            ),
        };
    });
}

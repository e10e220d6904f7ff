use crate::domain::ports::TextTarget;
use crate::interfaces::channel_view::{LoadWorker, ViewUpdate};
use crate::interfaces::components::card::render_summary_card;
use crate::interfaces::components::chart_panel::{SERIES_NAME, render_portfolio_chart};
use crate::interfaces::components::trades_table::render_trades_table;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::DashboardState;
use crossbeam_channel::Receiver;
use eframe::egui;
use std::collections::VecDeque;
use tracing::{error, info};

const MAX_LOG_LINES: usize = 1000;

pub struct DashboardApp {
    title: String,
    worker: LoadWorker,
    log_rx: Receiver<String>,
    state: DashboardState,
    logs: VecDeque<String>,
    logs_collapsed: bool,
    loading: bool,
    open_alert: Option<String>,
}

impl DashboardApp {
    /// Queues the initial load right away.
    pub fn new(title: impl Into<String>, worker: LoadWorker, log_rx: Receiver<String>) -> Self {
        let mut app = Self {
            title: title.into(),
            worker,
            log_rx,
            state: DashboardState::new(),
            logs: VecDeque::new(),
            logs_collapsed: true,
            loading: false,
            open_alert: None,
        };
        app.refresh();
        app
    }

    pub fn refresh(&mut self) {
        if self.loading {
            return;
        }
        match self.worker.request_load() {
            Ok(()) => self.loading = true,
            Err(e) => error!("{}", e),
        }
    }

    /// Drains pending log lines and view updates
    fn sync(&mut self) {
        while let Ok(msg) = self.log_rx.try_recv() {
            self.logs.push_back(msg);
        }
        while self.logs.len() > MAX_LOG_LINES {
            self.logs.pop_front();
        }

        while let Some(update) = self.worker.poll_update() {
            match &update {
                ViewUpdate::Alert(message) => self.open_alert = Some(message.clone()),
                ViewUpdate::Finished(outcome) => {
                    info!("Dashboard load finished: {:?}", outcome);
                    self.loading = false;
                }
                _ => {}
            }
            self.state.apply(update);
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel")
            .frame(
                egui::Frame::NONE
                    .fill(DesignSystem::BG_CARD)
                    .inner_margin(egui::Margin::symmetric(16, 10)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(&self.title)
                            .size(20.0)
                            .strong()
                            .color(DesignSystem::TEXT_PRIMARY),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let refresh = ui.add_enabled(
                            !self.loading,
                            egui::Button::new(egui::RichText::new("Refresh").strong()),
                        );
                        if refresh.clicked() {
                            self.refresh();
                        }
                        if self.loading {
                            ui.spinner();
                        }
                    });
                });
            });
    }

    fn render_logs_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("logs_panel")
            .resizable(true)
            .default_height(200.0)
            .min_height(30.0)
            .show_animated(ctx, !self.logs_collapsed, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("logs_scroll")
                    .auto_shrink([false, true])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for msg in &self.logs {
                            let color = if msg.contains("ERROR") {
                                DesignSystem::DANGER
                            } else if msg.contains("WARN") {
                                DesignSystem::WARNING
                            } else {
                                DesignSystem::TEXT_SECONDARY
                            };
                            ui.label(egui::RichText::new(msg.trim_end()).size(10.0).color(color));
                        }
                    });
            });

        egui::TopBottomPanel::bottom("logs_toggle")
            .exact_height(25.0)
            .frame(
                egui::Frame::NONE
                    .fill(DesignSystem::BG_CARD)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let button_text = if self.logs_collapsed { "Show logs" } else { "Hide logs" };
                    if ui
                        .button(
                            egui::RichText::new(button_text)
                                .size(11.0)
                                .color(DesignSystem::TEXT_SECONDARY),
                        )
                        .clicked()
                    {
                        self.logs_collapsed = !self.logs_collapsed;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("{} messages", self.logs.len()))
                                .size(10.0)
                                .color(DesignSystem::TEXT_MUTED),
                        );
                    });
                });
            });
    }

    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.open_alert.clone() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Dashboard")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(DesignSystem::SPACING_SMALL);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.open_alert = None;
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(DesignSystem::theme());
        self.sync();

        self.render_header(ctx);
        self.render_logs_panel(ctx);

        egui::CentralPanel::default()
            .frame(DesignSystem::main_frame())
            .show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| {
                    let colors = [
                        DesignSystem::TEXT_PRIMARY,
                        DesignSystem::ACCENT_PRIMARY,
                        DesignSystem::TEXT_SECONDARY,
                    ];
                    for (target, color) in TextTarget::ALL.into_iter().zip(colors) {
                        render_summary_card(ui, self.state.text(target), color);
                        ui.add_space(DesignSystem::SPACING_SMALL);
                    }
                });

                ui.add_space(DesignSystem::SPACING_LARGE);
                ui.label(egui::RichText::new(SERIES_NAME).size(16.0).strong());
                ui.add_space(DesignSystem::SPACING_SMALL);
                render_portfolio_chart(
                    ui,
                    self.state.chart.as_ref(),
                    self.state.chart_generation,
                    280.0,
                );

                ui.add_space(DesignSystem::SPACING_LARGE);
                ui.label(egui::RichText::new("Recent Trades").size(16.0).strong());
                ui.add_space(DesignSystem::SPACING_SMALL);
                let table_height = ui.available_height().max(120.0);
                render_trades_table(ui, &self.state.trades, table_height);
            });

        self.render_alert(ctx);
    }
}

/// Spacing tweaks applied once at startup
pub fn configure_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    ctx.set_style(style);
}

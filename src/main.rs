use portfolio_dashboard::application::dashboard::DashboardLoader;
use portfolio_dashboard::config::Config;
use portfolio_dashboard::infrastructure::ReqwestTransport;
use portfolio_dashboard::interfaces::channel_view::{LoadWorker, Notifier};
use portfolio_dashboard::interfaces::ui::{DashboardApp, configure_style};
use std::sync::Arc;

use tracing::{Level, info};
use tracing_subscriber::prelude::*;

// A writer that sends logs to the UI via a crossbeam channel
struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).to_string();
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// Cloneable wrapper for MakeWriter
#[derive(Clone)]
struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 0. Load Env (before starting anything)
    dotenvy::dotenv().ok();

    // 1. Log channel for the in-app log panel
    let (log_tx, log_rx) = crossbeam_channel::unbounded();

    // 2. Logging (Stdout + UI)
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .pretty();

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory { sender: log_tx })
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    // 3. Config
    let config = Config::from_env()?;
    info!(
        "Initializing dashboard for {}/{}@{}",
        config.owner, config.repo, config.branch
    );
    let title = format!("Portfolio Dashboard: {}/{}", config.owner, config.repo);

    let loader = DashboardLoader::new(&config, Arc::new(ReqwestTransport::new()));

    // 4. Run UI (Blocks Main Thread). The loader thread starts once the
    // egui context exists so it can wake the UI after each update.
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title(title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        "Portfolio Dashboard",
        native_options,
        Box::new(move |cc| {
            configure_style(&cc.egui_ctx);
            let ctx = cc.egui_ctx.clone();
            let notifier: Notifier = Arc::new(move || ctx.request_repaint());
            let worker = LoadWorker::spawn(loader, Some(notifier))?;
            Ok(Box::new(DashboardApp::new(title, worker, log_rx)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}

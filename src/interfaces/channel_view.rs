//! Bridge between the background loader and the UI thread.
//!
//! The loader runs on a tokio runtime owned by a dedicated thread. It writes
//! into a [`ChannelView`], which forwards every call as a [`ViewUpdate`] over a
//! crossbeam channel that the UI drains each frame.

use crate::application::dashboard::{DashboardLoader, LoadOutcome};
use crate::domain::errors::{DashboardError, Result};
use crate::domain::ports::{ChartSeries, DashboardView, TextTarget, TradeRow};
use anyhow::Context;
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use tracing::{info, warn};

/// Called after each update is queued, e.g. to request a repaint
pub type Notifier = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone)]
pub enum ViewUpdate {
    Text(TextTarget, String),
    Chart(ChartSeries),
    Table(Vec<TradeRow>),
    Alert(String),
    Finished(LoadOutcome),
}

pub struct ChannelView {
    sender: Sender<ViewUpdate>,
    notifier: Option<Notifier>,
}

impl ChannelView {
    pub fn new(sender: Sender<ViewUpdate>, notifier: Option<Notifier>) -> Self {
        Self { sender, notifier }
    }

    fn send(&self, target: &str, update: ViewUpdate) -> Result<()> {
        self.sender
            .send(update)
            .map_err(|_| DashboardError::Render {
                target: target.to_string(),
                reason: "view channel closed".to_string(),
            })?;
        if let Some(notify) = &self.notifier {
            notify();
        }
        Ok(())
    }

    pub fn finish(&self, outcome: LoadOutcome) {
        if self.send("load status", ViewUpdate::Finished(outcome)).is_err() {
            warn!("Load finished ({:?}) but the view is gone", outcome);
        }
    }
}

impl DashboardView for ChannelView {
    fn set_text(&mut self, target: TextTarget, value: &str) -> Result<()> {
        self.send(target.id(), ViewUpdate::Text(target, value.to_string()))
    }

    fn render_chart(&mut self, series: ChartSeries) -> Result<()> {
        self.send("portfolioChart", ViewUpdate::Chart(series))
    }

    fn render_table(&mut self, rows: Vec<TradeRow>) -> Result<()> {
        self.send("tradesTable", ViewUpdate::Table(rows))
    }

    fn alert(&mut self, message: &str) {
        if self.send("alert", ViewUpdate::Alert(message.to_string())).is_err() {
            warn!("Alert dropped, view is gone: {}", message);
        }
    }
}

/// UI-side handle to the background loader thread
pub struct LoadWorker {
    requests: Sender<()>,
    updates: Receiver<ViewUpdate>,
}

impl LoadWorker {
    /// Starts the loader thread. Load requests are served one at a time in
    /// arrival order; the thread exits once the handle is dropped.
    pub fn spawn(loader: DashboardLoader, notifier: Option<Notifier>) -> anyhow::Result<Self> {
        let (request_tx, request_rx) = crossbeam_channel::unbounded::<()>();
        let (update_tx, update_rx) = crossbeam_channel::unbounded();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build Tokio runtime")?;

        std::thread::Builder::new()
            .name("dashboard-loader".to_string())
            .spawn(move || {
                info!("Background Runtime Started.");
                let mut view = ChannelView::new(update_tx, notifier);
                while request_rx.recv().is_ok() {
                    let outcome = runtime.block_on(loader.load(&mut view));
                    view.finish(outcome);
                }
                info!("Load requests closed, loader thread exiting");
            })
            .context("Failed to spawn loader thread")?;

        Ok(Self {
            requests: request_tx,
            updates: update_rx,
        })
    }

    pub fn request_load(&self) -> anyhow::Result<()> {
        self.requests
            .send(())
            .map_err(|e| anyhow::anyhow!("Failed to send load request: {}", e))
    }

    /// Non-blocking; `None` when nothing is queued.
    pub fn poll_update(&self) -> Option<ViewUpdate> {
        match self.updates.try_recv() {
            Ok(update) => Some(update),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!("Loader thread has stopped");
                None
            }
        }
    }

    pub fn updates(&self) -> &Receiver<ViewUpdate> {
        &self.updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_after_receiver_dropped_is_render_error() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut view = ChannelView::new(tx, None);

        let err = view
            .set_text(TextTarget::LastUpdated, "Updated: —")
            .unwrap_err();
        assert!(matches!(err, DashboardError::Render { ref target, .. } if target == "lastUpdated"));
    }

    #[test]
    fn test_notifier_runs_per_update() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut view = ChannelView::new(
            tx,
            Some(Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })),
        );

        view.render_table(Vec::new()).unwrap();
        view.alert("boom");
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert!(matches!(rx.try_recv(), Ok(ViewUpdate::Table(_))));
        assert!(matches!(rx.try_recv(), Ok(ViewUpdate::Alert(ref m)) if m == "boom"));
    }
}

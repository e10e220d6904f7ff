use portfolio_dashboard::application::dashboard::{DashboardLoader, LoadOutcome};
use portfolio_dashboard::config::Config;
use portfolio_dashboard::domain::ports::TextTarget;
use portfolio_dashboard::infrastructure::MockTransport;
use portfolio_dashboard::interfaces::channel_view::{LoadWorker, ViewUpdate};
use portfolio_dashboard::interfaces::view_models::DashboardState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const PORTFOLIO_URL: &str = "https://raw.githubusercontent.com/octocat/journal/main/data/portfolio.csv";
const TRADES_URL: &str = "https://raw.githubusercontent.com/octocat/journal/main/data/trades.csv";

/// Applies updates until the loader reports the end of one load
fn drain_until_finished(worker: &LoadWorker, state: &mut DashboardState) -> LoadOutcome {
    loop {
        let update = worker
            .updates()
            .recv_timeout(Duration::from_secs(5))
            .expect("loader thread went quiet");
        if let ViewUpdate::Finished(outcome) = update {
            return outcome;
        }
        state.apply(update);
    }
}

fn spawn_worker(transport: MockTransport, notifier_hits: Arc<AtomicUsize>) -> LoadWorker {
    let config = Config::for_repo("octocat", "journal").with_goal(2000.0);
    let loader = DashboardLoader::new(&config, Arc::new(transport));
    LoadWorker::spawn(
        loader,
        Some(Arc::new(move || {
            notifier_hits.fetch_add(1, Ordering::SeqCst);
        })),
    )
    .expect("worker starts")
}

#[test]
fn test_worker_streams_a_full_load() {
    let transport = MockTransport::new()
        .with_body(PORTFOLIO_URL, "date,value\n2024-01-01,1000\n2024-01-02,1500\n")
        .with_body(TRADES_URL, "date,symbol,side,qty,entry,exit,pl\n2024-01-02,AAPL,BUY,1,1,2,1\n");
    let hits = Arc::new(AtomicUsize::new(0));
    let worker = spawn_worker(transport, hits.clone());
    let mut state = DashboardState::new();

    worker.request_load().unwrap();
    let outcome = drain_until_finished(&worker, &mut state);

    assert_eq!(outcome, LoadOutcome::Rendered);
    assert_eq!(state.text(TextTarget::GoalProgress), Some("Goal: $2,000 (75.0%)"));
    assert_eq!(state.trades.len(), 1);
    // 3 texts, chart, table; the finish notification may still be in flight
    assert!(hits.load(Ordering::SeqCst) >= 5);
    assert!(worker.poll_update().is_none());
}

#[test]
fn test_worker_serves_requests_in_order() {
    let transport = MockTransport::new();
    let worker = spawn_worker(transport.clone(), Arc::new(AtomicUsize::new(0)));
    let mut state = DashboardState::new();

    worker.request_load().unwrap();
    worker.request_load().unwrap();

    assert_eq!(drain_until_finished(&worker, &mut state), LoadOutcome::Failed);
    assert_eq!(drain_until_finished(&worker, &mut state), LoadOutcome::Failed);
    assert_eq!(state.alerts.len(), 2);
    assert_eq!(transport.requests(), [PORTFOLIO_URL, PORTFOLIO_URL]);
}

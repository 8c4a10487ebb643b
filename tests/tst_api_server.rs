use axum_test::TestServer;
use nifty_trap_detector::api_server_axum::{build_router, AppState};
use nifty_trap_detector::nse::{
    FetchError,
    OptionChainRow,
    OptionChainSnapshot,
    OptionChainSource,
    OptionLeg,
    SnapshotCache,
};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned option chain source that counts fetches
struct StubSource {
    snapshot: Option<OptionChainSnapshot>,
    calls: Arc<AtomicUsize>,
}

impl StubSource {
    fn ok(snapshot: OptionChainSnapshot) -> Self {
        Self { snapshot: Some(snapshot), calls: Arc::new(AtomicUsize::new(0)) }
    }

    fn timing_out() -> Self {
        Self { snapshot: None, calls: Arc::new(AtomicUsize::new(0)) }
    }
}

impl OptionChainSource for StubSource {
    async fn fetch_option_chain(&self) -> Result<OptionChainSnapshot, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.snapshot.clone().ok_or(FetchError::Timeout)
    }
}

fn leg(oi: f64, chg: f64) -> Option<OptionLeg> {
    Some(OptionLeg::new(oi, chg))
}

fn nifty_snapshot() -> OptionChainSnapshot {
    OptionChainSnapshot {
        rows: vec![
            OptionChainRow::new(18400.0, leg(1000.0, -250.0), leg(9000.0, 100.0)),
            OptionChainRow::new(18500.0, leg(7000.0, 100.0), leg(2000.0, -10.0)),
            OptionChainRow::new(18600.0, leg(3000.0, 0.0), None),
        ],
        spot_price: 18450.0,
        timestamp: Some("19-Oct-2026 15:30:00".to_string()),
    }
}

fn test_server(source: StubSource, ttl: Duration) -> TestServer {
    let state = AppState::new(source, SnapshotCache::new(ttl));
    TestServer::new(build_router(state)).expect("start test server")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_analysis_endpoint() {
        let server = test_server(StubSource::ok(nifty_snapshot()), Duration::from_secs(60));

        let response = server.get("/api/analysis").await;
        assert_eq!(response.status_code(), 200);

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert!(body["error"].is_null());

        let data = &body["data"];
        assert_eq!(data["status"], "loaded");
        assert_eq!(data["spot_price"], 18450.0);
        assert_eq!(data["support"], 18400.0);
        assert_eq!(data["resistance"], 18500.0);
        assert_eq!(data["traps"].as_array().unwrap().len(), 1);
        assert_eq!(data["traps"][0]["option_type"], "CE");
        assert_eq!(
            data["traps"][0]["description"],
            "Call Trap at 18400 CE — OI dropped -25.0%"
        );
        assert_eq!(data["suggestion"], "Suggest: Iron Condor between **18400 - 18500**");
        assert_eq!(data["strategy"]["kind"], "iron_condor");
    }

    #[tokio::test]
    async fn test_analysis_endpoint_on_fetch_failure() {
        let server = test_server(StubSource::timing_out(), Duration::from_secs(60));

        let body: Value = server.get("/api/analysis").await.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["data"]["status"], "failed");
        assert_eq!(body["data"]["message"], "Failed to load option chain data.");
        assert_eq!(body["error"], "Error fetching data: Request timed out");
    }

    #[tokio::test]
    async fn test_dashboard_html() {
        let server = test_server(StubSource::ok(nifty_snapshot()), Duration::from_secs(60));

        let response = server.get("/").await;
        assert_eq!(response.status_code(), 200);

        let html = response.text();
        assert!(html.contains("Nifty Spot Price: 18450"));
        assert!(html.contains("Support (Max Put OI):</strong> 18400"));
        assert!(html.contains("Resistance (Max Call OI):</strong> 18500"));
        assert!(html.contains("Call Trap at 18400 CE — OI dropped -25.0%"));
        assert!(html.contains("Iron Condor between <strong>18400 - 18500</strong>"));
    }

    #[tokio::test]
    async fn test_dashboard_failure_message() {
        let server = test_server(StubSource::timing_out(), Duration::from_secs(60));

        let html = server.get("/").await.text();
        assert!(html.contains("Failed to load option chain data."));
        assert!(!html.contains("Strategy Suggestion"));
    }

    #[tokio::test]
    async fn test_requests_share_cache() {
        let source = StubSource::ok(nifty_snapshot());
        let calls = Arc::clone(&source.calls);
        let server = test_server(source, Duration::from_secs(60));

        let first: Value = server.get("/api/analysis").await.json();
        let second = server.get("/").await.text();
        let third: Value = server.get("/api/analysis").await.json();

        assert_eq!(first["data"]["from_cache"], false);
        assert!(second.contains("(cached)"));
        assert_eq!(third["data"]["from_cache"], true);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let source = StubSource::timing_out();
        let calls = Arc::clone(&source.calls);
        let server = test_server(source, Duration::from_secs(60));

        server.get("/api/analysis").await;
        let body: Value = server.get("/api/analysis").await.json();
        assert_eq!(body["success"], false);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_health() {
        let server = test_server(StubSource::ok(nifty_snapshot()), Duration::from_secs(30));

        let body: Value = server.get("/api/health").await.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["cache_ttl_secs"], 30);
    }
}

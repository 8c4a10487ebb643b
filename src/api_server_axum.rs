use crate::app_config::AppConfig;
use crate::nse::report::{self, Report};
use crate::nse::{NSEClient, OptionChainSource, SnapshotCache, nse_client};
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    response::{Html, Json},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;

// -----------------------------------------------
// API RESPONSE MODELS
// -----------------------------------------------

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub processing_time_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache_ttl_secs: u64,
}

// -----------------------------------------------
// APPLICATION STATE
// -----------------------------------------------

pub struct AppState<S> {
    source: Arc<S>,
    cache: Arc<SnapshotCache>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<S> AppState<S>
where
    S: OptionChainSource + Send + Sync + 'static,
{
    pub fn new(source: S, cache: SnapshotCache) -> Self {
        Self {
            source: Arc::new(source),
            cache: Arc::new(cache),
        }
    }

    async fn report(&self) -> Report {
        let outcome = nse_client::load_snapshot(self.source.as_ref(), &self.cache).await;
        Report::build(outcome)
    }
}

// -----------------------------------------------
// API HANDLERS
// -----------------------------------------------

/// GET / - HTML dashboard
async fn get_dashboard<S>(State(app_state): State<AppState<S>>) -> Html<String>
where
    S: OptionChainSource + Send + Sync + 'static,
{
    let report = app_state.report().await;
    Html(report::render_html(&report))
}

/// GET /api/analysis - Spot, levels, traps and strategy as JSON
async fn get_analysis<S>(State(app_state): State<AppState<S>>) -> Json<ApiResponse<Report>>
where
    S: OptionChainSource + Send + Sync + 'static,
{
    let start_time = Instant::now();
    let report = app_state.report().await;

    let error = match &report {
        Report::Loaded(_) => None,
        Report::Failed { message, error } => Some(error.clone().unwrap_or_else(|| message.clone())),
    };

    Json(ApiResponse {
        success: report.is_loaded(),
        data: Some(report),
        error,
        processing_time_ms: Some(start_time.elapsed().as_millis() as u64),
    })
}

/// GET /api/health
async fn get_health<S>(State(app_state): State<AppState<S>>) -> Json<HealthResponse>
where
    S: OptionChainSource + Send + Sync + 'static,
{
    Json(HealthResponse {
        status: "ok",
        cache_ttl_secs: app_state.cache.ttl().as_secs(),
    })
}

// -----------------------------------------------
// SERVER SETUP
// -----------------------------------------------

pub fn build_router<S>(app_state: AppState<S>) -> Router
where
    S: OptionChainSource + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(get_dashboard::<S>))
        .route("/api/analysis", get(get_analysis::<S>))
        .route("/api/health", get(get_health::<S>))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(app_state)
}

pub async fn start_server(config: &AppConfig) -> Result<()> {
    let app_state = AppState::new(NSEClient::new()?, SnapshotCache::new(config.cache_ttl));
    let app = build_router(app_state);

    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, "Dashboard server listening");
    println!("Nifty Option Trap Detector running on http://{}", addr);
    println!("Available endpoints:");
    println!("   GET  /");
    println!("   GET  /api/analysis");
    println!("   GET  /api/health");
    println!();

    axum::serve(listener, app).await?;
    Ok(())
}

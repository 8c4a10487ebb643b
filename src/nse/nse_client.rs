use super::cache::SnapshotCache;
use super::config;
use super::error::FetchError;
use super::models::{OptionChainResponse, OptionChainSnapshot};
use crate::utility::timing::Timer;
use anyhow::{Context, Result};
use rand::{seq::SliceRandom, thread_rng};
use reqwest::{Client, header};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Anything that can produce an option chain snapshot
pub trait OptionChainSource {
    fn fetch_option_chain(&self) -> impl Future<Output = Result<OptionChainSnapshot, FetchError>> + Send;
}

// -----------------------------------------------
// CLIENT WRAPPER WITH SESSION STATE
// -----------------------------------------------
pub struct NSEClient {
    client: Client,
    base_url: String,
    warmed_up: RwLock<bool>,
}

impl NSEClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(config::NSE_BASE_URL)
    }

    /// Client against another host (mirrors, mock servers)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::with_base_url_and_timeout(base_url, config::HTTP_TIMEOUT)
    }

    pub fn with_base_url_and_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
            warmed_up: RwLock::new(false),
        })
    }

    pub fn option_chain_url(&self) -> String {
        config::nse_option_chain_url(&self.base_url, config::NSE_SYMBOL)
    }

    /// Warmup NSE session (only once per client)
    async fn warmup_if_needed(&self) -> Result<(), FetchError> {
        if *self.warmed_up.read().await {
            return Ok(());
        }

        let mut warmed = self.warmed_up.write().await;
        if !*warmed {
            debug!(base_url = %self.base_url, "Warming up NSE session");
            let res = self
                .client
                .get(self.base_url.as_str())
                .header(header::ACCEPT, config::HEADER_ACCEPT_HTML)
                .send()
                .await?;
            // Status is only logged; the API call needs the cookies, not the page
            debug!(status = res.status().as_u16(), "Warm-up response");

            tokio::time::sleep(Duration::from_millis(config::WARMUP_DELAY_MS)).await;
            *warmed = true;
        }

        Ok(())
    }

    /// Single GET with status and body validation, no retry
    async fn fetch_json(&self, url: &str) -> Result<String, FetchError> {
        self.warmup_if_needed().await?;

        let res = self
            .client
            .get(url)
            .header(header::REFERER, config::HEADER_REFERER)
            .header("X-Requested-With", config::HEADER_X_REQUESTED_WITH)
            .send()
            .await?;

        let status = res.status();
        debug!(%url, status = status.as_u16(), "NSE response");

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status,
                preview: preview(&body),
            });
        }

        let text = res.text().await?;

        let trimmed = text.trim();
        if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
            return Err(FetchError::NonJsonResponse(preview(&text)));
        }

        Ok(text)
    }
}

impl OptionChainSource for NSEClient {
    async fn fetch_option_chain(&self) -> Result<OptionChainSnapshot, FetchError> {
        let url = self.option_chain_url();
        let text = self.fetch_json(&url).await?;
        let response: OptionChainResponse = serde_json::from_str(&text)?;
        Ok(response.into())
    }
}

/// Result of one fetch cycle: the snapshot (possibly empty) and any failure
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub snapshot: OptionChainSnapshot,
    pub error: Option<String>,
    pub from_cache: bool,
}

impl FetchOutcome {
    fn fresh(snapshot: OptionChainSnapshot) -> Self {
        Self { snapshot, error: None, from_cache: false }
    }

    fn cached(snapshot: OptionChainSnapshot) -> Self {
        Self { snapshot, error: None, from_cache: true }
    }

    fn failed(err: &FetchError) -> Self {
        Self {
            snapshot: OptionChainSnapshot::empty(),
            error: Some(format!("Error fetching data: {}", err)),
            from_cache: false,
        }
    }
}

/// Fetch through the cache; failures degrade to an empty snapshot
///
/// Only non-empty successful snapshots are memoised.
pub async fn load_snapshot<S>(source: &S, cache: &SnapshotCache) -> FetchOutcome
where
    S: OptionChainSource + Sync,
{
    if let Some(snapshot) = cache.get() {
        debug!(rows = snapshot.rows.len(), "Serving option chain from cache");
        return FetchOutcome::cached(snapshot);
    }

    let timer = Timer::start("fetch option chain");
    let result = source.fetch_option_chain().await;
    timer.stop();

    match result {
        Ok(snapshot) => {
            if snapshot.is_empty() {
                warn!("Option chain fetch returned no rows");
            } else {
                info!(
                    rows = snapshot.rows.len(),
                    spot = snapshot.spot_price,
                    "Fetched option chain"
                );
                cache.insert(snapshot.clone());
            }
            FetchOutcome::fresh(snapshot)
        }
        Err(err) => {
            error!(error = %err, "Option chain fetch failed");
            FetchOutcome::failed(&err)
        }
    }
}

fn preview(body: &str) -> String {
    body.chars().take(config::BODY_PREVIEW_CHARS).collect()
}

// -----------------------------------------------
// HTTP CLIENT BUILDER
// -----------------------------------------------
fn build_client(timeout: Duration) -> Result<Client> {
    let mut headers = header::HeaderMap::new();

    let lang = config::ACCEPT_LANGUAGES
        .choose(&mut thread_rng())
        .copied()
        .unwrap_or("en-US,en;q=0.9");
    headers.insert(header::ACCEPT_LANGUAGE, header::HeaderValue::from_str(lang)?);
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("*/*"));

    Client::builder()
        .default_headers(headers)
        .cookie_store(true)
        .user_agent(config::USER_AGENT)
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

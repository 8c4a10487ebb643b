use super::cache::SnapshotCache;
use super::nse_client::{self, NSEClient, OptionChainSource};
use super::report::{self, Report};
use crate::app_config::AppConfig;

use anyhow::Result;
use colored::Colorize;
use tracing::info;

/// NSE command handler for the terminal modes
pub struct NSECommands;

impl NSECommands {
    /// One fetch, one analysis, one render
    pub async fn run_cycle<S>(source: &S, cache: &SnapshotCache) -> Report
    where
        S: OptionChainSource + Sync,
    {
        let outcome = nse_client::load_snapshot(source, cache).await;
        Report::build(outcome)
    }

    /// Cycle that always goes to the source, for periodic refresh
    pub async fn refresh_cycle<S>(source: &S, cache: &SnapshotCache) -> Report
    where
        S: OptionChainSource + Sync,
    {
        cache.clear();
        Self::run_cycle(source, cache).await
    }

    /// Single analysis printed to the terminal
    pub async fn run_once(config: &AppConfig) -> Result<()> {
        let client = NSEClient::new()?;
        let cache = SnapshotCache::new(config.cache_ttl);

        println!("{}", "Fetching Nifty Option Chain from NSE...".cyan());
        let report = Self::run_cycle(&client, &cache).await;
        report::print_report(&report);

        Ok(())
    }

    /// Refresh on a fixed interval until Ctrl-C
    pub async fn run_watch(config: &AppConfig) -> Result<()> {
        let client = NSEClient::new()?;
        let cache = SnapshotCache::new(config.cache_ttl);

        println!(
            "{} Refreshing every {}s (Ctrl-C to stop)",
            "ℹ".blue(),
            config.refresh_interval.as_secs()
        );

        let mut ticker = tokio::time::interval(config.refresh_interval);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = Self::refresh_cycle(&client, &cache).await;
                    report::print_report(&report);
                }
                _ = &mut ctrl_c => {
                    info!("Watch mode stopped");
                    println!("{}", "Stopped.".green().bold());
                    return Ok(());
                }
            }
        }
    }
}

use crate::nse::config;
use anyhow::{Result, bail};
use colored::Colorize;
use std::str::FromStr;
use std::time::Duration;

/// How the binary runs a fetch/analysis cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One cycle, printed to the terminal
    Once,
    /// Repeated cycles on a fixed interval
    Watch,
    /// Axum dashboard, one cycle per request
    Server,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "once" => Ok(Mode::Once),
            "watch" => Ok(Mode::Watch),
            "server" => Ok(Mode::Server),
            other => bail!("Invalid mode '{}'", other),
        }
    }
}

/// Application configuration handler
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: String,
    pub port: u16,
    pub cache_ttl: Duration,
    pub refresh_interval: Duration,
}

impl AppConfig {
    /// Create new configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup (env, test map, ...)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("NSE_PORT")
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(config::DEFAULT_PORT);

        let cache_ttl_secs = lookup("NSE_CACHE_TTL_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(config::DEFAULT_CACHE_TTL_SECS);

        let refresh_secs = lookup("NSE_REFRESH_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(config::DEFAULT_REFRESH_SECS)
            .max(config::MIN_REFRESH_SECS);

        Self {
            mode: lookup("NSE_MODE").unwrap_or_else(|| "once".to_string()),
            port,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            refresh_interval: Duration::from_secs(refresh_secs),
        }
    }

    /// Parsed execution mode
    pub fn mode(&self) -> Result<Mode> {
        self.mode.parse()
    }

    /// Print usage for an unknown mode
    pub fn print_usage(&self) {
        eprintln!("{} Invalid mode '{}'. Use 'once', 'watch' or 'server'", "✗".red(), self.mode);
        eprintln!("Set NSE_MODE environment variable to control execution mode");
        eprintln!("Examples:");
        eprintln!("  NSE_MODE=once cargo run                          # Single analysis");
        eprintln!("  NSE_MODE=watch NSE_REFRESH_SECS=60 cargo run     # Refresh every minute");
        eprintln!("  NSE_MODE=server NSE_PORT=3001 cargo run          # Dashboard on port 3001");
    }
}

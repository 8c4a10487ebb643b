use std::time::Duration;

// -----------------------------------------------
// NSE API ENDPOINTS
// -----------------------------------------------
pub const NSE_BASE_URL: &str = "https://www.nseindia.com";

// Only the NIFTY index chain is tracked
pub const NSE_SYMBOL: &str = "NIFTY";

pub fn nse_option_chain_url(base_url: &str, symbol: &str) -> String {
    format!(
        "{}/api/option-chain-indices?symbol={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(symbol)
    )
}

// -----------------------------------------------
// HTTP CLIENT CONFIG
// -----------------------------------------------
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                               AppleWebKit/537.36 (KHTML, like Gecko) \
                               Chrome/120.0.0.0 Safari/537.36";

pub const ACCEPT_LANGUAGES: &[&str] = &[
    "en-US,en;q=0.9",
    "en-GB,en;q=0.8",
    "en-IN,en;q=0.9",
];

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

// -----------------------------------------------
// SESSION WARMUP
// -----------------------------------------------
pub const WARMUP_DELAY_MS: u64 = 200;

// -----------------------------------------------
// HTTP HEADERS
// -----------------------------------------------
pub const HEADER_REFERER: &str = "https://www.nseindia.com/option-chain";
pub const HEADER_X_REQUESTED_WITH: &str = "XMLHttpRequest";
pub const HEADER_ACCEPT_HTML: &str = "text/html";

// Characters of a bad response body kept in error messages
pub const BODY_PREVIEW_CHARS: usize = 200;

// -----------------------------------------------
// ANALYSIS THRESHOLDS
// -----------------------------------------------

/// An OI change below this percentage of current OI is a trap
pub const TRAP_OI_DROP_PCT: f64 = -20.0;

/// Max distance of support and resistance from spot for an Iron Condor
pub const IRON_CONDOR_BAND: f64 = 100.0;

// -----------------------------------------------
// CACHE / REFRESH
// -----------------------------------------------
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;
pub const DEFAULT_REFRESH_SECS: u64 = 60;
pub const MIN_REFRESH_SECS: u64 = 5;
pub const DEFAULT_PORT: u16 = 3001;

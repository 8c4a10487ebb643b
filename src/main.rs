use anyhow::Result;
use colored::Colorize;
use nifty_trap_detector::nse::nse_commands::NSECommands;
use nifty_trap_detector::{AppConfig, Mode, api_server_axum, logging};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("{} Logging disabled: {:#}", "⚠".yellow(), e);
    }

    // ========================================
    // CONFIGURATION - from environment
    // ========================================
    let config = AppConfig::from_env();

    let mode = match config.mode() {
        Ok(mode) => mode,
        Err(_) => {
            config.print_usage();
            std::process::exit(1);
        }
    };

    tracing::info!(?mode, port = config.port, cache_ttl_secs = config.cache_ttl.as_secs(), "Starting");

    match mode {
        Mode::Once => NSECommands::run_once(&config).await?,
        Mode::Watch => NSECommands::run_watch(&config).await?,
        Mode::Server => {
            println!("{}", "=".repeat(60).blue());
            println!("{}", "Nifty Option Trap Detector Dashboard".green().bold());
            println!("{}", "=".repeat(60).blue());
            println!();
            api_server_axum::start_server(&config).await?
        }
    }

    Ok(())
}

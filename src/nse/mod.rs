pub mod analysis;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod nse_client;
pub mod nse_commands;
pub mod report;
pub mod strategy;

// Re-exports (public API)
pub use analysis::{analyze, check_trap, summarize_open_interest, AnalysisResult, OiSummary, TrapAlert};
pub use cache::SnapshotCache;
pub use error::FetchError;
pub use models::{OptionChainResponse, OptionChainRow, OptionChainSnapshot, OptionLeg, OptionSide};
pub use nse_client::{load_snapshot, FetchOutcome, NSEClient, OptionChainSource};
pub use report::{Dashboard, Report};
pub use strategy::{suggest_strategy, Strategy};

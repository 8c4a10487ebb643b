pub mod api_server_axum;
pub mod app_config;
pub mod logging;
pub mod nse;
pub mod utility;

// Re-exports for convenience
pub use app_config::{AppConfig, Mode};
pub use nse::{NSEClient, OptionChainRow, OptionChainSnapshot, OptionLeg, SnapshotCache};

//! Configuration structures and loading utilities.
//!
//! Every structure loads from environment variables via `from_env()` and
//! falls back to defaults for optional settings.

pub mod forecast;
pub mod metrics;
pub mod server;
pub mod upstream_client;

pub use forecast::*;
pub use metrics::*;
pub use server::*;
pub use upstream_client::*;

/// Serializes tests that modify process environment variables
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

//! Business logic and service layer modules.
//!
//! This module contains the upstream forecast client, the today-selection
//! and temperature classification logic, and metrics collection.

pub mod classifier;
pub mod error;
pub mod metrics;
pub mod nws_client;
pub mod short_forecast;

pub use classifier::*;
pub use error::*;
pub use metrics::*;
pub use nws_client::*;
pub use short_forecast::*;

//! Data models and schemas.
//!
//! Forecast domain types plus the request/response models of the HTTP API.

pub mod api;
pub mod forecast;

pub use api::*;
pub use forecast::*;

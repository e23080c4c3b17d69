//! Configuration for the upstream weather provider client
//!
//! Provides environment-based transport settings with defaults suited to
//! api.weather.gov.

use std::env;

/// Transport settings for the upstream client
#[derive(Debug, Clone)]
pub struct UpstreamClientConfig {
    /// Connection timeout (in seconds)
    pub connect_timeout_seconds: u64,

    /// Upper bound for a single HTTP exchange (in seconds), independent of
    /// the per-request deadline
    pub http_timeout_seconds: u64,

    /// Enable detailed logging
    pub enable_detailed_logging: bool,
}

impl Default for UpstreamClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: 3,
            http_timeout_seconds: 10,
            enable_detailed_logging: true,
        }
    }
}

impl UpstreamClientConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let connect_timeout_seconds = env::var("NWS_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.connect_timeout_seconds);

        let http_timeout_seconds = env::var("NWS_HTTP_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.http_timeout_seconds);

        let enable_detailed_logging = env::var("NWS_DETAILED_LOGGING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.enable_detailed_logging);

        Self {
            connect_timeout_seconds,
            http_timeout_seconds,
            enable_detailed_logging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_MUTEX;

    #[test]
    fn test_upstream_client_config_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap();

        unsafe {
            env::remove_var("NWS_CONNECT_TIMEOUT");
            env::remove_var("NWS_HTTP_TIMEOUT");
            env::remove_var("NWS_DETAILED_LOGGING");
        }

        let config = UpstreamClientConfig::from_env();
        assert_eq!(config.connect_timeout_seconds, 3);
        assert_eq!(config.http_timeout_seconds, 10);
        assert!(config.enable_detailed_logging);
    }

    #[test]
    fn test_upstream_client_config_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();

        unsafe {
            env::set_var("NWS_CONNECT_TIMEOUT", "1");
            env::set_var("NWS_HTTP_TIMEOUT", "4");
            env::set_var("NWS_DETAILED_LOGGING", "false");
        }

        let config = UpstreamClientConfig::from_env();
        assert_eq!(config.connect_timeout_seconds, 1);
        assert_eq!(config.http_timeout_seconds, 4);
        assert!(!config.enable_detailed_logging);

        unsafe {
            env::remove_var("NWS_CONNECT_TIMEOUT");
            env::remove_var("NWS_HTTP_TIMEOUT");
            env::remove_var("NWS_DETAILED_LOGGING");
        }
    }
}

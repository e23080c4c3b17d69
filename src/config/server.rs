//! HTTP server and logging configuration.

use std::env;

/// Output format for the tracing subscriber
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Configuration for the HTTP listener and log output
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let log_format = match env::var("LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self {
            bind_addr,
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ENV_MUTEX;

    #[test]
    fn test_server_config_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();

        unsafe {
            env::remove_var("BIND_ADDR");
            env::set_var("LOG_FORMAT", "JSON");
        }

        let config = ServerConfig::from_env();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.log_format, LogFormat::Json);

        unsafe {
            env::remove_var("LOG_FORMAT");
        }
    }
}

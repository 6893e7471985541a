//! Configuration module for the dental console client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the clinic REST API (e.g. `http://localhost:8080/api`)
    pub api_base_url: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// User-Agent header sent with every API request
    pub user_agent: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("DENTAL_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api".to_string());

        let log_level = env::var("DENTAL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("DENTAL_LOG_FORMAT")
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let user_agent = env::var("DENTAL_USER_AGENT")
            .unwrap_or_else(|_| format!("dental-console/{}", env!("CARGO_PKG_VERSION")));

        Self {
            api_base_url,
            log_level,
            log_json,
            user_agent,
        }
    }

    /// Configuration pointing at an explicit API base URL, other fields defaulted.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            log_level: "info".to_string(),
            log_json: false,
            user_agent: format!("dental-console/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("DENTAL_API_URL");
        env::remove_var("DENTAL_LOG_LEVEL");
        env::remove_var("DENTAL_LOG_FORMAT");
        env::remove_var("DENTAL_USER_AGENT");

        let config = Config::from_env();

        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert!(config.user_agent.starts_with("dental-console/"));

        env::set_var("DENTAL_LOG_FORMAT", "JSON");
        assert!(Config::from_env().log_json);
        env::remove_var("DENTAL_LOG_FORMAT");
    }

    #[test]
    fn test_with_base_url() {
        let config = Config::with_base_url("http://127.0.0.1:9000/api");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.log_level, "info");
    }
}

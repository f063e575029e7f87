//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore backend only)
    pub gcp_project_id: String,
    /// Store backend: "memory" or "firestore"
    pub store_backend: String,
    /// IANA timezone used when a request does not supply one
    pub default_timezone: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            store_backend: "memory".to_string(),
            default_timezone: "UTC".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store_backend =
            env::var("STORE_BACKEND").unwrap_or_else(|_| "memory".to_string());
        if store_backend != "memory" && store_backend != "firestore" {
            return Err(ConfigError::Invalid("STORE_BACKEND"));
        }

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            store_backend,
            default_timezone: env::var("DEFAULT_TIMEZONE").unwrap_or_else(|_| "UTC".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test to avoid racing on process-wide env vars.
    #[test]
    fn test_config_from_env() {
        env::remove_var("STORE_BACKEND");
        env::remove_var("PORT");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.store_backend, "memory");
        assert_eq!(config.default_timezone, "UTC");
        assert_eq!(config.port, 8080);

        env::set_var("STORE_BACKEND", "dynamo");
        let result = Config::from_env();
        env::remove_var("STORE_BACKEND");
        assert!(matches!(result, Err(ConfigError::Invalid("STORE_BACKEND"))));
    }
}

//! Client configuration module
//! Handles environment-derived parameters for the console session core

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::constants::{DEFAULT_INACTIVITY_SECS, DEFAULT_STORAGE_PATH, HOME_ROUTE, LOGIN_ROUTE};
use crate::error::{OpsGateError, Result};

/// Console client configuration parameters
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the console API, normalized to end with a slash
    pub api_base_url: Url,
    /// Quiet window after which the session is torn down
    pub inactivity_window: Duration,
    /// Durable mirror location for the session credentials
    pub storage_path: PathBuf,
    pub login_route: String,
    pub home_route: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        panic!("ClientConfig::default() is not allowed. Use ClientConfig::from_env() instead.");
    }
}

impl ClientConfig {
    /// Create a test configuration - only for unit tests
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            api_base_url: Url::parse("http://localhost:3000/api/").unwrap(),
            inactivity_window: Duration::from_secs(DEFAULT_INACTIVITY_SECS),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            login_route: LOGIN_ROUTE.to_string(),
            home_route: HOME_ROUTE.to_string(),
        }
    }

    /// Validate and normalize the API base URL.
    /// A trailing slash is required for relative endpoint joins.
    fn validate_base_url(raw: &str) -> Result<Url> {
        let mut normalized = raw.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let url = Url::parse(&normalized).map_err(|e| {
            OpsGateError::ConfigError(format!("OPSGATE_API_BASE_URL is not a valid URL: {}", e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(OpsGateError::ConfigError(format!(
                "OPSGATE_API_BASE_URL must be http or https, got '{}'",
                other
            ))),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_base_url = env::var("OPSGATE_API_BASE_URL").map_err(|_| {
            OpsGateError::ConfigError(
                "OPSGATE_API_BASE_URL environment variable is required".to_string(),
            )
        })?;
        let api_base_url = Self::validate_base_url(&api_base_url)?;

        let inactivity_secs = env::var("OPSGATE_INACTIVITY_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_INACTIVITY_SECS);
        if inactivity_secs == 0 {
            return Err(OpsGateError::ConfigError(
                "OPSGATE_INACTIVITY_SECS must be greater than zero".to_string(),
            ));
        }

        let storage_path = env::var("OPSGATE_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH));

        let login_route = env::var("OPSGATE_LOGIN_ROUTE").unwrap_or_else(|_| LOGIN_ROUTE.to_string());
        let home_route = env::var("OPSGATE_HOME_ROUTE").unwrap_or_else(|_| HOME_ROUTE.to_string());

        Ok(Self {
            api_base_url,
            inactivity_window: Duration::from_secs(inactivity_secs),
            storage_path,
            login_route,
            home_route,
        })
    }
}

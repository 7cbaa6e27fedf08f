//! Backend endpoint configuration

use super::error::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Where the dashboard backend lives.
///
/// `origin` plays the role of the page origin: HTTP endpoints are resolved
/// against it and the feed socket reuses its host with `ws_port`/`ws_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub origin: String,
    pub auth_path: String,
    pub download_path: String,
    pub ws_port: u16,
    pub ws_path: String,
    pub request_timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8000".to_string(),
            auth_path: "/api/auth".to_string(),
            download_path: "/download-logs".to_string(),
            ws_port: 8000,
            ws_path: "/ws".to_string(),
            request_timeout_seconds: 10,
        }
    }
}

impl BackendConfig {
    /// Parse the configured origin.
    pub fn origin_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.origin)
            .map_err(|e| ConfigError::invalid("backend.origin", e.to_string()))?;
        if url.host_str().is_none() {
            return Err(ConfigError::invalid(
                "backend.origin",
                "origin must include a host",
            ));
        }
        Ok(url)
    }

    /// Resolve an absolute path against the origin.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, ConfigError> {
        self.origin_url()?
            .join(path)
            .map_err(|e| {
                ConfigError::invalid("backend.origin", format!("cannot join '{}': {}", path, e))
            })
    }

    /// URL of the password challenge endpoint.
    pub fn auth_url(&self) -> Result<Url, ConfigError> {
        self.endpoint_url(&self.auth_path)
    }

    /// URL of the full log download endpoint.
    pub fn download_url(&self) -> Result<Url, ConfigError> {
        self.endpoint_url(&self.download_path)
    }

    /// Feed socket URL: `ws://<origin host>:<ws_port><ws_path>`.
    pub fn feed_url(&self) -> Result<String, ConfigError> {
        let origin = self.origin_url()?;
        // origin_url guarantees a host
        let host = origin.host_str().unwrap_or("localhost");
        Ok(format!("ws://{}:{}{}", host, self.ws_port, self.ws_path))
    }
}

//! Monitoring target description
//!
//! Describes what the backend watches. The client never acts on it; it is
//! validated and shown in the dashboard header.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Kind of uptime check the backend performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UptimeCheckType {
    /// A local service, judged by its log file
    Service,
    /// A web endpoint
    Web,
}

/// Backend-side monitoring target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorTarget {
    pub uptime_check_type: UptimeCheckType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_endpoint_url: Option<String>,
    pub log_file_path: String,
}

impl MonitorTarget {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing =
            |field: &'static str| ConfigError::invalid(field, "required for this uptimeCheckType");

        match self.uptime_check_type {
            UptimeCheckType::Service
                if self.service_name.as_deref().unwrap_or("").is_empty() =>
            {
                Err(missing("monitor.serviceName"))
            }
            UptimeCheckType::Web
                if self.web_endpoint_url.as_deref().unwrap_or("").is_empty() =>
            {
                Err(missing("monitor.webEndpointUrl"))
            }
            _ => Ok(()),
        }
    }

    /// One-line description, e.g. `service nginx` or `web https://…`.
    pub fn describe(&self) -> String {
        match self.uptime_check_type {
            UptimeCheckType::Service => {
                format!("service {}", self.service_name.as_deref().unwrap_or("?"))
            }
            UptimeCheckType::Web => {
                format!("web {}", self.web_endpoint_url.as_deref().unwrap_or("?"))
            }
        }
    }
}

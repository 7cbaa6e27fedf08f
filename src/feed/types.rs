//! Wire types carried by the live feed.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// How the backend decides whether the monitored service is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    /// Log file activity
    #[default]
    Log,
    /// HTTP endpoint probe
    Endpoint,
}

/// Latest uptime snapshot for the monitored service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// Whether the service is currently up
    pub status: bool,
    pub uptime_24h: f64,
    pub uptime_7d: f64,
    pub uptime_30d: f64,
    /// Timestamp string as sent by the backend
    pub last_updated: String,
    /// Older backends omit this; they only check log activity
    #[serde(default)]
    pub check_type: CheckType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_check_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl ServiceStatus {
    /// Parse `last_updated` as an RFC 3339 timestamp.
    pub fn last_updated_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.last_updated).ok()
    }
}

/// One line of the backend's log tail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub timestamp: Option<String>,
    pub message: String,
}

/// One inbound feed message. Either field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ServiceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<LogEntry>>,
}

impl Frame {
    /// A frame carrying neither field.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.logs.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_type_serde() {
        assert_eq!(serde_json::to_string(&CheckType::Endpoint).unwrap(), "\"endpoint\"");
        let parsed: CheckType = serde_json::from_str("\"log\"").unwrap();
        assert_eq!(parsed, CheckType::Log);
    }

    #[test]
    fn test_status_without_check_type_defaults_to_log() {
        let json = r#"{
            "status": true,
            "uptime_24h": 100.0,
            "uptime_7d": 99.0,
            "uptime_30d": 98.5,
            "last_updated": "2024-05-01T12:00:00.123456+00:00"
        }"#;
        let status: ServiceStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.check_type, CheckType::Log);
        assert!(status.health_check_url.is_none());
        assert!(status.last_error.is_none());
    }

    #[test]
    fn test_last_updated_at_parses_rfc3339() {
        let status = ServiceStatus {
            status: true,
            uptime_24h: 1.0,
            uptime_7d: 1.0,
            uptime_30d: 1.0,
            last_updated: "2024-01-01T00:00:00Z".to_string(),
            check_type: CheckType::Endpoint,
            health_check_url: None,
            last_error: None,
        };
        let ts = status.last_updated_at().unwrap();
        assert_eq!(ts.timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_last_updated_at_garbage_is_none() {
        let status = ServiceStatus {
            status: false,
            uptime_24h: 0.0,
            uptime_7d: 0.0,
            uptime_30d: 0.0,
            last_updated: "yesterday".to_string(),
            check_type: CheckType::Log,
            health_check_url: None,
            last_error: Some("Log file not updated".to_string()),
        };
        assert!(status.last_updated_at().is_none());
    }

    #[test]
    fn test_log_entry_null_timestamp() {
        let entry: LogEntry =
            serde_json::from_str(r#"{"message": "started", "timestamp": null}"#).unwrap();
        assert!(entry.timestamp.is_none());
        assert_eq!(entry.message, "started");
    }

    #[test]
    fn test_frame_is_empty() {
        assert!(Frame::default().is_empty());
        let frame = Frame {
            logs: Some(vec![]),
            ..Default::default()
        };
        assert!(!frame.is_empty());
    }
}

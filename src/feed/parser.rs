//! Inbound frame parsing.

use super::error::FrameError;
use super::types::Frame;

/// Parse a text frame. The payload must be a JSON object; unknown keys are
/// ignored.
pub fn parse_frame(text: &str) -> Result<Frame, FrameError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| FrameError::Invalid(e.to_string()))?;

    if !value.is_object() {
        return Err(FrameError::Invalid(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| FrameError::Invalid(e.to_string()))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::CheckType;

    #[test]
    fn test_parse_status_only() {
        let frame = parse_frame(
            r#"{"status":{"status":true,"uptime_24h":99.9,"uptime_7d":99.5,"uptime_30d":99.1,
                "last_updated":"2024-01-01T00:00:00Z","check_type":"endpoint"}}"#,
        )
        .unwrap();
        let status = frame.status.unwrap();
        assert!(status.status);
        assert_eq!(status.uptime_24h, 99.9);
        assert_eq!(status.check_type, CheckType::Endpoint);
        assert!(frame.logs.is_none());
    }

    #[test]
    fn test_parse_logs_only() {
        let frame = parse_frame(
            r#"{"logs":[{"timestamp":"10:00","message":"a"},{"timestamp":null,"message":"b"}]}"#,
        )
        .unwrap();
        assert!(frame.status.is_none());
        let logs = frame.logs.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[1].message, "b");
    }

    #[test]
    fn test_parse_neither_field() {
        let frame = parse_frame(r#"{"heartbeat": 1}"#).unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_parse_null_fields_are_absent() {
        let frame = parse_frame(r#"{"status": null, "logs": null}"#).unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_frame("{not json").unwrap_err();
        assert!(matches!(err, FrameError::Invalid(_)));
    }

    #[test]
    fn test_parse_non_object_rejected() {
        let err = parse_frame("[]").unwrap_err();
        assert_eq!(
            err,
            FrameError::Invalid("expected a JSON object, got an array".to_string())
        );
        assert!(parse_frame("42").is_err());
        assert!(parse_frame("null").is_err());
    }

    #[test]
    fn test_parse_wrong_status_shape_rejected() {
        let err = parse_frame(r#"{"status": {"status": "yes"}}"#).unwrap_err();
        assert!(matches!(err, FrameError::Invalid(_)));
    }
}

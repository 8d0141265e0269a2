use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// User agent recorded when the client sent none.
pub const UNKNOWN_USER_AGENT: &str = "unknown";

/// A single recorded resolution of a short code.
///
/// Serialized as `{"timestamp": "...", "ip": "...", "userAgent": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    /// When the click was recorded.
    pub timestamp: Timestamp,
    /// Origin address of the client, empty when it could not be determined.
    pub ip: String,
    /// Raw user agent header, or [`UNKNOWN_USER_AGENT`].
    pub user_agent: String,
}

impl ClickEvent {
    pub fn new(timestamp: Timestamp, ip: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            timestamp,
            ip: ip.into(),
            user_agent: user_agent.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_fields() {
        let ts: Timestamp = "2025-06-05T12:34:56Z".parse().unwrap();
        let event = ClickEvent::new(ts, "192.168.1.1", "Mozilla/5.0");

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["timestamp"], "2025-06-05T12:34:56Z");
        assert_eq!(json["ip"], "192.168.1.1");
        assert_eq!(json["userAgent"], "Mozilla/5.0");
    }

    #[test]
    fn parses_millisecond_timestamps() {
        let raw = r#"{"timestamp":"2025-06-05T12:34:56.789Z","ip":"","userAgent":"unknown"}"#;
        let event: ClickEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.ip, "");
        assert_eq!(event.user_agent, UNKNOWN_USER_AGENT);
        assert_eq!(event.timestamp.subsec_millisecond(), 789);
    }
}

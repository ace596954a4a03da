use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level category of a log file
///
/// Serialized as the wire name found in client log file names
/// (e.g. `backend`, `network-connection`). Unknown families are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogType {
    Application,
    Backend,
    BackendCache,
    Errors,
    Inventory,
    NetworkConnection,
    NetworkMessages,
    PushNotifications,
    SpatialAudio,
    Other(String),
}

impl LogType {
    pub fn as_str(&self) -> &str {
        match self {
            LogType::Application => "application",
            LogType::Backend => "backend",
            LogType::BackendCache => "backendCache",
            LogType::Errors => "errors",
            LogType::Inventory => "inventory",
            LogType::NetworkConnection => "network-connection",
            LogType::NetworkMessages => "network-messages",
            LogType::PushNotifications => "push-notifications",
            LogType::SpatialAudio => "spatial-audio",
            LogType::Other(name) => name,
        }
    }

    /// Returns true for families the statistics engine understands
    pub fn is_known(&self) -> bool {
        !matches!(self, LogType::Other(_))
    }
}

impl From<&str> for LogType {
    fn from(value: &str) -> Self {
        match value {
            "application" => LogType::Application,
            "backend" => LogType::Backend,
            "backendCache" => LogType::BackendCache,
            "errors" => LogType::Errors,
            "inventory" => LogType::Inventory,
            "network-connection" => LogType::NetworkConnection,
            "network-messages" => LogType::NetworkMessages,
            "push-notifications" => LogType::PushNotifications,
            "spatial-audio" => LogType::SpatialAudio,
            other => LogType::Other(other.to_string()),
        }
    }
}

impl From<String> for LogType {
    fn from(value: String) -> Self {
        LogType::from(value.as_str())
    }
}

impl From<LogType> for String {
    fn from(value: LogType) -> Self {
        match value {
            LogType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_type_wire_names() {
        assert_eq!(LogType::from("backendCache"), LogType::BackendCache);
        assert_eq!(LogType::from("network-connection"), LogType::NetworkConnection);
        assert_eq!(LogType::NetworkMessages.as_str(), "network-messages");
    }

    #[test]
    fn test_unknown_log_type_is_preserved() {
        let log_type = LogType::from("files-checker");
        assert_eq!(log_type, LogType::Other("files-checker".to_string()));
        assert!(!log_type.is_known());

        let json = serde_json::to_string(&log_type).unwrap();
        assert_eq!(json, "\"files-checker\"");
    }

    #[test]
    fn test_serde_roundtrip_uses_wire_name() {
        let json = serde_json::to_string(&LogType::PushNotifications).unwrap();
        assert_eq!(json, "\"push-notifications\"");
        let back: LogType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LogType::PushNotifications);
    }
}

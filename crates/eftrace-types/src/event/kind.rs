use crate::log_type::LogType;

/// Family names produced by parsers and consumed by the engine
pub mod family {
    pub const REQUEST: &str = "request";
    pub const RESPONSE: &str = "response";
    pub const TRANSPORT_ERROR: &str = "transport_error";
    pub const SERVER_EXCEPTION: &str = "server_exception";
    pub const RETRY: &str = "retry";

    pub const CONNECT: &str = "connect";
    pub const STATE_ENTER: &str = "state_enter";
    pub const DISCONNECT: &str = "disconnect";
    pub const SEND_DISCONNECT: &str = "send_disconnect";
    pub const TIMEOUT: &str = "timeout";
    pub const STATISTICS: &str = "statistics";

    pub const CONNECTION_PARAMS: &str = "connection_params";
    pub const DROPPED: &str = "dropped";
    pub const NOTIFICATION: &str = "notification";
    pub const SIMPLE_NOTIFICATION: &str = "simple_notification";

    pub const INIT_SUCCESS: &str = "init_success";
    pub const OCCLUSION_ERROR: &str = "occlusion_error";

    pub const MATCHMAKING: &str = "matchmaking";
    pub const ANTICHEAT: &str = "anticheat";
    pub const ERROR: &str = "error";
    pub const QUEST: &str = "quest";
}

/// Sum type over the (log type, family) pairs the statistics engine consumes
///
/// Anything not listed here is `Unclassified`; its raw family and fields are
/// still reachable through `LogEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    BackendRequest,
    BackendResponse,
    BackendTransportError,
    BackendServerException,
    BackendRetry,
    /// Every backendCache event, regardless of family
    CacheLookup,
    /// Every inventory event, regardless of family
    InventoryRejection,
    NetworkConnect,
    NetworkDisconnect,
    NetworkTimeout,
    NetworkStatistics,
    /// Every network-messages event, regardless of family
    NetworkMessageSample,
    PushConnectionParams,
    PushDropped,
    PushNotification,
    AudioInitSuccess,
    AudioOcclusionError,
    /// Every errors-log event, regardless of family
    ErrorReport,
    Matchmaking,
    AntiCheat,
    ApplicationError,
    Unclassified,
}

impl EventKind {
    pub fn classify(log_type: &LogType, family_name: Option<&str>) -> Self {
        use self::family::*;

        match (log_type, family_name) {
            (LogType::Backend, Some(REQUEST)) => EventKind::BackendRequest,
            (LogType::Backend, Some(RESPONSE)) => EventKind::BackendResponse,
            (LogType::Backend, Some(TRANSPORT_ERROR)) => EventKind::BackendTransportError,
            (LogType::Backend, Some(SERVER_EXCEPTION)) => EventKind::BackendServerException,
            (LogType::Backend, Some(RETRY)) => EventKind::BackendRetry,
            (LogType::BackendCache, _) => EventKind::CacheLookup,
            (LogType::Inventory, _) => EventKind::InventoryRejection,
            (LogType::NetworkConnection, Some(CONNECT | STATE_ENTER)) => EventKind::NetworkConnect,
            (LogType::NetworkConnection, Some(DISCONNECT | SEND_DISCONNECT)) => {
                EventKind::NetworkDisconnect
            }
            (LogType::NetworkConnection, Some(TIMEOUT)) => EventKind::NetworkTimeout,
            (LogType::NetworkConnection, Some(STATISTICS)) => EventKind::NetworkStatistics,
            (LogType::NetworkMessages, _) => EventKind::NetworkMessageSample,
            (LogType::PushNotifications, Some(CONNECTION_PARAMS)) => {
                EventKind::PushConnectionParams
            }
            (LogType::PushNotifications, Some(DROPPED)) => EventKind::PushDropped,
            (LogType::PushNotifications, Some(NOTIFICATION | SIMPLE_NOTIFICATION)) => {
                EventKind::PushNotification
            }
            (LogType::SpatialAudio, Some(INIT_SUCCESS)) => EventKind::AudioInitSuccess,
            (LogType::SpatialAudio, Some(OCCLUSION_ERROR)) => EventKind::AudioOcclusionError,
            (LogType::Errors, _) => EventKind::ErrorReport,
            (LogType::Application, Some(MATCHMAKING)) => EventKind::Matchmaking,
            (LogType::Application, Some(ANTICHEAT)) => EventKind::AntiCheat,
            (LogType::Application, Some(ERROR)) => EventKind::ApplicationError,
            _ => EventKind::Unclassified,
        }
    }
}

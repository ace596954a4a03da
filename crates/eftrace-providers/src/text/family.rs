use eftrace_types::{Fields, Level, LogType, family};
use regex::Regex;
use std::sync::LazyLock;

static EXCEPTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][A-Za-z0-9_.]*Exception)\b").unwrap());

/// Ordered keyword rules per log type. First match wins, so more specific
/// phrases must come before the words they contain.
const BACKEND_RULES: &[(&[&str], &str)] = &[
    (&["transporterror", "transport error"], family::TRANSPORT_ERROR),
    (&["serverexception", "server exception"], family::SERVER_EXCEPTION),
    (&["---> request", "--> request"], family::REQUEST),
    (&["<--- response", "<-- response"], family::RESPONSE),
    (&["retry"], family::RETRY),
];

const NETWORK_CONNECTION_RULES: &[(&[&str], &str)] = &[
    (&["send disconnect", "senddisconnect"], family::SEND_DISCONNECT),
    (&["disconnect"], family::DISCONNECT),
    (&["timeout"], family::TIMEOUT),
    (&["statistics"], family::STATISTICS),
    (&["enter to state", "state enter", "enter state"], family::STATE_ENTER),
    (&["connect"], family::CONNECT),
];

const PUSH_RULES: &[(&[&str], &str)] = &[
    (&["connectionparams", "connection params"], family::CONNECTION_PARAMS),
    (&["dropped"], family::DROPPED),
    (&["simplenotification", "simple notification"], family::SIMPLE_NOTIFICATION),
    (&["notification"], family::NOTIFICATION),
];

const APPLICATION_RULES: &[(&[&str], &str)] = &[
    (&["battleye", "anticheat", "anti-cheat"], family::ANTICHEAT),
    (&["matchmaking", "groupid", "matching"], family::MATCHMAKING),
    (&["quest"], family::QUEST),
];

/// Work out the event family from the log type and message text
pub(crate) fn classify(log_type: &LogType, level: &Level, message: &str) -> Option<String> {
    let lower = message.to_lowercase();

    match log_type {
        LogType::Backend => first_match(BACKEND_RULES, &lower),
        LogType::NetworkConnection => first_match(NETWORK_CONNECTION_RULES, &lower),
        LogType::PushNotifications => first_match(PUSH_RULES, &lower),
        LogType::SpatialAudio => {
            if lower.contains("occlusion") && lower.contains("error") {
                Some(family::OCCLUSION_ERROR.to_string())
            } else if lower.contains("init") && lower.contains("success") {
                Some(family::INIT_SUCCESS.to_string())
            } else {
                None
            }
        }
        LogType::Errors => Some(
            EXCEPTION_PATTERN
                .captures(message)
                .map(|caps| caps[1].to_string())
                .unwrap_or_else(|| family::ERROR.to_string()),
        ),
        LogType::Application => {
            // Error lines keep their own family so BattlEye failures are not init lines
            if level.is_error() {
                Some(family::ERROR.to_string())
            } else {
                first_match(APPLICATION_RULES, &lower)
            }
        }
        _ => None,
    }
}

/// Derive fields that only appear as prose
pub(crate) fn infer_fields(log_type: &LogType, message: &str, fields: &mut Fields) {
    if *log_type == LogType::BackendCache && !fields.contains("cacheHit") {
        let lower = message.to_lowercase();
        if lower.contains("not exists") || lower.contains("miss") {
            fields.insert("cacheHit", false);
        } else if lower.contains("hit") || lower.contains("exists") {
            fields.insert("cacheHit", true);
        }
    }
}

fn first_match(rules: &[(&[&str], &str)], lower: &str) -> Option<String> {
    rules
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| lower.contains(needle)))
        .map(|(_, family)| family.to_string())
}

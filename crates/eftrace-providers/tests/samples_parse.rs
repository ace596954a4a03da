use eftrace_providers::{LogParser, TextLogParser, discover_log_files, read_log_files};
use eftrace_types::{EventKind, LogType, ParsedLogResult};
use serde::Serialize;
use std::path::PathBuf;

const SESSION: &str = "2024.03.12_14-22-58_0.14.1.2.29197";

fn sample_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/samples")
        .join(format!("log_{}", SESSION))
}

/// Level and family of every event, per file
#[derive(Serialize)]
struct FileOutline {
    log_type: LogType,
    session: Option<String>,
    events: Vec<String>,
}

fn parse_samples() -> Vec<ParsedLogResult> {
    let paths = discover_log_files(&sample_dir(), &["log".to_string()]).expect("discover");
    assert_eq!(paths.len(), 9);

    let outcome = read_log_files(&paths, u64::MAX, |_| {});
    assert!(outcome.failures.is_empty());

    let parser = TextLogParser::new();
    outcome
        .files
        .iter()
        .map(|file| {
            parser
                .parse_text(&file.name, &file.content)
                .unwrap_or_else(|e| panic!("failed to parse {}: {}", file.name, e))
        })
        .collect()
}

#[test]
fn test_sample_session_snapshot() {
    let outline: Vec<FileOutline> = parse_samples()
        .iter()
        .map(|result| FileOutline {
            log_type: result.log_type.clone(),
            session: result.meta.session_prefix.clone(),
            events: result
                .events
                .iter()
                .map(|e| format!("{} {}", e.level.as_str(), e.family.as_deref().unwrap_or("-")))
                .collect(),
        })
        .collect();

    insta::assert_json_snapshot!(outline, @r###"
    [
      {
        "log_type": "application",
        "session": "2024.03.12_14-22-58_0.14.1.2.29197",
        "events": [
          "Info -",
          "Info anticheat",
          "Info matchmaking",
          "Info matchmaking",
          "Error error",
          "Info quest",
          "Info quest"
        ]
      },
      {
        "log_type": "backendCache",
        "session": "2024.03.12_14-22-58_0.14.1.2.29197",
        "events": [
          "Info -",
          "Info -",
          "Info -"
        ]
      },
      {
        "log_type": "backend",
        "session": "2024.03.12_14-22-58_0.14.1.2.29197",
        "events": [
          "Info request",
          "Info response",
          "Info request",
          "Warn retry",
          "Info response",
          "Info request",
          "Error transport_error"
        ]
      },
      {
        "log_type": "errors",
        "session": "2024.03.12_14-22-58_0.14.1.2.29197",
        "events": [
          "Error NullReferenceException",
          "Error NullReferenceException",
          "Error error"
        ]
      },
      {
        "log_type": "inventory",
        "session": "2024.03.12_14-22-58_0.14.1.2.29197",
        "events": [
          "Warn -",
          "Warn -"
        ]
      },
      {
        "log_type": "network-connection",
        "session": "2024.03.12_14-22-58_0.14.1.2.29197",
        "events": [
          "Info connect",
          "Info statistics",
          "Info statistics",
          "Warn timeout",
          "Info send_disconnect"
        ]
      },
      {
        "log_type": "network-messages",
        "session": "2024.03.12_14-22-58_0.14.1.2.29197",
        "events": [
          "Info -",
          "Info -"
        ]
      },
      {
        "log_type": "push-notifications",
        "session": "2024.03.12_14-22-58_0.14.1.2.29197",
        "events": [
          "Info connection_params",
          "Info simple_notification",
          "Info notification",
          "Warn dropped"
        ]
      },
      {
        "log_type": "spatial-audio",
        "session": "2024.03.12_14-22-58_0.14.1.2.29197",
        "events": [
          "Info init_success",
          "Error occlusion_error"
        ]
      }
    ]
    "###);
}

#[test]
fn test_sample_event_kinds() {
    let path = sample_dir().join(format!("{} network-connection_000.log", SESSION));
    let content = std::fs::read_to_string(&path).expect("read sample");
    let result = TextLogParser::new()
        .parse_text(&path.to_string_lossy(), &content)
        .expect("parse sample");

    assert_eq!(result.log_type, LogType::NetworkConnection);
    let kinds: Vec<EventKind> = result.events.iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::NetworkConnect,
            EventKind::NetworkStatistics,
            EventKind::NetworkStatistics,
            EventKind::NetworkTimeout,
            EventKind::NetworkDisconnect,
        ]
    );
    assert_eq!(result.events[0].fields.str("address"), Some("10.0.0.5:17000"));
    assert_eq!(result.events[1].fields.f64("rtt"), Some(40.0));
}

#[test]
fn test_embedded_json_is_lifted_out_of_message() {
    let path = sample_dir().join(format!("{} inventory_000.log", SESSION));
    let content = std::fs::read_to_string(&path).expect("read sample");
    let result = TextLogParser::new()
        .parse_text(&path.to_string_lossy(), &content)
        .expect("parse sample");

    let first = &result.events[0];
    assert_eq!(first.message, "Operation rejected");
    assert_eq!(first.fields.str("operationType"), Some("Move"));
    assert_eq!(first.fields.key_string("code").as_deref(), Some("228"));
    assert_eq!(first.fields.str("itemId"), Some("5c94bbff86f7747ee735c08f"));
}

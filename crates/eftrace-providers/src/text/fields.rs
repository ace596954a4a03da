use eftrace_types::Fields;
use regex::Regex;
use serde_json::{Deserializer, Number, Value};
use std::sync::LazyLock;

static KEY_VALUE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z][A-Za-z0-9_]*):\s*([^,\s]+)").unwrap());

/// Extract fields from a message.
///
/// An embedded JSON object (starting at the first `{`) wins; `Key: value`
/// pairs in the surrounding text fill in whatever the JSON did not set.
/// Returns the fields and the message with the JSON object lifted out.
pub(crate) fn extract_fields(message: &str) -> (Fields, String) {
    let mut fields = Fields::new();
    let mut text = message.to_string();

    if let Some(start) = message.find('{') {
        let mut stream = Deserializer::from_str(&message[start..]).into_iter::<Value>();
        if let Some(Ok(Value::Object(map))) = stream.next() {
            let end = start + stream.byte_offset();
            fields = Fields::from(map);
            text = format!("{}{}", message[..start].trim_end(), &message[end..])
                .trim()
                .to_string();
        }
    }

    for caps in KEY_VALUE_PATTERN.captures_iter(&text) {
        let key = normalize_key(&caps[1]);
        let value = coerce_value(&key, &caps[2]);
        fields.insert_missing(key, value);
    }

    (fields, text)
}

/// `URL` -> `url`, `ResponseCode` -> `responseCode`
fn normalize_key(key: &str) -> String {
    if key.chars().all(|c| !c.is_ascii_lowercase()) {
        return key.to_ascii_lowercase();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn coerce_value(key: &str, raw: &str) -> Value {
    let raw = raw.trim_end_matches([';', ')', ']']);

    if key == "url" {
        return Value::String(endpoint_path(raw).to_string());
    }

    match raw {
        "true" | "True" => return Value::Bool(true),
        "false" | "False" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(n) = raw.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = raw.parse::<f64>()
        && let Some(n) = Number::from_f64(f)
    {
        return Value::Number(n);
    }

    Value::String(raw.to_string())
}

/// Reduce an absolute URL to its path so endpoints group across hosts
fn endpoint_path(url: &str) -> &str {
    let without_scheme = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => return strip_query(url),
    };
    match without_scheme.find('/') {
        Some(idx) => strip_query(&without_scheme[idx..]),
        None => "/",
    }
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value_pairs() {
        let (fields, _) = extract_fields(
            "<--- Response HTTPS, id [12]: URL: https://prod.example.com/client/game/start?x=1, crc: ., responseCode: 200",
        );
        assert_eq!(fields.str("url"), Some("/client/game/start"));
        assert_eq!(fields.u64("responseCode"), Some(200));
        assert_eq!(fields.str("crc"), Some("."));
    }

    #[test]
    fn test_json_wins_over_text_pairs() {
        let (fields, message) = extract_fields(
            r#"Quest status changed questStatus: started {"questId":"5936d90786f7742b1420ba5b","questStatus":"completed"} trailing"#,
        );
        assert_eq!(fields.str("questStatus"), Some("completed"));
        assert_eq!(fields.str("questId"), Some("5936d90786f7742b1420ba5b"));
        assert_eq!(message, "Quest status changed questStatus: started trailing");
    }

    #[test]
    fn test_value_coercion() {
        let (fields, _) = extract_fields("Statistics rtt: 45.5, packetsLost: 3, cacheHit: false, address: 10.0.0.1:17000");
        assert_eq!(fields.f64("rtt"), Some(45.5));
        assert_eq!(fields.u64("packetsLost"), Some(3));
        assert_eq!(fields.bool("cacheHit"), Some(false));
        assert_eq!(fields.str("address"), Some("10.0.0.1:17000"));
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("URL"), "url");
        assert_eq!(normalize_key("ResponseCode"), "responseCode");
        assert_eq!(normalize_key("groupId"), "groupId");
    }
}

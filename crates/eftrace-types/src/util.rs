use regex::Regex;
use std::sync::LazyLock;

use crate::result::ParsedLogResult;

/// Session id used when neither metadata nor path carry one
pub const UNKNOWN_SESSION: &str = "unknown";

// e.g. "2024.03.12_14-22-58_0.14.1.2.29197"
static SESSION_PREFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}\.\d{2}\.\d{2}_\d{1,2}-\d{2}-\d{2}_\d+(?:\.\d+)*").unwrap());

/// Extract a session prefix from a file name or path
pub fn session_prefix_from_path(path: &str) -> Option<String> {
    SESSION_PREFIX_PATTERN
        .find(path)
        .map(|m| m.as_str().to_string())
}

/// Session identity of a parsed file
///
/// Priority: `meta.session_prefix`, then a prefix found in `file_path`,
/// then [`UNKNOWN_SESSION`]. Statistics and insights both group with this.
pub fn session_id_for(result: &ParsedLogResult) -> String {
    if let Some(prefix) = result.meta.session_prefix.as_deref()
        && !prefix.is_empty()
    {
        return prefix.to_string();
    }

    result
        .file_path
        .as_deref()
        .and_then(session_prefix_from_path)
        .unwrap_or_else(|| UNKNOWN_SESSION.to_string())
}

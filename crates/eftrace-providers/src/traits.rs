use eftrace_types::ParsedLogResult;

use crate::Result;
use crate::io::LogFile;

/// Turns raw log text into events
///
/// Implementations must be pure with respect to their inputs: the worker
/// pool calls them from several threads at once.
pub trait LogParser: Send + Sync {
    /// Short identifier used in diagnostics (e.g. "text")
    fn id(&self) -> &'static str;

    /// Parse a whole file. Failure means "skip this file", never "abort the batch".
    fn parse_text(&self, file_name: &str, content: &str) -> Result<ParsedLogResult>;
}

/// Parse a batch sequentially, keeping one result slot per input file
pub fn parse_texts(parser: &dyn LogParser, files: &[LogFile]) -> Vec<Result<ParsedLogResult>> {
    files
        .iter()
        .map(|file| parser.parse_text(&file.name, &file.content))
        .collect()
}

// Error types
pub mod error;

// Parser boundary (trait + batch helper)
pub mod traits;

// Default line-oriented parser
pub mod text;

// File acquisition
pub mod discovery;
pub mod io;

pub use discovery::discover_log_files;
pub use error::{Error, Result};
pub use io::{FileFailure, LogFile, ReadOutcome, ReadProgress, read_log_file, read_log_files};
pub use text::TextLogParser;
pub use traits::{LogParser, parse_texts};

/// Parse one file with the default parser
pub fn parse_text(file_name: &str, content: &str) -> Result<eftrace_types::ParsedLogResult> {
    TextLogParser::new().parse_text(file_name, content)
}

/// Result type for eftrace-providers operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the providers layer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File content could not be turned into events
    #[error("Parse error in {file}: {reason}")]
    Parse { file: String, reason: String },

    /// File name does not identify a known log layout
    #[error("Unrecognized log type for file: {0}")]
    UnrecognizedLogType(String),

    /// Walkdir error
    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

impl Error {
    pub(crate) fn parse(file: &str, reason: impl Into<String>) -> Self {
        Error::Parse {
            file: file.to_string(),
            reason: reason.into(),
        }
    }
}

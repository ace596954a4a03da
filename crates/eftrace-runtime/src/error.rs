/// Result type for eftrace-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Discovery or reading failed before any parsing started
    #[error("Provider error: {0}")]
    Provider(#[from] eftrace_providers::Error),

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Export serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The import was aborted by the caller
    #[error("Import cancelled")]
    Cancelled,

    /// Every file was skipped or failed to parse
    #[error("No valid log files: {attempted} attempted, none could be parsed")]
    NoValidFiles { attempted: usize },

    /// A blocking stage panicked or was cancelled by the runtime
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Invalid operation or state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

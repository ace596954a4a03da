use clap::ValueEnum;
use eftrace_engine::QuestStatus;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum QuestStatusFilter {
    Unknown,
    Started,
    Completed,
    Failed,
}

impl From<QuestStatusFilter> for QuestStatus {
    fn from(filter: QuestStatusFilter) -> Self {
        match filter {
            QuestStatusFilter::Unknown => QuestStatus::Unknown,
            QuestStatusFilter::Started => QuestStatus::Started,
            QuestStatusFilter::Completed => QuestStatus::Completed,
            QuestStatusFilter::Failed => QuestStatus::Failed,
        }
    }
}

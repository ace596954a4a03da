use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::{LogLevel, OutputFormat, QuestStatusFilter};

#[derive(Parser)]
#[command(name = "eftrace")]
#[command(about = "Aggregate game-client logs into session, network and quest statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Config file (default: $EFTRACE_CONFIG or the platform config dir)")]
    pub config: Option<String>,

    #[arg(long, default_value = "warn", global = true, help = "Log level when RUST_LOG is unset")]
    pub log_level: LogLevel,

    #[arg(long, global = true, help = "Number of parse workers")]
    pub workers: Option<usize>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Import log files or folders and print a summary")]
    Import {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[arg(long, default_value_t = 5, help = "Entries shown per ranking")]
        top: usize,
    },

    #[command(about = "List sessions found in the given logs, earliest first")]
    Sessions {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    #[command(about = "List quests seen in the given logs")]
    Quests {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[arg(long, help = "Only quests with this status")]
        status: Option<QuestStatusFilter>,
    },

    #[command(about = "Write parsed results, statistics and insights to one JSON file")]
    Export {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[arg(short, long)]
        output: PathBuf,
    },
}

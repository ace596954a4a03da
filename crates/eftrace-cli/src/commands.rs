use anyhow::{Context, Result};
use eftrace_runtime::Config;
use tracing_subscriber::EnvFilter;

use super::args::{Cli, Commands};
use super::handlers::{self, HandlerContext};
use crate::types::LogLevel;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    let mut config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(workers) = cli.workers {
        config.pool.size = Some(workers);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let ctx = HandlerContext {
        config,
        format: cli.format,
    };

    runtime.block_on(async move {
        match cli.command {
            Commands::Import { paths, top } => handlers::import::handle(&ctx, &paths, top).await,
            Commands::Sessions { paths } => handlers::sessions::handle(&ctx, &paths).await,
            Commands::Quests { paths, status } => {
                handlers::quests::handle(&ctx, &paths, status.map(Into::into)).await
            }
            Commands::Export { paths, output } => {
                handlers::export::handle(&ctx, &paths, &output).await
            }
        }
    })
}

/// RUST_LOG wins over `--log-level`; output goes to stderr
fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

use std::path::Path;

use clap::Parser;
use explorer_core::{
    cli::{execute, Cli},
    ExplorerError,
};
use tracing::{debug, info};
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), ExplorerError> {
    let cli = Cli::parse();

    let (file_layer, _guard) = match &cli.log_file {
        Some(path) => {
            let name = path
                .file_name()
                .ok_or_else(|| ExplorerError::from(format!("invalid log file path: {}", path.display())))?;
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

            let file_appender = tracing_appender::rolling::never(dir, name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(LevelFilter::DEBUG);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // stdout carries command output
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,explorer_core=debug".into()));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    let config = cli.load_config()?;
    debug!(?config, "configuration loaded");
    info!(app = %config.app_name, "explorer starting");

    let output = execute(cli.command, config).await?;
    println!("{output}");

    Ok(())
}

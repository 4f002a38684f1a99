//! Iris prediction form - Main Entry Point
//!
//! Serves the prediction form by default; `predict` and `info` work offline.

use clap::Parser;
use iris_predict::cli::{Cli, Commands, cmd_info, cmd_predict, cmd_serve};
use iris_predict::server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iris_predict=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port, host, artifact_dir }) => {
            cmd_serve(&host, port, artifact_dir).await?;
        }
        Some(Commands::Predict { sepal_length, sepal_width, petal_length, petal_width, artifact_dir }) => {
            cmd_predict([sepal_length, sepal_width, petal_length, petal_width], &artifact_dir)?;
        }
        Some(Commands::Info { artifact_dir }) => {
            cmd_info(&artifact_dir)?;
        }
        None => {
            let config = ServerConfig::default();
            cmd_serve(&config.host, config.port, config.artifact_dir).await?;
        }
    }

    Ok(())
}

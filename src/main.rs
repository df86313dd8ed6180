//! Parlor - stateless game-arbitration service.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use parlor::{Arbiter, ArbiterRepository, EngineConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            host,
            port,
            db_path,
            engine_path,
            engine_depth,
            engine_timeout,
        } => {
            run_server(
                host,
                port,
                db_path,
                engine_path,
                engine_depth,
                engine_timeout,
            )
            .await
        }
    }
}

/// Run the HTTP arbitration server
async fn run_server(
    host: String,
    port: u16,
    db_path: String,
    engine_path: Option<PathBuf>,
    engine_depth: u32,
    engine_timeout: u64,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting parlor arbitration server");

    let repository = ArbiterRepository::new(db_path)?;
    repository.run_migrations()?;

    let engine = EngineConfig {
        path: engine_path,
        depth: engine_depth,
        budget: Duration::from_secs(engine_timeout),
    };
    if let Some(path) = &engine.path {
        info!(path = %path.display(), depth = engine.depth, "Chess engine configured");
    }

    let arbiter = Arc::new(Arbiter::new(repository, engine));
    parlor::server::serve(&host, port, arbiter).await
}

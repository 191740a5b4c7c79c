use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use larder::config::Config;
use larder::http;
use larder::store::{DocumentStore, MemoryStore, RemoteStore};

#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Read-oriented HTTP API over the inventory document store")]
#[command(version)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, env = "LARDER_CONFIG", default_value = "larder.toml")]
    config: PathBuf,

    /// Override the listen port from the config
    #[arg(long)]
    port: Option<u16>,

    /// Serve a local JSON fixture instead of the remote store
    #[arg(long)]
    fixture: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };
    let port = cli.port.unwrap_or(config.server.port);

    let store: Arc<dyn DocumentStore> = match cli.fixture {
        Some(path) => {
            Arc::new(MemoryStore::from_json_file(&path).context("Failed to load fixture")?)
        }
        None => Arc::new(RemoteStore::new(&config.store)),
    };

    http::run_server(store, port).await
}

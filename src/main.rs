use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reelmatch::{
    api::{create_router, AppState},
    cache::Cache,
    cli,
    config::Config,
    index::MovieIndex,
    services::{providers::TmdbProvider, Enricher},
};

#[derive(Parser, Debug)]
#[command(name = "reelmatch", about = "Content-based movie recommendations")]
struct Cli {
    /// Movies CSV file (overrides MOVIES_PATH)
    #[arg(long, global = true)]
    movies: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the web UI and JSON API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Interactive prompt on the terminal
    Repl {
        /// Number of recommendations per lookup
        #[arg(long)]
        count: Option<usize>,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reelmatch=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_enricher(config: &Config) -> anyhow::Result<Enricher> {
    let Some(api_key) = config.api_key() else {
        tracing::warn!("TMDB_API_KEY not set, movie descriptions are disabled");
        return Ok(Enricher::disabled());
    };

    let cache = Cache::new();
    let provider = TmdbProvider::new(
        cache.clone(),
        api_key.to_string(),
        config.tmdb_api_url.clone(),
        Duration::from_secs(config.tmdb_timeout_secs),
    )
    .context("Failed to build TMDB client")?;

    Ok(Enricher::new(Arc::new(provider), cache))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(movies) = args.movies {
        config.movies_path = movies;
    }

    let index = MovieIndex::from_path(&config.movies_path).with_context(|| {
        format!("Failed to build index from {}", config.movies_path.display())
    })?;
    let enricher = build_enricher(&config)?;

    match args.command {
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.host.clone());
            let port = port.unwrap_or(config.port);

            let state = AppState::new(index, enricher, config.default_count, config.max_count);
            let app = create_router(state);

            let listener = tokio::net::TcpListener::bind((host.as_str(), port))
                .await
                .with_context(|| format!("Failed to bind {}:{}", host, port))?;
            tracing::info!(address = %listener.local_addr()?, "Server running");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
        }
        Command::Repl { count } => {
            let count = count.unwrap_or(config.default_count).max(1);
            cli::run(&index, &enricher, count).await?;
        }
    }

    Ok(())
}

use anyhow::Result;
use clap::Parser;
use nano_banana_prompter::ai::ServiceCatalog;
use nano_banana_prompter::models::Config;
use nano_banana_prompter::server::{self, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "nano-banana-prompter")]
#[command(about = "Chat-assisted photographic prompt studio")]
struct CliArgs {
    /// Address to listen on.
    #[arg(long, value_name = "ADDR", default_value = "127.0.0.1:3000")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nano_banana_prompter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting nano-banana-prompter");

    let args = CliArgs::parse();
    let config = Config::from_env();

    // Reuse one HTTP connection pool across provider clients.
    let http_client = reqwest::Client::new();
    let services = Arc::new(ServiceCatalog::from_config(&config, http_client));

    let listener = match tokio::net::TcpListener::bind(args.listen).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", args.listen, e);
            std::process::exit(1);
        }
    };

    match server::serve(listener, AppState::new(services)).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Server failed: {}", e);
            std::process::exit(1);
        }
    }
}

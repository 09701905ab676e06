#![forbid(unsafe_code)]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::process;

use anyhow::Context;
use askpdf_core::ProviderConfig;
use askpdf_server::handler;
use askpdf_server::service::ServiceState;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// Tracing target constants
const TRACING_TARGET_STARTUP: &str = "askpdf_server::startup";
const TRACING_TARGET_SHUTDOWN: &str = "askpdf_server::shutdown";

/// PDF question-answering chat service.
#[derive(Debug, Parser)]
#[command(name = "askpdf-server", version, about)]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "SERVER_ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    address: IpAddr,

    /// Port to bind.
    #[arg(long, env = "SERVER_PORT", default_value_t = 8080)]
    port: u16,

    #[command(flatten)]
    provider: ProviderConfig,
}

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing();

    let state = ServiceState::from_config(cli.provider.clone())
        .context("failed to initialise the chat service")?;
    let router = handler::routes(state);

    let address = SocketAddr::from((cli.address, cli.port));
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        %address,
        model = %cli.provider.model,
        offline = !cli.provider.has_credentials(),
        "server listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}

/// Initializes the tracing subscriber with env-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves when the process receives a shutdown request.
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            %error,
            "failed to listen for shutdown signal"
        );
        return;
    }

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        "shutdown signal received; draining connections"
    );
}

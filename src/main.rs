//! Service entry point: configuration, telemetry, clients, server.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use url::Url;

use payment_orchestrator::clients::{AuthorizationClient, ProductClient};
use payment_orchestrator::config::{load_config, ServiceConfig};
use payment_orchestrator::http::HttpServer;
use payment_orchestrator::lifecycle::Shutdown;
use payment_orchestrator::orchestrator::PaymentOrchestrator;
use payment_orchestrator::telemetry;

/// Payment authorization orchestrator.
#[derive(Debug, Parser)]
#[command(name = "payment-orchestrator", version)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ServiceConfig::default(),
    };

    let (telemetry, telemetry_guard) = telemetry::init_telemetry(&config.telemetry)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        product_service = %config.upstreams.product_service_url,
        authorization_service = %config.upstreams.authorization_service_url,
        "configuration loaded"
    );

    let http_client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
        .build()
        .context("building outbound HTTP client")?;

    let product_url = Url::parse(&config.upstreams.product_service_url)
        .context("parsing upstreams.product_service_url")?;
    let authorization_url = Url::parse(&config.upstreams.authorization_service_url)
        .context("parsing upstreams.authorization_service_url")?;

    let orchestrator = Arc::new(PaymentOrchestrator::new(
        ProductClient::new(http_client.clone(), product_url),
        AuthorizationClient::new(http_client, authorization_url),
        telemetry,
    ));

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .with_context(|| format!("binding {}", config.listener.bind_address))?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config, orchestrator);
    server.run(listener, shutdown.subscribe()).await?;

    telemetry_guard.shutdown();
    tracing::info!("shutdown complete");
    Ok(())
}

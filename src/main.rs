use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use checkout_intake::config::{Config, LogFormat};
use checkout_intake::create_app;
use checkout_intake::modules::checkout::CheckoutService;
use checkout_intake::modules::gateways::YooKassaClient;
use checkout_intake::modules::orders::JsonOrderStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "checkout_intake=debug,actix_web=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Starting checkout intake service");
    tracing::info!("Server binding to: {}", config.server.bind_address());
    tracing::debug!(gateway = ?config.gateway, "Gateway configuration");

    let store = JsonOrderStore::new(config.storage.orders_path());
    store
        .ensure_ready()
        .await
        .context("Failed to prepare order store")?;

    let gateway = YooKassaClient::new(config.gateway.clone(), config.payment.clone())
        .context("Failed to build YooKassa client")?;

    let service = web::Data::new(CheckoutService::new(Arc::new(store), Arc::new(gateway)));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || create_app(service.clone()))
        .workers(config.server.workers)
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {bind_address}"))?
        .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}

//! # eigerdashd: Eiger detector dashboard daemon
//!
//! Composition root that wires the control-server client, the dashboard
//! services and the HTTP surface together, then serves the dashboard.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Construct the reqwest client behind the `StatusApi` port
//! - Construct the dashboard, alert queue and update bus
//! - Show the initial view and start the status poller
//! - Build the axum router and serve it until SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::path::Path;
use std::sync::Arc;

use eigerdash_adapter_http_axum::router;
use eigerdash_adapter_http_axum::state::AppState;
use eigerdash_adapter_http_reqwest::Config as ClientConfig;
use eigerdash_app::alerts::AlertQueue;
use eigerdash_app::dashboard::Dashboard;
use eigerdash_app::services::poller::Poller;
use eigerdash_app::services::status_service::StatusService;
use eigerdash_app::update_bus::UpdateBus;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Alerts kept until a page shows them.
const ALERT_CAPACITY: usize = 32;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Control server client
    let api = Arc::new(
        ClientConfig {
            base_url: config.api.base_url.clone(),
            timeout: config.request_timeout(),
        }
        .build()?,
    );
    tracing::info!(base_url = api.base_url(), "using detector control server");

    // Dashboard state
    let bus = UpdateBus::default();
    let dashboard = Arc::new(Dashboard::new(config.dashboard_settings(), bus.clone()));
    let alerts = Arc::new(AlertQueue::new(bus, ALERT_CAPACITY));

    // HTTP
    let state = AppState::new(Arc::clone(&api), Arc::clone(&dashboard), alerts)
        .with_refresh_secs(config.dashboard.refresh_secs);
    state
        .navigator
        .navigate(&config.dashboard.initial_fragment)
        .await;

    // Polling
    let mut poller = Poller::new(StatusService::new(api, dashboard), &config.poller());
    poller.start();

    let mut app = router::build(state);
    let assets = Path::new(&config.dashboard.assets_dir);
    if config.dashboard.assets_dir.is_empty() {
        tracing::debug!("indicator images disabled");
    } else if assets.is_dir() {
        app = router::with_assets(app, assets);
    } else {
        tracing::warn!(dir = %assets.display(), "assets directory not found, images will not load");
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "eigerdashd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.stop();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

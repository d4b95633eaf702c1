mod config;
mod dao;
mod error;
mod model;
mod registry;
mod routes;
mod utils;
mod views;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{serve, Router};
use config::Config;
use dao::LinkStore;
use dotenvy::dotenv;
use registry::LinkRegistry;
use routes::{admin_page, create_link, delete_link, health, redirect, root, update_link, AppState};
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_TRACING_LEVEL: &str = "slug_links=debug,tower_http=info";
const MAX_BODY_BYTES: usize = 1_000_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    _ = dotenv();
    configure_tracing();
    let config = Config::from_env();
    let state = AppState {
        registry: LinkRegistry::new(LinkStore::new(&config.data_file)),
    };
    tracing::info!("Using data file: {}", state.registry.store().path().display());
    let listener = create_listener(&config.server_address).await?;
    serve(listener, create_router(state))
        .await
        .context("Server failed")
}

fn configure_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or(DEFAULT_TRACING_LEVEL.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn create_listener(server_address: &str) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(server_address)
        .await
        .with_context(|| format!("Creating tcp listener on {server_address} failed"))?;
    tracing::info!("Listening on address: {}", server_address);
    Ok(listener)
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/admin", get(admin_page))
        .route("/admin/create", post(create_link))
        .route("/admin/update", post(update_link))
        .route("/admin/delete", post(delete_link))
        .route("/health", get(health))
        .route("/:slug", get(redirect))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use anyhow::Result;
use axum::{middleware::from_fn, Router};
use dotenvy::dotenv;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod api;
mod applications;
mod auth;
mod components;
mod config;
mod controllers;
mod crypto;
mod dashboard;
mod documents;
mod errors;
mod extractors;
mod format;
mod htmx;
mod listing;
mod maintenance;
mod middleware;
mod models;
mod payments;
mod properties;
mod routes;
mod session;
mod tenants;
#[cfg(test)]
mod testing;

pub fn app(state: models::AppState) -> Router {
    routes::get_routes()
        .layer(from_fn(middleware::html_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smartrent=info,tower_http=info".into()),
        )
        .init();

    let config = config::Config::from_env()?;
    let backend = api::http::HttpBackend::new(&config.api_base, config.api_timeout)?;
    let state = models::AppState {
        backend: Arc::new(backend),
        signer: crypto::Signer::new(config.session_secret.as_str()),
    };

    tracing::info!(addr = %config.addr, api = %config.api_base, "listening");
    axum::Server::bind(&config.addr)
        .serve(app(state).into_make_service())
        .await?;

    Ok(())
}

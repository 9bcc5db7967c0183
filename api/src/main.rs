//! XP Boost Leaderboard API Server
//!
//! Polls the hackathon's team standings from a Google Sheet (rotating across
//! API keys, falling back to the published CSV export) and serves the sorted,
//! paginated leaderboard over HTTP.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod feed;
mod handlers;

#[cfg(test)]
mod test_utils;

use app::{LeaderboardFeed, RefreshSchedule, SourceChain};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<LeaderboardFeed>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Routes and shared middleware, without rate limiting (which needs peer addresses)
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Leaderboard (public, read-only)
        .route("/leaderboard", get(handlers::get_leaderboard))
        .route("/leaderboard/standings", get(handlers::get_standings))
        // Shared page cursor for big-screen displays
        .route("/leaderboard/page/next", post(handlers::next_page))
        .route("/leaderboard/page/prev", post(handlers::prev_page))
        .route("/leaderboard/page/:page", post(handlers::goto_page))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,xpboost_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting XP Boost leaderboard API...");

    // Load configuration
    let config = Config::from_env();

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    if !config.sheets_api_enabled() {
        tracing::info!("Sheets API stage disabled (needs SPREADSHEET_ID and GOOGLE_API_KEYS)");
    }
    if !config.csv_fallback_enabled() {
        tracing::info!("CSV fallback disabled (needs PUBLISHED_CSV_URL)");
    }

    // Sheets API keys in priority order, then the published CSV
    let chain = SourceChain::from_config(&config, http);
    if chain.is_empty() {
        tracing::warn!(
            "No leaderboard sources configured; set SPREADSHEET_ID + GOOGLE_API_KEYS or PUBLISHED_CSV_URL"
        );
    } else {
        tracing::info!(sources = ?chain.labels(), "Leaderboard sources configured");
    }

    let feed = Arc::new(LeaderboardFeed::new(chain, config.page_size));
    let mut schedule = RefreshSchedule::start(feed.clone(), config.refresh_interval);

    let state = AppState { feed };

    // Rate limiting: burst of 10, one request replenished per second, per peer IP
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(1)
            .burst_size(10)
            .finish()
            .context("Failed to build governor config")?,
    );

    let app = router(state).layer(GovernorLayer {
        config: governor_config,
    });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    schedule.cancel();
    tracing::info!("Shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

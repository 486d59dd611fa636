// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitLab Profile web server
//!
//! Signs users in with GitLab over OAuth2 and shows their profile and
//! recent activity.

use gitlab_profile::{config::Config, AppState};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often expired sessions are dropped from memory.
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        gitlab = %config.gitlab_url,
        "Starting GitLab Profile"
    );

    // Build shared state
    let state = Arc::new(AppState::new(config.clone())?);

    // Expired sessions are also dropped lazily on access; this keeps
    // abandoned ones from piling up.
    let purge_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = purge_state.sessions.purge_expired();
            if purged > 0 {
                tracing::info!(purged, "Purged expired sessions");
            }
        }
    });

    // Build router
    let app = gitlab_profile::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running at http://localhost:{}", config.port);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gitlab_profile=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}

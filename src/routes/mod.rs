// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod oauth;

use crate::error::AppError;
use crate::middleware::{security::add_security_headers, with_session};
use crate::AppState;
use axum::handler::HandlerWithoutStateExt;
use axum::http::Uri;
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Fallback for anything that is neither a route nor a static file.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_files =
        ServeDir::new(&state.config.static_dir).fallback(not_found.into_service());

    Router::new()
        .merge(oauth::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), with_session))
        .fallback_service(static_files)
        .layer(middleware::from_fn(add_security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types rendered as static error pages.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

const FORBIDDEN_PAGE: &str = include_str!("../public/errors/403.html");
const NOT_FOUND_PAGE: &str = include_str!("../public/errors/404.html");
const SERVER_ERROR_PAGE: &str = include_str!("../public/errors/500.html");
const BAD_REQUEST_PAGE: &str = include_str!("../public/errors/400.html");

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// OAuth `state` did not match the session's CSRF token.
    #[error("CSRF state mismatch")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Network failure, non-2xx status or unparseable body from GitLab.
    #[error("GitLab API error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let page = match &self {
            AppError::Forbidden => {
                tracing::warn!("Rejected callback with mismatched OAuth state");
                FORBIDDEN_PAGE
            }
            AppError::NotFound(path) => {
                tracing::debug!(path = %path, "Not found");
                NOT_FOUND_PAGE
            }
            AppError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                BAD_REQUEST_PAGE
            }
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "GitLab API error");
                SERVER_ERROR_PAGE
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                SERVER_ERROR_PAGE
            }
        };

        (self.status(), Html(page)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

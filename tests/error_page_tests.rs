// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static file and error page tests.

use axum::http::StatusCode;
use gitlab_profile::error::AppError;

mod common;

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (app, _) = common::create_test_app("https://gitlab.example.com");

    let response = common::get(&app, "/does/not/exist", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(common::body_string(response).await.contains("404"));
}

#[tokio::test]
async fn test_unknown_path_creates_no_session() {
    let (app, _) = common::create_test_app("https://gitlab.example.com");

    let response = common::get(&app, "/missing", None).await;
    assert!(common::set_cookie(&response, "gitlab_profile_sid").is_none());
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let (app, _) = common::create_test_app("https://gitlab.example.com");

    let response = common::get(&app, "/style.css", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::body_string(response).await.contains(".profile"));
}

#[test]
fn test_error_status_mapping() {
    assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        AppError::NotFound("/x".to_string()).status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        AppError::BadRequest("missing code".to_string()).status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::Upstream("HTTP 502".to_string()).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        AppError::Internal(anyhow::anyhow!("boom")).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

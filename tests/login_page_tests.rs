// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login page tests.
//!
//! These tests verify that the landing page embeds the session's CSRF token
//! in the GitLab authorize link and that the session cookie is issued with
//! the expected attributes.

use axum::http::{header, StatusCode};

mod common;

const COOKIE: &str = "gitlab_profile_sid";

#[tokio::test]
async fn test_login_page_embeds_csrf_state_and_scope() {
    let (app, state) = common::create_test_app("https://gitlab.example.com");

    let response = common::get(&app, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = common::cookie_pair(&common::set_cookie(&response, COOKIE).unwrap());
    let html = common::body_string(response).await;

    assert!(html.contains("https://gitlab.example.com/oauth/authorize?"));
    assert!(html.contains("client_id&#x3D;test_app_id"));
    assert!(html.contains("response_type&#x3D;code"));
    assert!(html.contains("scope&#x3D;read_user"));

    let session = state
        .sessions
        .peek(&common::cookie_value(&cookie))
        .expect("session stored");
    let csrf = session.csrf.expect("csrf generated");
    assert_eq!(csrf.len(), 136);
    assert_eq!(common::authorize_state(&html), csrf);
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let (app, _) = common::create_test_app("https://gitlab.example.com");

    let response = common::get(&app, "/", None).await;
    let cookie = common::set_cookie(&response, COOKIE).unwrap();

    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=86400"));
    assert!(cookie.contains("Path=/"));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_csrf_token_stable_within_session() {
    let (app, _) = common::create_test_app("https://gitlab.example.com");
    let (cookie, first_state) = common::login(&app, COOKIE).await;

    let response = common::get(&app, "/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::set_cookie(&response, COOKIE).is_none());

    let html = common::body_string(response).await;
    assert_eq!(common::authorize_state(&html), first_state);
}

#[tokio::test]
async fn test_new_session_gets_new_csrf_token() {
    let (app, _) = common::create_test_app("https://gitlab.example.com");
    let (_, first_state) = common::login(&app, COOKIE).await;
    let (_, second_state) = common::login(&app, COOKIE).await;

    assert_ne!(first_state, second_state);
}

#[tokio::test]
async fn test_forged_cookie_starts_new_session() {
    let (app, _) = common::create_test_app("https://gitlab.example.com");
    let forged = format!("{COOKIE}=deadbeef.{}", "00".repeat(32));

    let response = common::get(&app, "/", Some(&forged)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::set_cookie(&response, COOKIE).is_some());
}

#[tokio::test]
async fn test_login_page_security_headers() {
    let (app, _) = common::create_test_app("https://gitlab.example.com");
    let response = common::get(&app, "/", None).await;

    let headers = response.headers();
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
    assert_eq!(headers.get("Cache-Control").unwrap(), "no-store");
    assert!(headers
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
}

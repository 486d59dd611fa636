// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use gitlab_profile::config::Config;
use gitlab_profile::routes::create_router;
use gitlab_profile::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Config pointing at a (usually wiremock) GitLab instance.
#[allow(dead_code)]
pub fn test_config(gitlab_url: &str) -> Config {
    Config {
        gitlab_url: gitlab_url.to_string(),
        ..Config::default()
    }
}

/// Create a test app talking to the given GitLab URL.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(gitlab_url: &str) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(test_config(gitlab_url)).expect("Failed to build state"));
    (create_router(state.clone()), state)
}

/// Send a GET request, optionally with a session cookie ("name=value").
#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Full Set-Cookie header for the named cookie, if the response set it.
#[allow(dead_code)]
pub fn set_cookie(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .find(|value| value.starts_with(&format!("{name}=")))
}

/// "name=value" pair from a Set-Cookie header, usable as a Cookie header.
#[allow(dead_code)]
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().trim().to_string()
}

/// Value part of a "name=value" cookie pair.
#[allow(dead_code)]
pub fn cookie_value(pair: &str) -> String {
    pair.split_once('=').unwrap().1.to_string()
}

/// Extract the decoded `state` parameter from the rendered authorize link.
#[allow(dead_code)]
pub fn authorize_state(html: &str) -> String {
    let html = html.replace("&#x3D;", "=").replace("&amp;", "&");
    let start = html.find("state=").expect("authorize link has a state") + "state=".len();
    let rest = &html[start..];
    let end = rest.find('&').expect("state is followed by scope");
    urlencoding::decode(&rest[..end]).unwrap().into_owned()
}

/// Visit the login page and return the session cookie pair and CSRF state.
#[allow(dead_code)]
pub async fn login(app: &Router, cookie_name: &str) -> (String, String) {
    let response = get(app, "/", None).await;
    let cookie = cookie_pair(&set_cookie(&response, cookie_name).expect("session cookie"));
    let html = body_string(response).await;
    (cookie, authorize_state(&html))
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Security headers middleware.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

/// Avatars are served from the GitLab host (or Gravatar), so any https image
/// source is allowed; everything else must come from this server.
const CONTENT_SECURITY_POLICY: &str =
    "default-src 'none'; img-src 'self' https:; style-src 'self'; form-action 'none'; frame-ancestors 'none'";

/// Add security headers to all responses.
pub async fn add_security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert(
        "Content-Security-Policy",
        HeaderValue::from_static(CONTENT_SECURITY_POLICY),
    );
    // The authorize URL carries the CSRF state; don't leak it via Referer.
    headers.insert("Referrer-Policy", HeaderValue::from_static("no-referrer"));
    // Profile pages contain personal data.
    if !headers.contains_key("Cache-Control") {
        headers.insert("Cache-Control", HeaderValue::from_static("no-store"));
    }

    response
}

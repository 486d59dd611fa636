// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitLab OAuth login and profile routes.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::SessionHandle;
use crate::models::{Session, UserProfile};
use crate::services::csrf;
use crate::AppState;

/// Shown on the login page when the profile is requested without a token.
pub const LOGIN_AGAIN_MESSAGE: &str = "Login Again";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/callback", get(callback))
}

/// Login page: make sure the session has a CSRF token, then link to GitLab.
async fn index(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
) -> Result<Html<String>> {
    let mut session = session.lock().await;
    csrf::generate(&mut session)?;

    let csrf_state = session.csrf.as_deref().unwrap_or_default();
    let url = state.gitlab.authorize_url(csrf_state, &state.config.scope);

    // Messages are shown once.
    let message = session.message.take();
    let page = state.views.login(&url, message.as_deref())?;

    Ok(Html(page))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange code for a token, check CSRF, show the profile.
async fn callback(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    params: std::result::Result<Query<CallbackParams>, QueryRejection>,
) -> Result<Response> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let mut session = session.lock().await;

    // Consent denied (or another provider-side failure)
    if let Some(error) = params.error {
        csrf::validate(params.state.as_deref().unwrap_or_default(), &session)?;
        tracing::warn!(error = %error, "OAuth error from GitLab");
        session.message = Some(format!("GitLab sign-in failed: {}", error));
        return Ok(Redirect::to("/").into_response());
    }

    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("missing authorization code".to_string()))?;

    tracing::info!("Exchanging authorization code for access token");
    session.access_token = state.gitlab.exchange_code(&code).await?;

    csrf::validate(params.state.as_deref().unwrap_or_default(), &session)?;

    user_page(&state, &mut session).await
}

/// Render the profile page for the session's access token.
///
/// Without a token no GitLab call is made; the browser is sent back to the
/// login page instead.
async fn user_page(state: &AppState, session: &mut Session) -> Result<Response> {
    let Some(access_token) = session.access_token.as_deref() else {
        session.message = Some(LOGIN_AGAIN_MESSAGE.to_string());
        return Ok(Redirect::to("/").into_response());
    };

    let user_info = UserProfile::from(state.gitlab.current_user(access_token).await?);
    let activities = state.gitlab.recent_events(access_token).await?;

    tracing::info!(
        user_id = user_info.id,
        username = %user_info.username,
        activities = activities.len(),
        "Rendering profile page"
    );

    let page = state.views.profile(&user_info, &activities)?;
    Ok(Html(page).into_response())
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitLab OAuth and REST API client.
//!
//! Handles:
//! - Building the browser-facing authorization URL
//! - Exchanging an authorization code for an access token
//! - Fetching the current user's profile
//! - Fetching the most recent events (two pages at most)

use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::config::Config;
use crate::error::AppError;
use crate::models::Activity;

/// Events requested per page.
pub const EVENTS_PER_PAGE: u32 = 100;

/// Pages of events fetched at most. Later pages are never requested, even
/// when GitLab announces them.
pub const EVENT_PAGES: u32 = 2;

/// Events kept for the profile page.
pub const MAX_ACTIVITIES: usize = 101;

/// Response header GitLab uses to announce the next page.
const NEXT_PAGE_HEADER: &str = "x-next-page";

/// GitLab API client.
#[derive(Clone)]
pub struct GitLabClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl GitLabClient {
    /// Create a new GitLab client with the OAuth application credentials.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.gitlab_url.trim_end_matches('/').to_string(),
            client_id: config.app_id.clone(),
            client_secret: config.app_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    /// URL the browser is sent to for user consent.
    pub fn authorize_url(&self, state: &str, scope: &str) -> String {
        format!(
            "{}/oauth/authorize?\
             client_id={}&\
             redirect_uri={}&\
             response_type=code&\
             state={}&\
             scope={}",
            self.base_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(state),
            urlencoding::encode(scope),
        )
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Returns `None` when GitLab answers successfully but without an
    /// `access_token` field.
    pub async fn exchange_code(&self, code: &str) -> Result<Option<String>, AppError> {
        let url = format!("{}/oauth/token", self.base_url);

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .query(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Token exchange failed: {}", e.without_url())))?;

        let token: TokenResponse = check_response_json(response).await?;
        if token.access_token.is_none() {
            tracing::warn!("Token response did not include an access token");
        }

        Ok(token.access_token)
    }

    /// Get the authenticated user's profile.
    pub async fn current_user(&self, access_token: &str) -> Result<GitLabUser, AppError> {
        let url = format!("{}/api/v4/user", self.base_url);

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[("access_token", access_token)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.without_url().to_string()))?;

        check_response_json(response).await
    }

    /// Get the user's most recent events, newest first.
    ///
    /// Fetches page 1 and, if GitLab announces a next page, page 2. The
    /// combined list is cut to [`MAX_ACTIVITIES`] entries.
    pub async fn recent_events(&self, access_token: &str) -> Result<Vec<Activity>, AppError> {
        let mut activities = Vec::new();

        for page in 1..=EVENT_PAGES {
            let (events, next_page) = self.events_page(access_token, page).await?;
            activities.extend(events);

            // GitLab reports page 2 (or 3 after page 2) while more remain.
            if !matches!(next_page, Some(2 | 3)) {
                break;
            }
        }

        activities.truncate(MAX_ACTIVITIES);
        tracing::debug!(count = activities.len(), "Fetched recent events");

        Ok(activities)
    }

    /// Fetch a single page of events with the announced next page number.
    async fn events_page(
        &self,
        access_token: &str,
        page: u32,
    ) -> Result<(Vec<Activity>, Option<u32>), AppError> {
        let url = format!("{}/api/v4/events", self.base_url);

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&[
                ("per_page", EVENTS_PER_PAGE.to_string()),
                ("page", page.to_string()),
                ("access_token", access_token.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.without_url().to_string()))?;

        let next_page = response
            .headers()
            .get(NEXT_PAGE_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse().ok());

        let events = check_response_json(response).await?;
        Ok((events, next_page))
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Upstream(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("JSON parse error: {}", e.without_url())))
}

/// Token endpoint response. Only the access token is used.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// User object from `GET /api/v4/user`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabUser {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
    #[serde(default)]
    pub last_activity_on: Option<String>,
}

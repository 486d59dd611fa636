// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! GitLab Profile: sign in with GitLab and show your profile and activity.
//!
//! This crate provides a small web server that runs the OAuth2
//! authorization-code flow against a GitLab instance, keeps the resulting
//! access token in a server-side session, and renders the user's profile
//! together with their most recent events.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod views;

use config::Config;
use middleware::session::Sessions;
use services::GitLabClient;
use views::Views;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub gitlab: GitLabClient,
    pub sessions: Sessions,
    pub views: Views,
}

impl AppState {
    /// Build the application state from a loaded configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let gitlab = GitLabClient::new(&config);
        let sessions = Sessions::from_config(&config);
        let views = Views::new()?;

        Ok(Self {
            config,
            gitlab,
            sessions,
            views,
        })
    }
}

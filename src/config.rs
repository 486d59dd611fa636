// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Read once at startup and handed to the rest of the application through
//! `AppState`; handlers never consult the environment directly.

use std::env;

/// Default GitLab instance the application authenticates against.
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.lnu.se";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- OAuth application ---
    /// GitLab application ID (public)
    pub app_id: String,
    /// GitLab application secret
    pub app_secret: String,
    /// Callback URL registered with the GitLab application
    pub redirect_uri: String,
    /// Space separated OAuth scopes requested at authorization
    pub scope: String,
    /// Base URL of the GitLab instance
    pub gitlab_url: String,

    // --- Sessions ---
    /// Name of the session cookie
    pub session_name: String,
    /// Key used to sign session cookies (raw bytes)
    pub session_secret: Vec<u8>,

    // --- Server ---
    /// Server port
    pub port: u16,
    /// Directory served for static assets
    pub static_dir: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            app_id: "test_app_id".to_string(),
            app_secret: "test_app_secret".to_string(),
            redirect_uri: "http://localhost:8080/callback".to_string(),
            scope: "read_user".to_string(),
            gitlab_url: DEFAULT_GITLAB_URL.to_string(),
            session_name: "gitlab_profile_sid".to_string(),
            session_secret: b"test_session_secret_32_bytes!!!!".to_vec(),
            port: 8080,
            static_dir: "public".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", value))?,
            Err(_) => 8080,
        };

        let session_secret = env::var("SESSION_SECRET")
            .map_err(|_| ConfigError::Missing("SESSION_SECRET"))?
            .into_bytes();
        if session_secret.is_empty() {
            return Err(ConfigError::Invalid("SESSION_SECRET", String::new()));
        }

        Ok(Self {
            app_id: env::var("APP_ID").map_err(|_| ConfigError::Missing("APP_ID"))?,
            app_secret: env::var("APP_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("APP_SECRET"))?,
            redirect_uri: env::var("REDIRECT").map_err(|_| ConfigError::Missing("REDIRECT"))?,
            scope: env::var("SCOPE").unwrap_or_else(|_| "read_user read_api".to_string()),
            gitlab_url: env::var("GITLAB_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_GITLAB_URL.to_string()),
            session_name: env::var("SESSION_NAME")
                .unwrap_or_else(|_| "gitlab_profile_sid".to_string()),
            session_secret,
            port,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
        })
    }

    /// Whether cookies should carry the `Secure` attribute.
    ///
    /// Follows the scheme of the registered callback URL, so local
    /// development over plain http keeps working.
    pub fn secure_cookies(&self) -> bool {
        self.redirect_uri.starts_with("https://")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cookie-backed server-side sessions.
//!
//! The cookie only carries a random session id plus an HMAC over it; the
//! session data itself lives in a [`SessionStore`]. The middleware loads the
//! session before the handler runs and writes it back once the handler has
//! produced a successful (non 4xx/5xx) response.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Session;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use sha2::Sha256;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Fixed session lifetime, counted from creation.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Random bytes in a session id.
const SESSION_ID_BYTES: usize = 32;

/// Session data together with its expiry.
#[derive(Debug, Clone)]
pub struct StoredSession {
    pub data: Session,
    pub expires_at: DateTime<Utc>,
}

/// Storage backend for sessions, keyed by session id.
pub trait SessionStore: Send + Sync {
    fn get(&self, id: &str) -> Option<StoredSession>;
    fn insert(&self, id: String, session: StoredSession);
    fn remove(&self, id: &str);
    /// Apply `f` to a stored session in place. Returns false when `id` is
    /// unknown.
    fn update(&self, id: &str, f: &mut dyn FnMut(&mut Session)) -> bool;
    /// Drop every session that expired before `now`, returning how many.
    fn purge_expired(&self, now: DateTime<Utc>) -> usize;
}

/// In-process session store.
#[derive(Default)]
pub struct MemoryStore {
    sessions: DashMap<String, StoredSession>,
}

impl SessionStore for MemoryStore {
    fn get(&self, id: &str) -> Option<StoredSession> {
        self.sessions.get(id).map(|s| s.value().clone())
    }

    fn insert(&self, id: String, session: StoredSession) {
        self.sessions.insert(id, session);
    }

    fn remove(&self, id: &str) {
        self.sessions.remove(id);
    }

    fn update(&self, id: &str, f: &mut dyn FnMut(&mut Session)) -> bool {
        match self.sessions.get_mut(id) {
            Some(mut stored) => {
                f(&mut stored.data);
                true
            }
            None => false,
        }
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        // Count inside retain; inserts may race with the purge.
        let mut removed = 0;
        self.sessions.retain(|_, s| {
            let keep = s.expires_at > now;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }
}

/// Session for the current request, shared between middleware and handler.
#[derive(Clone)]
pub struct SessionHandle(Arc<Mutex<Session>>);

impl SessionHandle {
    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.0.lock().await
    }
}

/// Session manager: cookie signing plus the backing store.
pub struct Sessions {
    store: Arc<dyn SessionStore>,
    cookie_name: String,
    secret: Vec<u8>,
    secure: bool,
}

impl Sessions {
    /// Create sessions backed by an in-memory store.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(MemoryStore::default()), config)
    }

    pub fn new(store: Arc<dyn SessionStore>, config: &Config) -> Self {
        Self {
            store,
            cookie_name: config.session_name.clone(),
            secret: config.session_secret.clone(),
            secure: config.secure_cookies(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Load the session referenced by the request's cookie.
    ///
    /// Returns the session id when the cookie is authentic and the session is
    /// still live; otherwise a fresh, empty session with no id.
    pub fn load(&self, jar: &CookieJar) -> (Option<String>, Session) {
        let Some(id) = jar
            .get(&self.cookie_name)
            .and_then(|c| self.verify_cookie_value(c.value()))
        else {
            return (None, Session::default());
        };

        match self.store.get(&id) {
            Some(stored) if stored.expires_at > Utc::now() => (Some(id), stored.data),
            Some(_) => {
                self.store.remove(&id);
                tracing::debug!("Session expired");
                (None, Session::default())
            }
            None => (None, Session::default()),
        }
    }

    /// Write the session back to the store.
    ///
    /// For an existing session only the fields that changed since `loaded`
    /// are written, so overlapping requests on one session do not undo each
    /// other's updates. Returns the cookie to set when a new session was
    /// created. Empty new sessions are not stored and get no cookie.
    pub fn commit(
        &self,
        id: Option<String>,
        loaded: &Session,
        data: Session,
    ) -> Result<Option<Cookie<'static>>> {
        if let Some(id) = id {
            if self
                .store
                .update(&id, &mut |stored: &mut Session| stored.apply_changes(loaded, &data))
            {
                return Ok(None);
            }
        }

        if data.is_empty() {
            return Ok(None);
        }

        let id = new_session_id()?;
        let value = self.cookie_value(&id)?;
        self.store.insert(
            id,
            StoredSession {
                data,
                expires_at: Utc::now() + Duration::hours(SESSION_TTL_HOURS),
            },
        );

        let cookie = Cookie::build((self.cookie_name.clone(), value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(time::Duration::hours(SESSION_TTL_HOURS))
            .build();

        Ok(Some(cookie))
    }

    /// Look up the session a cookie value refers to without touching it.
    pub fn peek(&self, cookie_value: &str) -> Option<Session> {
        let id = self.verify_cookie_value(cookie_value)?;
        self.store
            .get(&id)
            .filter(|s| s.expires_at > Utc::now())
            .map(|s| s.data)
    }

    pub fn purge_expired(&self) -> usize {
        self.store.purge_expired(Utc::now())
    }

    /// Cookie value for a session id: `"<id>.<hex hmac>"`.
    fn cookie_value(&self, id: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
        mac.update(id.as_bytes());
        Ok(format!("{}.{}", id, hex::encode(mac.finalize().into_bytes())))
    }

    /// Verify the HMAC on a cookie value and return the session id.
    fn verify_cookie_value(&self, value: &str) -> Option<String> {
        let (id, signature_hex) = value.rsplit_once('.')?;
        let signature = hex::decode(signature_hex).ok()?;

        let mut mac = HmacSha256::new_from_slice(&self.secret).ok()?;
        mac.update(id.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            tracing::warn!("Session cookie signature mismatch");
            return None;
        }

        Some(id.to_string())
    }
}

fn new_session_id() -> Result<String> {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;
    Ok(hex::encode(bytes))
}

/// Middleware that attaches the browser's session to the request.
///
/// Handlers extract `Extension<SessionHandle>`. Changes are committed only
/// when the response is not an error, so a failed callback leaves the
/// stored session untouched.
pub async fn with_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let (id, loaded) = state.sessions.load(&jar);
    let handle = SessionHandle(Arc::new(Mutex::new(loaded.clone())));
    request.extensions_mut().insert(handle.clone());

    let mut response = next.run(request).await;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        return response;
    }

    let data = handle.lock().await.clone();
    match state.sessions.commit(id, &loaded, data) {
        Ok(Some(cookie)) => match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => {
                return AppError::Internal(anyhow::anyhow!("Invalid session cookie: {}", e))
                    .into_response();
            }
        },
        Ok(None) => {}
        Err(e) => return e.into_response(),
    }

    response
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-browser session data.

use std::fmt;

/// Values kept for one browser session.
///
/// Owned by the session store; request handlers only read and write fields.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Anti-forgery token sent to GitLab as the OAuth `state`
    pub csrf: Option<String>,
    /// GitLab access token from the last successful code exchange
    pub access_token: Option<String>,
    /// Message shown on the next login page render
    pub message: Option<String>,
}

impl Session {
    /// A session with no data does not need a cookie.
    pub fn is_empty(&self) -> bool {
        self.csrf.is_none() && self.access_token.is_none() && self.message.is_none()
    }

    /// Copy into `self` every field that differs between `loaded` and
    /// `updated`.
    pub fn apply_changes(&mut self, loaded: &Session, updated: &Session) {
        if updated.csrf != loaded.csrf {
            self.csrf.clone_from(&updated.csrf);
        }
        if updated.access_token != loaded.access_token {
            self.access_token.clone_from(&updated.access_token);
        }
        if updated.message != loaded.message {
            self.message.clone_from(&updated.message);
        }
    }
}

// Keep the access token out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("csrf", &self.csrf.as_ref().map(|_| "<set>"))
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("message", &self.message)
            .finish()
    }
}

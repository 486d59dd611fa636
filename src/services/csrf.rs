// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-session CSRF token used as the OAuth `state` parameter.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ring::rand::{SecureRandom, SystemRandom};
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};
use crate::models::Session;

/// Number of random bytes in a CSRF token (136 base64 characters).
pub const CSRF_TOKEN_BYTES: usize = 100;

/// Give the session a CSRF token unless it already has one.
///
/// Tokens are never rotated for the lifetime of a session.
pub fn generate(session: &mut Session) -> Result<()> {
    if session.csrf.is_some() {
        return Ok(());
    }

    let mut bytes = [0u8; CSRF_TOKEN_BYTES];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;

    session.csrf = Some(STANDARD.encode(bytes));
    Ok(())
}

/// Check the `state` GitLab sent back against the session's CSRF token.
///
/// A `+` in the token can arrive as a space when the browser decoded the
/// query string form-style, so spaces are mapped back before comparing.
pub fn validate(observed_state: &str, session: &Session) -> Result<()> {
    let expected = session.csrf.as_deref().ok_or(AppError::Forbidden)?;
    let observed = observed_state.replace(' ', "+");

    if bool::from(observed.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

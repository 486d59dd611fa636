// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - OAuth handshake and CSRF logic.

pub mod csrf;
pub mod gitlab;

pub use gitlab::{GitLabClient, GitLabUser};

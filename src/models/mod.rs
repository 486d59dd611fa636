// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod profile;
pub mod session;

pub use activity::Activity;
pub use profile::UserProfile;
pub use session::Session;

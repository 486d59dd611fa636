// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! GitLab event as listed on the profile page.

use serde::{Deserialize, Serialize};

/// One entry from `GET /api/v4/events`.
///
/// Only the fields the profile page shows are kept; GitLab sends many more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// GitLab event ID
    pub id: u64,
    /// Project the event belongs to (None for user-level events)
    #[serde(default)]
    pub project_id: Option<u64>,
    /// What happened ("pushed to", "opened", "commented on", ...)
    #[serde(default)]
    pub action_name: Option<String>,
    /// Kind of object acted on (Issue, MergeRequest, Note, ...)
    #[serde(default)]
    pub target_type: Option<String>,
    /// Title of the object acted on
    #[serde(default)]
    pub target_title: Option<String>,
    /// When the event happened (ISO 8601)
    #[serde(default)]
    pub created_at: Option<String>,
}

//! User profile shown on the profile page.

use serde::Serialize;

use crate::services::gitlab::GitLabUser;

/// Profile fields rendered for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    /// GitLab user ID
    pub id: u64,
    /// Display name
    pub name: Option<String>,
    /// Login name
    pub username: String,
    /// Public email (may be None if not shared)
    pub email: Option<String>,
    /// Avatar image URL
    pub avatar: Option<String>,
    /// Link to the user's GitLab profile
    #[serde(rename = "profileUrl")]
    pub profile_url: Option<String>,
    /// Date of last activity (YYYY-MM-DD)
    pub last_activity: Option<String>,
}

impl From<GitLabUser> for UserProfile {
    fn from(user: GitLabUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            avatar: user.avatar_url,
            profile_url: user.web_url,
            last_activity: user.last_activity_on,
        }
    }
}

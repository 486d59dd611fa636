// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML views rendered with Handlebars.
//!
//! Templates are compiled into the binary and registered once at startup.
//! Handlebars escapes every `{{value}}`, so data from GitLab is safe to
//! interpolate.

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{Activity, UserProfile};

const LOGIN_TEMPLATE: &str = "login";
const PROFILE_TEMPLATE: &str = "profile";

/// Data for the login page.
#[derive(Serialize)]
struct LoginView<'a> {
    url: &'a str,
    message: Option<&'a str>,
}

/// Data for the profile page.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileView<'a> {
    user_info: &'a UserProfile,
    activities: &'a [Activity],
    activity_count: usize,
}

/// Registry of compiled page templates.
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> anyhow::Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);

        registry.register_partial("header", include_str!("../templates/partials/header.hbs"))?;
        registry.register_partial("footer", include_str!("../templates/partials/footer.hbs"))?;
        registry.register_template_string(LOGIN_TEMPLATE, include_str!("../templates/login.hbs"))?;
        registry
            .register_template_string(PROFILE_TEMPLATE, include_str!("../templates/profile.hbs"))?;

        Ok(Self { registry })
    }

    /// Login page with the GitLab authorization link.
    pub fn login(&self, url: &str, message: Option<&str>) -> Result<String> {
        self.render(LOGIN_TEMPLATE, &LoginView { url, message })
    }

    /// Profile page for the signed-in user.
    pub fn profile(&self, user_info: &UserProfile, activities: &[Activity]) -> Result<String> {
        self.render(
            PROFILE_TEMPLATE,
            &ProfileView {
                user_info,
                activities,
                activity_count: activities.len(),
            },
        )
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.registry
            .render(name, data)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to render {}: {}", name, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            name: Some("A".to_string()),
            username: "a".to_string(),
            email: None,
            avatar: Some("https://gitlab.example.com/a.png".to_string()),
            profile_url: Some("https://gitlab.example.com/a".to_string()),
            last_activity: Some("2020-01-01".to_string()),
        }
    }

    #[test]
    fn test_login_escapes_url() {
        let views = Views::new().unwrap();
        let html = views
            .login("https://gitlab.example.com/oauth/authorize?a=1&b=2", None)
            .unwrap();

        assert!(html.contains("a&#x3D;1&amp;b&#x3D;2"));
        assert!(!html.contains("class=\"message\""));
    }

    #[test]
    fn test_login_shows_message() {
        let views = Views::new().unwrap();
        let html = views.login("https://x", Some("Login Again")).unwrap();

        assert!(html.contains("Login Again"));
    }

    #[test]
    fn test_profile_renders_activities() {
        let views = Views::new().unwrap();
        let activities = vec![Activity {
            id: 9,
            project_id: Some(3),
            action_name: Some("opened".to_string()),
            target_type: Some("Issue".to_string()),
            target_title: Some("<script>alert(1)</script>".to_string()),
            created_at: Some("2024-03-01T10:00:00.000Z".to_string()),
        }];

        let html = views.profile(&profile(), &activities).unwrap();

        assert!(html.contains("Latest activity (1)"));
        assert!(html.contains("https://gitlab.example.com/a.png"));
        assert!(html.contains("2020-01-01"));
        assert!(html.contains("opened"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_profile_without_activities() {
        let views = Views::new().unwrap();
        let html = views.profile(&profile(), &[]).unwrap();

        assert!(html.contains("No activity yet."));
    }
}

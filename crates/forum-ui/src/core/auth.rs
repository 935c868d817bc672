//! Authenticated-user primitives shared across the UI.
//!
//! # Design
//! - Keep the user as plain data so it can travel through contexts and tests.
//! - The session itself lives in LMS cookies; this module never sees credentials.

use serde::Deserialize;

/// The signed-in learner or staff member.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Login name, used to scope block and post queries.
    pub username: String,
    /// Numeric account id, when reported.
    #[serde(default)]
    pub user_id: Option<u64>,
    /// Whether the account has global staff rights.
    #[serde(default, alias = "is_staff")]
    pub administrator: bool,
}

impl AuthenticatedUser {
    /// Whether this user can be used for authenticated requests.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.username.trim().is_empty()
    }
}

/// LMS login page that returns to `next` after signing in.
#[must_use]
pub fn login_url(lms_base_url: &str, next: &str) -> String {
    format!(
        "{}/login?next={}",
        lms_base_url.trim_end_matches('/'),
        urlencoding::encode(next)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_usernames_are_not_usable() {
        let user = AuthenticatedUser {
            username: "  ".to_string(),
            user_id: None,
            administrator: false,
        };
        assert!(!user.is_usable());
    }

    #[test]
    fn user_payload_accepts_staff_alias() {
        let user: AuthenticatedUser =
            serde_json::from_str(r#"{"username":"ada","user_id":7,"is_staff":true}"#)
                .expect("valid json");
        assert!(user.is_usable());
        assert!(user.administrator);
        assert_eq!(user.user_id, Some(7));
    }

    #[test]
    fn login_url_encodes_return_target() {
        assert_eq!(
            login_url("https://lms.example.com/", "https://apps.example.com/c1/topics?x=1"),
            "https://lms.example.com/login?next=https%3A%2F%2Fapps.example.com%2Fc1%2Ftopics%3Fx%3D1"
        );
    }
}

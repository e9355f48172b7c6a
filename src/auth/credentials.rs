//! The credential bundle held for an authenticated session.

use serde::{Deserialize, Serialize};

use crate::models::User;

/// Authentication credentials for the DayMatrix backend.
///
/// The access and refresh tokens are either both present (authenticated) or
/// both absent (unauthenticated); the session manager never leaves a partial
/// bundle in place outside the instant of a refresh exchange.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    /// Short-lived bearer token attached to API requests.
    pub access_token: Option<String>,
    /// Longer-lived token exchanged for new access tokens.
    pub refresh_token: Option<String>,
    /// Snapshot of the authenticated user, cached for display.
    pub user: Option<User>,
}

impl Credentials {
    /// Create new empty credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether both tokens are present.
    pub fn is_complete(&self) -> bool {
        self.access_token.is_some() && self.refresh_token.is_some()
    }

    /// Check whether no credential fields are held at all.
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.user.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_default() {
        let creds = Credentials::default();
        assert!(creds.access_token.is_none());
        assert!(creds.refresh_token.is_none());
        assert!(creds.user.is_none());
        assert!(creds.is_empty());
        assert!(!creds.is_complete());
    }

    #[test]
    fn test_credentials_is_complete() {
        let mut creds = Credentials::new();
        creds.access_token = Some("a1".to_string());
        assert!(!creds.is_complete());

        creds.refresh_token = Some("r1".to_string());
        assert!(creds.is_complete());
        assert!(!creds.is_empty());
    }

    #[test]
    fn test_credentials_serialization_roundtrip() {
        let creds = Credentials {
            access_token: Some("token".to_string()),
            refresh_token: Some("refresh".to_string()),
            user: None,
        };

        let json = serde_json::to_string(&creds).unwrap();
        let deserialized: Credentials = serde_json::from_str(&json).unwrap();
        assert_eq!(creds, deserialized);
    }

    #[test]
    fn test_credentials_ignores_unknown_fields() {
        let json = r#"{
            "access_token": "a",
            "refresh_token": "r",
            "user": null,
            "legacy_field": true
        }"#;

        let creds: Credentials = serde_json::from_str(json).unwrap();
        assert_eq!(creds.access_token, Some("a".to_string()));
        assert_eq!(creds.refresh_token, Some("r".to_string()));
    }
}

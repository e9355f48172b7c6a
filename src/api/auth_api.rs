//! Client for the backend authentication endpoints.
//!
//! Covers login, signup, logout notification, token refresh, and token
//! validation. Everything else goes through the authenticated gateway in
//! [`crate::api::client`].

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::models::User;
use crate::traits::{Headers, HttpClient, HttpError, Method};

/// Default URL for the DayMatrix backend.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Error type for auth endpoint operations.
#[derive(Debug, Error)]
pub enum AuthApiError {
    /// Transport failure
    #[error(transparent)]
    Http(#[from] HttpError),
    /// Response body could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Server returned an error status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Response from the login and signup endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Response from the refresh endpoint (POST /refresh).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Payload for the signup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Build request headers with the JSON content type and an optional bearer
/// credential.
pub(crate) fn json_headers(bearer: Option<&str>) -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    if let Some(token) = bearer {
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));
    }
    headers
}

/// Client for the backend authentication endpoints.
#[derive(Clone)]
pub struct AuthApi {
    /// Base URL for the backend
    pub base_url: String,
    http: Arc<dyn HttpClient>,
}

impl AuthApi {
    /// Create a new AuthApi against the default backend URL.
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            http,
        }
    }

    /// Create a new AuthApi with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    /// Exchange email and password for a token pair.
    ///
    /// POST /login
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthApiError> {
        let url = format!("{}/login", self.base_url);
        let body = serde_json::to_string(&serde_json::json!({
            "email": email,
            "password": password,
        }))?;

        let response = self
            .http
            .request(Method::Post, &url, &json_headers(None), Some(&body))
            .await?;

        if !response.is_success() {
            return Err(Self::server_error(&response));
        }

        Ok(response.json()?)
    }

    /// Register a new account; the backend logs the user straight in.
    ///
    /// POST /signup
    pub async fn signup(&self, request: &SignupRequest) -> Result<TokenPair, AuthApiError> {
        let url = format!("{}/signup", self.base_url);
        let body = serde_json::to_string(request)?;

        let response = self
            .http
            .request(Method::Post, &url, &json_headers(None), Some(&body))
            .await?;

        if !response.is_success() {
            return Err(Self::server_error(&response));
        }

        Ok(response.json()?)
    }

    /// Invalidate a refresh token server-side.
    ///
    /// DELETE /logout (bearer = refresh token)
    ///
    /// Callers treat this as best effort; the session manager logs and
    /// swallows failures.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthApiError> {
        let url = format!("{}/logout", self.base_url);

        let response = self
            .http
            .request(Method::Delete, &url, &json_headers(Some(refresh_token)), None)
            .await?;

        if !response.is_success() {
            return Err(Self::server_error(&response));
        }

        Ok(())
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// POST /refresh (bearer = refresh token)
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, AuthApiError> {
        let url = format!("{}/refresh", self.base_url);

        let response = self
            .http
            .request(Method::Post, &url, &json_headers(Some(refresh_token)), None)
            .await?;

        if !response.is_success() {
            return Err(Self::server_error(&response));
        }

        Ok(response.json()?)
    }

    /// Ask the backend whether an access token is still accepted.
    ///
    /// GET /validate-token (bearer = access token)
    ///
    /// Transport failures count as "invalid"; the caller falls back to a
    /// refresh attempt rather than failing hard.
    pub async fn validate_token(&self, access_token: &str) -> bool {
        let url = format!("{}/validate-token", self.base_url);

        match self
            .http
            .request(Method::Get, &url, &json_headers(Some(access_token)), None)
            .await
        {
            Ok(response) => {
                let valid = response.is_success();
                if !valid {
                    debug!(status = response.status, "token validation rejected");
                }
                valid
            }
            Err(e) => {
                debug!("token validation transport error: {}", e);
                false
            }
        }
    }

    fn server_error(response: &crate::traits::Response) -> AuthApiError {
        AuthApiError::Server {
            status: response.status,
            message: response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string()),
        }
    }
}

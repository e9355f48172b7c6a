//! Crate-level error types.
//!
//! Transport- and storage-level errors live next to their traits
//! ([`crate::traits::HttpError`], [`crate::traits::StoreError`]); the types
//! here are what session and gateway callers see.

use thiserror::Error;

use crate::traits::{HttpError, StoreError};

/// Errors surfaced by the session manager.
///
/// Refresh and validation outcomes are reported through the session's
/// boolean protocol (every failure funnels into logout), so the only
/// fallible session surface is durable credential storage.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Durable credential storage failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors surfaced by the authenticated request gateway.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The access token was rejected and could not be refreshed; the
    /// session has already been logged out.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Transport failure (connection, timeout, DNS).
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Request body serialization or response body parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-success status on a typed endpoint.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

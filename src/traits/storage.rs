//! Token store trait abstraction.
//!
//! Provides a trait-based abstraction for durable credential storage,
//! enabling dependency injection and mocking in tests.

use async_trait::async_trait;

use crate::auth::Credentials;

/// Token store operation errors.
#[derive(Debug, Clone)]
pub enum StoreError {
    /// Failed to load credentials
    LoadFailed(String),
    /// Failed to save credentials
    SaveFailed(String),
    /// Failed to clear credentials
    ClearFailed(String),
    /// IO error
    Io(String),
    /// Serialization/deserialization error
    Serialization(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::LoadFailed(msg) => write!(f, "Failed to load credentials: {}", msg),
            StoreError::SaveFailed(msg) => write!(f, "Failed to save credentials: {}", msg),
            StoreError::ClearFailed(msg) => write!(f, "Failed to clear credentials: {}", msg),
            StoreError::Io(msg) => write!(f, "IO error: {}", msg),
            StoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Trait for durable credential storage.
///
/// This is the client-side analogue of a browser cookie store: three
/// credential fields persisted together with a retention window, and cleared
/// together on logout. Implementations include the production file-based
/// store and an in-memory store for testing.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load credentials from storage.
    ///
    /// # Returns
    /// - `Ok(Some(credentials))` if credentials exist and are within retention
    /// - `Ok(None)` if no credentials are stored or they have aged out
    /// - `Err(error)` if loading failed
    async fn load(&self) -> Result<Option<Credentials>, StoreError>;

    /// Save credentials to storage, stamping the retention window.
    async fn save(&self, creds: &Credentials) -> Result<(), StoreError>;

    /// Clear all stored credentials. Succeeds when nothing is stored.
    async fn clear(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            StoreError::LoadFailed("read error".to_string()).to_string(),
            "Failed to load credentials: read error"
        );
        assert_eq!(
            StoreError::SaveFailed("write error".to_string()).to_string(),
            "Failed to save credentials: write error"
        );
        assert_eq!(
            StoreError::ClearFailed("delete error".to_string()).to_string(),
            "Failed to clear credentials: delete error"
        );
        assert_eq!(
            StoreError::Io("disk full".to_string()).to_string(),
            "IO error: disk full"
        );
        assert_eq!(
            StoreError::Serialization("invalid json".to_string()).to_string(),
            "Serialization error: invalid json"
        );
    }

    #[test]
    fn test_store_error_implements_error_trait() {
        let err = StoreError::Io("test".to_string());
        let _: &dyn std::error::Error = &err;
    }
}

//! In-memory token store for testing.
//!
//! Stores credentials in memory, so tests can verify session behavior
//! without touching the file system. Individual operations can be made to
//! fail to exercise error paths.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::auth::Credentials;
use crate::traits::{StoreError, TokenStore};

/// In-memory token store for testing.
#[derive(Debug, Clone)]
pub struct MemoryTokenStore {
    credentials: Arc<Mutex<Option<Credentials>>>,
    save_should_fail: Arc<Mutex<bool>>,
    load_should_fail: Arc<Mutex<bool>>,
    clear_should_fail: Arc<Mutex<bool>>,
}

impl MemoryTokenStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            credentials: Arc::new(Mutex::new(None)),
            save_should_fail: Arc::new(Mutex::new(false)),
            load_should_fail: Arc::new(Mutex::new(false)),
            clear_should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Create a store seeded with credentials.
    pub fn with_credentials(creds: Credentials) -> Self {
        let store = Self::new();
        *store.credentials.lock().unwrap() = Some(creds);
        store
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether load should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether clear should fail.
    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<Credentials>, StoreError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(StoreError::LoadFailed("mock load failure".to_string()));
        }
        Ok(self.credentials.lock().unwrap().clone())
    }

    async fn save(&self, creds: &Credentials) -> Result<(), StoreError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(StoreError::SaveFailed("mock save failure".to_string()));
        }
        *self.credentials.lock().unwrap() = Some(creds.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        if *self.clear_should_fail.lock().unwrap() {
            return Err(StoreError::ClearFailed("mock clear failure".to_string()));
        }
        *self.credentials.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_by_default() {
        let store = MemoryTokenStore::new();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_load_clear_roundtrip() {
        let store = MemoryTokenStore::new();
        let creds = Credentials {
            access_token: Some("a".to_string()),
            refresh_token: Some("r".to_string()),
            user: None,
        };

        store.save(&creds).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(creds));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let creds = Credentials {
            access_token: Some("a".to_string()),
            refresh_token: Some("r".to_string()),
            user: None,
        };
        let store = MemoryTokenStore::with_credentials(creds.clone());
        assert_eq!(store.load().await.unwrap(), Some(creds));
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryTokenStore::new();

        store.set_load_should_fail(true);
        assert!(store.load().await.is_err());
        store.set_load_should_fail(false);

        store.set_save_should_fail(true);
        assert!(store.save(&Credentials::new()).await.is_err());

        store.set_clear_should_fail(true);
        assert!(store.clear().await.is_err());
    }
}

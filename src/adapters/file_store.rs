//! File-backed token store.
//!
//! The durable analogue of the browser cookie store: credentials live in
//! `~/.daymatrix/credentials.json` together with a `stored_at` stamp, and
//! entries older than the 7-day retention window are treated as absent on
//! load. All fields are written and cleared together.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use crate::auth::Credentials;
use crate::traits::{StoreError, TokenStore};

/// The storage directory name under the home directory.
const STORE_DIR: &str = ".daymatrix";

/// The credentials file name.
const STORE_FILE: &str = "credentials.json";

/// How long stored credentials stay usable.
pub const RETENTION_DAYS: i64 = 7;

/// On-disk shape: the credential bundle plus the retention stamp.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(flatten)]
    credentials: Credentials,
    /// Unix seconds when the bundle was written.
    stored_at: i64,
}

/// Token store persisting to a JSON file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store at the default location.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self {
            path: home.join(STORE_DIR).join(STORE_FILE),
        })
    }

    /// Create a store at an explicit path (used by tests).
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// The path of the credentials file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn is_stale(stored_at: i64, now: i64) -> bool {
        now - stored_at > RETENTION_DAYS * 86_400
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<Credentials>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path).map_err(|e| StoreError::LoadFailed(e.to_string()))?;
        let reader = BufReader::new(file);
        let stored: StoredCredentials = serde_json::from_reader(reader)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        if Self::is_stale(stored.stored_at, chrono::Utc::now().timestamp()) {
            // Aged-out entries behave like expired cookies: gone.
            let _ = fs::remove_file(&self.path);
            return Ok(None);
        }

        Ok(Some(stored.credentials))
    }

    async fn save(&self, creds: &Credentials) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
            }
        }

        let stored = StoredCredentials {
            credentials: creds.clone(),
            stored_at: chrono::Utc::now().timestamp(),
        };

        let file = File::create(&self.path).map_err(|e| StoreError::SaveFailed(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &stored)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        writer.flush().map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path).map_err(|e| StoreError::ClearFailed(e.to_string()))
    }
}

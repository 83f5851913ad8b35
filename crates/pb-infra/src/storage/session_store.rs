//! File-based session store
//!
//! Implements [`SessionStorePort`] over a flat JSON object of string keys
//! and values kept in the application data directory.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use pb_core::ports::{SessionStoreError, SessionStorePort};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

type Entries = BTreeMap<String, String>;

pub struct FileSessionStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn ensure_parent_dir(&self) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SessionStoreError::Io(format!("Failed to create directory: {e}")))?;
        }
        Ok(())
    }

    async fn load(&self) -> Result<Entries, SessionStoreError> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| SessionStoreError::Io(format!("Failed to read session file: {e}")))?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| SessionStoreError::Corrupt(format!("Failed to parse session file: {e}")))
    }

    async fn save(&self, entries: &Entries) -> Result<(), SessionStoreError> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| SessionStoreError::Corrupt(format!("Failed to serialize session: {e}")))?;

        let mut file = fs::File::create(&self.path)
            .await
            .map_err(|e| SessionStoreError::Io(format!("Failed to create session file: {e}")))?;
        file.write_all(json.as_bytes())
            .await
            .map_err(|e| SessionStoreError::Io(format!("Failed to write session file: {e}")))?;
        file.sync_all()
            .await
            .map_err(|e| SessionStoreError::Io(format!("Failed to sync session file: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl SessionStorePort for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await?;
        debug!(key, "session entry stored");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.save(&entries).await?;
        debug!(key, "session entry removed");
        Ok(())
    }
}

//! File Repository Implementation
//!
//! One JSON object of key -> text per session, the on-disk counterpart of
//! browser local storage. Writes go through a temp file and a rename so a
//! crash never leaves half a record behind.

use crate::domain::entities::{MiningSession, PartialMiningSession};
use crate::domain::record::{SessionRecord, decode, encode, stored_revision};
use crate::domain::repository::SessionStore;
use crate::error::StoreError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-compare-write within this process.
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_record(&self) -> Result<SessionRecord, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SessionRecord::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<BTreeMap<String, Value>>(&bytes) {
            Ok(raw) => Ok(raw
                .into_iter()
                .filter_map(|(key, value)| match value {
                    Value::String(text) => Some((key, text)),
                    Value::Number(n) => Some((key, n.to_string())),
                    other => {
                        tracing::warn!(field = %key, value = %other, "Ignoring non-text session field");
                        None
                    }
                })
                .collect()),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Unreadable session file, starting from defaults"
                );
                Ok(SessionRecord::new())
            }
        }
    }

    async fn write_record(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        tokio::fs::create_dir_all(parent).await?;

        let bytes = serde_json::to_vec_pretty(record)?;
        let tmp = self.path.with_extension("tmp");
        let mut file = File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        // Durable before it becomes visible under the real name.
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        sync_dir(parent).await?;
        Ok(())
    }
}

/// Flush a directory entry so a completed rename survives a crash
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<PartialMiningSession, StoreError> {
        let record = self.read_record().await?;
        Ok(decode(&record))
    }

    async fn save(&self, session: &MiningSession, expected_revision: u64) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let found = stored_revision(&self.read_record().await?);
        if found != expected_revision {
            tracing::warn!(
                path = %self.path.display(),
                expected = expected_revision,
                found,
                "Rejected stale session write"
            );
            return Err(StoreError::StaleWrite {
                expected: expected_revision,
                found,
            });
        }

        self.write_record(&encode(session)).await?;
        tracing::debug!(
            path = %self.path.display(),
            revision = session.revision,
            "Session file written"
        );
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

//! In-Memory Repository Implementation
//!
//! Keeps the record in process memory. Nothing survives a restart; used by
//! tests and for ephemeral runs.

use crate::domain::entities::{MiningSession, PartialMiningSession};
use crate::domain::record::{SessionRecord, decode, encode, stored_revision};
use crate::domain::repository::SessionStore;
use crate::error::StoreError;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    record: Mutex<SessionRecord>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing record, as if it had been persisted earlier
    pub fn with_record(record: SessionRecord) -> Self {
        Self {
            record: Mutex::new(record),
        }
    }

    /// Copy of the raw stored record
    pub fn snapshot(&self) -> SessionRecord {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, SessionRecord> {
        // Writes replace the whole map, so a poisoned lock still holds a full record.
        self.record
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<PartialMiningSession, StoreError> {
        Ok(decode(&self.lock()))
    }

    async fn save(&self, session: &MiningSession, expected_revision: u64) -> Result<(), StoreError> {
        let mut record = self.lock();
        let found = stored_revision(&record);
        if found != expected_revision {
            tracing::warn!(expected = expected_revision, found, "Rejected stale session write");
            return Err(StoreError::StaleWrite {
                expected: expected_revision,
                found,
            });
        }
        *record = encode(session);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.lock().clear();
        Ok(())
    }
}

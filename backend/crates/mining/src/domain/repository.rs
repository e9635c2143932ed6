//! Repository Traits
//!
//! Interface for session persistence. Implementations are in the infra layer.

use crate::domain::entities::{MiningSession, PartialMiningSession};
use crate::error::StoreError;

/// Session store trait
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Read the persisted session. Malformed fields come back absent.
    async fn load(&self) -> Result<PartialMiningSession, StoreError>;

    /// Replace the persisted session.
    ///
    /// Fails with [`StoreError::StaleWrite`] and writes nothing unless the
    /// stored revision equals `expected_revision`.
    async fn save(&self, session: &MiningSession, expected_revision: u64) -> Result<(), StoreError>;

    /// Delete the persisted session
    async fn clear(&self) -> Result<(), StoreError>;
}

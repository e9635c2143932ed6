//! PostgreSQL Repository Implementation
//!
//! One row per stored field, keyed by `(session_key, field)`. A save swaps
//! the whole record inside a transaction holding an advisory lock on the
//! session key, so the revision check and the write cannot interleave.

use crate::domain::entities::{MiningSession, PartialMiningSession};
use crate::domain::record::{KEY_REVISION, SessionRecord, decode, encode};
use crate::domain::repository::SessionStore;
use crate::error::StoreError;
use sqlx::PgPool;

/// PostgreSQL-backed session store
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
    session_key: String,
}

impl PgSessionStore {
    pub fn new(pool: PgPool, session_key: impl Into<String>) -> Self {
        Self {
            pool,
            session_key: session_key.into(),
        }
    }

    pub fn session_key(&self) -> &str {
        &self.session_key
    }
}

impl SessionStore for PgSessionStore {
    async fn load(&self) -> Result<PartialMiningSession, StoreError> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT field, value FROM mining_session_fields WHERE session_key = $1",
        )
        .bind(&self.session_key)
        .fetch_all(&self.pool)
        .await?;

        let record: SessionRecord = rows.into_iter().collect();
        Ok(decode(&record))
    }

    async fn save(&self, session: &MiningSession, expected_revision: u64) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(&self.session_key)
            .execute(&mut *tx)
            .await?;

        let found = sqlx::query_scalar::<_, String>(
            "SELECT value FROM mining_session_fields WHERE session_key = $1 AND field = $2",
        )
        .bind(&self.session_key)
        .bind(KEY_REVISION)
        .fetch_optional(&mut *tx)
        .await?
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or(0);

        if found != expected_revision {
            // Dropping `tx` rolls back and releases the lock.
            tracing::warn!(
                session_key = %self.session_key,
                expected = expected_revision,
                found,
                "Rejected stale session write"
            );
            return Err(StoreError::StaleWrite {
                expected: expected_revision,
                found,
            });
        }

        sqlx::query("DELETE FROM mining_session_fields WHERE session_key = $1")
            .bind(&self.session_key)
            .execute(&mut *tx)
            .await?;

        let (fields, values): (Vec<String>, Vec<String>) = encode(session).into_iter().unzip();
        sqlx::query(
            r#"
            INSERT INTO mining_session_fields (session_key, field, value)
            SELECT $1, field, value FROM UNNEST($2::TEXT[], $3::TEXT[]) AS t(field, value)
            "#,
        )
        .bind(&self.session_key)
        .bind(fields)
        .bind(values)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            session_key = %self.session_key,
            revision = session.revision,
            "Session saved"
        );
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let deleted = sqlx::query("DELETE FROM mining_session_fields WHERE session_key = $1")
            .bind(&self.session_key)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(session_key = %self.session_key, fields = deleted, "Session cleared");
        Ok(())
    }
}

//! Mining Error Types
//!
//! This module provides mining-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use crate::domain::entities::CooldownActive;
use crate::domain::services::{ceil_secs, format_countdown};
use crate::domain::value_objects::TokenAmount;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use std::time::Duration;
use thiserror::Error;

/// Mining-specific result type alias
pub type MiningResult<T> = Result<T, MiningError>;

/// Failures of a session store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Someone else wrote the session since it was read
    #[error("Stale write: expected revision {expected}, found {found}")]
    StaleWrite { expected: u64, found: u64 },
}

/// Mining-specific error variants
#[derive(Debug, Error)]
pub enum MiningError {
    /// Mined too early. Expected and frequent, not a fault.
    #[error("Mining cooldown active: {} remaining", countdown(.remaining))]
    CooldownActive { remaining: Duration },

    /// The balance cannot absorb another reward without overflowing
    #[error("Balance {balance} cannot hold a further reward of {reward}")]
    BalanceOverflow {
        balance: TokenAmount,
        reward: TokenAmount,
    },

    /// The store could not be read at all
    #[error("Failed to read mining session: {0}")]
    PersistenceRead(#[source] StoreError),

    /// The store rejected or failed a write; nothing was committed
    #[error("Failed to persist mining session: {0}")]
    PersistenceWrite(#[source] StoreError),

    /// Configuration rejected at startup
    #[error("Invalid mining configuration: {0}")]
    InvalidConfig(String),
}

fn countdown(remaining: &Duration) -> String {
    format_countdown(*remaining)
}

impl From<CooldownActive> for MiningError {
    fn from(rejection: CooldownActive) -> Self {
        MiningError::CooldownActive {
            remaining: rejection.remaining,
        }
    }
}

impl MiningError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MiningError::CooldownActive { .. } => ErrorKind::TooManyRequests,
            MiningError::BalanceOverflow { .. }
            | MiningError::PersistenceWrite(StoreError::StaleWrite { .. }) => ErrorKind::Conflict,
            MiningError::PersistenceRead(_) | MiningError::PersistenceWrite(_) => {
                ErrorKind::ServiceUnavailable
            }
            MiningError::InvalidConfig(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether the same call can succeed later without changing anything
    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Seconds until a rejected mine would be accepted
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            MiningError::CooldownActive { remaining } => Some(ceil_secs(*remaining).max(1)),
            _ => None,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            MiningError::CooldownActive { remaining } => {
                tracing::debug!(remaining_secs = remaining.as_secs(), "Mining rejected by cooldown");
            }
            MiningError::BalanceOverflow { balance, reward } => {
                tracing::warn!(balance = %balance, reward = %reward, "Mining rejected, balance is full");
            }
            MiningError::PersistenceWrite(e @ StoreError::StaleWrite { .. }) => {
                tracing::warn!(error = %e, "Mining session changed by another writer");
            }
            MiningError::PersistenceRead(e) | MiningError::PersistenceWrite(e) => {
                tracing::error!(error = %e, "Mining session persistence error");
            }
            MiningError::InvalidConfig(msg) => {
                tracing::error!(message = %msg, "Mining configuration error");
            }
        }
    }
}

impl From<MiningError> for AppError {
    fn from(err: MiningError) -> Self {
        match err {
            MiningError::CooldownActive { remaining } => {
                let countdown = format_countdown(remaining);
                AppError::too_many_requests(format!("Mining cooldown active: {countdown} remaining"))
                    .with_action(format!("Mine again in {countdown}"))
            }
            MiningError::BalanceOverflow { .. } => {
                AppError::conflict("Balance cannot hold another reward")
            }
            MiningError::PersistenceWrite(source @ StoreError::StaleWrite { .. }) => {
                AppError::conflict("Mining session was changed elsewhere")
                    .with_action("Session reloaded, try again")
                    .with_source(source)
            }
            // Storage details stay in the logs.
            MiningError::PersistenceRead(source) | MiningError::PersistenceWrite(source) => {
                AppError::service_unavailable("Mining session storage is unavailable")
                    .with_action("Try again in a moment")
                    .with_source(source)
            }
            MiningError::InvalidConfig(_) => AppError::internal("Internal error"),
        }
    }
}

impl IntoResponse for MiningError {
    fn into_response(self) -> Response {
        self.log();
        let retry_after = self.retry_after_secs();
        let mut response = AppError::from(self).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

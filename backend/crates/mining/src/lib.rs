//! Mining Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session entity, reward and cooldown math, storage record, store trait
//! - `application/` - The reward engine and its use cases
//! - `infra/` - Session store implementations (memory, file, PostgreSQL)
//! - `presentation/` - HTTP handlers
//!
//! ## Rules
//! - One reward formula: `base_rate × (1 + referrals × bonus_per_referral)`
//! - A mine is accepted iff never mined before or the cooldown fully elapsed
//! - Balance only grows through accepted mines
//! - A mutation is in memory only after the store accepted it
//! - The engine never reads the clock; callers pass `now`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::MiningConfig;
pub use application::engine::RewardEngine;
pub use domain::entities::{CooldownStatus, MiningSession, MiningStatus, RewardOutcome};
pub use domain::repository::SessionStore;
pub use domain::value_objects::{BasisPoints, TokenAmount};
pub use error::{MiningError, MiningResult, StoreError};
pub use infra::file::FileSessionStore;
pub use infra::memory::InMemorySessionStore;
pub use infra::postgres::PgSessionStore;
pub use presentation::handlers::MiningAppState;
pub use presentation::router::mining_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! [`engine::RewardEngine`] owns the in-memory session; each use case adds
//! its operation to it.

pub mod attempt_mine;
pub mod check_status;
pub mod config;
pub mod engine;
pub mod register_referral;

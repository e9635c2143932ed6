//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (MiningSession, RewardOutcome, CooldownStatus)
//! - Domain value objects (TokenAmount, BasisPoints)
//! - Domain services (reward and cooldown math)
//! - The storage record codec
//! - Repository traits (interfaces)

pub mod entities;
pub mod record;
pub mod repository;
pub mod services;
pub mod value_objects;

//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Wall-clock time source (system clock, manually driven clock for tests)
//! - Typed environment variable lookup

pub mod clock;
pub mod env;

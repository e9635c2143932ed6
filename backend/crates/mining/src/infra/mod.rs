//! Infrastructure Layer
//!
//! `SessionStore` implementations.

pub mod file;
pub mod memory;
pub mod postgres;

//! Shared Kernel
//!
//! Error vocabulary shared by every crate in the workspace:
//! - [`error::kind::ErrorKind`] classifies failures (maps onto HTTP status codes)
//! - [`error::app_error::AppError`] carries a user-facing message and an optional action
//! - RFC 7807 rendering of `AppError` behind the `axum` feature

pub mod error {
    pub mod app_error;
    pub mod kind;
    #[cfg(feature = "axum")]
    pub mod response;
}

//! Mining Router

use crate::domain::repository::SessionStore;
use crate::presentation::handlers::{self, MiningAppState};
use axum::{
    Router,
    routing::{get, post},
};

/// Create the mining router for any store implementation
pub fn mining_router<S>(state: MiningAppState<S>) -> Router
where
    S: SessionStore + Send + Sync + 'static,
{
    Router::new()
        .route("/status", get(handlers::check_status::<S>))
        .route("/mine", post(handlers::mine::<S>))
        .route("/referrals", post(handlers::register_referral::<S>))
        .route("/reload", post(handlers::reload::<S>))
        .route("/reset", post(handlers::reset::<S>))
        .with_state(state)
}

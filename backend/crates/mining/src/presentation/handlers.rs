//! HTTP Handlers
//!
//! Each handler reads `now` from the clock and calls one engine operation.

use crate::application::engine::RewardEngine;
use crate::domain::repository::SessionStore;
use crate::error::MiningResult;
use crate::presentation::dto::{MineResponse, ReferralResponse, StatusResponse};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use platform::clock::Clock;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared state for mining handlers
pub struct MiningAppState<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    pub engine: Arc<Mutex<RewardEngine<S>>>,
    pub clock: Arc<dyn Clock>,
}

impl<S> MiningAppState<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    pub fn new(engine: RewardEngine<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            clock,
        }
    }
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for MiningAppState<S>
where
    S: SessionStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            clock: Arc::clone(&self.clock),
        }
    }
}

/// GET /api/mining/status
pub async fn check_status<S>(State(state): State<MiningAppState<S>>) -> Json<StatusResponse>
where
    S: SessionStore + Send + Sync + 'static,
{
    let engine = state.engine.lock().await;
    let now = state.clock.now();
    Json(engine.status(now).into())
}

/// POST /api/mining/mine
pub async fn mine<S>(State(state): State<MiningAppState<S>>) -> MiningResult<Json<MineResponse>>
where
    S: SessionStore + Send + Sync + 'static,
{
    let mut engine = state.engine.lock().await;
    let now = state.clock.now();
    let outcome = engine.attempt_mine(now).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/mining/referrals
pub async fn register_referral<S>(
    State(state): State<MiningAppState<S>>,
) -> MiningResult<Json<ReferralResponse>>
where
    S: SessionStore + Send + Sync + 'static,
{
    let mut engine = state.engine.lock().await;
    let referral_count = engine.register_referral().await?;
    Ok(Json(ReferralResponse {
        referral_count,
        bonus_percent: engine.bonus().percent(),
    }))
}

/// POST /api/mining/reload
///
/// Re-read the session from the store, picking up changes made by other writers.
pub async fn reload<S>(
    State(state): State<MiningAppState<S>>,
) -> MiningResult<Json<StatusResponse>>
where
    S: SessionStore + Send + Sync + 'static,
{
    let mut engine = state.engine.lock().await;
    engine.reload().await?;
    let now = state.clock.now();
    Ok(Json(engine.status(now).into()))
}

/// POST /api/mining/reset
pub async fn reset<S>(State(state): State<MiningAppState<S>>) -> MiningResult<StatusCode>
where
    S: SessionStore + Send + Sync + 'static,
{
    let mut engine = state.engine.lock().await;
    engine.reset().await?;
    Ok(StatusCode::NO_CONTENT)
}

//! API DTOs (Data Transfer Objects)

use crate::domain::entities::{MiningStatus, RewardOutcome};
use crate::domain::services::{ceil_secs, format_countdown};
use crate::domain::value_objects::TokenAmount;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Response for GET /api/mining/status
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub balance: TokenAmount,
    pub base_rate: TokenAmount,
    pub reward_per_mine: TokenAmount,
    pub referral_count: u32,
    pub bonus_percent: f64,
    pub ready: bool,
    /// Whole seconds, rounded up
    pub remaining_secs: u64,
    pub countdown: String,
    pub label: String,
    pub progress: f64,
    pub last_mined_at: Option<DateTime<Utc>>,
}

impl From<MiningStatus> for StatusResponse {
    fn from(status: MiningStatus) -> Self {
        let remaining = status.cooldown.remaining();
        Self {
            balance: status.balance,
            base_rate: status.base_rate,
            reward_per_mine: status.reward_per_mine,
            referral_count: status.referral_count,
            bonus_percent: status.bonus.percent(),
            ready: status.cooldown.is_ready(),
            remaining_secs: ceil_secs(remaining),
            countdown: format_countdown(remaining),
            label: status.cooldown.label(),
            progress: status.progress,
            last_mined_at: status.last_mined_at,
        }
    }
}

/// Response for POST /api/mining/mine
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MineResponse {
    pub amount: TokenAmount,
    pub new_balance: TokenAmount,
    pub mined_at: DateTime<Utc>,
}

impl From<RewardOutcome> for MineResponse {
    fn from(outcome: RewardOutcome) -> Self {
        Self {
            amount: outcome.amount,
            new_balance: outcome.new_balance,
            mined_at: outcome.mined_at,
        }
    }
}

/// Response for POST /api/mining/referrals
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralResponse {
    pub referral_count: u32,
    pub bonus_percent: f64,
}

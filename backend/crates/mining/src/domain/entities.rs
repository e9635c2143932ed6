//! Domain Entities
//!
//! The mining session and the values produced when it advances.

use crate::domain::value_objects::{BasisPoints, TokenAmount};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// MiningSession entity - a user's balance, timing and referral count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiningSession {
    pub balance: TokenAmount,
    /// `None` until the first accepted mine
    pub last_mined_at: Option<DateTime<Utc>>,
    pub referral_count: u32,
    /// Per-session base reward, overriding the configured one
    pub base_rate_override: Option<TokenAmount>,
    /// Incremented on every persisted mutation, 0 = never persisted
    pub revision: u64,
}

/// A session as read back from storage, every field possibly missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialMiningSession {
    pub balance: Option<TokenAmount>,
    pub last_mined_at: Option<DateTime<Utc>>,
    pub referral_count: Option<u32>,
    pub base_rate_override: Option<TokenAmount>,
    pub revision: Option<u64>,
}

impl MiningSession {
    /// Fill missing fields with their defaults
    pub fn from_partial(partial: PartialMiningSession) -> Self {
        Self {
            balance: partial.balance.unwrap_or(TokenAmount::ZERO),
            last_mined_at: partial.last_mined_at,
            referral_count: partial.referral_count.unwrap_or(0),
            base_rate_override: partial.base_rate_override,
            revision: partial.revision.unwrap_or(0),
        }
    }

    /// The session after crediting `reward` at `now`, `None` if the balance
    /// cannot hold it
    pub fn credited(&self, reward: TokenAmount, now: DateTime<Utc>) -> Option<Self> {
        Some(Self {
            balance: self.balance.checked_add(reward)?,
            last_mined_at: Some(now),
            revision: self.revision.saturating_add(1),
            ..self.clone()
        })
    }

    /// The session after one more referral
    pub fn with_referral(&self) -> Self {
        Self {
            referral_count: self.referral_count.saturating_add(1),
            revision: self.revision.saturating_add(1),
            ..self.clone()
        }
    }
}

impl From<&MiningSession> for PartialMiningSession {
    fn from(session: &MiningSession) -> Self {
        Self {
            balance: Some(session.balance),
            last_mined_at: session.last_mined_at,
            referral_count: Some(session.referral_count),
            base_rate_override: session.base_rate_override,
            revision: Some(session.revision),
        }
    }
}

/// Result of an accepted mine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardOutcome {
    pub amount: TokenAmount,
    pub new_balance: TokenAmount,
    pub mined_at: DateTime<Utc>,
}

/// Result of a rejected mine: the cooldown has not elapsed yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownActive {
    pub remaining: Duration,
}

/// Whether the user may mine right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    Ready,
    CoolingDown { remaining: Duration },
}

impl CooldownStatus {
    pub fn from_remaining(remaining: Duration) -> Self {
        if remaining.is_zero() {
            CooldownStatus::Ready
        } else {
            CooldownStatus::CoolingDown { remaining }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, CooldownStatus::Ready)
    }

    pub fn remaining(&self) -> Duration {
        match self {
            CooldownStatus::Ready => Duration::ZERO,
            CooldownStatus::CoolingDown { remaining } => *remaining,
        }
    }

    /// Text shown next to the progress bar
    pub fn label(&self) -> String {
        match self {
            CooldownStatus::Ready => "Ready to mine!".to_string(),
            CooldownStatus::CoolingDown { remaining } => format!(
                "Mine again in {}",
                crate::domain::services::format_countdown(*remaining)
            ),
        }
    }
}

/// Everything the presentation layer renders for one tick
#[derive(Debug, Clone, PartialEq)]
pub struct MiningStatus {
    pub balance: TokenAmount,
    pub base_rate: TokenAmount,
    pub reward_per_mine: TokenAmount,
    pub referral_count: u32,
    pub bonus: BasisPoints,
    pub cooldown: CooldownStatus,
    /// In `[0, 1]`
    pub progress: f64,
    pub last_mined_at: Option<DateTime<Utc>>,
}

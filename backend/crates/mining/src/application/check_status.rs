//! Check Status Use Case
//!
//! Read-only queries for the presentation tick. Both are pure functions of
//! `now` and must be re-evaluated on every tick, never cached.

use crate::application::engine::RewardEngine;
use crate::domain::entities::{CooldownStatus, MiningStatus};
use crate::domain::repository::SessionStore;
use crate::domain::services::{cooldown_progress, cooldown_remaining};
use chrono::{DateTime, Utc};

impl<S> RewardEngine<S>
where
    S: SessionStore,
{
    /// Elapsed fraction of the cooldown, 1.0 when ready
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        cooldown_progress(self.session().last_mined_at, now, self.config().cooldown)
    }

    pub fn cooldown_status(&self, now: DateTime<Utc>) -> CooldownStatus {
        CooldownStatus::from_remaining(cooldown_remaining(
            self.session().last_mined_at,
            now,
            self.config().cooldown,
        ))
    }

    /// Snapshot for rendering
    pub fn status(&self, now: DateTime<Utc>) -> MiningStatus {
        let session = self.session();
        MiningStatus {
            balance: session.balance,
            base_rate: self.base_rate(),
            reward_per_mine: self.reward_per_mine(),
            referral_count: session.referral_count,
            bonus: self.bonus(),
            cooldown: self.cooldown_status(now),
            progress: self.progress(now),
            last_mined_at: session.last_mined_at,
        }
    }
}

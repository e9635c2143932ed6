//! Attempt Mine Use Case

use crate::application::engine::RewardEngine;
use crate::domain::entities::{CooldownActive, RewardOutcome};
use crate::domain::repository::SessionStore;
use crate::domain::services::cooldown_remaining;
use crate::error::{MiningError, MiningResult};
use chrono::{DateTime, Utc};

impl<S> RewardEngine<S>
where
    S: SessionStore,
{
    /// Credit one reward if the cooldown has elapsed.
    ///
    /// Rejection is [`MiningError::CooldownActive`], or
    /// [`MiningError::BalanceOverflow`] when the reward no longer fits, and
    /// changes nothing. A failed write is [`MiningError::PersistenceWrite`]
    /// and also leaves the session as it was.
    pub async fn attempt_mine(&mut self, now: DateTime<Utc>) -> MiningResult<RewardOutcome> {
        let remaining =
            cooldown_remaining(self.session().last_mined_at, now, self.config().cooldown);
        if !remaining.is_zero() {
            return Err(CooldownActive { remaining }.into());
        }

        let reward = self.reward_per_mine();
        let balance = self.session().balance;
        let next = self
            .session()
            .credited(reward, now)
            .ok_or(MiningError::BalanceOverflow { balance, reward })?;
        self.commit(next).await?;

        let new_balance = self.session().balance;
        tracing::info!(
            amount = %reward,
            balance = %new_balance,
            referrals = self.session().referral_count,
            "Mining reward credited"
        );

        Ok(RewardOutcome {
            amount: reward,
            new_balance,
            mined_at: now,
        })
    }
}

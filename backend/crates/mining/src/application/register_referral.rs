//! Register Referral Use Case

use crate::application::engine::RewardEngine;
use crate::domain::repository::SessionStore;
use crate::error::MiningResult;

impl<S> RewardEngine<S>
where
    S: SessionStore,
{
    /// Count one more referral and return the new total.
    ///
    /// Does not deduplicate; the caller decides what counts as a referral.
    pub async fn register_referral(&mut self) -> MiningResult<u32> {
        let next = self.session().with_referral();
        self.commit(next).await?;

        let count = self.session().referral_count;
        tracing::info!(referrals = count, bonus = %self.bonus(), "Referral registered");
        Ok(count)
    }
}

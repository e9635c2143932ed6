//! Reward Engine
//!
//! The single owner of the mining session. Every screen talks to one shared
//! engine instead of re-deriving reward math from storage on its own.
//!
//! Mutations follow write-then-commit: the next session is saved first and
//! only swapped into memory once the store accepted it, so memory and
//! storage never drift apart.

use crate::application::config::MiningConfig;
use crate::domain::entities::MiningSession;
use crate::domain::repository::SessionStore;
use crate::domain::services::{compute_reward, referral_bonus};
use crate::domain::value_objects::{BasisPoints, TokenAmount};
use crate::error::{MiningError, MiningResult, StoreError};
use std::sync::Arc;

/// Reward Engine
pub struct RewardEngine<S>
where
    S: SessionStore,
{
    store: Arc<S>,
    config: Arc<MiningConfig>,
    session: MiningSession,
}

impl<S> RewardEngine<S>
where
    S: SessionStore,
{
    /// Rebuild the in-memory session from the store, applying defaults
    pub async fn restore(store: Arc<S>, config: Arc<MiningConfig>) -> MiningResult<Self> {
        config.validate()?;
        let partial = store.load().await.map_err(MiningError::PersistenceRead)?;
        let session = MiningSession::from_partial(partial);

        tracing::info!(
            balance = %session.balance,
            referrals = session.referral_count,
            last_mined_at = ?session.last_mined_at,
            revision = session.revision,
            "Mining session restored"
        );

        Ok(Self {
            store,
            config,
            session,
        })
    }

    /// Re-read the session, e.g. after another writer bumped the revision
    pub async fn reload(&mut self) -> MiningResult<()> {
        let partial = self.store.load().await.map_err(MiningError::PersistenceRead)?;
        self.session = MiningSession::from_partial(partial);
        tracing::debug!(revision = self.session.revision, "Mining session reloaded");
        Ok(())
    }

    /// Delete the persisted session and start over
    pub async fn reset(&mut self) -> MiningResult<()> {
        self.store.clear().await.map_err(MiningError::PersistenceWrite)?;
        self.session = MiningSession::default();
        tracing::info!("Mining session reset");
        Ok(())
    }

    pub fn session(&self) -> &MiningSession {
        &self.session
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Session override, else the configured rate
    pub fn base_rate(&self) -> TokenAmount {
        self.session
            .base_rate_override
            .unwrap_or(self.config.base_rate)
    }

    /// Current referral bonus
    pub fn bonus(&self) -> BasisPoints {
        referral_bonus(
            self.session.referral_count,
            self.config.bonus_per_referral,
            self.config.max_referral_bonus,
        )
    }

    /// What the next accepted mine will credit
    pub fn reward_per_mine(&self) -> TokenAmount {
        compute_reward(self.base_rate(), self.bonus())
    }

    /// Save `next` over the current revision, then adopt it.
    ///
    /// When another writer got there first the stored session is re-read, so
    /// the caller's next attempt is judged against what is actually stored.
    pub(crate) async fn commit(&mut self, next: MiningSession) -> MiningResult<()> {
        match self.store.save(&next, self.session.revision).await {
            Ok(()) => {
                self.session = next;
                Ok(())
            }
            Err(e @ StoreError::StaleWrite { .. }) => {
                if let Err(reload_err) = self.reload().await {
                    tracing::warn!(error = %reload_err, "Could not reload session after stale write");
                }
                Err(MiningError::PersistenceWrite(e))
            }
            Err(e) => Err(MiningError::PersistenceWrite(e)),
        }
    }
}

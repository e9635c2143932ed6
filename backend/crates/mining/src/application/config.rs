//! Application Configuration
//!
//! Configuration for the mining application layer.

use crate::domain::value_objects::{BasisPoints, TokenAmount};
use crate::error::{MiningError, MiningResult};
use std::time::Duration;

/// Mining application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningConfig {
    /// Minimum time between two accepted mines
    pub cooldown: Duration,
    /// Bonus added per registered referral
    pub bonus_per_referral: BasisPoints,
    /// Reward per mine before bonus, unless the session overrides it
    pub base_rate: TokenAmount,
    /// Upper bound on the total referral bonus, `None` = uncapped
    pub max_referral_bonus: Option<BasisPoints>,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(3600),
            bonus_per_referral: BasisPoints::DEFAULT_PER_REFERRAL,
            base_rate: TokenAmount::ONE,
            max_referral_bonus: None,
        }
    }
}

impl MiningConfig {
    /// Create config for development (one-minute cooldown)
    pub fn development() -> Self {
        Self {
            cooldown: Duration::from_secs(60),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> MiningResult<()> {
        if self.cooldown.is_zero() {
            return Err(MiningError::InvalidConfig(
                "cooldown must be positive".to_string(),
            ));
        }
        if self.base_rate.is_zero() {
            return Err(MiningError::InvalidConfig(
                "base rate must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn cooldown_secs(&self) -> u64 {
        self.cooldown.as_secs()
    }
}

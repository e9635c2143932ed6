//! Domain Services
//!
//! Pure reward and cooldown math. Nothing here reads the clock; `now` is
//! always passed in.

use crate::domain::value_objects::{BasisPoints, TokenAmount};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Bonus earned by `referral_count` referrals, optionally capped
pub fn referral_bonus(
    referral_count: u32,
    per_referral: BasisPoints,
    cap: Option<BasisPoints>,
) -> BasisPoints {
    let bonus = per_referral.saturating_mul(referral_count);
    match cap {
        Some(cap) => bonus.min(cap),
        None => bonus,
    }
}

/// Reward for one accepted mine: `base_rate × (1 + bonus)`
pub fn compute_reward(base_rate: TokenAmount, bonus: BasisPoints) -> TokenAmount {
    base_rate.with_bonus(bonus)
}

/// Time since `last`; a clock that went backwards counts as no time at all
pub fn elapsed_since(last: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - last).to_std().unwrap_or(Duration::ZERO)
}

/// Time left before the next mine is accepted, zero when ready
pub fn cooldown_remaining(
    last_mined_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    cooldown: Duration,
) -> Duration {
    match last_mined_at {
        Some(last) => cooldown.saturating_sub(elapsed_since(last, now)),
        None => Duration::ZERO,
    }
}

/// Fraction of the cooldown that has elapsed, in `[0, 1]`
pub fn cooldown_progress(
    last_mined_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    cooldown: Duration,
) -> f64 {
    let Some(last) = last_mined_at else {
        return 1.0;
    };
    let elapsed = elapsed_since(last, now);
    if cooldown.is_zero() || elapsed >= cooldown {
        return 1.0;
    }
    elapsed.as_secs_f64() / cooldown.as_secs_f64()
}

/// Whole seconds, a partial second counting as a full one
pub fn ceil_secs(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}

/// `MM:SS`, or `H:MM:SS` from one hour up. Partial seconds round up.
pub fn format_countdown(remaining: Duration) -> String {
    let secs = ceil_secs(remaining);
    let (hours, mins, secs) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{mins:02}:{secs:02}")
    }
}

//! Domain Value Objects
//!
//! Immutable value types for the mining domain. Amounts are fixed-point so
//! that `1 × (1 + 3 × 5%)` is exactly `1.15`, never `1.1500000000000001`.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fractional digits carried by [`TokenAmount`]
pub const DECIMALS: usize = 8;

const SCALE: u64 = 100_000_000;
const BPS_DENOMINATOR: u128 = 10_000;

/// Non-negative token amount with 8 fractional digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenAmount(u64);

impl TokenAmount {
    pub const ZERO: TokenAmount = TokenAmount(0);
    pub const ONE: TokenAmount = TokenAmount(SCALE);

    /// From raw units of 1e-8
    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    pub const fn from_whole(whole: u64) -> Self {
        Self(whole.saturating_mul(SCALE))
    }

    pub const fn units(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: TokenAmount) -> Option<TokenAmount> {
        self.0.checked_add(other.0).map(TokenAmount)
    }

    /// `self × (1 + bonus)`, truncated to 1e-8 and saturating
    pub fn with_bonus(self, bonus: BasisPoints) -> TokenAmount {
        let multiplier = BPS_DENOMINATOR + u128::from(bonus.value());
        let scaled = u128::from(self.0) * multiplier / BPS_DENOMINATOR;
        TokenAmount(u64::try_from(scaled).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let frac = self.0 % SCALE;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:0width$}", width = DECIMALS);
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount is negative: {0:?}")]
    Negative(String),

    #[error("amount is not a decimal number: {0:?}")]
    Invalid(String),

    #[error("amount is too large: {0:?}")]
    Overflow(String),
}

impl FromStr for TokenAmount {
    type Err = ParseAmountError;

    /// Decimal text. Digits past the 8th fractional place are dropped so that
    /// float-formatted legacy values still read back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('-') {
            return Err(ParseAmountError::Negative(s.to_string()));
        }
        let text = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if text.is_empty() {
            return Err(ParseAmountError::Empty);
        }

        let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(ParseAmountError::Invalid(s.to_string()));
        }

        let whole_units = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u64>()
                .map_err(|_| ParseAmountError::Overflow(s.to_string()))?
        };

        let kept: String = frac.chars().take(DECIMALS).collect();
        let frac_units = if kept.is_empty() {
            0
        } else {
            format!("{kept:0<width$}", width = DECIMALS)
                .parse::<u64>()
                .map_err(|_| ParseAmountError::Invalid(s.to_string()))?
        };

        whole_units
            .checked_mul(SCALE)
            .and_then(|units| units.checked_add(frac_units))
            .map(TokenAmount)
            .ok_or_else(|| ParseAmountError::Overflow(s.to_string()))
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Rate in hundredths of a percent (500 = 5%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BasisPoints(u32);

impl BasisPoints {
    pub const ZERO: BasisPoints = BasisPoints(0);
    /// 5% per referral
    pub const DEFAULT_PER_REFERRAL: BasisPoints = BasisPoints(500);

    pub const fn new(bps: u32) -> Self {
        Self(bps)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    pub fn saturating_mul(self, factor: u32) -> BasisPoints {
        BasisPoints(self.0.saturating_mul(factor))
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{whole}%")
        } else {
            write!(f, "{whole}.{}%", format!("{frac:02}").trim_end_matches('0'))
        }
    }
}

impl FromStr for BasisPoints {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(BasisPoints)
    }
}

//! Typed environment lookup
//!
//! A variable that is unset falls back to the default; a variable that is
//! set but does not parse is an error, never silently ignored.

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },

    #[error("{0} is not valid unicode")]
    NotUnicode(String),
}

/// Read and parse `key`, `None` when unset or empty
pub fn var_opt<T>(key: &str) -> Result<Option<T>, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = match std::env::var(key) {
        Ok(raw) => Some(raw),
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => return Err(EnvError::NotUnicode(key.into())),
    };
    parse_raw(key, raw)
}

/// Read and parse `key`, falling back to `default` when unset or empty
pub fn var_or<T>(key: &str, default: T) -> Result<T, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(var_opt(key)?.unwrap_or(default))
}

fn parse_raw<T>(key: &str, raw: Option<String>) -> Result<Option<T>, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|e| EnvError::Invalid {
            key: key.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_unset_and_empty() {
        assert_eq!(parse_raw::<u64>("K", None), Ok(None));
        assert_eq!(parse_raw::<u64>("K", Some("   ".into())), Ok(None));
    }

    #[test]
    fn test_parse_raw_trims() {
        assert_eq!(parse_raw::<u64>("K", Some(" 3600 ".into())), Ok(Some(3600)));
    }

    #[test]
    fn test_parse_raw_invalid() {
        let err = parse_raw::<u64>("MINING_COOLDOWN_SECS", Some("soon".into())).unwrap_err();
        match err {
            EnvError::Invalid { key, value, .. } => {
                assert_eq!(key, "MINING_COOLDOWN_SECS");
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_var_or_unset_uses_default() {
        let value: u32 = var_or("PLATFORM_ENV_TEST_SURELY_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }
}

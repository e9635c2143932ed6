//! Session Record
//!
//! The text form a session takes in storage: one key per field, each value
//! parsed on its own. Adding a field never breaks reading old records, and a
//! broken field only costs that field.

use crate::domain::entities::{MiningSession, PartialMiningSession};
use crate::domain::value_objects::TokenAmount;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;

pub const KEY_BALANCE: &str = "balance";
pub const KEY_LAST_MINED_AT: &str = "lastMinedAt";
pub const KEY_REFERRAL_COUNT: &str = "referralCount";
pub const KEY_BASE_RATE: &str = "baseRate";
pub const KEY_REVISION: &str = "revision";

/// Stored key/value pairs
pub type SessionRecord = BTreeMap<String, String>;

/// Text form of a session. `baseRate` is only written when overridden.
pub fn encode(session: &MiningSession) -> SessionRecord {
    let mut record = SessionRecord::new();
    record.insert(KEY_BALANCE.into(), session.balance.to_string());
    if let Some(at) = session.last_mined_at {
        record.insert(KEY_LAST_MINED_AT.into(), format_timestamp(at));
    }
    record.insert(KEY_REFERRAL_COUNT.into(), session.referral_count.to_string());
    if let Some(rate) = session.base_rate_override {
        record.insert(KEY_BASE_RATE.into(), rate.to_string());
    }
    record.insert(KEY_REVISION.into(), session.revision.to_string());
    record
}

/// Read whatever fields parse; everything else is absent
pub fn decode(record: &SessionRecord) -> PartialMiningSession {
    PartialMiningSession {
        balance: field(record, KEY_BALANCE, |raw| raw.parse::<TokenAmount>().ok()),
        last_mined_at: field(record, KEY_LAST_MINED_AT, parse_timestamp),
        referral_count: field(record, KEY_REFERRAL_COUNT, |raw| raw.trim().parse().ok()),
        base_rate_override: field(record, KEY_BASE_RATE, |raw| {
            raw.parse::<TokenAmount>().ok().filter(|rate| !rate.is_zero())
        }),
        revision: field(record, KEY_REVISION, |raw| raw.trim().parse().ok()),
    }
}

/// Revision currently held by a stored record, 0 when absent or unreadable
pub fn stored_revision(record: &SessionRecord) -> u64 {
    record
        .get(KEY_REVISION)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0)
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// RFC 3339, or the browser's `Date.prototype.toString()` form
/// (`Sun Oct 18 2026 07:23:00 GMT+0000 (Coordinated Universal Time)`)
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }

    let without_zone_name = match raw.find(" (") {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    if let Ok(at) = DateTime::parse_from_str(without_zone_name, "%a %b %d %Y %H:%M:%S GMT%z") {
        return Some(at.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn field<T>(record: &SessionRecord, key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    let raw = record.get(key)?;
    let parsed = parse(raw);
    if parsed.is_none() {
        tracing::warn!(field = key, value = %raw, "Malformed persisted field, using default");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(pairs: &[(&str, &str)]) -> SessionRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_encode_fresh_session() {
        let encoded = encode(&MiningSession::default());
        assert_eq!(
            encoded,
            record(&[("balance", "0"), ("referralCount", "0"), ("revision", "0")])
        );
    }

    #[test]
    fn test_decode_empty_is_all_absent() {
        assert_eq!(decode(&SessionRecord::new()), PartialMiningSession::default());
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let decoded = decode(&record(&[("balance", "4"), ("theme", "dark")]));
        assert_eq!(decoded.balance, Some(TokenAmount::from_whole(4)));
    }

    #[test]
    fn test_decode_malformed_fields_are_absent() {
        let decoded = decode(&record(&[
            ("balance", "lots"),
            ("lastMinedAt", "yesterday"),
            ("referralCount", "-2"),
            ("baseRate", "0"),
            ("revision", "x"),
        ]));
        assert_eq!(decoded, PartialMiningSession::default());
    }

    #[test]
    fn test_decode_keeps_good_fields_next_to_bad_ones() {
        let decoded = decode(&record(&[("balance", "NaN"), ("referralCount", "3")]));
        assert_eq!(decoded.balance, None);
        assert_eq!(decoded.referral_count, Some(3));
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 18, 7, 23, 0).unwrap();
        assert_eq!(parse_timestamp("2026-10-18T07:23:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-10-18T09:23:00+02:00"), Some(expected));
        assert_eq!(
            parse_timestamp("Sun Oct 18 2026 07:23:00 GMT+0000 (Coordinated Universal Time)"),
            Some(expected)
        );
        assert_eq!(
            parse_timestamp("Sun Oct 18 2026 09:23:00 GMT+0200 (Central European Summer Time)"),
            Some(expected)
        );
        assert_eq!(parse_timestamp("2026-10-18T07:23:00"), Some(expected));
        assert_eq!(parse_timestamp("Invalid Date"), None);
    }

    #[test]
    fn test_timestamp_keeps_subsecond_precision() {
        let at = Utc.timestamp_nanos(1_792_300_000_123_456_789);
        assert_eq!(parse_timestamp(&format_timestamp(at)), Some(at));
    }

    #[test]
    fn test_stored_revision() {
        assert_eq!(stored_revision(&SessionRecord::new()), 0);
        assert_eq!(stored_revision(&record(&[("revision", "12")])), 12);
        assert_eq!(stored_revision(&record(&[("revision", "??")])), 0);
    }
}

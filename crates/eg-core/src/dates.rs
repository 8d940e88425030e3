//! # Date Parsing
//!
//! Event dates arrive either as RFC 3339 timestamps or as plain
//! `YYYY-MM-DD` days. Both JSON bodies and listing query strings go through
//! [`parse_moment`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Which instant of a plain day a date stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    /// 00:00:00.000 UTC
    Start,
    /// 23:59:59.999 UTC
    End,
}

/// Parses an RFC 3339 timestamp (converted to UTC) or a plain date pinned to `part`.
pub fn parse_moment(raw: &str, part: DayPart) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let moment = match part {
        DayPart::Start => day.and_hms_opt(0, 0, 0),
        DayPart::End => day.and_hms_milli_opt(23, 59, 59, 999),
    };
    moment.map(|m| m.and_utc())
}

/// `deserialize_with` target for event dates. A plain day means midnight UTC.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_moment(&raw, DayPart::Start).ok_or_else(|| invalid_date(&raw))
}

/// Same as [`deserialize`] for optional fields. `null` stays `None`.
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_moment(&raw, DayPart::Start)
            .map(Some)
            .ok_or_else(|| invalid_date(&raw)),
    }
}

fn invalid_date<E: serde::de::Error>(raw: &str) -> E {
    E::custom(format!(
        "invalid date '{}', expected RFC 3339 or YYYY-MM-DD",
        raw
    ))
}

//! Serde helpers for popup record timestamps.
//!
//! Timestamps go out as RFC 3339 strings in UTC with millisecond precision,
//! so their lexical order matches their time order. Incoming values may be RFC 3339
//! strings or Unix timestamps in seconds or milliseconds.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(dt))
}

/// Canonical text form, e.g. `2024-01-05T00:00:00.000Z`.
#[must_use]
pub fn format(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Unix(i64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(s) => parse_rfc3339(&s)
            .ok_or_else(|| Error::custom(format!("Invalid RFC3339 timestamp: {s}"))),
        Raw::Unix(ts) => from_unix(ts).ok_or_else(|| Error::custom("Invalid Unix timestamp")),
    }
}

/// Parse an RFC 3339 string into UTC.
#[must_use]
pub fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// Values above 10^11 are milliseconds.
fn from_unix(ts: i64) -> Option<DateTime<Utc>> {
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Deserialize)]
    struct Stamp {
        #[serde(with = "super")]
        at: DateTime<Utc>,
    }

    #[test]
    fn accepts_strings_and_unix_timestamps() {
        let a: Stamp = serde_json::from_str(r#"{"at":"2024-01-05T00:00:00Z"}"#).unwrap();
        let b: Stamp = serde_json::from_str(r#"{"at":1704412800}"#).unwrap();
        let c: Stamp = serde_json::from_str(r#"{"at":1704412800000}"#).unwrap();
        assert_eq!(a.at, b.at);
        assert_eq!(b.at, c.at);
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["at"], "2024-01-05T00:00:00.000Z");
    }
}

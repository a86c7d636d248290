//! Server-assigned timestamps.
//!
//! Timestamps are naive UTC with microsecond precision, rendered on the wire
//! as `YYYY-MM-DDTHH:MM:SS.ffffff`.

use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current UTC time truncated to microseconds, so a stored value always
/// renders back identically.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use serde::Serialize;

    #[derive(Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "crate::timestamp")]
        at: NaiveDateTime,
    }

    #[test]
    fn test_renders_microseconds() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_micro_opt(12, 34, 56, 7)
            .unwrap();
        let json = serde_json::to_string(&Stamped { at }).unwrap();
        assert_eq!(json, r#"{"at":"2024-01-01T12:34:56.000007"}"#);

        let back: Stamped = serde_json::from_str(&json).unwrap();
        assert_eq!(back.at, at);
    }

    #[test]
    fn test_now_has_no_sub_microsecond_part() {
        assert_eq!(now().nanosecond() % 1_000, 0);
    }

    #[test]
    fn test_rejects_other_formats() {
        let res: Result<Stamped, _> = serde_json::from_str(r#"{"at":"2024-01-01 12:34"}"#);
        assert!(res.is_err());
    }
}

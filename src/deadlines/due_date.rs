//! Due-date parsing
//!
//! The backend sends `fecha_vencimiento` either as a bare calendar date
//! (`2025-03-01`, a DATE column) or as a full timestamp. A bare date means
//! local midnight of that day, never UTC midnight, otherwise users west of
//! UTC would see every deadline one day early.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A parsed due date that remembers the server's original string.
#[derive(Debug, Clone)]
pub struct DueDate {
    raw: String,
    at: DateTime<Local>,
}

impl DueDate {
    /// Parse either `YYYY-MM-DD` (local midnight) or a timestamp.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();

        let at = if is_bare_date(trimmed) {
            let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map_err(|e| format!("invalid date '{}': {}", raw, e))?;
            date.and_hms_opt(0, 0, 0).and_then(local_from_naive)
        } else if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            Some(dt.with_timezone(&Local))
        } else {
            // Timestamps without an offset are local wall-clock times.
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .and_then(local_from_naive)
        };

        at.map(|at| Self {
            raw: raw.to_string(),
            at,
        })
        .ok_or_else(|| format!("unrecognised due date '{}'", raw))
    }

    /// The instant the deadline starts (local midnight for bare dates).
    #[cfg(test)]
    pub fn at(&self) -> DateTime<Local> {
        self.at
    }

    /// Local calendar day the deadline falls on.
    pub fn date(&self) -> NaiveDate {
        self.at.date_naive()
    }

    /// Original string as received from the server.
    #[cfg(test)]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

fn is_bare_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit())
}

/// Resolve a wall-clock time in the local zone. Times inside a DST gap are
/// moved forward an hour.
fn local_from_naive(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}

impl PartialEq for DueDate {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
    }
}

impl Eq for DueDate {}

impl PartialOrd for DueDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DueDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at.cmp(&other.at)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date().format("%Y-%m-%d"))
    }
}

impl Serialize for DueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DueDate::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike, Utc};

    #[test]
    fn test_bare_date_is_local_midnight() {
        let due = DueDate::parse("2025-03-01").unwrap();
        assert_eq!(due.date(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(due.at().hour(), 0);
        assert_eq!(due.at().minute(), 0);
        assert_eq!(due.raw(), "2025-03-01");
    }

    #[test]
    fn test_rfc3339_timestamp() {
        let due = DueDate::parse("2025-03-01T15:30:00Z").unwrap();
        let expected = Utc
            .with_ymd_and_hms(2025, 3, 1, 15, 30, 0)
            .unwrap()
            .with_timezone(&Local);
        assert_eq!(due.at(), expected);
    }

    #[test]
    fn test_timestamp_with_millis_and_offset() {
        let due = DueDate::parse("2025-03-01T10:00:00.000-04:00").unwrap();
        assert_eq!(due.at().with_timezone(&Utc).hour(), 14);
    }

    #[test]
    fn test_naive_timestamp_is_local() {
        let due = DueDate::parse("2025-06-10T08:15:00").unwrap();
        assert_eq!(due.date().day(), 10);
        assert_eq!(due.at().hour(), 8);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(DueDate::parse("").is_err());
        assert!(DueDate::parse("mañana").is_err());
        assert!(DueDate::parse("2025-13-01").is_err());
        assert!(DueDate::parse("2025-02-30").is_err());
    }

    #[test]
    fn test_ordering_by_instant() {
        let a = DueDate::parse("2025-01-15").unwrap();
        let b = DueDate::parse("2025-01-15T09:00:00").unwrap();
        let c = DueDate::parse("2025-03-01").unwrap();
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a, DueDate::parse("2025-01-15").unwrap());
    }

    #[test]
    fn test_serde_keeps_raw_string() {
        let due: DueDate = serde_json::from_str("\"2025-01-15T00:00:00.000Z\"").unwrap();
        assert_eq!(
            serde_json::to_string(&due).unwrap(),
            "\"2025-01-15T00:00:00.000Z\""
        );
    }

    #[test]
    fn test_deserialize_error() {
        let result: Result<DueDate, _> = serde_json::from_str("\"not a date\"");
        assert!(result.is_err());
    }
}

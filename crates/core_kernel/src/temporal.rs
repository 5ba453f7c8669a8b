//! Clinic-local time
//!
//! Settlements are stamped in UTC; documents handed to the front desk show
//! the date in the clinic's own time zone.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Timezone wrapper for the clinic's location
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for Timezone {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s.trim())
            .map(Timezone)
            .map_err(|_| CoreError::configuration(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// The calendar date at the clinic for a UTC instant
    pub fn local_date(&self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc).date_naive()
    }

    /// Formats a date the way receipts print it: `2024年01月05日`
    pub fn format_japanese_date(date: NaiveDate) -> String {
        format!("{:04}年{:02}月{:02}日", date.year(), date.month(), date.day())
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::Asia::Tokyo)
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_local_date_crosses_midnight() {
        // 2024-03-31 16:30 UTC is already April 1st in Tokyo
        let utc = Utc.with_ymd_and_hms(2024, 3, 31, 16, 30, 0).unwrap();
        let tz = Timezone::default();
        assert_eq!(tz.local_date(utc), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    }

    #[test]
    fn test_format_japanese_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(Timezone::format_japanese_date(date), "2024年01月05日");
    }

    #[test]
    fn test_parse_timezone() {
        let tz: Timezone = "Asia/Tokyo".parse().unwrap();
        assert_eq!(tz, Timezone::default());
        assert!("Mars/Olympus".parse::<Timezone>().is_err());
    }
}

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::COMPACT_SEPARATOR;
use crate::converter::ConvertError;
use crate::prelude::*;
use crate::types::{Day, MonthRef};
use crate::ParseError;

/// A Badí' year, month and day, with the day checked against its month.
///
/// Whether a fifth day of Ayyám-i-Há exists depends on the year's leap state,
/// which only a [`DateConverter`](crate::DateConverter) can answer; that check
/// happens when the triple is converted.
///
/// Displays in the compact form `year.month.day`, with `-1` as the month of
/// Ayyám-i-Há. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}.{month}.{day}")]
pub struct BadiYmd {
    year:  i32,
    month: MonthRef,
    day:   Day,
}

impl BadiYmd {
    /// Creates a triple from already validated parts
    pub const fn new(year: i32, month: MonthRef, day: Day) -> Self {
        Self { year, month, day }
    }

    /// Creates a triple from raw numbers (`-1` as month for Ayyám-i-Há).
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` or `ParseError::InvalidDay` if a
    /// part is outside its range.
    pub fn from_parts(year: i32, month: i8, day: u8) -> Result<Self, ParseError> {
        let month = MonthRef::new(month)?;
        let day = Day::new(day, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a triple from optional parts, as they arrive from a request
    /// or a database row.
    ///
    /// # Errors
    /// Returns `ConvertError::InvalidArgument` if any part is missing, and
    /// `ConvertError::InvalidComponent` if a part is out of range.
    pub fn from_columns(year: Option<i32>, month: Option<i8>, day: Option<u8>) -> Result<Self, ConvertError> {
        match (year, month, day) {
            (Some(y), Some(m), Some(d)) => Ok(Self::from_parts(y, m, d)?),
            _ => Err(ConvertError::InvalidArgument(format!(
                "incomplete date (year: {year:?}, month: {month:?}, day: {day:?}); \
                 supply a timestamp or all of year, month and day"
            ))),
        }
    }

    /// Returns the year of the Badí' Era
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month
    pub const fn month(&self) -> MonthRef {
        self.month
    }

    /// Returns the day component as u8
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the Day type
    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Converts to columns: (year, month, day)
    pub const fn to_columns(&self) -> (i32, i8, u8) {
        (self.year, self.month.number(), self.day.get())
    }
}

impl FromStr for BadiYmd {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(COMPACT_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Expected 2 {} separators, found {}",
                COMPACT_SEPARATOR,
                parts.len() - 1
            )));
        }

        let year = parse_part::<i32>(parts[0])?;
        let month = parse_part::<i8>(parts[1])?;
        let day = parse_part::<u8>(parts[2])?;

        Self::from_parts(year, month, day)
    }
}

/// Helper to parse a numeric part with a uniform error
fn parse_part<T: FromStr>(s: &str) -> Result<T, ParseError> {
    s.parse::<T>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

impl TryFrom<(i32, i8, u8)> for BadiYmd {
    type Error = ParseError;

    fn try_from(value: (i32, i8, u8)) -> Result<Self, Self::Error> {
        Self::from_parts(value.0, value.1, value.2)
    }
}

impl Serialize for BadiYmd {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BadiYmd {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ymd;

    #[test]
    fn test_parse_compact() {
        let date = "172.3.15".parse::<BadiYmd>().unwrap();
        assert_eq!(date.year(), 172);
        assert_eq!(date.month(), MonthRef::new(3).unwrap());
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_ayyam_i_ha() {
        let date = "174.-1.5".parse::<BadiYmd>().unwrap();
        assert_eq!(date.month(), MonthRef::AyyamIHa);
        assert_eq!(date.day(), 5);
    }

    #[test]
    fn test_parse_with_whitespace() {
        let date = " 172 . 1 . 1 ".parse::<BadiYmd>().unwrap();
        assert_eq!(date, ymd(172, 1, 1));
    }

    #[test]
    fn test_parse_negative_year() {
        let date = "-3.2.1".parse::<BadiYmd>().unwrap();
        assert_eq!(date.year(), -3);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<BadiYmd>(), Err(ParseError::EmptyInput)));
        assert!(matches!("172.1".parse::<BadiYmd>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!("172.1.1.1".parse::<BadiYmd>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!("172.X.1".parse::<BadiYmd>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!("172.20.1".parse::<BadiYmd>(), Err(ParseError::InvalidMonth(20))));
        assert!(matches!("172.0.1".parse::<BadiYmd>(), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(
            "172.4.20".parse::<BadiYmd>(),
            Err(ParseError::InvalidDay { month: 4, day: 20 })
        ));
        assert!(matches!(
            "172.-1.6".parse::<BadiYmd>(),
            Err(ParseError::InvalidDay { month: -1, day: 6 })
        ));
    }

    #[test]
    fn test_error_message() {
        let err = "172.1".parse::<BadiYmd>().unwrap_err();
        assert!(err.to_string().contains("Expected 2 . separators, found 1"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ymd(172, 1, 1).to_string(), "172.1.1");
        assert_eq!(ymd(172, -1, 3).to_string(), "172.-1.3");
    }

    #[test]
    fn test_ordering() {
        assert!(ymd(171, 19, 19) < ymd(172, 1, 1));
        assert!(ymd(172, 18, 19) < ymd(172, -1, 1));
        assert!(ymd(172, -1, 4) < ymd(172, 19, 1));
        assert!(ymd(172, 2, 1) < ymd(172, 2, 2));
    }

    #[test]
    fn test_from_columns() {
        assert_eq!(BadiYmd::from_columns(Some(172), Some(2), Some(3)).unwrap(), ymd(172, 2, 3));
        assert!(matches!(
            BadiYmd::from_columns(Some(172), Some(2), None),
            Err(ConvertError::InvalidArgument(_))
        ));
        assert!(matches!(
            BadiYmd::from_columns(None, None, None),
            Err(ConvertError::InvalidArgument(_))
        ));
        assert!(matches!(
            BadiYmd::from_columns(Some(172), Some(25), Some(1)),
            Err(ConvertError::InvalidComponent(ParseError::InvalidMonth(25)))
        ));
    }

    #[test]
    fn test_columns_and_tuple() {
        let date: BadiYmd = (172, -1, 2).try_into().unwrap();
        assert_eq!(date.to_columns(), (172, -1, 2));
    }

    #[test]
    fn test_serde_string_format() {
        let date = ymd(172, -1, 2);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""172.-1.2""#);
        let parsed: BadiYmd = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);

        let result: Result<BadiYmd, _> = serde_json::from_str(r#""172.20.1""#);
        assert!(result.is_err());
    }
}

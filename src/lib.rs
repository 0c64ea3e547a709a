//! Conversion between the Gregorian calendar and the Badí' calendar.
//!
//! The Badí' year has nineteen months of nineteen days, with four or five
//! intercalary days (Ayyám-i-Há) between the eighteenth and the nineteenth
//! month. The year begins at Naw-Rúz, whose Gregorian date is astronomically
//! determined, and days may begin at local sunset instead of midnight.
//!
//! The astronomy is not computed here: a [`DateConverter`] consults an
//! [`AstronomicalOracle`] for the date of Naw-Rúz, the time of sunset and the
//! leap years. [`TabularOracle`] is a table-driven oracle usable out of the box.
//!
//! # Examples
//!
//! ```
//! use badi_date::{DateConverter, TabularOracle};
//! use chrono::NaiveDate;
//!
//! let converter = DateConverter::new(TabularOracle::new());
//!
//! let date = converter.from_date(NaiveDate::from_ymd_opt(2016, 2, 27).unwrap()).unwrap();
//! assert_eq!("172.-1.2", date.to_string());
//! assert_eq!("Jalál 2 Ayyám-i-Há 172 B.E.", date.long_format());
//!
//! let nawruz = converter.from_ymd(173, 1, 1).unwrap();
//! assert_eq!("2016-03-20", nawruz.gregorian_date().date_naive().to_string());
//! ```

mod consts;
mod converter;
pub mod fmt;
mod occasion;
mod oracle;
mod prelude;
mod types;
mod ymd;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use converter::{ConvertError, ConverterConfig, DateConverter, DateInput};
pub use occasion::{OccasionCatalog, OccasionTable};
pub use oracle::{AstronomicalOracle, Location, MemoizedOracle, OracleError, SunsetRule, TabularOracle};
pub use types::{Day, Month, MonthRef, Weekday};
pub use ymd::BadiYmd;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::prelude::*;

/// A date in the Badí' calendar, together with the civil timestamp it was
/// derived from.
///
/// Values are produced by a [`DateConverter`] and never change; arithmetic
/// returns new values. Displays in the compact form `year.month.day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[display(fmt = "{ymd}")]
pub struct BadiDate {
    ymd:        BadiYmd,
    weekday:    Weekday,
    gregorian:  DateTime<FixedOffset>,
    use_sunset: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-{} or {})", "_0", MONTHS_IN_YEAR, AYYAM_I_HA_NUMBER)]
    InvalidMonth(i16),
    #[display(fmt = "Invalid day {day} for month {month}")]
    InvalidDay { month: i8, day: u8 },
    #[display(fmt = "Invalid day: {} (must be 1-{})", "_0", DAYS_IN_MONTH)]
    DayOutOfRange(u8),
    #[display(fmt = "Invalid weekday: {} (must be 1-{})", "_0", DAYS_IN_WEEK)]
    InvalidWeekday(u8),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl BadiDate {
    pub(crate) const fn new(
        ymd: BadiYmd,
        weekday: Weekday,
        gregorian: DateTime<FixedOffset>,
        use_sunset: bool,
    ) -> Self {
        Self {
            ymd,
            weekday,
            gregorian,
            use_sunset,
        }
    }

    /// Returns the year of the Badí' Era
    pub const fn year(&self) -> i32 {
        self.ymd.year()
    }

    /// Returns the month
    pub const fn month(&self) -> MonthRef {
        self.ymd.month()
    }

    /// Returns the day component as u8
    pub const fn day(&self) -> u8 {
        self.ymd.day()
    }

    /// Returns year, month and day together
    pub const fn ymd(&self) -> BadiYmd {
        self.ymd
    }

    /// Returns the day of the Badí' week
    pub const fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// The civil timestamp this date was derived from
    pub const fn gregorian_date(&self) -> DateTime<FixedOffset> {
        self.gregorian
    }

    /// Whether days of this date begin at sunset
    pub const fn use_sunset(&self) -> bool {
        self.use_sunset
    }

    /// Weekday, day, month, year and era, e.g. `Jalál 1 Bahá 172 B.E.`
    pub fn long_format(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.weekday.name(),
            self.day(),
            self.month().name(),
            self.year(),
            ERA_SUFFIX
        )
    }

    /// Day, month and year, e.g. `1 Bahá 172`
    pub fn short_format(&self) -> String {
        format!("{} {} {}", self.day(), self.month().name(), self.year())
    }

    /// Occasions the catalog lists for this date
    pub fn occasions<C: OccasionCatalog>(&self, catalog: &C) -> Vec<C::Occasion> {
        catalog.occasions_on(&self.ymd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{converter, midnight_converter, utc};

    #[test]
    fn test_accessors() {
        let date = midnight_converter().from_ymd(1, 1, 1).unwrap();
        assert_eq!(date.to_string(), "1.1.1");
        assert_eq!(date.year(), 1);
        assert_eq!(date.month(), MonthRef::new(1).unwrap());
        assert_eq!(date.day(), 1);
        assert_eq!(date.gregorian_date().date_naive().to_string(), "1844-03-21");
    }

    #[test]
    fn test_formats() {
        // 2015-03-21 is a Saturday
        let date = midnight_converter().from_ymd(172, 1, 1).unwrap();
        assert_eq!(date.to_string(), "172.1.1");
        assert_eq!(date.long_format(), "Jalál 1 Bahá 172 B.E.");
        assert_eq!(date.short_format(), "1 Bahá 172");
    }

    #[test]
    fn test_formats_ayyam_i_ha() {
        let date = midnight_converter().from_ymd(174, -1, 5).unwrap();
        assert_eq!(date.to_string(), "174.-1.5");
        assert_eq!(date.short_format(), "5 Ayyám-i-Há 174");
    }

    #[test]
    fn test_weekday_of_reverse_conversion() {
        // 2016-03-20 is a Sunday
        let date = midnight_converter().from_ymd(173, 1, 1).unwrap();
        assert_eq!(date.weekday().get(), 2);
        assert_eq!(date.weekday().name(), "Jamál");
    }

    #[test]
    fn test_evening_belongs_to_next_day() {
        let converter = converter();
        let date = converter.from_datetime(&utc(2015, 3, 21, 20, 0)).unwrap();
        assert_eq!(date.to_string(), "172.1.2");
        assert_eq!(date.long_format(), "Jamál 2 Bahá 172 B.E.");
        assert!(date.use_sunset());
        assert_eq!(date.gregorian_date(), utc(2015, 3, 21, 20, 0));
    }

    #[test]
    fn test_serialize() {
        let date = midnight_converter().from_ymd(172, 1, 1).unwrap();
        let json = serde_json::to_value(date).unwrap();
        assert_eq!(json["ymd"], "172.1.1");
        assert_eq!(json["weekday"], 1);
        let gregorian: DateTime<FixedOffset> = serde_json::from_value(json["gregorian"].clone()).unwrap();
        assert_eq!(gregorian, utc(2015, 3, 21, 0, 0));
        assert_eq!(json["use_sunset"], false);
    }

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(
            ParseError::InvalidMonth(20).to_string(),
            "Invalid month: 20 (must be 1-19 or -1)"
        );
        assert_eq!(
            ParseError::InvalidDay { month: -1, day: 6 }.to_string(),
            "Invalid day 6 for month -1"
        );
        assert_eq!(ParseError::EmptyInput.to_string(), "Empty date string");
    }

    #[test]
    fn test_convert_error_messages() {
        let err = midnight_converter().from_ymd(172, -1, 5).unwrap_err();
        assert_eq!(err.to_string(), "'5' is not a valid day for Ayyam-i-Ha in the year 172");

        let err = midnight_converter().from_ymd(172, 0, 1).unwrap_err();
        assert_eq!(err.to_string(), "Invalid month: 0 (must be 1-19 or -1)");
    }
}

use crate::ParseError;
use crate::consts::{
    AYYAM_I_HA_DAYS_LEAP, AYYAM_I_HA_NUMBER, DAYS_IN_MONTH, DAYS_IN_WEEK, LAST_MONTH,
    MONTHS_BEFORE_AYYAM_I_HA, MONTHS_IN_YEAR,
};
use crate::fmt as names;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroU8;

/// An ordinary month guaranteed to be in the range `1..=MONTHS_IN_YEAR` (1..=19)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Bahá, the month opened by Naw-Rúz
    pub const FIRST: Self = Self(NonZeroU8::MIN);
    /// 'Alá', the month of fasting that follows Ayyám-i-Há
    pub const LAST: Self = match NonZeroU8::new(LAST_MONTH) {
        Some(m) => Self(m),
        None => Self(NonZeroU8::MIN),
    };

    /// Creates a new Month, validating that it's non-zero and <= `MONTHS_IN_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MONTHS_IN_YEAR`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(i16::from(value)))?;
        if value > MONTHS_IN_YEAR {
            return Err(ParseError::InvalidMonth(i16::from(value)));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Either one of the nineteen months or the intercalary days.
///
/// Ayyám-i-Há falls between the eighteenth and nineteenth month, and the
/// ordering of `MonthRef` follows the calendar: `Ordinary(18) < AyyamIHa <
/// Ordinary(19)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum MonthRef {
    /// One of the nineteen months of nineteen days
    Ordinary(Month),
    /// The intercalary period of four or five days
    AyyamIHa,
}

impl MonthRef {
    /// Creates a `MonthRef` from its compact-form number: `1..=19`, or `-1`
    /// for Ayyám-i-Há.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` for any other value.
    pub fn new(value: i8) -> Result<Self, ParseError> {
        if value == AYYAM_I_HA_NUMBER {
            return Ok(Self::AyyamIHa);
        }
        u8::try_from(value)
            .map_err(|_| ParseError::InvalidMonth(i16::from(value)))
            .and_then(Month::new)
            .map(Self::Ordinary)
    }

    /// Returns the compact-form number (`-1` for Ayyám-i-Há)
    pub const fn number(self) -> i8 {
        match self {
            // Month::get is at most 19
            Self::Ordinary(m) => m.get() as i8,
            Self::AyyamIHa => AYYAM_I_HA_NUMBER,
        }
    }

    /// Returns `true` for the intercalary days
    pub const fn is_ayyam_i_ha(self) -> bool {
        matches!(self, Self::AyyamIHa)
    }

    /// Largest day number the month can ever hold, independent of the year
    pub const fn max_day(self) -> u8 {
        match self {
            Self::Ordinary(_) => DAYS_IN_MONTH,
            Self::AyyamIHa => AYYAM_I_HA_DAYS_LEAP,
        }
    }

    /// Transliterated name of the month
    pub fn name(self) -> &'static str {
        names::month(self)
    }

    /// English translation of the month name
    pub fn translation(self) -> &'static str {
        names::month_translation(self)
    }

    /// Position within the year, placing Ayyám-i-Há between months 18 and 19
    const fn position(self) -> u8 {
        match self {
            Self::Ordinary(m) if m.get() <= MONTHS_BEFORE_AYYAM_I_HA => m.get(),
            Self::AyyamIHa => MONTHS_BEFORE_AYYAM_I_HA + 1,
            Self::Ordinary(m) => m.get() + 1,
        }
    }
}

impl PartialOrd for MonthRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MonthRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position().cmp(&other.position())
    }
}

impl From<Month> for MonthRef {
    fn from(month: Month) -> Self {
        Self::Ordinary(month)
    }
}

impl TryFrom<i8> for MonthRef {
    type Error = ParseError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MonthRef> for i8 {
    fn from(month: MonthRef) -> Self {
        month.number()
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A day value guaranteed to be valid for its month, independent of the year.
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
///
/// The fifth day of Ayyám-i-Há passes this check; whether the year actually
/// has it is decided by the converter, which knows the leap years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and fits the given month
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or exceeds what the month can hold.
    pub fn new(value: u8, month: MonthRef) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidDay {
            month: month.number(),
            day:   value,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(invalid)?;
        if value > month.max_day() {
            return Err(invalid());
        }
        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Without a month only the ordinary bounds can be checked
        NonZeroU8::new(value)
            .filter(|day| day.get() <= DAYS_IN_MONTH)
            .map(Self)
            .ok_or(ParseError::DayOutOfRange(value))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Day of the Badí' week, `1..=7` with Saturday (Jalál) as 1 and Friday
/// (Istiqlál) as 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Weekday(NonZeroU8);

impl Weekday {
    /// Creates a new Weekday, validating that it's in `1..=7`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidWeekday` otherwise.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidWeekday(value))?;
        if value > DAYS_IN_WEEK {
            return Err(ParseError::InvalidWeekday(value));
        }
        Ok(Self(non_zero))
    }

    /// Maps a civil weekday onto the Badí' week (Saturday → 1, …, Friday → 7).
    pub const fn from_civil(weekday: chrono::Weekday) -> Self {
        use chrono::Weekday::*;
        Self::wrapping(match weekday {
            Sat => 1,
            Sun => 2,
            Mon => 3,
            Tue => 4,
            Wed => 5,
            Thu => 6,
            Fri => 7,
        })
    }

    /// The following weekday, wrapping 7 back to 1
    pub const fn succ(self) -> Self {
        Self::wrapping(self.get() % DAYS_IN_WEEK + 1)
    }

    // callers only pass 1..=7
    const fn wrapping(value: u8) -> Self {
        match NonZeroU8::new(value) {
            Some(v) => Self(v),
            None => Self(NonZeroU8::MIN),
        }
    }

    /// Returns the weekday value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Transliterated name of the weekday
    pub fn name(self) -> &'static str {
        names::weekday(self)
    }

    /// English translation of the weekday name
    pub fn translation(self) -> &'static str {
        names::weekday_translation(self)
    }
}

impl TryFrom<u8> for Weekday {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Weekday> for u8 {
    fn from(weekday: Weekday) -> Self {
        weekday.0.get()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_new_valid() {
        for m in 1..=19 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
    }

    #[test]
    fn test_month_new_invalid() {
        assert!(matches!(Month::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(Month::new(20), Err(ParseError::InvalidMonth(20))));
        assert!(matches!(Month::new(255), Err(ParseError::InvalidMonth(_))));
    }

    #[test]
    fn test_month_constants() {
        assert_eq!(Month::FIRST.get(), 1);
        assert_eq!(Month::LAST.get(), 19);
    }

    #[test]
    fn test_month_ref_new() {
        assert_eq!(MonthRef::new(-1).unwrap(), MonthRef::AyyamIHa);
        assert_eq!(MonthRef::new(7).unwrap(), MonthRef::Ordinary(Month::new(7).unwrap()));
        assert!(matches!(MonthRef::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(MonthRef::new(-2), Err(ParseError::InvalidMonth(-2))));
        assert!(matches!(MonthRef::new(20), Err(ParseError::InvalidMonth(20))));
    }

    #[test]
    fn test_month_ref_number_and_display() {
        assert_eq!(MonthRef::AyyamIHa.number(), -1);
        assert_eq!(MonthRef::AyyamIHa.to_string(), "-1");
        assert_eq!(MonthRef::Ordinary(Month::LAST).to_string(), "19");
    }

    #[test]
    fn test_month_ref_ordering() {
        let m18 = MonthRef::new(18).unwrap();
        let m19 = MonthRef::new(19).unwrap();
        let m1 = MonthRef::new(1).unwrap();
        assert!(m1 < m18);
        assert!(m18 < MonthRef::AyyamIHa);
        assert!(MonthRef::AyyamIHa < m19);
    }

    #[test]
    fn test_month_ref_serde() {
        let json = serde_json::to_string(&MonthRef::AyyamIHa).unwrap();
        assert_eq!(json, "-1");
        let parsed: MonthRef = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, MonthRef::new(12).unwrap());
        assert!(serde_json::from_str::<MonthRef>("0").is_err());
    }

    #[test]
    fn test_day_new_cases() {
        struct TestCase {
            day:         u8,
            month:       i8,
            is_valid:    bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                day:         1,
                month:       1,
                is_valid:    true,
                description: "first day of a month",
            },
            TestCase {
                day:         19,
                month:       19,
                is_valid:    true,
                description: "last day of a month",
            },
            TestCase {
                day:         20,
                month:       3,
                is_valid:    false,
                description: "past the end of a month",
            },
            TestCase {
                day:         0,
                month:       3,
                is_valid:    false,
                description: "day zero",
            },
            TestCase {
                day:         5,
                month:       -1,
                is_valid:    true,
                description: "fifth intercalary day",
            },
            TestCase {
                day:         6,
                month:       -1,
                is_valid:    false,
                description: "sixth intercalary day",
            },
        ];

        for case in &cases {
            let month = MonthRef::new(case.month).unwrap();
            assert_eq!(
                Day::new(case.day, month).is_ok(),
                case.is_valid,
                "Day {} of month {} ({})",
                case.day,
                case.month,
                case.description
            );
        }
    }

    #[test]
    fn test_day_try_from_u8() {
        let day: Day = 15.try_into().unwrap();
        assert_eq!(day.get(), 15);

        let result: Result<Day, _> = 0.try_into();
        assert_eq!(result, Err(ParseError::DayOutOfRange(0)));
        let result: Result<Day, _> = 20.try_into();
        assert_eq!(result, Err(ParseError::DayOutOfRange(20)));
        assert_eq!(
            ParseError::DayOutOfRange(20).to_string(),
            "Invalid day: 20 (must be 1-19)"
        );
    }

    #[test]
    fn test_weekday_from_civil() {
        use chrono::Weekday::*;
        let expected = [(Sat, 1), (Sun, 2), (Mon, 3), (Tue, 4), (Wed, 5), (Thu, 6), (Fri, 7)];
        for (civil, badi) in expected {
            assert_eq!(Weekday::from_civil(civil).get(), badi, "{civil:?}");
        }
    }

    #[test]
    fn test_weekday_succ_wraps() {
        assert_eq!(Weekday::new(6).unwrap().succ().get(), 7);
        assert_eq!(Weekday::new(7).unwrap().succ().get(), 1);
    }

    #[test]
    fn test_weekday_new_invalid() {
        assert!(matches!(Weekday::new(0), Err(ParseError::InvalidWeekday(0))));
        assert!(matches!(Weekday::new(8), Err(ParseError::InvalidWeekday(8))));
    }

    #[test]
    fn test_weekday_serde() {
        let weekday = Weekday::new(3).unwrap();
        let json = serde_json::to_string(&weekday).unwrap();
        assert_eq!(json, "3");
        let parsed: Weekday = serde_json::from_str(&json).unwrap();
        assert_eq!(weekday, parsed);
    }
}

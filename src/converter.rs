//! Conversion between civil timestamps and Badí' dates.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::consts::{
    AYYAM_I_HA_DAYS_COMMON, AYYAM_I_HA_DAYS_LEAP, AYYAM_I_HA_OFFSET, DAYS_IN_MONTH,
    EPOCH_GREGORIAN_YEAR, ORDINARY_DAYS_IN_YEAR,
};
use crate::oracle::{AstronomicalOracle, Location, OracleError};
use crate::types::{Day, Month, MonthRef, Weekday};
use crate::{BadiDate, BadiYmd, ParseError};

/// Error type for conversions.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Neither a timestamp nor a complete triple was supplied, or the input
    /// is otherwise unusable.
    #[error("Invalid arguments: {0}")]
    InvalidArgument(String),

    /// A month or day number outside its range.
    #[error(transparent)]
    InvalidComponent(#[from] ParseError),

    /// The day does not exist in that year's Ayyám-i-Há.
    #[error("'{day}' is not a valid day for Ayyam-i-Ha in the year {year}")]
    InvalidAyyamIHaDay { year: i32, day: u8 },

    /// Failure reported by the oracle.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Settings shared by every conversion of a [`DateConverter`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Whether days begin at local sunset rather than at midnight
    pub use_sunset:         bool,
    /// Where sunset is observed
    pub location:           Location,
    /// Offset used for date-only inputs and for the anchors of dates
    /// converted from a Badí' triple
    pub utc_offset_seconds: i32,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            use_sunset:         true,
            location:           Location::default(),
            utc_offset_seconds: 0,
        }
    }
}

/// Everything a conversion can be asked with, in one loosely-typed record.
///
/// Either `date`, or all of `year`, `month` and `day` must be present; when
/// both are, `date` wins. `month` uses `-1` for Ayyám-i-Há.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateInput {
    /// Civil timestamp to convert forward
    pub date:               Option<DateTime<FixedOffset>>,
    /// Badí' year to convert back
    pub year:               Option<i32>,
    /// Badí' month, `-1` for Ayyám-i-Há
    pub month:              Option<i8>,
    /// Day of the month
    pub day:                Option<u8>,
    /// Overrides [`ConverterConfig::use_sunset`]
    pub use_sunset:         Option<bool>,
    /// Re-expresses `date` in this offset before converting
    pub utc_offset_seconds: Option<i32>,
}

/// Converts between the Gregorian and Badí' calendars with the help of an
/// [`AstronomicalOracle`].
///
/// # Example
///
/// ```
/// use badi_date::{DateConverter, TabularOracle};
///
/// let converter = DateConverter::new(TabularOracle::new());
/// let date = converter.from_ymd(172, 1, 1).unwrap();
///
/// assert_eq!("2015-03-21", date.gregorian_date().date_naive().to_string());
/// ```
#[derive(Debug, Clone)]
pub struct DateConverter<O> {
    oracle: O,
    config: ConverterConfig,
    offset: FixedOffset,
}

impl<O: AstronomicalOracle> DateConverter<O> {
    /// Creates a converter with the default configuration: sunset-mode on,
    /// location at 0°/0°, UTC.
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            config: ConverterConfig::default(),
            offset: Utc.fix(),
        }
    }

    /// Creates a converter with an explicit configuration.
    ///
    /// # Errors
    /// Returns `ConvertError::InvalidArgument` if the location or the UTC
    /// offset is out of range.
    pub fn with_config(oracle: O, config: ConverterConfig) -> Result<Self, ConvertError> {
        if !config.location.is_valid() {
            return Err(ConvertError::InvalidArgument(format!(
                "location out of range: {:?}",
                config.location
            )));
        }
        let offset = fixed_offset(config.utc_offset_seconds)?;
        Ok(Self { oracle, config, offset })
    }

    /// Returns the configuration
    pub const fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Returns the oracle
    pub const fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Converts a civil timestamp in any time zone.
    ///
    /// # Errors
    /// Propagates oracle failures.
    pub fn from_datetime<Tz: TimeZone>(&self, timestamp: &DateTime<Tz>) -> Result<BadiDate, ConvertError> {
        let fixed = timestamp.with_timezone(&timestamp.offset().fix());
        self.forward(fixed, self.config.use_sunset)
    }

    /// Converts a civil timestamp after re-expressing it in `offset`, which
    /// decides the civil date the timestamp falls on.
    ///
    /// # Errors
    /// Propagates oracle failures.
    pub fn from_datetime_in<Tz: TimeZone>(
        &self,
        timestamp: &DateTime<Tz>,
        offset: FixedOffset,
    ) -> Result<BadiDate, ConvertError> {
        self.forward(timestamp.with_timezone(&offset), self.config.use_sunset)
    }

    /// Converts a civil date, taken as midnight in the configured offset.
    ///
    /// # Errors
    /// Propagates oracle failures.
    pub fn from_date(&self, date: NaiveDate) -> Result<BadiDate, ConvertError> {
        self.forward(self.midnight(date)?, self.config.use_sunset)
    }

    /// Converts a Badí' year, month (`-1` for Ayyám-i-Há) and day.
    ///
    /// # Errors
    /// Returns `ConvertError::InvalidComponent` for an out-of-range month or
    /// day, `ConvertError::InvalidAyyamIHaDay` for a fifth day of Ayyám-i-Há
    /// in a common year, and propagates oracle failures.
    pub fn from_ymd(&self, year: i32, month: i8, day: u8) -> Result<BadiDate, ConvertError> {
        self.from_badi(BadiYmd::from_parts(year, month, day)?)
    }

    /// Converts a Badí' triple.
    ///
    /// # Errors
    /// As [`from_ymd`](Self::from_ymd).
    pub fn from_badi(&self, ymd: BadiYmd) -> Result<BadiDate, ConvertError> {
        self.reverse(ymd, self.config.use_sunset)
    }

    /// Converts a loosely-typed request.
    ///
    /// # Errors
    /// Returns `ConvertError::InvalidArgument` when neither a timestamp nor a
    /// complete triple is present, otherwise as the typed constructors.
    pub fn convert(&self, input: &DateInput) -> Result<BadiDate, ConvertError> {
        let use_sunset = input.use_sunset.unwrap_or(self.config.use_sunset);
        if let Some(date) = input.date {
            let date = match input.utc_offset_seconds {
                Some(seconds) => date.with_timezone(&fixed_offset(seconds)?),
                None => date,
            };
            return self.forward(date, use_sunset);
        }
        let ymd = BadiYmd::from_columns(input.year, input.month, input.day)?;
        self.reverse(ymd, use_sunset)
    }

    /// Moves a date `days` civil days forward (or backward when negative).
    ///
    /// The result is converted afresh, keeping the date's sunset-mode.
    ///
    /// # Errors
    /// Returns `ConvertError::InvalidArgument` if the result leaves the
    /// representable range, and propagates oracle failures.
    pub fn add_days(&self, date: &BadiDate, days: i64) -> Result<BadiDate, ConvertError> {
        let shifted = TimeDelta::try_days(days)
            .and_then(|delta| date.gregorian_date().checked_add_signed(delta))
            .ok_or_else(|| ConvertError::InvalidArgument(format!("{date} + {days} days is out of range")))?;
        self.forward(shifted, date.use_sunset())
    }

    /// Moves a date `days` civil days backward.
    ///
    /// # Errors
    /// As [`add_days`](Self::add_days).
    pub fn sub_days(&self, date: &BadiDate, days: i64) -> Result<BadiDate, ConvertError> {
        let negated = days
            .checked_neg()
            .ok_or_else(|| ConvertError::InvalidArgument(format!("{date} - {days} days is out of range")))?;
        self.add_days(date, negated)
    }

    /// Sunset on the UTC calendar date of the date's anchor.
    ///
    /// # Errors
    /// Propagates oracle failures.
    pub fn sunset_time(&self, date: &BadiDate) -> Result<DateTime<Utc>, ConvertError> {
        let day = date.gregorian_date().with_timezone(&Utc).date_naive();
        self.sunset_on(day)
    }

    /// Sunset on the civil day after [`sunset_time`](Self::sunset_time)'s.
    ///
    /// # Errors
    /// Propagates oracle failures.
    pub fn next_sunset_time(&self, date: &BadiDate) -> Result<DateTime<Utc>, ConvertError> {
        let day = date.gregorian_date().with_timezone(&Utc).date_naive();
        let next = day
            .succ_opt()
            .ok_or_else(|| ConvertError::InvalidArgument(format!("no day after {day}")))?;
        self.sunset_on(next)
    }

    /// Number of days of Ayyám-i-Há in `year`: 5 in leap years, 4 otherwise.
    ///
    /// # Errors
    /// Propagates oracle failures.
    pub fn ayyam_i_ha_days(&self, year: i32) -> Result<u8, ConvertError> {
        Ok(if self.oracle.is_leap_year(year)? {
            AYYAM_I_HA_DAYS_LEAP
        } else {
            AYYAM_I_HA_DAYS_COMMON
        })
    }

    /// Number of days in `year`: 365 or 366.
    ///
    /// # Errors
    /// Propagates oracle failures.
    pub fn days_in_year(&self, year: i32) -> Result<u16, ConvertError> {
        Ok(ORDINARY_DAYS_IN_YEAR + u16::from(self.ayyam_i_ha_days(year)?))
    }

    fn sunset_on(&self, day: NaiveDate) -> Result<DateTime<Utc>, ConvertError> {
        Ok(self
            .oracle
            .sunset_time(day, &self.config.location)?
            .with_timezone(&Utc))
    }

    fn midnight(&self, date: NaiveDate) -> Result<DateTime<FixedOffset>, ConvertError> {
        self.offset
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .single()
            .ok_or_else(|| ConvertError::InvalidArgument(format!("no midnight on {date}")))
    }

    /// The civil date whose Badí' day the timestamp belongs to: its own date,
    /// or the next one when sunset-mode is on and the timestamp falls after
    /// that day's sunset.
    fn effective_date(&self, timestamp: &DateTime<FixedOffset>, use_sunset: bool) -> Result<NaiveDate, ConvertError> {
        let civil = timestamp.date_naive();
        if !use_sunset {
            return Ok(civil);
        }
        let sunset = self.oracle.sunset_time(civil, &self.config.location)?;
        let sunset_date = sunset.with_timezone(timestamp.offset()).date_naive();
        if *timestamp > sunset && sunset_date == civil {
            trace!(%timestamp, %sunset, "after sunset, day advances");
            return civil
                .succ_opt()
                .ok_or_else(|| ConvertError::InvalidArgument(format!("no day after {civil}")));
        }
        Ok(civil)
    }

    fn forward(&self, timestamp: DateTime<FixedOffset>, use_sunset: bool) -> Result<BadiDate, ConvertError> {
        let effective = self.effective_date(&timestamp, use_sunset)?;
        let gregorian_year = effective.year();
        let nawruz = self.oracle.nawruz_date(gregorian_year)?;

        let (year, offset) = if effective >= nawruz {
            (
                gregorian_year - EPOCH_GREGORIAN_YEAR + 1,
                effective.signed_duration_since(nawruz).num_days(),
            )
        } else {
            let previous = self.oracle.nawruz_date(gregorian_year - 1)?;
            (
                gregorian_year - EPOCH_GREGORIAN_YEAR,
                effective.signed_duration_since(previous).num_days(),
            )
        };
        trace!(%effective, %nawruz, year, offset, "located in Badí' year");

        let (month, day) = self.month_day_for_offset(year, offset)?;
        let date = BadiDate::new(
            BadiYmd::new(year, month, day),
            Weekday::from_civil(effective.weekday()),
            timestamp,
            use_sunset,
        );
        debug!(%timestamp, badi = %date, use_sunset, "converted to Badí' date");
        Ok(date)
    }

    fn reverse(&self, ymd: BadiYmd, use_sunset: bool) -> Result<BadiDate, ConvertError> {
        self.validate_ayyam_i_ha(&ymd)?;
        let nawruz = self.oracle.nawruz_date(ymd.year() + EPOCH_GREGORIAN_YEAR - 1)?;
        let offset = self.days_from_nawruz(&ymd)?;
        let civil = TimeDelta::try_days(offset)
            .and_then(|delta| nawruz.checked_add_signed(delta))
            .ok_or_else(|| ConvertError::InvalidArgument(format!("{ymd} is out of range")))?;
        let anchor = self.midnight(civil)?;
        let weekday = Weekday::from_civil(self.effective_date(&anchor, use_sunset)?.weekday());
        let date = BadiDate::new(ymd, weekday, anchor, use_sunset);
        debug!(badi = %date, %civil, "converted from Badí' date");
        Ok(date)
    }

    fn validate_ayyam_i_ha(&self, ymd: &BadiYmd) -> Result<(), ConvertError> {
        if ymd.month().is_ayyam_i_ha() && ymd.day() > self.ayyam_i_ha_days(ymd.year())? {
            return Err(ConvertError::InvalidAyyamIHaDay {
                year: ymd.year(),
                day:  ymd.day(),
            });
        }
        Ok(())
    }

    /// Zero-based day count from Naw-Rúz: eighteen months, then Ayyám-i-Há,
    /// then the nineteenth month.
    fn days_from_nawruz(&self, ymd: &BadiYmd) -> Result<i64, ConvertError> {
        let day = i64::from(ymd.day()) - 1;
        let month_days = i64::from(DAYS_IN_MONTH);
        Ok(match ymd.month() {
            MonthRef::AyyamIHa => AYYAM_I_HA_OFFSET + day,
            MonthRef::Ordinary(m) if m == Month::LAST => {
                AYYAM_I_HA_OFFSET + i64::from(self.ayyam_i_ha_days(ymd.year())?) + day
            }
            MonthRef::Ordinary(m) => (i64::from(m.get()) - 1) * month_days + day,
        })
    }

    /// Inverse of [`days_from_nawruz`](Self::days_from_nawruz). The leap state
    /// is only consulted once the offset reaches Ayyám-i-Há.
    fn month_day_for_offset(&self, year: i32, offset: i64) -> Result<(MonthRef, Day), ConvertError> {
        if offset < 0 {
            return Err(inconsistent(year, offset));
        }
        let month_days = i64::from(DAYS_IN_MONTH);
        let (month, day) = if offset < AYYAM_I_HA_OFFSET {
            let month = Month::new(small(offset / month_days + 1, year, offset)?)?;
            (MonthRef::Ordinary(month), offset % month_days)
        } else {
            let ayyam_i_ha = i64::from(self.ayyam_i_ha_days(year)?);
            if offset < AYYAM_I_HA_OFFSET + ayyam_i_ha {
                (MonthRef::AyyamIHa, offset - AYYAM_I_HA_OFFSET)
            } else {
                (MonthRef::Ordinary(Month::LAST), offset - AYYAM_I_HA_OFFSET - ayyam_i_ha)
            }
        };
        let day = Day::new(small(day + 1, year, offset)?, month).map_err(|_| inconsistent(year, offset))?;
        Ok((month, day))
    }
}

fn fixed_offset(seconds: i32) -> Result<FixedOffset, ConvertError> {
    FixedOffset::east_opt(seconds)
        .ok_or_else(|| ConvertError::InvalidArgument(format!("UTC offset of {seconds} seconds is out of range")))
}

fn small(value: i64, year: i32, offset: i64) -> Result<u8, ConvertError> {
    u8::try_from(value).map_err(|_| inconsistent(year, offset))
}

/// An offset outside the year means the leap predicate disagrees with the
/// Naw-Rúz dates.
fn inconsistent(year: i32, offset: i64) -> ConvertError {
    OracleError::Inconsistent(format!("day offset {offset} does not fit in Badí' year {year}")).into()
}

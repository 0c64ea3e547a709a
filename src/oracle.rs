//! The astronomical oracle the converter consults.
//!
//! The converter never computes astronomical positions itself. Everything it
//! needs to know about the sky is asked through [`AstronomicalOracle`]: the
//! Gregorian date of Naw-Rúz, the time of sunset, and whether a Badí' year is
//! a leap year.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::consts::{
    EPOCH_GREGORIAN_YEAR, FIRST_ASTRONOMICAL_NAWRUZ_YEAR, NAWRUZ_FIXED_DAY, NAWRUZ_MONTH,
    PUBLISHED_NAWRUZ,
};

/// Error type for oracle queries.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// No Naw-Rúz date is available for the Gregorian year.
    #[error("No Naw-Ruz date known for Gregorian year {0}")]
    UnknownNawruz(i32),

    /// Sunset could not be determined for the date.
    #[error("No sunset time available for {0}")]
    NoSunset(NaiveDate),

    /// The oracle's answers contradict each other.
    #[error("Inconsistent oracle: {0}")]
    Inconsistent(String),

    /// Failure of an external implementation.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// A point on Earth, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub latitude:  f64,
    pub longitude: f64,
}

impl Location {
    /// Creates a location, checking the coordinate ranges
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let location = Self { latitude, longitude };
        location.is_valid().then_some(location)
    }

    /// `true` if latitude is within ±90° and longitude within ±180°
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    fn cache_key(&self) -> (u64, u64) {
        (self.latitude.to_bits(), self.longitude.to_bits())
    }
}

/// Source of the astronomical facts the calendar depends on.
///
/// Implementations are expected to be deterministic: the same query always
/// yields the same answer.
pub trait AstronomicalOracle {
    /// Gregorian date of Naw-Rúz in `gregorian_year`.
    fn nawruz_date(&self, gregorian_year: i32) -> Result<NaiveDate, OracleError>;

    /// Local sunset on `date` at `location`.
    fn sunset_time(&self, date: NaiveDate, location: &Location) -> Result<DateTime<FixedOffset>, OracleError>;

    /// Whether `badi_year` has five days of Ayyám-i-Há.
    ///
    /// The default derives the answer from the spacing of the year's Naw-Rúz
    /// and the next one: a 366-day year is a leap year.
    fn is_leap_year(&self, badi_year: i32) -> Result<bool, OracleError> {
        leap_from_nawruz(self, badi_year)
    }

    /// Whether [`is_leap_year`](Self::is_leap_year) follows from the Naw-Rúz
    /// dates alone. Implementations that override `is_leap_year` with their
    /// own rule return `false`.
    fn derives_leap_from_nawruz(&self) -> bool {
        true
    }
}

fn leap_from_nawruz<O: AstronomicalOracle + ?Sized>(oracle: &O, badi_year: i32) -> Result<bool, OracleError> {
    let gregorian_year = badi_year + EPOCH_GREGORIAN_YEAR - 1;
    let start = oracle.nawruz_date(gregorian_year)?;
    let end = oracle.nawruz_date(gregorian_year + 1)?;
    match end.signed_duration_since(start).num_days() {
        365 => Ok(false),
        366 => Ok(true),
        n => Err(OracleError::Inconsistent(format!(
            "Badí' year {badi_year} would last {n} days ({start} to {end})"
        ))),
    }
}

impl<O: AstronomicalOracle + ?Sized> AstronomicalOracle for &O {
    fn nawruz_date(&self, gregorian_year: i32) -> Result<NaiveDate, OracleError> {
        (**self).nawruz_date(gregorian_year)
    }

    fn sunset_time(&self, date: NaiveDate, location: &Location) -> Result<DateTime<FixedOffset>, OracleError> {
        (**self).sunset_time(date, location)
    }

    fn is_leap_year(&self, badi_year: i32) -> Result<bool, OracleError> {
        (**self).is_leap_year(badi_year)
    }

    fn derives_leap_from_nawruz(&self) -> bool {
        (**self).derives_leap_from_nawruz()
    }
}

/// Sunset at a fixed local clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunsetRule {
    pub local_time:         NaiveTime,
    pub utc_offset_seconds: i32,
}

impl Default for SunsetRule {
    fn default() -> Self {
        Self {
            local_time:         NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
            utc_offset_seconds: 0,
        }
    }
}

/// A table-driven oracle.
///
/// Naw-Rúz falls on March 21 for every year before 2015 (172 B.E.), on the
/// published date for 2015–2064 (172–221 B.E.), and on any date registered with
/// [`with_nawruz`](Self::with_nawruz). Later years without a registered date
/// are unknown. Sunset is taken from a [`SunsetRule`], the same for every
/// location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularOracle {
    nawruz: BTreeMap<i32, NaiveDate>,
    #[serde(default)]
    sunset: SunsetRule,
}

impl Default for TabularOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl TabularOracle {
    /// Creates an oracle with the published Naw-Rúz dates and sunset at 18:00 UTC
    pub fn new() -> Self {
        let nawruz = PUBLISHED_NAWRUZ
            .iter()
            .filter_map(|&(year, day)| NaiveDate::from_ymd_opt(year, NAWRUZ_MONTH, day).map(|d| (year, d)))
            .collect();
        Self {
            nawruz,
            sunset: SunsetRule::default(),
        }
    }

    /// Registers (or replaces) the Naw-Rúz date of a Gregorian year
    #[must_use]
    pub fn with_nawruz(mut self, date: NaiveDate) -> Self {
        use chrono::Datelike;
        self.nawruz.insert(date.year(), date);
        self
    }

    /// Replaces the sunset rule
    #[must_use]
    pub const fn with_sunset(mut self, sunset: SunsetRule) -> Self {
        self.sunset = sunset;
        self
    }

    /// Returns the sunset rule
    pub const fn sunset_rule(&self) -> SunsetRule {
        self.sunset
    }
}

impl AstronomicalOracle for TabularOracle {
    fn nawruz_date(&self, gregorian_year: i32) -> Result<NaiveDate, OracleError> {
        if let Some(&date) = self.nawruz.get(&gregorian_year) {
            return Ok(date);
        }
        if gregorian_year < FIRST_ASTRONOMICAL_NAWRUZ_YEAR {
            return NaiveDate::from_ymd_opt(gregorian_year, NAWRUZ_MONTH, NAWRUZ_FIXED_DAY)
                .ok_or(OracleError::UnknownNawruz(gregorian_year));
        }
        Err(OracleError::UnknownNawruz(gregorian_year))
    }

    fn sunset_time(&self, date: NaiveDate, _location: &Location) -> Result<DateTime<FixedOffset>, OracleError> {
        let offset = FixedOffset::east_opt(self.sunset.utc_offset_seconds).ok_or_else(|| {
            OracleError::Inconsistent(format!("UTC offset of {} seconds", self.sunset.utc_offset_seconds))
        })?;
        offset
            .from_local_datetime(&date.and_time(self.sunset.local_time))
            .single()
            .ok_or(OracleError::NoSunset(date))
    }
}

/// Wraps an oracle and remembers every answer for the life of the wrapper.
///
/// Only successful answers are cached; a failing query is retried on the
/// next call.
#[derive(Debug, Default)]
pub struct MemoizedOracle<O> {
    inner:  O,
    nawruz: Mutex<HashMap<i32, NaiveDate>>,
    sunset: Mutex<HashMap<(NaiveDate, (u64, u64)), DateTime<FixedOffset>>>,
    leap:   Mutex<HashMap<i32, bool>>,
}

impl<O: AstronomicalOracle> MemoizedOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            nawruz: Mutex::default(),
            sunset: Mutex::default(),
            leap: Mutex::default(),
        }
    }

    /// Returns the wrapped oracle
    pub const fn inner(&self) -> &O {
        &self.inner
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

fn cached<K, V, F>(cache: &Mutex<HashMap<K, V>>, key: K, compute: F) -> Result<V, OracleError>
where
    K: std::hash::Hash + Eq,
    V: Copy,
    F: FnOnce() -> Result<V, OracleError>,
{
    if let Some(&hit) = cache.lock().unwrap_or_else(PoisonError::into_inner).get(&key) {
        return Ok(hit);
    }
    let value = compute()?;
    cache
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key, value);
    Ok(value)
}

impl<O: AstronomicalOracle> AstronomicalOracle for MemoizedOracle<O> {
    fn nawruz_date(&self, gregorian_year: i32) -> Result<NaiveDate, OracleError> {
        cached(&self.nawruz, gregorian_year, || {
            trace!(gregorian_year, "nawruz cache miss");
            self.inner.nawruz_date(gregorian_year)
        })
    }

    fn sunset_time(&self, date: NaiveDate, location: &Location) -> Result<DateTime<FixedOffset>, OracleError> {
        cached(&self.sunset, (date, location.cache_key()), || {
            trace!(%date, "sunset cache miss");
            self.inner.sunset_time(date, location)
        })
    }

    fn is_leap_year(&self, badi_year: i32) -> Result<bool, OracleError> {
        cached(&self.leap, badi_year, || {
            if self.inner.derives_leap_from_nawruz() {
                leap_from_nawruz(self, badi_year)
            } else {
                self.inner.is_leap_year(badi_year)
            }
        })
    }

    fn derives_leap_from_nawruz(&self) -> bool {
        self.inner.derives_leap_from_nawruz()
    }
}

//! Fixtures shared by the unit tests.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::{BadiYmd, ConverterConfig, DateConverter, TabularOracle};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn at(offset: FixedOffset, y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
    offset.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn ymd(year: i32, month: i8, day: u8) -> BadiYmd {
    BadiYmd::from_parts(year, month, day).unwrap()
}

/// Sunset-mode converter; the oracle puts sunset at 18:00 UTC.
pub fn converter() -> DateConverter<TabularOracle> {
    DateConverter::new(TabularOracle::new())
}

/// Converter whose days begin at midnight UTC.
pub fn midnight_converter() -> DateConverter<TabularOracle> {
    let config = ConverterConfig {
        use_sunset: false,
        ..ConverterConfig::default()
    };
    DateConverter::with_config(TabularOracle::new(), config).unwrap()
}

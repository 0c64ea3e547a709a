//! Names of months and weekdays.
//!
//! Names are transliterated the way they are commonly printed in English
//! publications; translations are the usual English renderings.

use crate::types::{MonthRef, Weekday};

/// Month names, index 1..=19 (index 0 unused, months are 1-indexed)
pub const MONTH_NAMES: [&str; 20] = [
    "",
    "Bahá",
    "Jalál",
    "Jamál",
    "‘Aẓamat",
    "Núr",
    "Raḥmat",
    "Kalimát",
    "Kamál",
    "Asmá’",
    "‘Izzat",
    "Mashíyyat",
    "‘Ilm",
    "Qudrat",
    "Qawl",
    "Masá’il",
    "Sharaf",
    "Sulṭán",
    "Mulk",
    "‘Alá’",
];

/// English translations of [`MONTH_NAMES`], same indexing
pub const MONTH_TRANSLATIONS: [&str; 20] = [
    "",
    "Splendour",
    "Glory",
    "Beauty",
    "Grandeur",
    "Light",
    "Mercy",
    "Words",
    "Perfection",
    "Names",
    "Might",
    "Will",
    "Knowledge",
    "Power",
    "Speech",
    "Questions",
    "Honour",
    "Sovereignty",
    "Dominion",
    "Loftiness",
];

/// Name of the intercalary days
pub const AYYAM_I_HA_NAME: &str = "Ayyám-i-Há";
/// Translation of [`AYYAM_I_HA_NAME`]
pub const AYYAM_I_HA_TRANSLATION: &str = "Days of Há";

/// Weekday names, index 1..=7 starting from Saturday (index 0 unused)
pub const WEEKDAY_NAMES: [&str; 8] =
    ["", "Jalál", "Jamál", "Kamál", "Fiḍál", "‘Idál", "Istijlál", "Istiqlál"];

/// English translations of [`WEEKDAY_NAMES`], same indexing
pub const WEEKDAY_TRANSLATIONS: [&str; 8] =
    ["", "Glory", "Beauty", "Perfection", "Grace", "Justice", "Majesty", "Independence"];

/// Name of a month, or of Ayyám-i-Há.
///
/// # Example
///
/// ```
/// use badi_date::{MonthRef, fmt};
///
/// assert_eq!("Bahá", fmt::month(MonthRef::new(1).unwrap()));
/// assert_eq!("Ayyám-i-Há", fmt::month(MonthRef::AyyamIHa));
/// ```
pub fn month(m: MonthRef) -> &'static str {
    match m {
        MonthRef::Ordinary(m) => MONTH_NAMES[usize::from(m.get())],
        MonthRef::AyyamIHa => AYYAM_I_HA_NAME,
    }
}

/// English translation of a month name.
pub fn month_translation(m: MonthRef) -> &'static str {
    match m {
        MonthRef::Ordinary(m) => MONTH_TRANSLATIONS[usize::from(m.get())],
        MonthRef::AyyamIHa => AYYAM_I_HA_TRANSLATION,
    }
}

/// Name of a weekday.
///
/// # Example
///
/// ```
/// use badi_date::{Weekday, fmt};
///
/// assert_eq!("Jalál", fmt::weekday(Weekday::new(1).unwrap()));
/// ```
pub fn weekday(w: Weekday) -> &'static str {
    WEEKDAY_NAMES[usize::from(w.get())]
}

/// English translation of a weekday name.
pub fn weekday_translation(w: Weekday) -> &'static str {
    WEEKDAY_TRANSLATIONS[usize::from(w.get())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        for (std, num) in [("Bahá", 1), ("Mulk", 18), ("‘Alá’", 19), ("Ayyám-i-Há", -1)] {
            assert_eq!(std, month(MonthRef::new(num).unwrap()));
        }
    }

    #[test]
    fn test_translations() {
        assert_eq!("Loftiness", month_translation(MonthRef::new(19).unwrap()));
        assert_eq!("Days of Há", month_translation(MonthRef::AyyamIHa));
        assert_eq!("Independence", weekday_translation(Weekday::new(7).unwrap()));
    }

    #[test]
    fn test_weekday_names() {
        for (std, num) in [("Jalál", 1), ("Fiḍál", 4), ("Istiqlál", 7)] {
            assert_eq!(std, weekday(Weekday::new(num).unwrap()));
        }
    }
}

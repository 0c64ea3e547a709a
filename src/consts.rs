/// Gregorian year in which Badí' year 1 begins
pub const EPOCH_GREGORIAN_YEAR: i32 = 1844;

/// Number of ordinary months in a year
pub const MONTHS_IN_YEAR: u8 = 19;
/// Days in every ordinary month
pub const DAYS_IN_MONTH: u8 = 19;
/// Ordinary months that precede Ayyám-i-Há
pub const MONTHS_BEFORE_AYYAM_I_HA: u8 = 18;
/// Month number of the last month ('Alá'), which follows Ayyám-i-Há
pub const LAST_MONTH: u8 = 19;

/// Number of the month written in the compact form for Ayyám-i-Há
pub const AYYAM_I_HA_NUMBER: i8 = -1;
/// Zero-based offset from Naw-Rúz of the first day of Ayyám-i-Há
pub const AYYAM_I_HA_OFFSET: i64 = (MONTHS_BEFORE_AYYAM_I_HA as i64) * (DAYS_IN_MONTH as i64);
/// Days of Ayyám-i-Há in a common year
pub const AYYAM_I_HA_DAYS_COMMON: u8 = 4;
/// Days of Ayyám-i-Há in a leap year
pub const AYYAM_I_HA_DAYS_LEAP: u8 = 5;

/// Days in a year outside of Ayyám-i-Há
pub const ORDINARY_DAYS_IN_YEAR: u16 = (MONTHS_IN_YEAR as u16) * (DAYS_IN_MONTH as u16);

/// Days in a week
pub const DAYS_IN_WEEK: u8 = 7;

/// Gregorian month of Naw-Rúz
pub const NAWRUZ_MONTH: u32 = 3;
/// Gregorian day of Naw-Rúz under the fixed rule used before 172 B.E.
pub const NAWRUZ_FIXED_DAY: u32 = 21;
/// First Gregorian year whose Naw-Rúz is astronomically determined
pub const FIRST_ASTRONOMICAL_NAWRUZ_YEAR: i32 = 2015;

/// Naw-Rúz dates (Gregorian year, day of March) published for 172-221 B.E.
pub const PUBLISHED_NAWRUZ: [(i32, u32); 50] = [
    (2015, 21),
    (2016, 20),
    (2017, 20),
    (2018, 21),
    (2019, 21),
    (2020, 20),
    (2021, 20),
    (2022, 21),
    (2023, 21),
    (2024, 20),
    (2025, 20),
    (2026, 21),
    (2027, 21),
    (2028, 20),
    (2029, 20),
    (2030, 20),
    (2031, 21),
    (2032, 20),
    (2033, 20),
    (2034, 20),
    (2035, 21),
    (2036, 20),
    (2037, 20),
    (2038, 20),
    (2039, 21),
    (2040, 20),
    (2041, 20),
    (2042, 20),
    (2043, 21),
    (2044, 20),
    (2045, 20),
    (2046, 20),
    (2047, 21),
    (2048, 20),
    (2049, 20),
    (2050, 20),
    (2051, 21),
    (2052, 20),
    (2053, 20),
    (2054, 20),
    (2055, 21),
    (2056, 20),
    (2057, 20),
    (2058, 20),
    (2059, 20),
    (2060, 20),
    (2061, 20),
    (2062, 20),
    (2063, 20),
    (2064, 20),
];

/// Component separator of the compact form (`year.month.day`)
pub const COMPACT_SEPARATOR: char = '.';
/// Suffix of the long form
pub const ERA_SUFFIX: &str = "B.E.";

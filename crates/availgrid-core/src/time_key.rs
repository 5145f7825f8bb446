//! Canonical time keys.
//!
//! A time key identifies one votable unit. Two domains exist:
//!
//! - [`DayKey`]: a calendar date, canonical form `YYYY-MM-DD`
//! - [`SlotKey`]: a half-hour slot within a day, canonical form `HH:mm`
//!   with minutes `00` or `30` (48 slots per day)
//!
//! Both order chronologically, which matches the order of their canonical
//! strings. Code that aggregates or paints is generic over one [`TimeKey`]
//! type, so the two domains never mix inside one run.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::TimeKeyError;

/// Number of half-hour slots in one day.
pub const SLOTS_PER_DAY: usize = 48;

/// Common behavior of the two key domains.
pub trait TimeKey:
    Ord + Hash + Clone + fmt::Debug + fmt::Display + FromStr<Err = TimeKeyError>
{
    /// Short domain name, used in log output.
    const DOMAIN: &'static str;
}

// ── DayKey ───────────────────────────────────────────────────────────

/// A calendar day, `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day, `None` if the date does not exist or its
    /// year does not fit four digits.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(Self::four_digit_year)
    }

    fn four_digit_year(date: NaiveDate) -> Option<Self> {
        (0..=9999).contains(&date.year()).then_some(Self(date))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Unix seconds of local midnight at the given UTC offset.
    pub fn unix_midnight(&self, offset: FixedOffset) -> i64 {
        let midnight = self.0.and_time(NaiveTime::MIN);
        midnight.and_utc().timestamp() - i64::from(offset.local_minus_utc())
    }

    /// Inverse of [`DayKey::unix_midnight`]: the local date containing `secs`.
    pub fn from_unix(secs: i64, offset: FixedOffset) -> Option<Self> {
        let local = secs.checked_add(i64::from(offset.local_minus_utc()))?;
        chrono::DateTime::from_timestamp(local, 0)
            .and_then(|dt| Self::four_digit_year(dt.date_naive()))
    }

    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl TimeKey for DayKey {
    const DOMAIN: &'static str = "day";
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = TimeKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        // chrono accepts unpadded and signed fields; the canonical form does not.
        let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
        if bytes.len() != 10
            || bytes[4] != b'-'
            || bytes[7] != b'-'
            || !digits(0..4)
            || !digits(5..7)
            || !digits(8..10)
        {
            return Err(TimeKeyError::InvalidDay(s.to_string()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| TimeKeyError::InvalidDay(s.to_string()))
    }
}

impl TryFrom<String> for DayKey {
    type Error = TimeKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

// ── SlotKey ──────────────────────────────────────────────────────────

/// A half-hour slot, `HH:mm` with minutes `00` or `30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotKey(u8);

impl SlotKey {
    /// Slot from an hour and a half-hour flag.
    pub fn new(hour: u8, second_half: bool) -> Option<Self> {
        if hour > 23 {
            return None;
        }
        Some(Self(hour * 2 + u8::from(second_half)))
    }

    /// Slot from its position in the day, `0..48`.
    pub fn from_index(index: usize) -> Result<Self, TimeKeyError> {
        if index >= SLOTS_PER_DAY {
            return Err(TimeKeyError::SlotIndexOutOfRange(index));
        }
        Ok(Self(index as u8))
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn hour(&self) -> u8 {
        self.0 / 2
    }

    pub fn minute(&self) -> u8 {
        (self.0 % 2) * 30
    }

    pub fn is_second_half(&self) -> bool {
        self.0 % 2 == 1
    }

    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// Next slot in the same day, `None` after `23:30`.
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1).ok()
    }

    /// All 48 slots of a day in order.
    pub fn all() -> impl Iterator<Item = SlotKey> {
        (0..SLOTS_PER_DAY as u8).map(SlotKey)
    }
}

impl TimeKey for SlotKey {
    const DOMAIN: &'static str = "slot";
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for SlotKey {
    type Err = TimeKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimeKeyError::InvalidSlot(s.to_string());
        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hour) || !two_digits(minute) {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let second_half = match minute {
            "00" => false,
            "30" => true,
            _ => return Err(invalid()),
        };
        Self::new(hour, second_half).ok_or_else(invalid)
    }
}

impl TryFrom<String> for SlotKey {
    type Error = TimeKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotKey> for String {
    fn from(key: SlotKey) -> Self {
        key.to_string()
    }
}

//! 128-bit packed date/time value
//!
//! Bit layout (LSB = bit 0):
//!
//! ```text
//! bit  0       negative   sign of a TIME duration
//! bits 1..3    kind       1 = Time, 2 = Date, 3 = DateTime
//! bits 3..23   microsecond (0..=999_999)
//! bits 23..29  second      (0..=59)
//! bits 29..35  minute      (0..=59)
//! bits 35..47  hour        (0..=4095, TIME durations exceed 24h)
//! bits 47..52  day         (0..=31)
//! bits 52..56  month       (0..=12)
//! bits 56..70  year        (0..=9999)
//! ```
//!
//! Year is the most significant field, so the derived `Ord` on the raw word
//! orders calendar values of the same kind chronologically. The encoding is
//! canonical: equal field tuples produce equal words and vice versa.

use std::fmt;

use crate::error::{Error, Result};

const NEG_SHIFT: u32 = 0;
const KIND_SHIFT: u32 = 1;
const MICRO_SHIFT: u32 = 3;
const SECOND_SHIFT: u32 = 23;
const MINUTE_SHIFT: u32 = 29;
const HOUR_SHIFT: u32 = 35;
const DAY_SHIFT: u32 = 47;
const MONTH_SHIFT: u32 = 52;
const YEAR_SHIFT: u32 = 56;

const NEG_MASK: u128 = 0x1;
const KIND_MASK: u128 = 0x3;
const MICRO_MASK: u128 = 0xF_FFFF;
const SECOND_MASK: u128 = 0x3F;
const MINUTE_MASK: u128 = 0x3F;
const HOUR_MASK: u128 = 0xFFF;
const DAY_MASK: u128 = 0x1F;
const MONTH_MASK: u128 = 0xF;
const YEAR_MASK: u128 = 0x3FFF;

const CLOCK_MASK: u128 = (MICRO_MASK << MICRO_SHIFT)
    | (SECOND_MASK << SECOND_SHIFT)
    | (MINUTE_MASK << MINUTE_SHIFT)
    | (HOUR_MASK << HOUR_SHIFT);

pub const MAX_YEAR: u16 = 9999;
pub const MAX_HOUR: u16 = 4095;
pub const MAX_MICROSECOND: u32 = 999_999;

/// What a packed value represents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeKind {
    /// Signed duration, may exceed 24 hours
    Time,
    /// Calendar date, clock fields are zero
    Date,
    /// Calendar date and wall-clock time
    DateTime,
}

impl TimeKind {
    #[inline]
    const fn tag(self) -> u128 {
        match self {
            TimeKind::Time => 1,
            TimeKind::Date => 2,
            TimeKind::DateTime => 3,
        }
    }

    #[inline]
    const fn from_tag(tag: u128) -> Self {
        match tag {
            1 => TimeKind::Time,
            2 => TimeKind::Date,
            _ => TimeKind::DateTime,
        }
    }
}

/// Unpacked field tuple, input to [`DateTimeValue::from_parts`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateTimeParts {
    pub kind: TimeKind,
    pub negative: bool,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u16,
    pub minute: u8,
    pub second: u8,
    pub microsecond: u32,
}

impl Default for DateTimeParts {
    fn default() -> Self {
        Self {
            kind: TimeKind::DateTime,
            negative: false,
            year: 0,
            month: 0,
            day: 0,
            hour: 0,
            minute: 0,
            second: 0,
            microsecond: 0,
        }
    }
}

/// Packed temporal value: date, datetime or time duration in 128 bits
///
/// Copy type, no heap. Only the validated constructors below produce values,
/// and the raw word is never handed out.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct DateTimeValue(u128);

impl DateTimeValue {
    /// `0000-00-00 00:00:00`, the MySQL zero datetime
    pub const ZERO: DateTimeValue = DateTimeValue(TimeKind::DateTime.tag() << KIND_SHIFT);

    /// Encode an arbitrary field tuple after range checks
    ///
    /// Unlike the typed constructors this accepts any kind/sign combination,
    /// e.g. a negative duration that still carries a day component.
    pub fn from_parts(parts: DateTimeParts) -> Result<Self> {
        check_date(parts.year, parts.month, parts.day)?;
        if parts.hour > MAX_HOUR {
            return Err(Error::invalid_value(format!(
                "hour {} out of range 0..={}",
                parts.hour, MAX_HOUR
            )));
        }
        check_clock(parts.minute, parts.second, parts.microsecond)?;
        Ok(Self::encode(
            parts.kind,
            parts.negative,
            parts.year,
            parts.month,
            parts.day,
            parts.hour,
            parts.minute,
            parts.second,
            parts.microsecond,
        ))
    }

    /// Calendar date and time of day
    ///
    /// Zero month/day are accepted (zero dates).
    pub fn datetime(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        microsecond: u32,
    ) -> Result<Self> {
        if hour > 23 {
            return Err(Error::invalid_value(format!("hour {} out of range 0..=23", hour)));
        }
        Self::from_parts(DateTimeParts {
            kind: TimeKind::DateTime,
            negative: false,
            year,
            month,
            day,
            hour: hour as u16,
            minute,
            second,
            microsecond,
        })
    }

    /// Calendar date with zeroed clock fields
    pub fn date(year: u16, month: u8, day: u8) -> Result<Self> {
        Self::from_parts(DateTimeParts {
            kind: TimeKind::Date,
            year,
            month,
            day,
            ..DateTimeParts::default()
        })
    }

    /// Signed time duration; hour may exceed 24
    pub fn time(negative: bool, hour: u16, minute: u8, second: u8, microsecond: u32) -> Result<Self> {
        Self::from_parts(DateTimeParts {
            kind: TimeKind::Time,
            negative,
            hour,
            minute,
            second,
            microsecond,
            ..DateTimeParts::default()
        })
    }

    /// Decode every field at once
    pub fn parts(&self) -> DateTimeParts {
        DateTimeParts {
            kind: self.kind(),
            negative: self.is_negative(),
            year: self.year(),
            month: self.month(),
            day: self.day(),
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
            microsecond: self.microsecond(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    #[inline]
    const fn encode(
        kind: TimeKind,
        negative: bool,
        year: u16,
        month: u8,
        day: u8,
        hour: u16,
        minute: u8,
        second: u8,
        microsecond: u32,
    ) -> Self {
        DateTimeValue(
            ((negative as u128) << NEG_SHIFT)
                | (kind.tag() << KIND_SHIFT)
                | ((microsecond as u128) << MICRO_SHIFT)
                | ((second as u128) << SECOND_SHIFT)
                | ((minute as u128) << MINUTE_SHIFT)
                | ((hour as u128) << HOUR_SHIFT)
                | ((day as u128) << DAY_SHIFT)
                | ((month as u128) << MONTH_SHIFT)
                | ((year as u128) << YEAR_SHIFT),
        )
    }

    #[inline]
    const fn field(&self, shift: u32, mask: u128) -> u128 {
        (self.0 >> shift) & mask
    }

    #[inline]
    pub const fn year(&self) -> u16 {
        self.field(YEAR_SHIFT, YEAR_MASK) as u16
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.field(MONTH_SHIFT, MONTH_MASK) as u8
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.field(DAY_SHIFT, DAY_MASK) as u8
    }

    #[inline]
    pub const fn hour(&self) -> u16 {
        self.field(HOUR_SHIFT, HOUR_MASK) as u16
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.field(MINUTE_SHIFT, MINUTE_MASK) as u8
    }

    #[inline]
    pub const fn second(&self) -> u8 {
        self.field(SECOND_SHIFT, SECOND_MASK) as u8
    }

    #[inline]
    pub const fn microsecond(&self) -> u32 {
        self.field(MICRO_SHIFT, MICRO_MASK) as u32
    }

    /// Sign flag, only meaningful for `TimeKind::Time`
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.field(NEG_SHIFT, NEG_MASK) == 1
    }

    #[inline]
    pub const fn kind(&self) -> TimeKind {
        TimeKind::from_tag(self.field(KIND_SHIFT, KIND_MASK))
    }

    /// Month or day is zero
    #[inline]
    pub const fn is_zero_date(&self) -> bool {
        self.month() == 0 || self.day() == 0
    }

    /// Drop the clock portion in place and mark the value as a date
    #[inline]
    pub fn cast_to_date(&mut self) {
        self.0 &= !CLOCK_MASK;
        self.0 &= !(KIND_MASK << KIND_SHIFT);
        self.0 |= TimeKind::Date.tag() << KIND_SHIFT;
    }

    /// Copying form of [`cast_to_date`](Self::cast_to_date)
    #[inline]
    pub fn to_date(mut self) -> Self {
        self.cast_to_date();
        self
    }
}

fn check_date(year: u16, month: u8, day: u8) -> Result<()> {
    if year > MAX_YEAR {
        return Err(Error::invalid_value(format!("year {} out of range 0..={}", year, MAX_YEAR)));
    }
    if month > 12 {
        return Err(Error::invalid_value(format!("month {} out of range 0..=12", month)));
    }
    if day > 31 {
        return Err(Error::invalid_value(format!("day {} out of range 0..=31", day)));
    }
    Ok(())
}

fn check_clock(minute: u8, second: u8, microsecond: u32) -> Result<()> {
    if minute > 59 {
        return Err(Error::invalid_value(format!("minute {} out of range 0..=59", minute)));
    }
    if second > 59 {
        return Err(Error::invalid_value(format!("second {} out of range 0..=59", second)));
    }
    if microsecond > MAX_MICROSECOND {
        return Err(Error::invalid_value(format!(
            "microsecond {} out of range 0..={}",
            microsecond, MAX_MICROSECOND
        )));
    }
    Ok(())
}

impl fmt::Debug for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_round_trip_through_encoding() {
        let v = DateTimeValue::datetime(9999, 12, 31, 23, 59, 59, 999_999).unwrap();
        assert_eq!(v.year(), 9999);
        assert_eq!(v.month(), 12);
        assert_eq!(v.day(), 31);
        assert_eq!(v.hour(), 23);
        assert_eq!(v.minute(), 59);
        assert_eq!(v.second(), 59);
        assert_eq!(v.microsecond(), 999_999);
        assert!(!v.is_negative());
        assert_eq!(v.kind(), TimeKind::DateTime);
    }

    #[test]
    fn test_accessors_do_not_mutate() {
        let v = DateTimeValue::datetime(1999, 1, 2, 3, 4, 5, 6).unwrap();
        let copy = v;
        for _ in 0..3 {
            assert_eq!(v.year(), 1999);
            assert_eq!(v.microsecond(), 6);
        }
        assert_eq!(v, copy);
    }

    #[test]
    fn test_time_allows_large_hours() {
        let v = DateTimeValue::time(true, 838, 59, 59, 0).unwrap();
        assert_eq!(v.hour(), 838);
        assert!(v.is_negative());
        assert_eq!(v.kind(), TimeKind::Time);
        assert!(DateTimeValue::time(false, 4096, 0, 0, 0).is_err());
    }

    #[test]
    fn test_constructors_reject_out_of_range() {
        assert!(DateTimeValue::datetime(2020, 13, 1, 0, 0, 0, 0).is_err());
        assert!(DateTimeValue::datetime(2020, 1, 32, 0, 0, 0, 0).is_err());
        assert!(DateTimeValue::datetime(2020, 1, 1, 24, 0, 0, 0).is_err());
        assert!(DateTimeValue::datetime(2020, 1, 1, 0, 60, 0, 0).is_err());
        assert!(DateTimeValue::datetime(2020, 1, 1, 0, 0, 60, 0).is_err());
        assert!(DateTimeValue::datetime(2020, 1, 1, 0, 0, 0, 1_000_000).is_err());
        assert!(DateTimeValue::date(10000, 1, 1).is_err());
        // zero dates are legal
        assert!(DateTimeValue::date(0, 0, 0).is_ok());
    }

    #[test]
    fn test_to_date_truncates_clock_and_is_idempotent() {
        let v = DateTimeValue::datetime(2021, 6, 15, 13, 45, 30, 123).unwrap();
        let d = v.to_date();
        assert_eq!(d, DateTimeValue::date(2021, 6, 15).unwrap());
        assert_eq!(d.kind(), TimeKind::Date);
        assert_eq!(d.hour(), 0);
        assert_eq!(d.microsecond(), 0);
        assert_eq!(d.to_date(), d);
    }

    #[test]
    fn test_ordering_is_chronological_for_datetimes() {
        let a = DateTimeValue::datetime(1999, 12, 31, 23, 59, 59, 999_999).unwrap();
        let b = DateTimeValue::datetime(2000, 1, 1, 0, 0, 0, 0).unwrap();
        let c = DateTimeValue::datetime(2000, 1, 1, 0, 0, 0, 1).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_parts_round_trip() {
        let parts = DateTimeParts {
            kind: TimeKind::Time,
            negative: true,
            day: 10,
            hour: 120,
            minute: 1,
            ..DateTimeParts::default()
        };
        let v = DateTimeValue::from_parts(parts).unwrap();
        assert_eq!(v.parts(), parts);
    }

    #[test]
    fn test_zero_constant() {
        assert_eq!(DateTimeValue::ZERO, DateTimeValue::datetime(0, 0, 0, 0, 0, 0, 0).unwrap());
        assert!(DateTimeValue::ZERO.is_zero_date());
    }
}

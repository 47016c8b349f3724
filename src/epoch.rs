//! Unix epoch <-> packed value conversion
//!
//! Conversion goes through the [`TimeZone`] trait so a zone-database backed
//! implementation can replace [`FixedOffsetZone`] without touching callers.
//! The zone is always passed in; nothing here reads shared state.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, TimeDelta, Timelike, Utc};

use crate::config::check_offset;
use crate::datetime::{DateTimeValue, TimeKind};
use crate::error::{Error, Result, RowError};
use crate::format::{DateFormat, FormatBuffer};

/// Civil time <-> epoch seconds for one zone
pub trait TimeZone {
    /// Seconds since 1970-01-01 00:00:00 UTC, `None` for TIME durations
    ///
    /// Zero and overflowing month/day fields are carried into the
    /// neighbouring month rather than rejected.
    fn to_epoch_seconds(&self, value: &DateTimeValue) -> Option<i64>;

    /// Local civil time for an epoch instant, as a `DateTime` value
    fn from_epoch_seconds(&self, secs: i64) -> Option<DateTimeValue>;
}

/// Zone with a constant UTC offset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedOffsetZone {
    offset: FixedOffset,
}

impl FixedOffsetZone {
    pub fn new(utc_offset_secs: i32) -> Result<Self> {
        let secs = check_offset(utc_offset_secs)?;
        let offset = FixedOffset::east_opt(secs).ok_or(Error::InvalidOffset(secs))?;
        Ok(Self { offset })
    }

    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    pub fn utc_offset_secs(&self) -> i32 {
        self.offset.local_minus_utc()
    }
}

impl TimeZone for FixedOffsetZone {
    fn to_epoch_seconds(&self, value: &DateTimeValue) -> Option<i64> {
        if value.kind() == TimeKind::Time {
            return None;
        }
        let naive = normalize_civil(value)?.and_hms_opt(
            value.hour() as u32,
            value.minute() as u32,
            value.second() as u32,
        )?;
        let local = naive.and_local_timezone(self.offset).single()?;
        Some(local.timestamp())
    }

    fn from_epoch_seconds(&self, secs: i64) -> Option<DateTimeValue> {
        let local = DateTime::from_timestamp(secs, 0)?
            .with_timezone(&self.offset)
            .naive_local();
        let year = u16::try_from(local.year()).ok()?;
        DateTimeValue::datetime(
            year,
            local.month() as u8,
            local.day() as u8,
            local.hour() as u8,
            local.minute() as u8,
            local.second() as u8,
            0,
        )
        .ok()
    }
}

/// Calendar date with out-of-range fields carried over
///
/// Month 0 is December of the year before; day 0 and days past the month end
/// count from the first of the month, so `2020-00-00` is `2019-11-30` and
/// `2023-02-30` is `2023-03-02`.
fn normalize_civil(value: &DateTimeValue) -> Option<NaiveDate> {
    let months = value.year() as i32 * 12 + value.month() as i32 - 1;
    let first = NaiveDate::from_ymd_opt(months.div_euclid(12), months.rem_euclid(12) as u32 + 1, 1)?;
    first.checked_add_signed(TimeDelta::days(value.day() as i64 - 1))
}

/// Epoch seconds clamped to `0..=i32::MAX`
///
/// Anything outside that range, and TIME durations, are reported as `0`.
/// The sentinel is indistinguishable from the real epoch start; callers that
/// care must check the input themselves.
pub fn unix_timestamp<Z: TimeZone + ?Sized>(value: &DateTimeValue, zone: &Z) -> i32 {
    match zone.to_epoch_seconds(value) {
        Some(ts) if (0..=i32::MAX as i64).contains(&ts) => ts as i32,
        _ => 0,
    }
}

/// Render an epoch instant through a compiled format
pub fn from_unixtime<Z: TimeZone + ?Sized>(
    secs: i64,
    format: &DateFormat,
    zone: &Z,
) -> std::result::Result<FormatBuffer, RowError> {
    if secs < 0 || secs > i32::MAX as i64 {
        return Err(RowError::EpochOutOfRange(secs));
    }
    let value = zone
        .from_epoch_seconds(secs)
        .ok_or(RowError::Unrepresentable)?;
    Ok(format.render(&value)?)
}

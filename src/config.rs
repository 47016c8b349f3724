//! Limits and runtime configuration
//!
//! Constants that depend on each other live together:
//!
//! ```text
//! MAX_FORMAT_SPEC_LEN (128)   format specs longer than this are rejected per row
//! FORMAT_BUFFER_LEN (128)     rendered text + terminator must fit
//!
//! MAX_DAY_NAME_LEN (10)       "Wednesday" + terminator, dayname max_size
//! MAX_MONTH_NAME_LEN (10)     "September" + terminator, monthname max_size
//! CANONICAL_MAX_LEN (30)      "YYYY-MM-DD- HHHH:MM:SS.ffffff" + terminator
//! ```
//!
//! The UTC offset used by epoch conversion is not a constant: it is carried
//! by [`TemporalConfig`] and handed to every epoch transform as a value.

use crate::epoch::FixedOffsetZone;
use crate::error::{Error, Result};

pub const MAX_FORMAT_SPEC_LEN: usize = 128;
pub const FORMAT_BUFFER_LEN: usize = 128;

pub const MAX_DAY_NAME_LEN: usize = 10;
pub const MAX_MONTH_NAME_LEN: usize = 10;
pub const CANONICAL_MAX_LEN: usize = 30;

/// Offset applied when nothing else is configured (UTC+08:00)
pub const DEFAULT_UTC_OFFSET_SECS: i32 = 8 * 60 * 60;

/// Environment variable read by [`TemporalConfig::from_env`]
pub const UTC_OFFSET_ENV: &str = "TEMPOCOL_UTC_OFFSET";

const _: () = assert!(MAX_DAY_NAME_LEN == "Wednesday".len() + 1);
const _: () = assert!(MAX_MONTH_NAME_LEN == "September".len() + 1);
const _: () = assert!(CANONICAL_MAX_LEN == "0000-00-00- 4095:59:59.999999".len() + 1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemporalConfig {
    pub utc_offset_secs: i32,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            utc_offset_secs: DEFAULT_UTC_OFFSET_SECS,
        }
    }
}

impl TemporalConfig {
    pub fn with_utc_offset(utc_offset_secs: i32) -> Self {
        Self { utc_offset_secs }
    }

    /// Read the offset from `TEMPOCOL_UTC_OFFSET` (`+HH:MM` / `-HH:MM`).
    ///
    /// A missing or malformed variable falls back to the default offset.
    pub fn from_env() -> Self {
        match std::env::var(UTC_OFFSET_ENV) {
            Ok(raw) => match parse_utc_offset(&raw) {
                Some(secs) => Self::with_utc_offset(secs),
                None => {
                    tracing::warn!(value = %raw, "ignoring malformed {}", UTC_OFFSET_ENV);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn time_zone(&self) -> Result<FixedOffsetZone> {
        FixedOffsetZone::new(self.utc_offset_secs)
    }
}

/// Parse `+HH:MM`, `-HH:MM` or `+HH` into seconds east of UTC
pub fn parse_utc_offset(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}

pub(crate) fn check_offset(secs: i32) -> Result<i32> {
    if secs.abs() >= 24 * 60 * 60 {
        return Err(Error::InvalidOffset(secs));
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_offset() {
        assert_eq!(TemporalConfig::default().utc_offset_secs, 8 * 3600);
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("+08:00"), Some(28800));
        assert_eq!(parse_utc_offset("-05:30"), Some(-(5 * 3600 + 30 * 60)));
        assert_eq!(parse_utc_offset("+00"), Some(0));
        assert_eq!(parse_utc_offset("08:00"), None);
        assert_eq!(parse_utc_offset("+25:00"), None);
        assert_eq!(parse_utc_offset("+aa:00"), None);
    }

    #[test]
    fn test_time_zone_rejects_full_day() {
        assert!(TemporalConfig::with_utc_offset(86_400).time_zone().is_err());
        assert!(TemporalConfig::with_utc_offset(-3600).time_zone().is_ok());
    }
}

//! Canonical text form: `YYYY-MM-DD[-] HH:MM:SS[.ffffff]`
//!
//! This is the byte-for-byte form used by cast-to-string and debug output.
//! The `-` after the day marks a negative duration. Hours of 100 or more
//! print all their digits; below 100 they are always two digits.

use std::fmt;

use super::StackBuf;
use crate::config::CANONICAL_MAX_LEN;
use crate::datetime::DateTimeValue;

pub type CanonicalText = StackBuf<CANONICAL_MAX_LEN>;

#[inline]
fn push2(out: &mut CanonicalText, v: u32) {
    out.push(b'0' + (v / 10) as u8);
    out.push(b'0' + (v % 10) as u8);
}

/// Render `value` into a stack buffer
pub fn write_canonical(value: &DateTimeValue) -> CanonicalText {
    let mut out = CanonicalText::new();

    let year = value.year() as u32;
    push2(&mut out, year / 100);
    push2(&mut out, year % 100);
    out.push(b'-');
    push2(&mut out, value.month() as u32);
    out.push(b'-');
    push2(&mut out, value.day() as u32);
    if value.is_negative() {
        out.push(b'-');
    }
    out.push(b' ');

    let mut hour = value.hour() as u32;
    if hour >= 100 {
        let high = hour / 100;
        // Print both leading digits; a single `'0' + high` byte breaks at 1000+
        if high >= 10 {
            out.push(b'0' + (high / 10) as u8);
        }
        out.push(b'0' + (high % 10) as u8);
        hour %= 100;
    }
    push2(&mut out, hour);
    out.push(b':');
    push2(&mut out, value.minute() as u32);
    out.push(b':');
    push2(&mut out, value.second() as u32);

    let micros = value.microsecond();
    if micros > 0 {
        out.push(b'.');
        push2(&mut out, micros / 10_000);
        push2(&mut out, (micros / 100) % 100);
        push2(&mut out, micros % 100);
    }
    out
}

pub fn to_canonical_string(value: &DateTimeValue) -> String {
    write_canonical(value).as_str().to_owned()
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(write_canonical(self).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::{DateTimeParts, TimeKind};

    #[test]
    fn test_whole_seconds() {
        let v = DateTimeValue::datetime(1999, 1, 2, 3, 4, 5, 0).unwrap();
        assert_eq!(to_canonical_string(&v), "1999-01-02 03:04:05");
    }

    #[test]
    fn test_fraction_is_six_digits() {
        let v = DateTimeValue::datetime(1999, 1, 2, 3, 4, 5, 120_000).unwrap();
        assert_eq!(to_canonical_string(&v), "1999-01-02 03:04:05.120000");
        let v = DateTimeValue::datetime(1999, 1, 2, 3, 4, 5, 7).unwrap();
        assert_eq!(to_canonical_string(&v), "1999-01-02 03:04:05.000007");
    }

    #[test]
    fn test_negative_duration_with_three_digit_hour() {
        let v = DateTimeValue::from_parts(DateTimeParts {
            kind: TimeKind::Time,
            negative: true,
            day: 10,
            hour: 120,
            ..DateTimeParts::default()
        })
        .unwrap();
        assert_eq!(to_canonical_string(&v), "0000-00-10- 120:00:00");
    }

    #[test]
    fn test_four_digit_hour() {
        let v = DateTimeValue::time(true, 4095, 59, 59, 999_999).unwrap();
        let text = to_canonical_string(&v);
        assert_eq!(text, "0000-00-00- 4095:59:59.999999");
        assert_eq!(text.len() + 1, CANONICAL_MAX_LEN);
    }

    #[test]
    fn test_date_and_zero_date() {
        let v = DateTimeValue::date(2024, 2, 29).unwrap();
        assert_eq!(v.to_string(), "2024-02-29 00:00:00");
        assert_eq!(DateTimeValue::ZERO.to_string(), "0000-00-00 00:00:00");
    }
}

//! Scalar transform catalog
//!
//! Every entry describes one unary operation over a single row. The three
//! shapes match the three dispatch paths:
//! - [`ScalarTransform`]: fixed-width in, fixed-width out
//! - [`ToStringTransform`]: packed value in, string row out
//! - [`FormatTransform`]: value + compiled format in, string row or row error out

use crate::config::{CANONICAL_MAX_LEN, MAX_DAY_NAME_LEN, MAX_MONTH_NAME_LEN};
use crate::datetime::calendar;
use crate::datetime::DateTimeValue;
use crate::epoch::{self, TimeZone};
use crate::error::RowError;
use crate::format::{write_canonical, DateFormat, FormatBuffer};
use crate::table::{ColumnElement, StringColumnBuilder};

// ===========================================================================
// Shapes
// ===========================================================================

/// Fixed-width row transform
pub trait ScalarTransform {
    type From: ColumnElement;
    type To: ColumnElement;

    fn name(&self) -> &'static str;

    fn execute(&self, value: &Self::From) -> Self::To;
}

/// Packed value -> string row
pub trait ToStringTransform {
    fn name(&self) -> &'static str;

    /// Upper bound on bytes written per row, terminator included
    fn max_size(&self) -> usize;

    fn execute(&self, value: &DateTimeValue, out: &mut StringColumnBuilder);
}

/// Value + format spec -> string row, or a row-level error
pub trait FormatTransform {
    type From: ColumnElement;

    fn name(&self) -> &'static str;

    fn execute(&self, value: &Self::From, format: &DateFormat) -> Result<FormatBuffer, RowError>;
}

// ===========================================================================
// Field extraction
// ===========================================================================

/// Field selector: one transform per tag, all sharing one extractor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DateTimeField {
    Year,
    Quarter,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    /// ISO-style week, `WEEK(v, 3)`
    WeekOfYear,
    DayOfYear,
    DayOfMonth,
    /// 1 = Sunday .. 7 = Saturday
    DayOfWeek,
    /// Days since year 0 (`TO_DAYS`)
    ToDays,
}

impl DateTimeField {
    pub const ALL: [DateTimeField; 12] = [
        DateTimeField::Year,
        DateTimeField::Quarter,
        DateTimeField::Month,
        DateTimeField::Day,
        DateTimeField::Hour,
        DateTimeField::Minute,
        DateTimeField::Second,
        DateTimeField::WeekOfYear,
        DateTimeField::DayOfYear,
        DateTimeField::DayOfMonth,
        DateTimeField::DayOfWeek,
        DateTimeField::ToDays,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            DateTimeField::Year => "year",
            DateTimeField::Quarter => "quarter",
            DateTimeField::Month => "month",
            DateTimeField::Day => "day",
            DateTimeField::Hour => "hour",
            DateTimeField::Minute => "minute",
            DateTimeField::Second => "second",
            DateTimeField::WeekOfYear => "weekofyear",
            DateTimeField::DayOfYear => "dayofyear",
            DateTimeField::DayOfMonth => "dayofmonth",
            DateTimeField::DayOfWeek => "dayofweek",
            DateTimeField::ToDays => "to_days",
        }
    }

    #[inline]
    pub fn extract(self, v: &DateTimeValue) -> i32 {
        match self {
            DateTimeField::Year => v.year() as i32,
            DateTimeField::Quarter => calendar::quarter(v) as i32,
            DateTimeField::Month => v.month() as i32,
            DateTimeField::Day | DateTimeField::DayOfMonth => v.day() as i32,
            DateTimeField::Hour => v.hour() as i32,
            DateTimeField::Minute => v.minute() as i32,
            DateTimeField::Second => v.second() as i32,
            DateTimeField::WeekOfYear => calendar::week(v, 3) as i32,
            DateTimeField::DayOfYear => calendar::day_of_year(v) as i32,
            DateTimeField::DayOfWeek => calendar::day_of_week(v) as i32,
            DateTimeField::ToDays => calendar::daynr(v) as i32,
        }
    }
}

impl ScalarTransform for DateTimeField {
    type From = DateTimeValue;
    type To = i32;

    fn name(&self) -> &'static str {
        DateTimeField::name(*self)
    }

    #[inline]
    fn execute(&self, value: &DateTimeValue) -> i32 {
        self.extract(value)
    }
}

// ===========================================================================
// Same-width transforms
// ===========================================================================

/// Truncate to a calendar date; registered as `to_date` and `date`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToDate {
    name: &'static str,
}

impl ToDate {
    pub const TO_DATE: ToDate = ToDate { name: "to_date" };
    pub const DATE: ToDate = ToDate { name: "date" };
}

impl ScalarTransform for ToDate {
    type From = DateTimeValue;
    type To = DateTimeValue;

    fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    fn execute(&self, value: &DateTimeValue) -> DateTimeValue {
        value.to_date()
    }
}

/// Identity, kept so `timestamp(x)` goes through the same call path
///
/// TODO: let the planner elide this call instead of copying the column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timestamp;

impl ScalarTransform for Timestamp {
    type From = DateTimeValue;
    type To = DateTimeValue;

    fn name(&self) -> &'static str {
        "timestamp"
    }

    #[inline]
    fn execute(&self, value: &DateTimeValue) -> DateTimeValue {
        *value
    }
}

/// Epoch seconds under a zone, 0 when out of range
#[derive(Clone, Copy)]
pub struct UnixTimestamp<'z> {
    zone: &'z dyn TimeZone,
}

impl<'z> UnixTimestamp<'z> {
    pub fn new(zone: &'z dyn TimeZone) -> Self {
        Self { zone }
    }
}

impl ScalarTransform for UnixTimestamp<'_> {
    type From = DateTimeValue;
    type To = i32;

    fn name(&self) -> &'static str {
        "unix_timestamp"
    }

    #[inline]
    fn execute(&self, value: &DateTimeValue) -> i32 {
        epoch::unix_timestamp(value, self.zone)
    }
}

// ===========================================================================
// String transforms
// ===========================================================================

/// Fixed name tables; unresolvable rows become empty strings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameTransform {
    DayName,
    MonthName,
}

impl ToStringTransform for NameTransform {
    fn name(&self) -> &'static str {
        match self {
            NameTransform::DayName => "dayname",
            NameTransform::MonthName => "monthname",
        }
    }

    fn max_size(&self) -> usize {
        match self {
            NameTransform::DayName => MAX_DAY_NAME_LEN,
            NameTransform::MonthName => MAX_MONTH_NAME_LEN,
        }
    }

    fn execute(&self, value: &DateTimeValue, out: &mut StringColumnBuilder) {
        let name = match self {
            NameTransform::DayName => calendar::day_name(value),
            NameTransform::MonthName => calendar::month_name(value),
        };
        match name {
            Some(name) => out.append(name.as_bytes()),
            None => out.append_null(),
        }
    }
}

/// Canonical text, the cast-to-string form
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CanonicalString;

impl ToStringTransform for CanonicalString {
    fn name(&self) -> &'static str {
        "to_string"
    }

    fn max_size(&self) -> usize {
        CANONICAL_MAX_LEN
    }

    fn execute(&self, value: &DateTimeValue, out: &mut StringColumnBuilder) {
        out.append(write_canonical(value).as_bytes());
    }
}

/// `date_format(value, spec)`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateFormatTransform;

impl FormatTransform for DateFormatTransform {
    type From = DateTimeValue;

    fn name(&self) -> &'static str {
        "date_format"
    }

    #[inline]
    fn execute(&self, value: &DateTimeValue, format: &DateFormat) -> Result<FormatBuffer, RowError> {
        Ok(format.render(value)?)
    }
}

/// `from_unixtime(seconds, spec)` under a zone
#[derive(Clone, Copy)]
pub struct FromUnixTime<'z> {
    zone: &'z dyn TimeZone,
}

impl<'z> FromUnixTime<'z> {
    pub fn new(zone: &'z dyn TimeZone) -> Self {
        Self { zone }
    }
}

impl FormatTransform for FromUnixTime<'_> {
    type From = i32;

    fn name(&self) -> &'static str {
        "from_unixtime"
    }

    #[inline]
    fn execute(&self, value: &i32, format: &DateFormat) -> Result<FormatBuffer, RowError> {
        epoch::from_unixtime(*value as i64, format, self.zone)
    }
}

// ===========================================================================
// Name lookup
// ===========================================================================

/// Every catalog entry, resolvable by function name
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformKind {
    Field(DateTimeField),
    ToDate(ToDate),
    Timestamp,
    UnixTimestamp,
    Name(NameTransform),
    ToString,
    DateFormat,
    FromUnixTime,
}

impl TransformKind {
    pub fn lookup(name: &str) -> Option<Self> {
        if let Some(field) = DateTimeField::ALL.iter().find(|f| f.name() == name) {
            return Some(TransformKind::Field(*field));
        }
        let kind = match name {
            "to_date" => TransformKind::ToDate(ToDate::TO_DATE),
            "date" => TransformKind::ToDate(ToDate::DATE),
            "timestamp" => TransformKind::Timestamp,
            "unix_timestamp" => TransformKind::UnixTimestamp,
            "dayname" => TransformKind::Name(NameTransform::DayName),
            "monthname" => TransformKind::Name(NameTransform::MonthName),
            "to_string" => TransformKind::ToString,
            "date_format" => TransformKind::DateFormat,
            "from_unixtime" => TransformKind::FromUnixTime,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::Field(f) => f.name(),
            TransformKind::ToDate(t) => t.name,
            TransformKind::Timestamp => "timestamp",
            TransformKind::UnixTimestamp => "unix_timestamp",
            TransformKind::Name(n) => n.name(),
            TransformKind::ToString => "to_string",
            TransformKind::DateFormat => "date_format",
            TransformKind::FromUnixTime => "from_unixtime",
        }
    }

    /// Number of argument columns the function reads
    pub fn arity(&self) -> usize {
        match self {
            TransformKind::DateFormat | TransformKind::FromUnixTime => 2,
            _ => 1,
        }
    }

    /// Element type of the result column
    pub fn result_type(&self) -> &'static str {
        match self {
            TransformKind::Field(_) | TransformKind::UnixTimestamp => i32::TYPE_NAME,
            TransformKind::ToDate(_) | TransformKind::Timestamp => DateTimeValue::TYPE_NAME,
            TransformKind::Name(_)
            | TransformKind::ToString
            | TransformKind::DateFormat
            | TransformKind::FromUnixTime => "String",
        }
    }

    /// Whether the caller must supply a null map
    pub fn is_nullable(&self) -> bool {
        self.arity() == 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epoch::FixedOffsetZone;

    fn dt(y: u16, m: u8, d: u8, h: u8, mi: u8, s: u8) -> DateTimeValue {
        DateTimeValue::datetime(y, m, d, h, mi, s, 0).unwrap()
    }

    #[test]
    fn test_field_extraction() {
        let v = dt(2024, 5, 17, 13, 45, 30);
        let got: Vec<i32> = DateTimeField::ALL.iter().map(|f| f.extract(&v)).collect();
        // 2024-05-17 is a Friday, ISO week 20, day 138 of a leap year
        assert_eq!(got, vec![2024, 2, 5, 17, 13, 45, 30, 20, 138, 17, 6, 739_388]);
    }

    #[test]
    fn test_to_date_names_and_idempotence() {
        let v = dt(2024, 5, 17, 13, 45, 30);
        assert_eq!(ToDate::TO_DATE.name(), "to_date");
        assert_eq!(ToDate::DATE.name(), "date");
        let once = ToDate::TO_DATE.execute(&v);
        assert_eq!(ToDate::TO_DATE.execute(&once), once);
        assert_eq!(once, DateTimeValue::date(2024, 5, 17).unwrap());
    }

    #[test]
    fn test_timestamp_is_identity() {
        let v = dt(2024, 5, 17, 13, 45, 30);
        assert_eq!(Timestamp.execute(&v), v);
    }

    #[test]
    fn test_unix_timestamp_uses_given_zone() {
        let utc = FixedOffsetZone::utc();
        let v = dt(1970, 1, 2, 0, 0, 0);
        assert_eq!(UnixTimestamp::new(&utc).execute(&v), 86_400);
    }

    #[test]
    fn test_name_transforms() {
        let mut out = StringColumnBuilder::new();
        NameTransform::DayName.execute(&dt(2024, 5, 17, 0, 0, 0), &mut out);
        NameTransform::MonthName.execute(&dt(2024, 5, 17, 0, 0, 0), &mut out);
        NameTransform::DayName.execute(&DateTimeValue::ZERO, &mut out);
        let col = out.finish();
        assert_eq!(col.iter().collect::<Vec<_>>(), vec!["Friday", "May", ""]);
        assert_eq!(col.offsets(), &[7, 11, 12]);
    }

    #[test]
    fn test_lookup_covers_catalog() {
        for name in [
            "year", "quarter", "month", "day", "hour", "minute", "second", "weekofyear",
            "dayofyear", "dayofmonth", "dayofweek", "to_days", "to_date", "date", "timestamp",
            "unix_timestamp", "dayname", "monthname", "to_string", "date_format",
            "from_unixtime",
        ] {
            let kind = TransformKind::lookup(name).unwrap_or_else(|| panic!("missing {}", name));
            assert_eq!(kind.name(), name);
        }
        assert!(TransformKind::lookup("toYear").is_none());
        assert_eq!(TransformKind::lookup("date_format").unwrap().arity(), 2);
        assert_eq!(TransformKind::lookup("hour").unwrap().result_type(), "Int32");
    }
}

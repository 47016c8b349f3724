//! Runtime format specs (`%Y-%m-%d %H:%i:%s` style)
//!
//! A spec is compiled once into a token list and then rendered per row into
//! a 128-byte stack buffer. Limits are errors, never truncation:
//! - spec longer than `MAX_FORMAT_SPEC_LEN` -> `SpecTooLong`
//! - output + terminator larger than `FORMAT_BUFFER_LEN` -> `OutputOverflow`
//!
//! Unknown directives render the character after `%` (`%q` -> `q`), a lone
//! trailing `%` renders as itself.

use std::ops::Range;

use super::StackBuf;
use crate::config::{FORMAT_BUFFER_LEN, MAX_FORMAT_SPEC_LEN};
use crate::datetime::calendar::{
    self, calc_week, mysql_week_mode, AB_DAY_NAMES, AB_MONTH_NAMES, DAY_NAMES, MONTH_NAMES,
};
use crate::datetime::{DateTimeValue, TimeKind};
use crate::error::FormatError;

pub type FormatBuffer = StackBuf<FORMAT_BUFFER_LEN>;

/// One `%` directive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive {
    /// `%a` Sun..Sat
    AbDayName,
    /// `%b` Jan..Dec
    AbMonthName,
    /// `%c` month 0..12
    MonthNumeric,
    /// `%D` 1st, 2nd, 3rd, ...
    DayWithSuffix,
    /// `%d` 00..31
    DayPadded,
    /// `%e` 0..31
    DayNumeric,
    /// `%f` 000000..999999
    Microsecond,
    /// `%h` / `%I` 01..12
    Hour12Padded,
    /// `%H` 00..23
    Hour24Padded,
    /// `%i` 00..59
    Minute,
    /// `%j` 001..366
    DayOfYear,
    /// `%k` 0..23
    Hour24Numeric,
    /// `%l` 1..12
    Hour12Numeric,
    /// `%M` January..December
    MonthName,
    /// `%m` 00..12
    MonthPadded,
    /// `%p` AM / PM
    AmPm,
    /// `%r` hh:mm:ss AM
    Time12,
    /// `%S` / `%s` 00..59
    Second,
    /// `%T` hh:mm:ss
    Time24,
    /// `%U` week 00..53, Sunday first (mode 0)
    WeekSunday,
    /// `%u` week 00..53, Monday first (mode 1)
    WeekMonday,
    /// `%V` week 01..53, Sunday first (mode 2), pairs with `%X`
    WeekSundayOfYear,
    /// `%v` week 01..53, Monday first (mode 3), pairs with `%x`
    WeekMondayOfYear,
    /// `%W` Sunday..Saturday
    DayName,
    /// `%w` 0 = Sunday..6
    WeekdayNumeric,
    /// `%X` year of `%V`
    YearOfWeekSunday,
    /// `%x` year of `%v`
    YearOfWeekMonday,
    /// `%y` two-digit year
    Year2,
    /// `%Y` four-digit year
    Year4,
    /// `%%`, unknown directives, trailing `%`
    Char(u8),
}

impl Directive {
    fn from_byte(b: u8) -> Self {
        match b {
            b'a' => Directive::AbDayName,
            b'b' => Directive::AbMonthName,
            b'c' => Directive::MonthNumeric,
            b'D' => Directive::DayWithSuffix,
            b'd' => Directive::DayPadded,
            b'e' => Directive::DayNumeric,
            b'f' => Directive::Microsecond,
            b'h' | b'I' => Directive::Hour12Padded,
            b'H' => Directive::Hour24Padded,
            b'i' => Directive::Minute,
            b'j' => Directive::DayOfYear,
            b'k' => Directive::Hour24Numeric,
            b'l' => Directive::Hour12Numeric,
            b'M' => Directive::MonthName,
            b'm' => Directive::MonthPadded,
            b'p' => Directive::AmPm,
            b'r' => Directive::Time12,
            b'S' | b's' => Directive::Second,
            b'T' => Directive::Time24,
            b'U' => Directive::WeekSunday,
            b'u' => Directive::WeekMonday,
            b'V' => Directive::WeekSundayOfYear,
            b'v' => Directive::WeekMondayOfYear,
            b'W' => Directive::DayName,
            b'w' => Directive::WeekdayNumeric,
            b'X' => Directive::YearOfWeekSunday,
            b'x' => Directive::YearOfWeekMonday,
            b'y' => Directive::Year2,
            b'Y' => Directive::Year4,
            other => Directive::Char(other),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatItem {
    /// Byte range of the spec copied verbatim
    Literal(Range<usize>),
    Directive(Directive),
}

/// Compiled format spec
#[derive(Clone, Debug)]
pub struct DateFormat {
    spec: Box<[u8]>,
    items: Vec<FormatItem>,
}

impl DateFormat {
    pub fn parse(spec: &str) -> Result<Self, FormatError> {
        let bytes = spec.as_bytes();
        if bytes.len() > MAX_FORMAT_SPEC_LEN {
            return Err(FormatError::SpecTooLong { len: bytes.len() });
        }

        let mut items = Vec::new();
        let mut lit_start = 0;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != b'%' || i + 1 == bytes.len() {
                i += 1;
                continue;
            }
            if lit_start < i {
                items.push(FormatItem::Literal(lit_start..i));
            }
            items.push(FormatItem::Directive(Directive::from_byte(bytes[i + 1])));
            i += 2;
            lit_start = i;
        }
        if lit_start < bytes.len() {
            items.push(FormatItem::Literal(lit_start..bytes.len()));
        }

        Ok(Self {
            spec: bytes.into(),
            items,
        })
    }

    pub fn items(&self) -> &[FormatItem] {
        &self.items
    }

    pub fn render(&self, value: &DateTimeValue) -> Result<FormatBuffer, FormatError> {
        let mut out = FormatBuffer::new();
        for item in &self.items {
            match item {
                FormatItem::Literal(range) => out.try_extend(&self.spec[range.clone()])?,
                FormatItem::Directive(d) => render_directive(*d, value, &mut out)?,
            }
        }
        Ok(out)
    }
}

/// Parse and render in one step
pub fn date_format(value: &DateTimeValue, spec: &str) -> Result<FormatBuffer, FormatError> {
    DateFormat::parse(spec)?.render(value)
}

#[inline]
fn hour12(hour: u16) -> i64 {
    ((hour % 24 + 11) % 12 + 1) as i64
}

#[inline]
fn meridiem(hour: u16) -> &'static [u8] {
    if hour % 24 >= 12 {
        b"PM"
    } else {
        b"AM"
    }
}

fn ordinal_suffix(day: u8) -> &'static [u8] {
    if (10..=19).contains(&day) {
        return b"th";
    }
    match day % 10 {
        1 => b"st",
        2 => b"nd",
        3 => b"rd",
        _ => b"th",
    }
}

fn render_directive(
    directive: Directive,
    v: &DateTimeValue,
    out: &mut FormatBuffer,
) -> Result<(), FormatError> {
    let unresolvable = |c: char| FormatError::UnresolvableField { directive: c };
    let is_time = v.kind() == TimeKind::Time;

    match directive {
        Directive::AbDayName => {
            let idx = calendar::weekday_index(v).ok_or(unresolvable('a'))?;
            out.try_extend(AB_DAY_NAMES[idx].as_bytes())
        }
        Directive::DayName => {
            let idx = calendar::weekday_index(v).ok_or(unresolvable('W'))?;
            out.try_extend(DAY_NAMES[idx].as_bytes())
        }
        Directive::AbMonthName => match v.month() {
            0 => Err(unresolvable('b')),
            m => out.try_extend(AB_MONTH_NAMES[m as usize - 1].as_bytes()),
        },
        Directive::MonthName => match v.month() {
            0 => Err(unresolvable('M')),
            m => out.try_extend(MONTH_NAMES[m as usize - 1].as_bytes()),
        },
        Directive::MonthNumeric => out.try_push_padded(v.month() as i64, 1),
        Directive::MonthPadded => out.try_push_padded(v.month() as i64, 2),
        Directive::DayWithSuffix => {
            out.try_push_padded(v.day() as i64, 1)?;
            out.try_extend(ordinal_suffix(v.day()))
        }
        Directive::DayPadded => out.try_push_padded(v.day() as i64, 2),
        Directive::DayNumeric => out.try_push_padded(v.day() as i64, 1),
        Directive::Microsecond => out.try_push_padded(v.microsecond() as i64, 6),
        Directive::Hour12Padded => out.try_push_padded(hour12(v.hour()), 2),
        Directive::Hour12Numeric => out.try_push_padded(hour12(v.hour()), 1),
        Directive::Hour24Padded => out.try_push_padded(v.hour() as i64, 2),
        Directive::Hour24Numeric => out.try_push_padded(v.hour() as i64, 1),
        Directive::Minute => out.try_push_padded(v.minute() as i64, 2),
        Directive::Second => out.try_push_padded(v.second() as i64, 2),
        Directive::DayOfYear => out.try_push_padded(calendar::day_of_year(v), 3),
        Directive::AmPm => out.try_extend(meridiem(v.hour())),
        Directive::Time12 => {
            out.try_push_padded(hour12(v.hour()), 2)?;
            out.try_extend(b":")?;
            out.try_push_padded(v.minute() as i64, 2)?;
            out.try_extend(b":")?;
            out.try_push_padded(v.second() as i64, 2)?;
            out.try_extend(b" ")?;
            out.try_extend(meridiem(v.hour()))
        }
        Directive::Time24 => {
            out.try_push_padded(v.hour() as i64, 2)?;
            out.try_extend(b":")?;
            out.try_push_padded(v.minute() as i64, 2)?;
            out.try_extend(b":")?;
            out.try_push_padded(v.second() as i64, 2)
        }
        Directive::WeekSunday => out.try_push_padded(calendar::week(v, 0) as i64, 2),
        Directive::WeekMonday => {
            if is_time {
                return Err(unresolvable('u'));
            }
            out.try_push_padded(calendar::week(v, 1) as i64, 2)
        }
        Directive::WeekSundayOfYear => out.try_push_padded(calendar::week(v, 2) as i64, 2),
        Directive::WeekMondayOfYear => out.try_push_padded(calendar::week(v, 3) as i64, 2),
        Directive::WeekdayNumeric => {
            if is_time || (v.month() == 0 && v.year() == 0) {
                return Err(unresolvable('w'));
            }
            let wd = calendar::calc_weekday(calendar::daynr(v), true);
            out.try_push_padded(wd as i64, 1)
        }
        // A week-year before 0 prints with a sign: `-0001`
        Directive::YearOfWeekSunday => {
            let (_, year) = calc_week(v, mysql_week_mode(2));
            out.try_push_padded(year as i64, 4)
        }
        Directive::YearOfWeekMonday => {
            let (_, year) = calc_week(v, mysql_week_mode(3));
            out.try_push_padded(year as i64, 4)
        }
        Directive::Year2 => out.try_push_padded((v.year() % 100) as i64, 2),
        Directive::Year4 => out.try_push_padded(v.year() as i64, 4),
        Directive::Char(c) => out.try_extend(&[c]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: u16, m: u8, d: u8, h: u8, mi: u8, s: u8, us: u32) -> DateTimeValue {
        DateTimeValue::datetime(y, m, d, h, mi, s, us).unwrap()
    }

    fn fmt(v: &DateTimeValue, spec: &str) -> String {
        date_format(v, spec).unwrap().as_str().to_owned()
    }

    #[test]
    fn test_basic_directives() {
        let v = dt(2009, 10, 4, 22, 23, 0, 0);
        assert_eq!(fmt(&v, "%W %M %Y"), "Sunday October 2009");
        assert_eq!(fmt(&v, "%H:%i:%s"), "22:23:00");
        assert_eq!(fmt(&v, "%D %y %a %d %m %b %j"), "4th 09 Sun 04 10 Oct 277");
        assert_eq!(fmt(&v, "%H %k %I %r %T %S %w"), "22 22 10 10:23:00 PM 22:23:00 00 0");
        assert_eq!(fmt(&v, "%Y-%m-%d"), "2009-10-04");
    }

    #[test]
    fn test_week_directives() {
        // MySQL: DATE_FORMAT('1999-01-01', '%X %V') -> '1998 52'
        let v = dt(1999, 1, 1, 0, 0, 0, 0);
        assert_eq!(fmt(&v, "%X %V"), "1998 52");
        assert_eq!(fmt(&v, "%x %v"), "1998 53");
        assert_eq!(fmt(&v, "%U %u"), "00 00");
    }

    #[test]
    fn test_week_year_before_year_zero() {
        let v = DateTimeValue::date(0, 1, 1).unwrap();
        assert_eq!(fmt(&v, "%X %V"), "0000 01");
        assert_eq!(fmt(&v, "%x %v"), "-0001 52");
    }

    #[test]
    fn test_twelve_hour_clock() {
        assert_eq!(fmt(&dt(2020, 1, 1, 0, 5, 0, 0), "%h %l %p"), "12 12 AM");
        assert_eq!(fmt(&dt(2020, 1, 1, 12, 5, 0, 0), "%h %l %p"), "12 12 PM");
        assert_eq!(fmt(&dt(2020, 1, 1, 13, 5, 0, 0), "%I %l %p"), "01 1 PM");
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(fmt(&dt(2020, 1, 1, 0, 0, 0, 0), "%D"), "1st");
        assert_eq!(fmt(&dt(2020, 1, 2, 0, 0, 0, 0), "%D"), "2nd");
        assert_eq!(fmt(&dt(2020, 1, 3, 0, 0, 0, 0), "%D"), "3rd");
        assert_eq!(fmt(&dt(2020, 1, 11, 0, 0, 0, 0), "%D"), "11th");
        assert_eq!(fmt(&dt(2020, 1, 22, 0, 0, 0, 0), "%D"), "22nd");
    }

    #[test]
    fn test_microseconds_and_literals() {
        let v = dt(2020, 1, 1, 0, 0, 0, 42);
        assert_eq!(fmt(&v, "at %f us"), "at 000042 us");
        assert_eq!(fmt(&v, "100%%"), "100%");
        assert_eq!(fmt(&v, "%q%"), "q%");
        assert_eq!(fmt(&v, ""), "");
    }

    #[test]
    fn test_spec_length_limit() {
        let v = dt(2020, 1, 1, 0, 0, 0, 0);
        let spec = "x".repeat(MAX_FORMAT_SPEC_LEN + 1);
        assert_eq!(
            date_format(&v, &spec).unwrap_err(),
            FormatError::SpecTooLong { len: 129 }
        );
        // 128 bytes of literal text leaves no room for the terminator
        let spec = "x".repeat(MAX_FORMAT_SPEC_LEN);
        assert_eq!(date_format(&v, &spec).unwrap_err(), FormatError::OutputOverflow);
        let spec = "x".repeat(MAX_FORMAT_SPEC_LEN - 1);
        assert_eq!(date_format(&v, &spec).unwrap().len(), 127);
    }

    #[test]
    fn test_output_overflow_from_expansion() {
        let v = dt(2020, 9, 30, 0, 0, 0, 0);
        // 20 x "September" = 180 bytes from a 40-byte spec
        let spec = "%M".repeat(20);
        assert!(spec.len() <= MAX_FORMAT_SPEC_LEN);
        assert_eq!(date_format(&v, &spec).unwrap_err(), FormatError::OutputOverflow);
    }

    #[test]
    fn test_zero_date_names_are_errors() {
        let v = DateTimeValue::date(2020, 0, 0).unwrap();
        assert!(date_format(&v, "%M").is_err());
        assert!(date_format(&v, "%b").is_err());
        assert!(date_format(&v, "%W").is_err());
        assert_eq!(fmt(&v, "%Y-%m-%d"), "2020-00-00");
    }

    #[test]
    fn test_time_values_reject_weekday_directives() {
        let t = DateTimeValue::time(false, 100, 0, 0, 0).unwrap();
        assert!(date_format(&t, "%a").is_err());
        assert!(date_format(&t, "%w").is_err());
        assert!(date_format(&t, "%u").is_err());
        assert_eq!(fmt(&t, "%H:%i"), "100:00");
    }

    #[test]
    fn test_compiled_items() {
        let f = DateFormat::parse("%Y/x").unwrap();
        assert_eq!(
            f.items(),
            &[
                FormatItem::Directive(Directive::Year4),
                FormatItem::Literal(2..4),
            ]
        );
    }
}

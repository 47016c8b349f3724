//! Calendar arithmetic with MySQL semantics
//!
//! Day numbers count from the proleptic `0000-00-00`, so zero dates have a
//! well-defined (if meaningless) day number instead of an error.

use super::packed::{DateTimeValue, TimeKind};

pub const DAY_NAMES: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

pub const AB_DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

pub const AB_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// WEEK() mode bits
pub const WEEK_MONDAY_FIRST: u8 = 1;
pub const WEEK_YEAR: u8 = 2;
pub const WEEK_FIRST_WEEKDAY: u8 = 4;

/// Days since `0000-00-00`; 0 for year 0 month 0
pub fn calc_daynr(year: u32, month: u32, day: u32) -> i64 {
    if year == 0 && month == 0 {
        return 0;
    }
    let mut y = year as i64;
    let month = month as i64;
    let mut delsum = 365 * y + 31 * (month - 1) + day as i64;
    if month <= 2 {
        y -= 1;
    } else {
        delsum -= (month * 4 + 23) / 10;
    }
    delsum + y / 4 - y / 100 + y / 400
}

/// 0 = Monday .. 6 = Sunday, or 0 = Sunday .. 6 = Saturday when `sunday_first`
#[inline]
pub fn calc_weekday(daynr: i64, sunday_first: bool) -> u8 {
    (daynr + 5 + sunday_first as i64).rem_euclid(7) as u8
}

/// Year 0 is never a leap year; years before 0 follow the proleptic rule
#[inline]
pub fn calc_days_in_year(year: i64) -> i64 {
    if (year & 3) == 0 && (year % 100 != 0 || (year % 400 == 0 && year != 0)) {
        366
    } else {
        365
    }
}

/// Normalize a user-facing WEEK() mode to the internal bit set
#[inline]
pub fn mysql_week_mode(mode: u32) -> u8 {
    let mut mode = (mode & 7) as u8;
    if mode & WEEK_MONDAY_FIRST == 0 {
        mode ^= WEEK_FIRST_WEEKDAY;
    }
    mode
}

/// Week number for an internal mode, plus the year the week belongs to
///
/// The week-year is signed: early January of year 0 can belong to year -1.
pub fn calc_week(value: &DateTimeValue, mode: u8) -> (u32, i32) {
    let monday_first = mode & WEEK_MONDAY_FIRST != 0;
    let mut week_year = mode & WEEK_YEAR != 0;
    let first_weekday = mode & WEEK_FIRST_WEEKDAY != 0;

    let daynr = daynr(value);
    let mut first_daynr = calc_daynr(value.year() as u32, 1, 1);
    let mut weekday = calc_weekday(first_daynr, !monday_first) as i64;
    let mut year = value.year() as i64;

    // First days of January may belong to the last week of the previous year
    if value.month() == 1 && (value.day() as i64) <= 7 - weekday {
        if !week_year && ((first_weekday && weekday != 0) || (!first_weekday && weekday >= 4)) {
            return (0, year as i32);
        }
        week_year = true;
        year -= 1;
        let days = calc_days_in_year(year);
        first_daynr -= days;
        weekday = (weekday + 53 * 7 - days).rem_euclid(7);
    }

    let days = if (first_weekday && weekday != 0) || (!first_weekday && weekday >= 4) {
        daynr - (first_daynr + (7 - weekday))
    } else {
        daynr - (first_daynr - weekday)
    };

    if week_year && days >= 52 * 7 {
        weekday = (weekday + calc_days_in_year(year)) % 7;
        if (!first_weekday && weekday < 4) || (first_weekday && weekday == 0) {
            return (1, (year + 1) as i32);
        }
    }

    ((days / 7 + 1) as u32, year as i32)
}

/// MySQL `WEEK(value, mode)`
#[inline]
pub fn week(value: &DateTimeValue, mode: u32) -> u32 {
    calc_week(value, mysql_week_mode(mode)).0
}

#[inline]
pub fn daynr(value: &DateTimeValue) -> i64 {
    calc_daynr(value.year() as u32, value.month() as u32, value.day() as u32)
}

/// 0 = Monday .. 6 = Sunday
#[inline]
pub fn weekday(value: &DateTimeValue) -> u8 {
    calc_weekday(daynr(value), false)
}

/// MySQL `DAYOFWEEK`: 1 = Sunday .. 7 = Saturday
#[inline]
pub fn day_of_week(value: &DateTimeValue) -> u8 {
    calc_weekday(daynr(value), true) + 1
}

#[inline]
pub fn day_of_year(value: &DateTimeValue) -> i64 {
    daynr(value) - calc_daynr(value.year() as u32, 1, 1) + 1
}

#[inline]
pub fn quarter(value: &DateTimeValue) -> u8 {
    (value.month() + 2) / 3
}

/// Index into the day name tables, `None` when no weekday exists
#[inline]
pub fn weekday_index(value: &DateTimeValue) -> Option<usize> {
    if value.kind() == TimeKind::Time || value.is_zero_date() {
        return None;
    }
    Some(weekday(value) as usize)
}

pub fn day_name(value: &DateTimeValue) -> Option<&'static str> {
    weekday_index(value).map(|i| DAY_NAMES[i])
}

pub fn month_name(value: &DateTimeValue) -> Option<&'static str> {
    match value.month() {
        0 => None,
        m => Some(MONTH_NAMES[m as usize - 1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: u16, m: u8, day: u8) -> DateTimeValue {
        DateTimeValue::date(y, m, day).unwrap()
    }

    #[test]
    fn test_daynr_known_values() {
        // MySQL TO_DAYS
        assert_eq!(daynr(&d(1970, 1, 1)), 719_528);
        assert_eq!(daynr(&d(2000, 3, 1)), 730_545);
        assert_eq!(daynr(&d(0, 0, 0)), 0);
    }

    #[test]
    fn test_weekday_and_day_of_week() {
        // 2024-01-01 was a Monday
        let v = d(2024, 1, 1);
        assert_eq!(weekday(&v), 0);
        assert_eq!(day_of_week(&v), 2);
        // 2023-01-01 was a Sunday
        let v = d(2023, 1, 1);
        assert_eq!(weekday(&v), 6);
        assert_eq!(day_of_week(&v), 1);
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(day_of_year(&d(2024, 1, 1)), 1);
        assert_eq!(day_of_year(&d(2024, 12, 31)), 366);
        assert_eq!(day_of_year(&d(2023, 12, 31)), 365);
    }

    #[test]
    fn test_iso_week_boundaries() {
        assert_eq!(week(&d(2024, 1, 1), 3), 1);
        assert_eq!(week(&d(2023, 1, 1), 3), 52);
        assert_eq!(week(&d(2020, 12, 31), 3), 53);
        assert_eq!(week(&d(2008, 12, 29), 3), 1);
    }

    #[test]
    fn test_week_mode_zero() {
        // Sunday-first, weeks before the first Sunday are week 0
        assert_eq!(week(&d(2023, 1, 1), 0), 1);
        assert_eq!(week(&d(2022, 1, 1), 0), 0);
    }

    #[test]
    fn test_week_year_rolls_back() {
        let (w, y) = calc_week(&d(2021, 1, 1), mysql_week_mode(3));
        assert_eq!((w, y), (53, 2020));
    }

    #[test]
    fn test_week_year_before_year_zero() {
        // 0000-01-01 is a Sunday
        let v = d(0, 1, 1);
        assert_eq!(calc_week(&v, mysql_week_mode(2)), (1, 0));
        assert_eq!(calc_week(&v, mysql_week_mode(3)), (52, -1));
        assert_eq!(week(&v, 3), 52);
        assert_eq!(week(&d(0, 1, 2), 3), 1);
    }

    #[test]
    fn test_quarter() {
        assert_eq!(quarter(&d(2024, 1, 1)), 1);
        assert_eq!(quarter(&d(2024, 3, 31)), 1);
        assert_eq!(quarter(&d(2024, 4, 1)), 2);
        assert_eq!(quarter(&d(2024, 12, 1)), 4);
        assert_eq!(quarter(&d(0, 0, 0)), 0);
    }

    #[test]
    fn test_names() {
        assert_eq!(day_name(&d(2024, 1, 1)), Some("Monday"));
        assert_eq!(month_name(&d(2024, 9, 1)), Some("September"));
        assert_eq!(day_name(&d(2024, 0, 1)), None);
        assert_eq!(month_name(&d(2024, 0, 1)), None);
        let t = DateTimeValue::time(false, 1, 0, 0, 0).unwrap();
        assert_eq!(day_name(&t), None);
    }

    #[test]
    fn test_leap_years() {
        assert_eq!(calc_days_in_year(2000), 366);
        assert_eq!(calc_days_in_year(1900), 365);
        assert_eq!(calc_days_in_year(2024), 366);
        assert_eq!(calc_days_in_year(0), 365);
        assert_eq!(calc_days_in_year(-1), 365);
        assert_eq!(calc_days_in_year(-4), 366);
    }
}

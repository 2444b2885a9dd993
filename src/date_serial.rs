//! Serial-date conversion.
//!
//! Spreadsheets store dates as serial numbers: the integer part counts days
//! since the epoch, the fraction is the elapsed part of the day. Two epochs
//! exist: the 1900 system (Windows default, day 1 = 1900-01-01) and the 1904
//! system (Mac legacy, serial 0 = 1904-01-01).
//!
//! The 1900 system carries the famous leap-year bug: 1900 is treated as a
//! leap year, so serial 60 displays as 1900-02-29 even though that day never
//! existed, and every later serial is shifted by one relative to the real
//! calendar. This module reproduces the bug on purpose.
//!
//! Conversion is O(1), based on Julian Day Number arithmetic (Fliegel & Van
//! Flandern, 1968) one way and Howard Hinnant's days-from-civil the other.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

pub(crate) const NANOS_PER_DAY: i64 = 86_400_000_000_000;

/// Serial offset between the 1904 and 1900 systems.
const DAYS_1904_OFFSET: i64 = 1462;

/// Convert the day part of a serial number to a civil `(year, month, day)`.
///
/// In the 1900 system, day 60 yields the phantom `(1900, 2, 29)`.
pub fn serial_to_date(serial_days: i64, date1904: bool) -> (i32, u32, u32) {
    let days = if date1904 {
        serial_days + DAYS_1904_OFFSET
    } else {
        serial_days
    };

    // days 1..=59 predate the phantom leap day and need no shift
    if (1..=59).contains(&days) {
        if days < 32 {
            return (1900, 1, days as u32);
        }
        return (1900, 2, (days - 31) as u32);
    }
    if days == 60 {
        return (1900, 2, 29);
    }

    // Julian Day Number conversion. 2_415_019 is the JDN of 1899-12-30,
    // which absorbs the phantom-day shift for serials >= 61 (and also
    // handles serial 0 and negatives on the proleptic calendar).
    let mut l = days + 68_569 + 2_415_019;
    let n = (4 * l) / 146_097;
    l -= (146_097 * n + 3) / 4;
    let i = (4_000 * (l + 1)) / 1_461_001;
    l = l - (1_461 * i) / 4 + 31;
    let j = (80 * l) / 2_447;
    let day = l - (2_447 * j) / 80;
    l = j / 11;
    let month = j + 2 - 12 * l;
    let year = 100 * (n - 49) + i + l;

    (year as i32, month as u32, day as u32)
}

/// Convert a civil date to its serial number, the inverse of
/// [`serial_to_date`] (including the phantom 1900-02-29).
pub fn date_to_serial(year: i32, month: u32, day: u32, date1904: bool) -> i64 {
    let serial_1900 = if (year, month, day) == (1900, 2, 29) {
        60
    } else {
        // Hinnant's days-from-civil
        let y = year - (month <= 2) as i32;
        let era = if y >= 0 { y } else { y - 399 } / 400;
        let yoe = (y - era * 400) as i64;
        let m = month as i64;
        let d = day as i64;
        let doy = (153 * (m + if m > 2 { -3 } else { 9 }) + 2) / 5 + d - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        let days_since_epoch = era as i64 * 146_097 + doe - 719_468;

        // 1970-01-01 is serial 25569; shift past the phantom day
        let serial = days_since_epoch + 25_568;
        if serial >= 60 {
            serial + 1
        } else {
            serial
        }
    };

    if date1904 {
        serial_1900 - DAYS_1904_OFFSET
    } else {
        serial_1900
    }
}

/// Day of week for a serial number, `0` = Sunday.
///
/// Follows the serial continuity of the buggy calendar: serial 1 is a
/// "Sunday" even though the real 1900-01-01 was a Monday, and everything
/// from serial 61 on matches the real calendar.
pub(crate) fn weekday_index(serial_days: i64, date1904: bool) -> usize {
    let days = if date1904 {
        serial_days + DAYS_1904_OFFSET
    } else {
        serial_days
    };
    (days - 1).rem_euclid(7) as usize
}

/// Build a timestamp from a day serial and a wall-clock offset.
///
/// The phantom 1900-02-29 cannot be represented; its timestamp normalises
/// to 1900-03-01 (the display string is produced elsewhere and still shows
/// the phantom day).
pub(crate) fn civil_datetime(
    serial_days: i64,
    secs_of_day: u32,
    nanos: u32,
    date1904: bool,
) -> NaiveDateTime {
    let (year, month, day) = serial_to_date(serial_days, date1904);
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(1900, 3, 1))
        .unwrap_or_default();
    let time = NaiveTime::from_hms_nano_opt(
        secs_of_day / 3600,
        (secs_of_day % 3600) / 60,
        secs_of_day % 60,
        nanos,
    )
    .unwrap_or_default();
    date.and_time(time)
}

/// Convert a serial number to a UTC wall-clock timestamp.
pub fn time_from_serial(serial: f64, date1904: bool) -> NaiveDateTime {
    let days = serial.floor();
    let day_nanos = ((serial - days) * NANOS_PER_DAY as f64).round() as i64;
    // rounding the fraction can land exactly on the next midnight
    let (days, day_nanos) = if day_nanos >= NANOS_PER_DAY {
        (days as i64 + 1, 0)
    } else {
        (days as i64, day_nanos)
    };
    civil_datetime(
        days,
        (day_nanos / 1_000_000_000) as u32,
        (day_nanos % 1_000_000_000) as u32,
        date1904,
    )
}

/// Convert a serial number to an elapsed time of `serial` days.
/// Negative serials yield negative durations.
pub fn duration_from_serial(serial: f64) -> TimeDelta {
    TimeDelta::nanoseconds((serial * NANOS_PER_DAY as f64).round() as i64)
}

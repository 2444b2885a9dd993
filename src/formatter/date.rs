//! Date, time and duration rendering.

use chrono::{NaiveDateTime, TimeDelta};

use crate::ast::{FmtToken, TokenKind};
use crate::date_serial;
use crate::numeric;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Render a time section against a serial value.
///
/// The wall clock is rounded to the display resolution (one second, or
/// finer when a sub-second token is present) before any field is read, so
/// carries propagate all the way into the date. Elapsed totals (`[h]` and
/// friends) are truncated from the unrounded serial instead, matching the
/// split the original engine made.
pub(crate) fn format_time(
    tokens: &[FmtToken],
    v: f64,
    date1904: bool,
) -> (String, NaiveDateTime, TimeDelta) {
    let mut frac_digits = 0u32;
    let mut twelve_hour = false;
    for t in tokens {
        match t.kind {
            TokenKind::AmPm => twelve_hour = true,
            TokenKind::SecFraction => frac_digits = (t.size as u32).min(9),
            _ => {}
        }
    }

    let ticks_per_sec = 10i64.pow(frac_digits);
    let ticks_per_day = 86_400 * ticks_per_sec;
    let total_ticks = (v * ticks_per_day as f64).round() as i64;
    let days = total_ticks.div_euclid(ticks_per_day);
    let day_ticks = total_ticks.rem_euclid(ticks_per_day);
    let secs = (day_ticks / ticks_per_sec) as u32;
    let sub_ticks = day_ticks % ticks_per_sec;

    let (hour, minute, second) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    let (year, month, day) = date_serial::serial_to_date(days, date1904);
    let weekday = date_serial::weekday_index(days, date1904);
    let duration = date_serial::duration_from_serial(v);

    let month_name = MONTHS[(month as usize).clamp(1, 12) - 1];
    let weekday_name = WEEKDAYS[weekday % 7];
    let display_hour = if twelve_hour {
        match hour % 12 {
            0 => 12,
            h => h,
        }
    } else {
        hour
    };

    let mut out = String::new();
    for t in tokens {
        match t.kind {
            TokenKind::Year => {
                if t.size > 2 {
                    out.push_str(&year.to_string());
                } else {
                    out.push_str(&format!("{:02}", year.rem_euclid(100)));
                }
            }
            TokenKind::Month => match t.size {
                1 => out.push_str(&month.to_string()),
                2 => out.push_str(&format!("{month:02}")),
                3 => out.push_str(&month_name[..3]),
                5 => out.push_str(&month_name[..1]),
                _ => out.push_str(month_name),
            },
            TokenKind::Day => match t.size {
                1 => out.push_str(&day.to_string()),
                2 => out.push_str(&format!("{day:02}")),
                3 => out.push_str(&weekday_name[..3]),
                _ => out.push_str(weekday_name),
            },
            TokenKind::Hour => push_clock_field(&mut out, display_hour, t.size),
            TokenKind::Minute => push_clock_field(&mut out, minute, t.size),
            TokenKind::Second => push_clock_field(&mut out, second, t.size),
            TokenKind::AmPm => {
                let meridiem = if hour >= 12 { "PM" } else { "AM" };
                let text = if t.size == 1 { &meridiem[..1] } else { meridiem };
                if t.data.starts_with('a') {
                    out.push_str(&text.to_lowercase());
                } else {
                    out.push_str(text);
                }
            }
            TokenKind::SecFraction => {
                let mut digits =
                    format!("{:0width$}", sub_ticks, width = frac_digits as usize);
                if t.size < digits.len() {
                    digits.truncate(t.size);
                } else {
                    while digits.len() < t.size {
                        digits.push('0');
                    }
                }
                out.push_str(&digits);
            }
            TokenKind::TotalHours => {
                out.push_str(&numeric::left_pad_digits(t.size, duration.num_hours()));
            }
            TokenKind::TotalMinutes => {
                out.push_str(&numeric::left_pad_digits(t.size, duration.num_minutes()));
            }
            TokenKind::TotalSeconds => {
                out.push_str(&numeric::left_pad_digits(t.size, duration.num_seconds()));
            }
            TokenKind::Literal => out.push_str(&t.data),
            TokenKind::Space => out.push(' '),
            TokenKind::Repeat => out.push_str(&t.data),
            _ => {}
        }
    }

    let nanos = (sub_ticks * (1_000_000_000 / ticks_per_sec)) as u32;
    let timestamp = date_serial::civil_datetime(days, secs, nanos, date1904);
    (out, timestamp, duration)
}

fn push_clock_field(out: &mut String, value: u32, size: usize) {
    if size == 1 {
        out.push_str(&value.to_string());
    } else {
        out.push_str(&format!("{value:02}"));
    }
}

//! `datetime=<layout>`: values must parse against a reference-date layout.
//!
//! Layouts are written as the reference time `Mon Jan 2 15:04:05 MST 2006`
//! would be formatted, e.g. `2006-01-02` or `02/01/2006 15:04`. Recognized
//! tokens:
//!
//! | token            | meaning                           |
//! |------------------|-----------------------------------|
//! | `2006` / `06`    | four / two digit year             |
//! | `01` / `1`       | month, zero-padded / 1-2 digits   |
//! | `Jan` / `January`| month name                        |
//! | `02` / `_2` / `2`| day of month                      |
//! | `002` / `__2`    | day of year                       |
//! | `Mon` / `Monday` | weekday name (parsed, not checked)|
//! | `15`             | hour, 24-hour clock               |
//! | `03` / `3`       | hour, 12-hour clock               |
//! | `04` / `4`       | minute                            |
//! | `05` / `5`       | second                            |
//! | `PM` / `pm`      | AM/PM marker                      |
//! | `MST`            | time zone abbreviation            |
//! | `-0700` `-07:00` `-07` `-070000` `-07:00:00` | numeric offset |
//! | `Z0700` `Z07:00` `Z07` `Z070000` `Z07:00:00` | `Z` or offset  |
//! | `.000` / `.999`  | fractional seconds, fixed / optional |
//!
//! Everything else is literal text. A run of spaces in the layout matches a
//! run of spaces in the value. Fields missing from the layout default to
//! January 1 of year 0 at midnight. The resulting date must exist, so
//! `2023-02-30` fails under `2006-01-02`.

use std::iter::repeat;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::engine::{Outcome, RuleError};
use crate::types::Value;

pub(crate) fn datetime(value: &Value, param: Option<&str>) -> Result<Outcome, RuleError> {
    let layout = param.ok_or(RuleError::InvalidParameter)?;
    match value {
        Value::String(s) => Ok(Outcome::check(parse_layout(layout, s).is_ok(), value)),
        Value::Missing => Ok(Outcome::Fail(Value::Missing)),
        Value::Integer(_) | Value::Float(_) | Value::Bool(_) => Err(RuleError::UnsupportedKind),
    }
}

/// Why a value did not match a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The value's text did not line up with the layout.
    #[error("value does not match layout")]
    Mismatch,

    /// A field parsed but is outside its valid range.
    #[error("{0} out of range")]
    OutOfRange(&'static str),

    /// The value continues after the layout ended.
    #[error("extra text after layout")]
    ExtraText,
}

/// Parse `value` against a reference-date `layout`.
///
/// Any time zone in the value is checked for shape and discarded.
///
/// ```
/// use fieldcheck::{LayoutError, parse_layout};
///
/// let parsed = parse_layout("2006-01-02", "2023-02-28").unwrap();
/// assert_eq!(parsed.to_string(), "2023-02-28 00:00:00");
///
/// assert_eq!(
///     parse_layout("2006-01-02", "2023-02-30"),
///     Err(LayoutError::OutOfRange("day"))
/// );
/// ```
pub fn parse_layout(layout: &str, value: &str) -> Result<NaiveDateTime, LayoutError> {
    let mut fields = Fields::default();
    let mut layout = layout.as_bytes();
    let mut value = value.as_bytes();

    loop {
        let (prefix, chunk, suffix) = next_chunk(layout);
        value = skip(value, prefix)?;
        let Some(chunk) = chunk else {
            if value.is_empty() {
                break;
            }
            return Err(LayoutError::ExtraText);
        };
        layout = suffix;
        value = fields.read(chunk, value, layout)?;
    }

    fields.finish()
}

/// A layout element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk {
    LongYear,
    Year,
    LongMonth,
    Month,
    NumMonth,
    ZeroMonth,
    LongWeekDay,
    WeekDay,
    Day,
    UnderDay,
    ZeroDay,
    UnderYearDay,
    ZeroYearDay,
    Hour,
    Hour12,
    ZeroHour12,
    Minute,
    ZeroMinute,
    Second,
    ZeroSecond,
    UpperPm,
    LowerPm,
    TzName,
    Offset(OffsetForm),
    Fraction { digits: usize, fixed: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OffsetForm {
    /// `Z` stands for UTC.
    allow_z: bool,
    colons: bool,
    minutes: bool,
    seconds: bool,
}

const ZERO_CHUNKS: [Chunk; 6] = [
    Chunk::ZeroMonth,
    Chunk::ZeroDay,
    Chunk::ZeroHour12,
    Chunk::ZeroMinute,
    Chunk::ZeroSecond,
    Chunk::Year,
];

/// Offset spellings, longest first so prefixes do not shadow them.
const OFFSET_FORMS: [(&[u8], bool, bool, bool); 5] = [
    (b"070000", false, true, true),
    (b"07:00:00", true, true, true),
    (b"0700", false, true, false),
    (b"07:00", true, true, false),
    (b"07", false, false, false),
];

/// Split `layout` at its first token: literal prefix, token, remainder.
fn next_chunk(layout: &[u8]) -> (&[u8], Option<Chunk>, &[u8]) {
    for (i, &byte) in layout.iter().enumerate() {
        let rest = &layout[i..];
        let found = match byte {
            b'J' if rest.starts_with(b"January") => Some((Chunk::LongMonth, 7)),
            b'J' if rest.starts_with(b"Jan") && !starts_lower(&rest[3..]) => {
                Some((Chunk::Month, 3))
            }
            b'M' if rest.starts_with(b"Monday") => Some((Chunk::LongWeekDay, 6)),
            b'M' if rest.starts_with(b"Mon") && !starts_lower(&rest[3..]) => {
                Some((Chunk::WeekDay, 3))
            }
            b'M' if rest.starts_with(b"MST") => Some((Chunk::TzName, 3)),
            b'0' if matches!(rest.get(1), Some(b'1'..=b'6')) => {
                let index = usize::from(rest[1] - b'1');
                Some((ZERO_CHUNKS[index], 2))
            }
            b'0' if rest.starts_with(b"002") => Some((Chunk::ZeroYearDay, 3)),
            b'1' if rest.get(1) == Some(&b'5') => Some((Chunk::Hour, 2)),
            b'1' => Some((Chunk::NumMonth, 1)),
            b'2' if rest.starts_with(b"2006") => Some((Chunk::LongYear, 4)),
            b'2' => Some((Chunk::Day, 1)),
            b'_' if rest.starts_with(b"_2006") => {
                // A literal underscore followed by the year.
                return (&layout[..=i], Some(Chunk::LongYear), &layout[i + 5..]);
            }
            b'_' if rest.starts_with(b"_2") => Some((Chunk::UnderDay, 2)),
            b'_' if rest.starts_with(b"__2") => Some((Chunk::UnderYearDay, 3)),
            b'3' => Some((Chunk::Hour12, 1)),
            b'4' => Some((Chunk::Minute, 1)),
            b'5' => Some((Chunk::Second, 1)),
            b'P' if rest.starts_with(b"PM") => Some((Chunk::UpperPm, 2)),
            b'p' if rest.starts_with(b"pm") => Some((Chunk::LowerPm, 2)),
            b'-' | b'Z' => offset_chunk(rest),
            b'.' | b',' => fraction_chunk(rest),
            _ => None,
        };
        if let Some((chunk, len)) = found {
            return (&layout[..i], Some(chunk), &layout[i + len..]);
        }
    }
    (layout, None, &[])
}

fn offset_chunk(rest: &[u8]) -> Option<(Chunk, usize)> {
    let allow_z = rest[0] == b'Z';
    OFFSET_FORMS
        .iter()
        .find(|(form, ..)| rest[1..].starts_with(form))
        .map(|&(form, colons, minutes, seconds)| {
            let form_chunk = OffsetForm {
                allow_z,
                colons,
                minutes,
                seconds,
            };
            (Chunk::Offset(form_chunk), form.len() + 1)
        })
}

fn fraction_chunk(rest: &[u8]) -> Option<(Chunk, usize)> {
    let digit = *rest.get(1)?;
    if digit != b'0' && digit != b'9' {
        return None;
    }
    let run = rest[1..].iter().take_while(|&&b| b == digit).count();
    if rest.get(run + 1).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    Some((
        Chunk::Fraction {
            digits: run,
            fixed: digit == b'0',
        },
        run + 1,
    ))
}

fn starts_lower(s: &[u8]) -> bool {
    s.first().is_some_and(u8::is_ascii_lowercase)
}

/// Consume the literal `prefix` from `value`.
fn skip<'a>(mut value: &'a [u8], mut prefix: &[u8]) -> Result<&'a [u8], LayoutError> {
    while let Some((&expected, rest)) = prefix.split_first() {
        if expected == b' ' {
            if value.first().is_some_and(|&b| b != b' ') {
                return Err(LayoutError::Mismatch);
            }
            prefix = trim_spaces(prefix);
            value = trim_spaces(value);
            continue;
        }
        match value.split_first() {
            Some((&actual, value_rest)) if actual == expected => {
                prefix = rest;
                value = value_rest;
            }
            _ => return Err(LayoutError::Mismatch),
        }
    }
    Ok(value)
}

fn trim_spaces(s: &[u8]) -> &[u8] {
    let n = s.iter().take_while(|&&b| b == b' ').count();
    &s[n..]
}

/// Read a one- or two-digit number; `fixed` requires exactly two digits.
fn number(value: &[u8], fixed: bool) -> Result<(u32, &[u8]), LayoutError> {
    match value {
        [a, b, rest @ ..] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Ok((u32::from(a - b'0') * 10 + u32::from(b - b'0'), rest))
        }
        [a, rest @ ..] if a.is_ascii_digit() && !fixed => Ok((u32::from(a - b'0'), rest)),
        _ => Err(LayoutError::Mismatch),
    }
}

/// Read exactly `n` digits.
fn digits(value: &[u8], n: usize) -> Result<(u32, &[u8]), LayoutError> {
    if value.len() < n || !value[..n].iter().all(u8::is_ascii_digit) {
        return Err(LayoutError::Mismatch);
    }
    let number = value[..n]
        .iter()
        .fold(0, |acc, d| acc * 10 + u32::from(d - b'0'));
    Ok((number, &value[n..]))
}

fn in_range(n: u32, min: u32, max: u32, field: &'static str) -> Result<u32, LayoutError> {
    if (min..=max).contains(&n) {
        Ok(n)
    } else {
        Err(LayoutError::OutOfRange(field))
    }
}

const LONG_MONTHS: [&str; 12] = [
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

const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const LONG_DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const SHORT_DAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Match one of `names` at the start of `value`, ignoring ASCII case.
fn lookup<'a>(names: &[&str], value: &'a [u8]) -> Result<(usize, &'a [u8]), LayoutError> {
    names
        .iter()
        .position(|name| {
            value.len() >= name.len() && value[..name.len()].eq_ignore_ascii_case(name.as_bytes())
        })
        .map(|index| (index, &value[names[index].len()..]))
        .ok_or(LayoutError::Mismatch)
}

/// Fields collected while walking the layout.
#[derive(Debug, Default)]
struct Fields {
    year: i32,
    month: Option<u32>,
    day: Option<u32>,
    year_day: Option<u32>,
    hour: u32,
    minute: u32,
    second: u32,
    nanos: u32,
    pm: Option<bool>,
}

impl Fields {
    /// Read one chunk from the front of `value`. `layout` is what remains of
    /// the layout after the chunk.
    fn read<'a>(
        &mut self,
        chunk: Chunk,
        value: &'a [u8],
        layout: &[u8],
    ) -> Result<&'a [u8], LayoutError> {
        let rest = match chunk {
            Chunk::LongYear => {
                let (year, rest) = digits(value, 4)?;
                self.year = i32::try_from(year).map_err(|_| LayoutError::OutOfRange("year"))?;
                rest
            }
            Chunk::Year => {
                let (year, rest) = digits(value, 2)?;
                self.year = i32::try_from(year).map_err(|_| LayoutError::OutOfRange("year"))?;
                self.year += if self.year >= 69 { 1900 } else { 2000 };
                rest
            }
            Chunk::LongMonth | Chunk::Month => {
                let names: &[&str] = if chunk == Chunk::LongMonth {
                    &LONG_MONTHS
                } else {
                    &SHORT_MONTHS
                };
                let (index, rest) = lookup(names, value)?;
                self.month = u32::try_from(index + 1).ok();
                rest
            }
            Chunk::NumMonth | Chunk::ZeroMonth => {
                let (month, rest) = number(value, chunk == Chunk::ZeroMonth)?;
                self.month = Some(in_range(month, 1, 12, "month")?);
                rest
            }
            Chunk::LongWeekDay => lookup(&LONG_DAYS, value)?.1,
            Chunk::WeekDay => lookup(&SHORT_DAYS, value)?.1,
            Chunk::Day | Chunk::UnderDay | Chunk::ZeroDay => {
                let value = match value {
                    [b' ', rest @ ..] if chunk == Chunk::UnderDay => rest,
                    _ => value,
                };
                let (day, rest) = number(value, chunk == Chunk::ZeroDay)?;
                self.day = Some(day);
                rest
            }
            Chunk::UnderYearDay | Chunk::ZeroYearDay => {
                let value = if chunk == Chunk::UnderYearDay {
                    trim_spaces(value)
                } else {
                    value
                };
                let (year_day, rest) = digits(value, 3)?;
                self.year_day = Some(in_range(year_day, 1, 366, "day-of-year")?);
                rest
            }
            Chunk::Hour => {
                let (hour, rest) = number(value, false)?;
                self.hour = in_range(hour, 0, 23, "hour")?;
                rest
            }
            Chunk::Hour12 | Chunk::ZeroHour12 => {
                let (hour, rest) = number(value, chunk == Chunk::ZeroHour12)?;
                self.hour = in_range(hour, 0, 12, "hour")?;
                rest
            }
            Chunk::Minute | Chunk::ZeroMinute => {
                let (minute, rest) = number(value, chunk == Chunk::ZeroMinute)?;
                self.minute = in_range(minute, 0, 59, "minute")?;
                rest
            }
            Chunk::Second | Chunk::ZeroSecond => {
                let (second, rest) = number(value, chunk == Chunk::ZeroSecond)?;
                self.second = in_range(second, 0, 59, "second")?;
                // A fraction may follow seconds even when the layout has none.
                let fraction_follows =
                    matches!(next_chunk(layout).1, Some(Chunk::Fraction { .. }));
                if starts_fraction(rest) && !fraction_follows {
                    self.fraction(&rest[1..], None)?
                } else {
                    rest
                }
            }
            Chunk::UpperPm | Chunk::LowerPm => {
                let marker = value.get(..2).ok_or(LayoutError::Mismatch)?;
                let (am, pm): (&[u8], &[u8]) = if chunk == Chunk::UpperPm {
                    (b"AM", b"PM")
                } else {
                    (b"am", b"pm")
                };
                self.pm = if marker == pm {
                    Some(true)
                } else if marker == am {
                    Some(false)
                } else {
                    return Err(LayoutError::Mismatch);
                };
                &value[2..]
            }
            Chunk::TzName => {
                let n = value
                    .iter()
                    .take(5)
                    .take_while(|b| b.is_ascii_uppercase())
                    .count();
                if n < 3 {
                    return Err(LayoutError::Mismatch);
                }
                &value[n..]
            }
            Chunk::Offset(form) => offset(value, form)?,
            Chunk::Fraction { digits: count, fixed } => {
                if starts_fraction(value) {
                    self.fraction(&value[1..], fixed.then_some(count))?
                } else if fixed {
                    return Err(LayoutError::Mismatch);
                } else {
                    value
                }
            }
        };
        Ok(rest)
    }

    /// Read fractional-second digits; `exact` demands that many.
    fn fraction<'a>(
        &mut self,
        value: &'a [u8],
        exact: Option<usize>,
    ) -> Result<&'a [u8], LayoutError> {
        let n = value.iter().take_while(|b| b.is_ascii_digit()).count();
        if n == 0 || exact.is_some_and(|exact| exact != n) {
            return Err(LayoutError::Mismatch);
        }
        self.nanos = value[..n]
            .iter()
            .chain(repeat(&b'0'))
            .take(9)
            .fold(0, |acc, d| acc * 10 + u32::from(d - b'0'));
        Ok(&value[n..])
    }

    fn finish(self) -> Result<NaiveDateTime, LayoutError> {
        let date = match self.year_day {
            Some(year_day) => {
                let date = NaiveDate::from_yo_opt(self.year, year_day)
                    .ok_or(LayoutError::OutOfRange("day-of-year"))?;
                if self.month.is_some_and(|m| m != date.month())
                    || self.day.is_some_and(|d| d != date.day())
                {
                    return Err(LayoutError::OutOfRange("day-of-year"));
                }
                date
            }
            None => NaiveDate::from_ymd_opt(
                self.year,
                self.month.unwrap_or(1),
                self.day.unwrap_or(1),
            )
            .ok_or(LayoutError::OutOfRange("day"))?,
        };

        let hour = match self.pm {
            Some(true) if self.hour < 12 => self.hour + 12,
            Some(false) if self.hour == 12 => 0,
            _ => self.hour,
        };
        let time = NaiveTime::from_hms_nano_opt(hour, self.minute, self.second, self.nanos)
            .ok_or(LayoutError::OutOfRange("time"))?;

        Ok(NaiveDateTime::new(date, time))
    }
}

fn starts_fraction(value: &[u8]) -> bool {
    matches!(value, [b'.' | b',', d, ..] if d.is_ascii_digit())
}

fn offset(value: &[u8], form: OffsetForm) -> Result<&[u8], LayoutError> {
    if form.allow_z {
        if let Some(rest) = value.strip_prefix(b"Z") {
            return Ok(rest);
        }
    }

    let rest = match value {
        [b'+' | b'-', rest @ ..] => rest,
        _ => return Err(LayoutError::Mismatch),
    };
    let (hours, mut rest) = digits(rest, 2)?;
    in_range(hours, 0, 24, "time zone offset hour")?;
    if form.minutes {
        rest = offset_part(rest, form.colons, "time zone offset minute")?;
    }
    if form.seconds {
        rest = offset_part(rest, form.colons, "time zone offset second")?;
    }
    Ok(rest)
}

fn offset_part<'a>(
    value: &'a [u8],
    colons: bool,
    field: &'static str,
) -> Result<&'a [u8], LayoutError> {
    let value = if colons {
        value.strip_prefix(b":").ok_or(LayoutError::Mismatch)?
    } else {
        value
    };
    let (n, rest) = digits(value, 2)?;
    in_range(n, 0, 59, field)?;
    Ok(rest)
}

//! Text and coercion rules.
//!
//! String conversion feeds the comparator's fast-reject signatures and the
//! declared pattern coercion; the numeric, boolean, and date coercions back
//! the other coercion kinds. The conversions follow the upstream host rules:
//! integral numbers drop the point, sequences join their elements with the
//! empty form for `Null` and `Undefined`, containers render constant
//! markers, dates render ISO-8601 UTC.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::leaf::NumericArray;
use crate::value::Value;

// ── Numbers ──────────────────────────────────────────────────────────────

/// Number-to-string used across signatures and coercions: integral values
/// drop the point, NaN and the infinities are spelled out, negative zero
/// renders `0`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        return "0".to_owned();
    }
    if n.fract() == 0.0 && n.abs() < 1e21 {
        return format!("{}", n as i128);
    }
    format!("{n}")
}

/// Numeric coercion: `Null` is 0, `Undefined` is NaN, booleans are 0/1,
/// strings parse as decimal, hex, or infinite forms (empty is 0, junk is
/// NaN), dates coerce to their timestamp, everything else is NaN.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => *n,
        Value::Bool(true) => 1.0,
        Value::Bool(false) => 0.0,
        Value::Null => 0.0,
        Value::Undefined => f64::NAN,
        Value::Str(text) => parse_number(text),
        Value::Date(ms) => *ms as f64,
        _ => f64::NAN,
    }
}

fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return match i64::from_str_radix(hex, 16) {
            Ok(n) => n as f64,
            Err(_) => f64::NAN,
        };
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Truthiness: `false`, zero, NaN, the empty string, `Null`, and
/// `Undefined` are false; everything else is true.
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::Str(text) => !text.is_empty(),
        _ => true,
    }
}

// ── Dates ────────────────────────────────────────────────────────────────

/// Millisecond timestamp of a value: dates directly, finite numbers
/// truncated, booleans as 0/1, `Null` as 0, strings via ISO-8601 parsing.
/// `None` marks an invalid date.
pub fn to_date_ms(value: &Value) -> Option<i64> {
    match value {
        Value::Date(ms) => Some(*ms),
        Value::Number(n) if n.is_finite() => Some(*n as i64),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Null => Some(0),
        Value::Str(text) => parse_date_ms(text),
        _ => None,
    }
}

/// Largest representable timestamp magnitude, 100 million days either side
/// of the epoch.
const MAX_DATE_MS: i64 = 8_640_000_000_000_000;

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`) or date-time
/// (`..THH:MM[:SS[.mmm]][Z|±HH:MM|±HHMM|±HH]`) into epoch milliseconds.
/// Times with no offset are taken as UTC; timestamps beyond the
/// [`MAX_DATE_MS`] window are invalid.
pub fn parse_date_ms(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let (date_part, time_part) = match trimmed.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (trimmed, None),
    };
    let days = parse_civil_date(date_part)?;
    let mut ms = days * 86_400_000;
    if let Some(time_part) = time_part {
        let (body, offset_min) = split_offset(time_part)?;
        ms += parse_time_ms(body)?;
        ms -= offset_min * 60_000;
    }
    if ms.abs() > MAX_DATE_MS {
        return None;
    }
    Some(ms)
}

fn parse_civil_date(text: &str) -> Option<i64> {
    let mut parts = text.split('-');
    let year: i64 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    // Years outside the timestamp window would overflow the day arithmetic.
    if !(-271_821..=275_760).contains(&year) {
        return None;
    }
    if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
        return None;
    }
    Some(days_from_civil(year, month as i64, day as i64))
}

fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
                29
            } else {
                28
            }
        }
    }
}

fn split_offset(text: &str) -> Option<(&str, i64)> {
    if let Some(body) = text.strip_suffix('Z') {
        return Some((body, 0));
    }
    // The time body itself never contains '+' or '-'.
    if let Some(pos) = text.rfind(|c| c == '+' || c == '-') {
        if pos > 0 {
            let (body, offset) = text.split_at(pos);
            let sign = if offset.starts_with('-') { -1 } else { 1 };
            let digits = &offset[1..];
            let (hours, minutes) = match digits.split_once(':') {
                Some((h, m)) => (h, m),
                None if digits.len() == 4 && digits.is_ascii() => digits.split_at(2),
                None if digits.len() == 2 => (digits, "0"),
                _ => return None,
            };
            let hours: i64 = hours.parse().ok()?;
            let minutes: i64 = minutes.parse().ok()?;
            if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
                return None;
            }
            return Some((body, sign * (hours * 60 + minutes)));
        }
    }
    Some((text, 0))
}

fn parse_time_ms(text: &str) -> Option<i64> {
    let mut parts = text.split(':');
    let hours: i64 = parts.next()?.parse().ok()?;
    let minutes: i64 = parts.next()?.parse().ok()?;
    let (seconds, millis): (i64, i64) = match parts.next() {
        Some(part) => match part.split_once('.') {
            Some((whole, frac)) => {
                // The fraction must be digits; only the first three count.
                if !frac.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                let mut frac = frac.to_owned();
                while frac.len() < 3 {
                    frac.push('0');
                }
                (whole.parse().ok()?, frac[..3].parse().ok()?)
            }
            None => (part.parse().ok()?, 0),
        },
        None => (0, 0),
    };
    if parts.next().is_some()
        || !(0..24).contains(&hours)
        || !(0..60).contains(&minutes)
        || !(0..60).contains(&seconds)
    {
        return None;
    }
    Some((hours * 3600 + minutes * 60 + seconds) * 1000 + millis)
}

// Civil-calendar day arithmetic over a proleptic Gregorian calendar,
// anchored at 1970-01-01.

fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = if year >= 0 { year } else { year - 399 } / 400;
    let year_of_era = year - era * 400;
    let day_of_year = (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let days = days + 719_468;
    let era = if days >= 0 { days } else { days - 146_096 } / 146_097;
    let day_of_era = days - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let year = year_of_era + era * 400;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let month_shifted = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * month_shifted + 2) / 5 + 1;
    let month = if month_shifted < 10 {
        month_shifted + 3
    } else {
        month_shifted - 9
    };
    let year = if month <= 2 { year + 1 } else { year };
    (year, month as u32, day as u32)
}

fn write_date(f: &mut fmt::Formatter<'_>, ms: i64) -> fmt::Result {
    let days = ms.div_euclid(86_400_000);
    let time = ms.rem_euclid(86_400_000);
    let (year, month, day) = civil_from_days(days);
    let hours = time / 3_600_000;
    let minutes = time % 3_600_000 / 60_000;
    let seconds = time % 60_000 / 1000;
    let millis = time % 1000;
    write!(
        f,
        "{year:04}-{month:02}-{day:02}T{hours:02}:{minutes:02}:{seconds:02}.{millis:03}Z"
    )
}

// ── Display ──────────────────────────────────────────────────────────────

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut active = Vec::new();
        write_value(f, self, &mut active)
    }
}

/// String conversion under the sequence join rule: `Null` and `Undefined`
/// render empty, everything else as [`Display`].
pub fn join_text(value: &Value) -> String {
    match value {
        Value::Undefined | Value::Null => String::new(),
        _ => value.to_string(),
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, active: &mut Vec<usize>) -> fmt::Result {
    match value {
        Value::Undefined => f.write_str("undefined"),
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => f.write_str(&format_number(*n)),
        Value::Str(text) => f.write_str(text),
        Value::Arr(cell) => write_sequence(f, cell, active),
        Value::Obj(_) => f.write_str("[object Object]"),
        Value::Map(_) => f.write_str("[object Map]"),
        Value::Set(_) => f.write_str("[object Set]"),
        Value::Date(ms) => write_date(f, *ms),
        Value::Pattern(pattern) => write!(f, "/{}/{}", pattern.source(), pattern.flags()),
        Value::NumArr(array) => write!(f, "{array}"),
        Value::Bytes(bytes) => {
            for (i, byte) in bytes.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{byte}")?;
            }
            Ok(())
        }
        Value::Error(err) => {
            if err.message.is_empty() {
                f.write_str(&err.name)
            } else {
                write!(f, "{}: {}", err.name, err.message)
            }
        }
        Value::Opaque(cell) => {
            let opaque = cell.borrow();
            match &opaque.repr {
                Some(repr) => f.write_str(repr),
                None => write!(f, "[object {}]", opaque.class.as_deref().unwrap_or("Object")),
            }
        }
    }
}

fn write_sequence(
    f: &mut fmt::Formatter<'_>,
    cell: &Rc<RefCell<Vec<Value>>>,
    active: &mut Vec<usize>,
) -> fmt::Result {
    let addr = Rc::as_ptr(cell) as usize;
    if active.contains(&addr) {
        // A sequence reached through itself renders empty.
        return Ok(());
    }
    active.push(addr);
    let items = cell.borrow();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        match item {
            Value::Undefined | Value::Null => {}
            _ => write_value(f, item, active)?,
        }
    }
    drop(items);
    active.pop();
    Ok(())
}

impl fmt::Display for NumericArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }
        // Floats go through format_number so equal arrays (negative zero
        // included) always render the same text.
        fn join_floats(f: &mut fmt::Formatter<'_>, items: &[f64]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                f.write_str(&format_number(*item))?;
            }
            Ok(())
        }
        match self {
            NumericArray::I8(items) => join(f, items),
            NumericArray::U8(items) => join(f, items),
            NumericArray::I16(items) => join(f, items),
            NumericArray::U16(items) => join(f, items),
            NumericArray::I32(items) => join(f, items),
            NumericArray::U32(items) => join(f, items),
            NumericArray::I64(items) => join(f, items),
            NumericArray::U64(items) => join(f, items),
            NumericArray::F32(items) => {
                let widened: Vec<f64> = items.iter().map(|x| *x as f64).collect();
                join_floats(f, &widened)
            }
            NumericArray::F64(items) => join_floats(f, items),
        }
    }
}

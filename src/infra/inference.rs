use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::entities::data_type::DataType;
use crate::domain::entities::dataset::CellValue;

const NULL_MARKERS: [&str; 11] = [
    "nan",
    "na",
    "n/a",
    "none",
    "null",
    "missing",
    "miss",
    "unknow",
    "unk",
    "-999",
    "not available",
];

const CATEGORY_THRESHOLD: f64 = 0.5;

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d %b %Y",
    "%b %d %Y",
    "%B %d, %Y",
];

const NANOS_PER_SECOND: i128 = 1_000_000_000;

lazy_static! {
    static ref COMPLEX_REGEX: Regex =
        Regex::new(r"^\s*([-+]?\d*\.?\d+)\s*([-+])\s*([-+]?\d*\.?\d*)j?\s*$").unwrap();
    static ref DAYS_CLOCK_REGEX: Regex = Regex::new(
        r"^(\d+)\s*days?,?(?:\s+(\d{1,2}):(\d{2}):(\d{2})(?:\.(\d{1,9}))?)?$"
    )
    .unwrap();
    static ref CLOCK_REGEX: Regex =
        Regex::new(r"^(\d+):(\d{2}):(\d{2})(?:\.(\d{1,9}))?$").unwrap();
    static ref UNITS_REGEX: Regex = Regex::new(
        r"^(?:\s*\d+(?:\.\d+)?\s*(?:days|day|d|hours|hour|hrs|hr|h|minutes|minute|mins|min|ms|m|seconds|second|secs|sec|s|us|ns))+$"
    )
    .unwrap();
    static ref UNIT_PART_REGEX: Regex = Regex::new(
        r"(\d+(?:\.\d+)?)\s*(days|day|d|hours|hour|hrs|hr|h|minutes|minute|mins|min|ms|m|seconds|second|secs|sec|s|us|ns)"
    )
    .unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unable to convert column to {target}: {reason}")]
pub struct ConversionError {
    pub target: &'static str,
    pub reason: String,
}

impl ConversionError {
    fn new(target: DataType, reason: impl Into<String>) -> Self {
        Self {
            target: target.tag(),
            reason: reason.into(),
        }
    }
}

/// Empty cells and the usual "missing" spellings, case-insensitive.
pub fn is_missing(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(text) => {
            let text = text.trim().to_ascii_lowercase();
            text.is_empty() || NULL_MARKERS.contains(&text.as_str())
        }
    }
}

fn present(values: &[Option<String>]) -> impl Iterator<Item = &str> {
    values
        .iter()
        .map(|value| value.as_deref())
        .filter(|value| !is_missing(*value))
        .flatten()
        .map(str::trim)
}

fn has_missing(values: &[Option<String>]) -> bool {
    values.iter().any(|value| is_missing(value.as_deref()))
}

/// First type in inference order whose checker accepts every value.
pub fn infer_type(values: &[Option<String>]) -> DataType {
    DataType::ALL
        .into_iter()
        .find(|data_type| accepts(values, *data_type))
        .unwrap_or(DataType::Object)
}

fn accepts(values: &[Option<String>], data_type: DataType) -> bool {
    if data_type == DataType::Object {
        return true;
    }
    if values.is_empty() {
        return false;
    }
    if data_type == DataType::Category {
        return unique_ratio(values) <= CATEGORY_THRESHOLD;
    }
    if present(values).next().is_none() {
        return false;
    }

    match data_type {
        DataType::Bool => present(values).all(|value| parse_bool(value).is_some()),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            !has_missing(values)
                && present(values).all(|value| parse_int(value, data_type).is_some())
        }
        DataType::Float32 => present(values).all(|value| {
            parse_float(value).is_some_and(|v| f64::from(v as f32) == v)
        }),
        DataType::Float64 => present(values).all(|value| parse_float(value).is_some()),
        DataType::Complex128 => present(values).all(|value| COMPLEX_REGEX.is_match(value)),
        DataType::TimeDelta => present(values).all(|value| parse_timedelta(value).is_some()),
        DataType::DateTime => present(values).all(|value| parse_datetime(value).is_some()),
        DataType::Category | DataType::Object => true,
    }
}

fn unique_ratio(values: &[Option<String>]) -> f64 {
    let distinct: HashSet<Option<&str>> = values
        .iter()
        .map(|value| {
            if is_missing(value.as_deref()) {
                None
            } else {
                value.as_deref().map(str::trim)
            }
        })
        .collect();
    distinct.len() as f64 / values.len() as f64
}

/// Forced conversion used when a type is applied to stored values. Missing
/// values become `Null`, except for integer types which cannot hold them.
pub fn convert(values: &[Option<String>], data_type: DataType) -> Result<Vec<CellValue>, ConversionError> {
    values
        .iter()
        .map(|value| convert_value(value.as_deref(), data_type))
        .collect()
}

pub fn convert_value(value: Option<&str>, data_type: DataType) -> Result<CellValue, ConversionError> {
    if is_missing(value) {
        return match data_type {
            DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => Err(
                ConversionError::new(data_type, "missing values cannot be represented"),
            ),
            _ => Ok(CellValue::Null),
        };
    }
    let text = value.map(str::trim).unwrap_or_default();
    let invalid = || ConversionError::new(data_type, format!("Invalid value: {text}"));

    match data_type {
        DataType::Bool => parse_bool(text).map(CellValue::Bool).ok_or_else(invalid),
        DataType::Category | DataType::Object => Ok(CellValue::Text(text.to_string())),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => parse_int(text, data_type)
            .map(CellValue::Integer)
            .ok_or_else(invalid),
        DataType::Float32 => parse_float(text)
            .map(|v| CellValue::Float(f64::from(v as f32)))
            .ok_or_else(invalid),
        DataType::Float64 => parse_float(text).map(CellValue::Float).ok_or_else(invalid),
        DataType::Complex128 => {
            if COMPLEX_REGEX.is_match(text) {
                Ok(CellValue::Text(text.split_whitespace().collect()))
            } else {
                Err(invalid())
            }
        }
        DataType::TimeDelta => parse_timedelta(text)
            .map(|nanos| CellValue::Text(format_timedelta(nanos)))
            .ok_or_else(invalid),
        DataType::DateTime => parse_datetime(text)
            .map(|dt| CellValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()))
            .ok_or_else(invalid),
    }
}

pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "t" | "on" => Some(true),
        "false" | "0" | "no" | "f" | "off" => Some(false),
        _ => None,
    }
}

fn int_bounds(data_type: DataType) -> (i64, i64) {
    match data_type {
        DataType::Int8 => (i8::MIN.into(), i8::MAX.into()),
        DataType::Int16 => (i16::MIN.into(), i16::MAX.into()),
        DataType::Int32 => (i32::MIN.into(), i32::MAX.into()),
        _ => (i64::MIN, i64::MAX),
    }
}

/// Integral text (`"3"`, `"3.0"`) that fits the width of `data_type`.
pub fn parse_int(text: &str, data_type: DataType) -> Option<i64> {
    let text = text.trim();
    let value = match text.parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            let float = text.parse::<f64>().ok()?;
            if !float.is_finite() || float.fract() != 0.0 || float.abs() >= 9.2e18 {
                return None;
            }
            float as i64
        }
    };
    let (min, max) = int_bounds(data_type);
    (min..=max).contains(&value).then_some(value)
}

pub fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Accepts `"2 days 03:00:00"`, `"01:30:00"` and unit forms like `"1h 30min"`.
/// Returns nanoseconds.
pub fn parse_timedelta(text: &str) -> Option<i128> {
    let lowered = text.trim().to_ascii_lowercase();
    let (negative, body) = match lowered.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, lowered.as_str()),
    };

    let nanos = if let Some(caps) = DAYS_CLOCK_REGEX.captures(body) {
        let days: i128 = caps[1].parse().ok()?;
        let clock = match caps.get(2) {
            Some(_) => clock_nanos(&caps[2], &caps[3], &caps[4], caps.get(5).map(|m| m.as_str()))?,
            None => 0,
        };
        days.checked_mul(86_400 * NANOS_PER_SECOND)?.checked_add(clock)?
    } else if let Some(caps) = CLOCK_REGEX.captures(body) {
        clock_nanos(&caps[1], &caps[2], &caps[3], caps.get(4).map(|m| m.as_str()))?
    } else if UNITS_REGEX.is_match(body) {
        let mut total = 0_i128;
        for caps in UNIT_PART_REGEX.captures_iter(body) {
            let amount: f64 = caps[1].parse().ok()?;
            let unit_nanos: f64 = match &caps[2] {
                "days" | "day" | "d" => 86_400e9,
                "hours" | "hour" | "hrs" | "hr" | "h" => 3_600e9,
                "minutes" | "minute" | "mins" | "min" | "m" => 60e9,
                "seconds" | "second" | "secs" | "sec" | "s" => 1e9,
                "ms" => 1e6,
                "us" => 1e3,
                _ => 1.0,
            };
            let part = (amount * unit_nanos).round();
            if !part.is_finite() || part.abs() >= i128::MAX as f64 {
                return None;
            }
            total = total.checked_add(part as i128)?;
        }
        total
    } else {
        return None;
    };

    Some(if negative { -nanos } else { nanos })
}

fn clock_nanos(hours: &str, minutes: &str, seconds: &str, fraction: Option<&str>) -> Option<i128> {
    let hours: i128 = hours.parse().ok()?;
    let minutes: i128 = minutes.parse().ok()?;
    let seconds: i128 = seconds.parse().ok()?;
    if minutes >= 60 || seconds >= 60 {
        return None;
    }
    let fraction_nanos = match fraction {
        Some(digits) => {
            let padded = format!("{digits:0<9}");
            padded.parse::<i128>().ok()?
        }
        None => 0,
    };
    hours
        .checked_mul(3_600)?
        .checked_add(minutes * 60 + seconds)?
        .checked_mul(NANOS_PER_SECOND)?
        .checked_add(fraction_nanos)
}

/// `"{days} days HH:MM:SS[.fffffffff]"`, the usual interval rendering.
pub fn format_timedelta(nanos: i128) -> String {
    let sign = if nanos < 0 { "-" } else { "" };
    let nanos = nanos.abs();
    let total_seconds = nanos / NANOS_PER_SECOND;
    let fraction = nanos % NANOS_PER_SECOND;
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    if fraction == 0 {
        format!("{sign}{days} days {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{days} days {hours:02}:{minutes:02}:{seconds:02}.{fraction:09}")
    }
}

pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

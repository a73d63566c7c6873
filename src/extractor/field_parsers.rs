//! Field parsing utilities for export records
//!
//! Helpers for reading typed values out of positional columns. Every
//! failure is reported with the record number, column and raw value.

use crate::constants::{ASSET_ID_SEPARATOR, DATE_FORMAT, DATE_SHAPE, TIME_FORMAT, TIME_SHAPE};
use crate::error::{ParserError, Result};
use crate::reader::SourceRecord;
use chrono::{NaiveDate, NaiveTime};
use std::str::FromStr;

/// Get a required column value, failing if the record is too short
pub fn get_required_field(record: &SourceRecord, column: usize) -> Result<&str> {
    record.get(column).ok_or_else(|| {
        ParserError::malformed(
            record.number(),
            column,
            "",
            format!("record has only {} columns", record.len()),
        )
    })
}

/// Get an optional column value; `None` when the record does not reach the column
pub fn get_optional_field(record: &SourceRecord, column: usize) -> Option<&str> {
    record.get(column)
}

/// Parse a required string column
pub fn parse_required_string(record: &SourceRecord, column: usize) -> Result<String> {
    get_required_field(record, column).map(str::to_string)
}

/// Parse a required string column, mapping blank values to `None`
pub fn parse_nullable_string(record: &SourceRecord, column: usize) -> Result<Option<String>> {
    let value = get_required_field(record, column)?;
    Ok(non_blank(value).map(str::to_string))
}

/// Parse a required floating point column
pub fn parse_required_f64(record: &SourceRecord, column: usize) -> Result<f64> {
    let value = get_required_field(record, column)?;
    parse_number(record, column, value)
}

/// Parse a required integer column, blank meaning zero
pub fn parse_u32_or_zero(record: &SourceRecord, column: usize) -> Result<u32> {
    let value = get_required_field(record, column)?;
    match non_blank(value) {
        Some(value) => parse_number(record, column, value),
        None => Ok(0),
    }
}

/// Parse a required date column (yyyy-MM-dd)
pub fn parse_required_date(record: &SourceRecord, column: usize) -> Result<NaiveDate> {
    let value = get_required_field(record, column)?;
    let invalid = |reason: String| {
        ParserError::malformed(
            record.number(),
            column,
            value,
            format!("invalid date, expected yyyy-MM-dd ({})", reason),
        )
    };

    // chrono accepts unpadded fields, the export never has them
    if !matches_shape(value, DATE_SHAPE) {
        return Err(invalid("not zero padded".to_string()));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| invalid(e.to_string()))
}

/// Parse a required time column (hh:mm AM/PM), blank meaning no time recorded
pub fn parse_blankable_time(record: &SourceRecord, column: usize) -> Result<Option<NaiveTime>> {
    let value = get_required_field(record, column)?;
    match non_blank(value) {
        Some(value) => parse_time(record, column, value).map(Some),
        None => Ok(None),
    }
}

/// Parse a time value with the 12-hour export format
pub fn parse_time(record: &SourceRecord, column: usize, value: &str) -> Result<NaiveTime> {
    let invalid = |reason: String| {
        ParserError::malformed(
            record.number(),
            column,
            value,
            format!("invalid time, expected hh:mm AM/PM ({})", reason),
        )
    };

    let meridiem_ok = value.ends_with("AM") || value.ends_with("PM");
    if !matches_shape(value, TIME_SHAPE) || !meridiem_ok {
        return Err(invalid("not zero padded with upper case AM/PM".to_string()));
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|e| invalid(e.to_string()))
}

/// Parse an optional numeric column; `None` when absent or blank
pub fn parse_optional_number<T>(record: &SourceRecord, column: usize) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_optional_field(record, column).and_then(non_blank) {
        Some(value) => parse_number(record, column, value).map(Some),
        None => Ok(None),
    }
}

/// Parse the space separated media asset id list
pub fn parse_asset_ids(record: &SourceRecord, column: usize) -> Result<Vec<u64>> {
    let Some(value) = get_optional_field(record, column).and_then(non_blank) else {
        return Ok(Vec::new());
    };

    // Every token must be an id; doubled separators are malformed
    value
        .split(ASSET_ID_SEPARATOR)
        .map(|token| parse_number(record, column, token))
        .collect()
}

fn parse_number<T>(record: &SourceRecord, column: usize, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| {
        ParserError::malformed(
            record.number(),
            column,
            value,
            format!("invalid number ({})", e),
        )
    })
}

/// Blank means empty; surrounding whitespace is kept and fails parsing
fn non_blank(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

/// Byte layout check: `9` is an ASCII digit, `A` an ASCII letter, anything
/// else must match literally
fn matches_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(b, s)| match s {
            b'9' => b.is_ascii_digit(),
            b'A' => b.is_ascii_alphabetic(),
            literal => b == literal,
        })
}

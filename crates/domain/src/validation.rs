// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level parsing for raw uploaded values.
//!
//! These functions turn individual cell values into typed fields. Batch-level
//! concerns (which column is which, whole-batch rejection) live in the core
//! normalizer; this module only knows about single values.

use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::DomainError;

/// Accepted date formats, tried in order.
const DATE_FORMATS: [&[BorrowedFormatItem<'static>]; 3] = [
    format_description!("[year]-[month]-[day]"),
    format_description!("[year]/[month]/[day]"),
    format_description!("[month]/[day]/[year]"),
];

/// Parses a raw date value into a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, or `MM/DD/YYYY`. Surrounding
/// whitespace is ignored.
///
/// # Errors
///
/// Returns `DomainError::DateParse` if the value matches none of the
/// accepted formats.
pub fn parse_sale_date(value: &str) -> Result<Date, DomainError> {
    let trimmed: &str = value.trim();
    for format in &DATE_FORMATS {
        if let Ok(date) = Date::parse(trimmed, format) {
            return Ok(date);
        }
    }
    Err(DomainError::DateParse {
        value: value.to_string(),
    })
}

/// Parses a raw units-sold value into a non-negative integer.
///
/// # Errors
///
/// Returns `DomainError::UnitsParse` if the value is not a non-negative
/// integer (negative values fail the unsigned parse).
pub fn parse_units_sold(value: &str) -> Result<u64, DomainError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| DomainError::UnitsParse {
            value: value.to_string(),
        })
}

/// Parses a raw revenue value into a non-negative amount.
///
/// # Errors
///
/// Returns `DomainError::RevenueParse` if the value is not a finite number,
/// or `DomainError::NegativeRevenue` if it parses but is negative.
pub fn parse_revenue(value: &str) -> Result<f64, DomainError> {
    let parsed: f64 = value
        .trim()
        .parse::<f64>()
        .map_err(|_| DomainError::RevenueParse {
            value: value.to_string(),
        })?;
    if !parsed.is_finite() {
        return Err(DomainError::RevenueParse {
            value: value.to_string(),
        });
    }
    if parsed < 0.0 {
        return Err(DomainError::NegativeRevenue { value: parsed });
    }
    Ok(parsed)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schema normalization for uploaded batches.
//!
//! This module canonicalizes a raw tabular batch into the fixed sales-record
//! shape: column names are trimmed and lower-cased, the `date` column is
//! mandatory and strictly parsed, and the conventional columns (`product`,
//! `region`, `units_sold`, `revenue`) are typed when present. Validation is
//! batch-level: one bad value rejects the whole upload.

use std::collections::HashMap;

use sales_dash_domain::{
    Product, Region, SalesRecord, parse_revenue, parse_sale_date, parse_units_sold,
};

use crate::batch::RawBatch;
use crate::error::SchemaError;

/// The normalized name of the mandatory date column.
pub const DATE_COLUMN: &str = "date";

const PRODUCT_COLUMN: &str = "product";
const REGION_COLUMN: &str = "region";
const UNITS_COLUMN: &str = "units_sold";
const REVENUE_COLUMN: &str = "revenue";

/// Normalizes a column name for lookup: trims surrounding whitespace and
/// lower-cases.
#[must_use]
pub fn normalize_column(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Builds the normalized-name → column-index map.
///
/// When two uploaded columns normalize to the same name, the first wins.
fn column_index(batch: &RawBatch) -> HashMap<String, usize> {
    let mut index: HashMap<String, usize> = HashMap::new();
    for (idx, name) in batch.columns().iter().enumerate() {
        index.entry(normalize_column(name)).or_insert(idx);
    }
    index
}

/// Returns a cell value, treating missing columns and empty cells as absent.
fn cell<'a>(row: &'a [String], index: &HashMap<String, usize>, column: &str) -> Option<&'a str> {
    index
        .get(column)
        .and_then(|&idx| row.get(idx))
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}

/// Normalizes an uploaded batch into sales records.
///
/// The batch must contain a column that normalizes to `date`, and every date
/// cell must parse. `units_sold` and `revenue` cells are parsed into their
/// numeric types when present; `product` and `region` pass through unchanged
/// in value. Empty cells become absent values.
///
/// This is a pure transform: the input batch is not modified and nothing is
/// persisted.
///
/// # Errors
///
/// Returns `SchemaError::MissingDateColumn` when no column resolves to
/// `date`, or `SchemaError::InvalidValue` when any date or numeric cell
/// fails to parse. Either error rejects the entire batch.
pub fn normalize_batch(batch: &RawBatch) -> Result<Vec<SalesRecord>, SchemaError> {
    let index: HashMap<String, usize> = column_index(batch);

    if !index.contains_key(DATE_COLUMN) {
        return Err(SchemaError::MissingDateColumn {
            columns: batch.columns().to_vec(),
        });
    }

    let mut records: Vec<SalesRecord> = Vec::with_capacity(batch.len());

    for (idx, row) in batch.rows().iter().enumerate() {
        let row_number: usize = idx + 1;

        let raw_date: &str = cell(row, &index, DATE_COLUMN).unwrap_or("");
        let date = parse_sale_date(raw_date).map_err(|source| SchemaError::InvalidValue {
            row: row_number,
            column: String::from(DATE_COLUMN),
            source,
        })?;

        let product: Option<Product> = cell(row, &index, PRODUCT_COLUMN).map(Product::new);
        let region: Option<Region> = cell(row, &index, REGION_COLUMN).map(Region::new);

        let units_sold: Option<u64> = cell(row, &index, UNITS_COLUMN)
            .map(parse_units_sold)
            .transpose()
            .map_err(|source| SchemaError::InvalidValue {
                row: row_number,
                column: String::from(UNITS_COLUMN),
                source,
            })?;

        let revenue: Option<f64> = cell(row, &index, REVENUE_COLUMN)
            .map(parse_revenue)
            .transpose()
            .map_err(|source| SchemaError::InvalidValue {
                row: row_number,
                column: String::from(REVENUE_COLUMN),
                source,
            })?;

        records.push(SalesRecord::new(date, product, region, units_sold, revenue));
    }

    Ok(records)
}

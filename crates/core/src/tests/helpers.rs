// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sales_dash_domain::{Product, Region, SalesRecord, parse_sale_date};

use crate::RawBatch;

/// Builds a fully-populated record from literal values.
pub fn record(date: &str, product: &str, region: &str, units: u64, revenue: f64) -> SalesRecord {
    SalesRecord::new(
        parse_sale_date(date).unwrap(),
        Some(Product::new(product)),
        Some(Region::new(region)),
        Some(units),
        Some(revenue),
    )
}

/// Builds a record carrying only a date.
pub fn date_only_record(date: &str) -> SalesRecord {
    SalesRecord::new(parse_sale_date(date).unwrap(), None, None, None, None)
}

/// Builds a raw batch from string literals.
pub fn raw_batch(columns: &[&str], rows: &[&[&str]]) -> RawBatch {
    RawBatch::new(
        columns.iter().map(ToString::to_string).collect(),
        rows.iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect(),
    )
}

/// The worked two-record example used across aggregate tests.
pub fn example_records() -> Vec<SalesRecord> {
    vec![
        record("2024-06-01", "WidgetA", "East", 10, 100.0),
        record("2024-06-02", "WidgetB", "West", 5, 50.0),
    ]
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;

/// A sales region name.
///
/// Region values pass through ingestion unchanged; comparison is exact
/// (case-sensitive), matching the values as they appear in uploads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    /// Creates a new region from a name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Returns the region name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(String);

impl Product {
    /// Creates a new product from a name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Returns the product name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single normalized sales record.
///
/// The date is mandatory: a batch without resolvable dates never survives
/// normalization. The remaining columns are conventional and may be absent
/// from an upload, so they are modeled as optional while the record shape
/// itself stays fixed across all uploads.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    /// The calendar date of the sale.
    pub date: Date,
    /// The product sold, if the upload carried a product column.
    pub product: Option<Product>,
    /// The region of the sale, if the upload carried a region column.
    pub region: Option<Region>,
    /// Units sold. Non-negative by construction.
    pub units_sold: Option<u64>,
    /// Revenue for the record. Non-negative by construction.
    pub revenue: Option<f64>,
}

impl SalesRecord {
    /// Creates a new sales record.
    #[must_use]
    pub const fn new(
        date: Date,
        product: Option<Product>,
        region: Option<Region>,
        units_sold: Option<u64>,
        revenue: Option<f64>,
    ) -> Self {
        Self {
            date,
            product,
            region,
            units_sold,
            revenue,
        }
    }
}

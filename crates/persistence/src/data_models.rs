// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use sales_dash_domain::{Product, Region, SalesRecord, parse_sale_date};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::diesel_schema::sales;
use crate::error::PersistenceError;

/// Storage format for sale dates (ISO 8601 calendar date).
const DATE_STORAGE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Insertable row for the `sales` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sales)]
pub struct NewSaleRow {
    pub sale_date: String,
    pub product: Option<String>,
    pub region: Option<String>,
    pub units_sold: Option<i64>,
    pub revenue: Option<f64>,
}

impl NewSaleRow {
    /// Converts a normalized record into its storage row.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SerializationError` if the date cannot be
    /// formatted or the unit count does not fit the storage integer.
    pub fn from_record(record: &SalesRecord) -> Result<Self, PersistenceError> {
        let sale_date: String = record
            .date
            .format(&DATE_STORAGE_FORMAT)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

        let units_sold: Option<i64> = record
            .units_sold
            .map(|units| {
                units.to_i64().ok_or_else(|| {
                    PersistenceError::SerializationError(format!(
                        "units_sold {units} exceeds storage range"
                    ))
                })
            })
            .transpose()?;

        Ok(Self {
            sale_date,
            product: record.product.as_ref().map(|p| p.name().to_string()),
            region: record.region.as_ref().map(|r| r.name().to_string()),
            units_sold,
            revenue: record.revenue,
        })
    }
}

/// Queryable row of the `sales` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sales)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SaleRow {
    pub sale_id: i64,
    pub sale_date: String,
    pub product: Option<String>,
    pub region: Option<String>,
    pub units_sold: Option<i64>,
    pub revenue: Option<f64>,
}

impl SaleRow {
    /// Converts a storage row back into a normalized record.
    ///
    /// Every persisted record carries a parseable date; a row that does not
    /// is corrupt, and surfaces as an error rather than being dropped.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRecord` if the stored date does not
    /// parse or the stored unit count is negative.
    pub fn into_record(self) -> Result<SalesRecord, PersistenceError> {
        let date: Date =
            parse_sale_date(&self.sale_date).map_err(|e| PersistenceError::CorruptRecord {
                sale_id: self.sale_id,
                message: e.to_string(),
            })?;

        let units_sold: Option<u64> = self
            .units_sold
            .map(|units| {
                units.to_u64().ok_or_else(|| PersistenceError::CorruptRecord {
                    sale_id: self.sale_id,
                    message: format!("negative units_sold {units}"),
                })
            })
            .transpose()?;

        Ok(SalesRecord::new(
            date,
            self.product.as_deref().map(Product::new),
            self.region.as_deref().map(Region::new),
            units_sold,
            self.revenue,
        ))
    }
}

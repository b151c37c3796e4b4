// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sales table queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;

use crate::data_models::SaleRow;
use crate::diesel_schema::sales;
use crate::error::PersistenceError;

/// Loads every persisted sales row, in insertion order.
///
/// An empty table yields an empty vector, not an error: "no data yet" is a
/// first-class state for downstream consumers.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn load_all_sales(conn: &mut SqliteConnection) -> Result<Vec<SaleRow>, PersistenceError> {
    sales::table
        .order(sales::sale_id.asc())
        .select(SaleRow::as_select())
        .load::<SaleRow>(conn)
        .map_err(Into::into)
}

/// Counts the persisted sales rows.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or the count does not
/// convert.
pub fn count_sales(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let count: i64 = sales::table.count().get_result(conn)?;
    count
        .to_usize()
        .ok_or_else(|| PersistenceError::DatabaseError("Count conversion failed".to_string()))
}

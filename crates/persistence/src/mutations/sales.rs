// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sales append mutation.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::NewSaleRow;
use crate::diesel_schema::sales;
use crate::error::PersistenceError;

/// Appends a batch of rows to the `sales` table.
///
/// The whole batch is inserted inside one transaction: the append happens
/// entirely or not at all. Existing rows are never reordered or
/// deduplicated.
///
/// # Returns
///
/// The number of rows appended.
///
/// # Errors
///
/// Returns an error if the insert fails; the transaction is rolled back and
/// no rows are persisted.
pub fn append_sales(
    conn: &mut SqliteConnection,
    rows: &[NewSaleRow],
) -> Result<usize, PersistenceError> {
    conn.transaction::<usize, diesel::result::Error, _>(|conn| {
        diesel::insert_into(sales::table).values(rows).execute(conn)
    })
    .map_err(Into::into)
}

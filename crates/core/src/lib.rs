// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod aggregate;
mod batch;
mod error;
mod normalize;

#[cfg(test)]
mod tests;

pub use aggregate::{
    CorrelationMatrix, DailyPoint, DashboardSummary, Kpis, MonthlyPoint, PivotTable,
    ProductRevenue, SalesFilter, compute_kpis, correlation_matrix, daily_series, distinct_products,
    distinct_regions, filter_records, monthly_series, region_product_pivot, summarize,
    top_products,
};
pub use batch::RawBatch;
pub use error::{AggregateError, SchemaError};
pub use normalize::{DATE_COLUMN, normalize_batch, normalize_column};

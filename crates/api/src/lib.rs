// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Sales Dash service.
//!
//! Each operation here is one user action: upload a CSV, preview an upload,
//! view the stored data, or request the dashboard aggregates. Operations
//! compose the core normalizer/aggregator with the append store, and return
//! serializable response types; failures are translated into `ApiError` and
//! never leaked raw.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use tracing::info;

use sales_dash::{RawBatch, SalesFilter, normalize_batch, normalize_column, summarize};
use sales_dash_domain::{Product, Region, SalesRecord};
use sales_dash_persistence::SqliteStore;

mod error;
mod ingest;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_aggregate_error, translate_schema_error};
pub use ingest::{CsvError, read_csv};
pub use request_response::{
    CorrelationView, DailyPointView, DashboardRequest, DashboardResponse, FilterOptionsResponse,
    KpisView, ListSalesResponse, MonthlyPointView, PivotView, PreviewSalesResponse,
    ProductRevenueView, SalesRecordView, UploadSalesResponse,
};

/// Maximum rows rendered by an upload preview.
const PREVIEW_ROW_LIMIT: usize = 50;

/// Uploads a CSV batch: read, normalize, append.
///
/// Nothing is persisted unless the entire batch reads and normalizes
/// cleanly.
///
/// # Errors
///
/// Returns `ApiError::InvalidCsvFormat` if the text is not well-formed CSV,
/// a translated `SchemaViolation` if normalization rejects the batch, or
/// `StorageFailed` if the append fails.
pub fn upload_sales(
    store: &mut SqliteStore,
    csv_content: &str,
) -> Result<UploadSalesResponse, ApiError> {
    let batch: RawBatch = ingest::read_csv(csv_content)?;
    let records: Vec<SalesRecord> = normalize_batch(&batch).map_err(translate_schema_error)?;

    let rows_appended: usize = store.append_batch(&records)?;
    let total_rows: usize = store.count()?;

    info!(rows_appended, total_rows, "Uploaded sales batch");

    Ok(UploadSalesResponse {
        rows_appended,
        total_rows,
    })
}

/// Previews a CSV batch without persisting anything.
///
/// Runs the same read + normalize pipeline as `upload_sales`, so a batch
/// that previews cleanly will upload cleanly.
///
/// # Errors
///
/// Returns the same errors as `upload_sales`, minus storage failures.
pub fn preview_sales(csv_content: &str) -> Result<PreviewSalesResponse, ApiError> {
    let batch: RawBatch = ingest::read_csv(csv_content)?;
    let records: Vec<SalesRecord> = normalize_batch(&batch).map_err(translate_schema_error)?;

    let columns: Vec<String> = batch.columns().iter().map(|c| normalize_column(c)).collect();
    let total_rows: usize = records.len();
    let truncated: bool = total_rows > PREVIEW_ROW_LIMIT;
    let rows: Vec<SalesRecordView> = records
        .iter()
        .take(PREVIEW_ROW_LIMIT)
        .map(SalesRecordView::from_record)
        .collect();

    Ok(PreviewSalesResponse {
        columns,
        total_rows,
        rows,
        truncated,
    })
}

/// Lists the full stored record set for display.
///
/// An empty store yields an empty listing, not an error.
///
/// # Errors
///
/// Returns `ApiError::StorageFailed` if the store cannot be read.
pub fn list_sales(store: &mut SqliteStore) -> Result<ListSalesResponse, ApiError> {
    let records: Vec<SalesRecord> = store.load_all()?;

    Ok(ListSalesResponse {
        total_rows: records.len(),
        records: records.iter().map(SalesRecordView::from_record).collect(),
    })
}

/// Computes the dashboard aggregates under the requested filters.
///
/// Reloads the full record set on every call; there is no caching to
/// invalidate. A filter value that matches nothing yields empty aggregates.
///
/// # Errors
///
/// Returns `ApiError::StorageFailed` if the store cannot be read, or a
/// translated `AggregationFailed` if a required column has no values in the
/// filtered subset.
pub fn dashboard(
    store: &mut SqliteStore,
    request: &DashboardRequest,
) -> Result<DashboardResponse, ApiError> {
    let records: Vec<SalesRecord> = store.load_all()?;

    let filter: SalesFilter = SalesFilter::new(
        request.region.as_deref().map(Region::new),
        request.product.as_deref().map(Product::new),
    );
    let summary = summarize(&records, &filter).map_err(translate_aggregate_error)?;

    info!(
        records = records.len(),
        region = request.region.as_deref().unwrap_or("-"),
        product = request.product.as_deref().unwrap_or("-"),
        "Computed dashboard"
    );

    Ok(DashboardResponse::from_summary(request, summary))
}

/// Lists the distinct region and product values available as filters.
///
/// # Errors
///
/// Returns `ApiError::StorageFailed` if the store cannot be read.
pub fn filter_options(store: &mut SqliteStore) -> Result<FilterOptionsResponse, ApiError> {
    let records: Vec<SalesRecord> = store.load_all()?;

    Ok(FilterOptionsResponse {
        regions: sales_dash::distinct_regions(&records),
        products: sales_dash::distinct_products(&records),
    })
}

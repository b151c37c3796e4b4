// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! These are the serializable shapes handed to the rendering layer. Dates
//! and months serialize as their display strings; correlation cells
//! serialize NaN as `null`, since JSON has no NaN literal.

use serde::{Deserialize, Serialize};

use sales_dash::{
    CorrelationMatrix, DailyPoint, DashboardSummary, Kpis, MonthlyPoint, PivotTable,
    ProductRevenue,
};
use sales_dash_domain::{Product, Region, SalesRecord};

/// A sales record rendered for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecordView {
    /// The sale date, ISO 8601.
    pub date: String,
    /// The product, if present.
    pub product: Option<String>,
    /// The region, if present.
    pub region: Option<String>,
    /// Units sold, if present.
    pub units_sold: Option<u64>,
    /// Revenue, if present.
    pub revenue: Option<f64>,
}

impl SalesRecordView {
    /// Renders a record for display.
    #[must_use]
    pub fn from_record(record: &SalesRecord) -> Self {
        Self {
            date: record.date.to_string(),
            product: record.product.as_ref().map(|p| p.name().to_string()),
            region: record.region.as_ref().map(|r| r.name().to_string()),
            units_sold: record.units_sold,
            revenue: record.revenue,
        }
    }
}

/// Response for a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSalesResponse {
    /// Rows appended by this upload.
    pub rows_appended: usize,
    /// Rows in the store after the upload.
    pub total_rows: usize,
}

/// Response for an upload preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewSalesResponse {
    /// The normalized column names that were resolved.
    pub columns: Vec<String>,
    /// Total rows in the uploaded batch.
    pub total_rows: usize,
    /// Rendered rows, capped at the preview limit.
    pub rows: Vec<SalesRecordView>,
    /// Whether `rows` was truncated.
    pub truncated: bool,
}

/// Response listing the stored record set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSalesResponse {
    /// Total stored rows.
    pub total_rows: usize,
    /// All stored records, in insertion order.
    pub records: Vec<SalesRecordView>,
}

/// Dashboard request: optional region/product filters, combined with AND.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashboardRequest {
    /// Restrict to this region, if set.
    pub region: Option<String>,
    /// Restrict to this product, if set.
    pub product: Option<String>,
}

/// Headline totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpisView {
    /// Sum of revenue over the filtered subset.
    pub total_revenue: f64,
    /// Sum of units sold over the filtered subset.
    pub total_units: u64,
}

impl From<Kpis> for KpisView {
    fn from(kpis: Kpis) -> Self {
        Self {
            total_revenue: kpis.total_revenue,
            total_units: kpis.total_units,
        }
    }
}

/// One point of the daily series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPointView {
    /// The date, ISO 8601.
    pub date: String,
    /// Revenue summed over the date.
    pub revenue: f64,
    /// Units summed over the date.
    pub units_sold: u64,
}

impl From<DailyPoint> for DailyPointView {
    fn from(point: DailyPoint) -> Self {
        Self {
            date: point.date.to_string(),
            revenue: point.revenue,
            units_sold: point.units_sold,
        }
    }
}

/// One entry of the top-products ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRevenueView {
    /// The product.
    pub product: Product,
    /// Revenue summed over the product.
    pub revenue: f64,
}

impl From<ProductRevenue> for ProductRevenueView {
    fn from(entry: ProductRevenue) -> Self {
        Self {
            product: entry.product,
            revenue: entry.revenue,
        }
    }
}

/// The region×product pivot, zero-filled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotView {
    /// Row axis: distinct regions, ascending.
    pub regions: Vec<Region>,
    /// Column axis: distinct products, ascending.
    pub products: Vec<Product>,
    /// Revenue sums; rows follow `regions`, columns follow `products`.
    pub cells: Vec<Vec<f64>>,
}

impl From<PivotTable> for PivotView {
    fn from(pivot: PivotTable) -> Self {
        Self {
            regions: pivot.regions,
            products: pivot.products,
            cells: pivot.cells,
        }
    }
}

/// One point of the monthly trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPointView {
    /// The month, `YYYY-MM`.
    pub month: String,
    /// Revenue summed over the month.
    pub revenue: f64,
    /// Units summed over the month.
    pub units_sold: u64,
}

impl From<MonthlyPoint> for MonthlyPointView {
    fn from(point: MonthlyPoint) -> Self {
        Self {
            month: point.month.to_string(),
            revenue: point.revenue,
            units_sold: point.units_sold,
        }
    }
}

/// The correlation matrix; NaN cells become `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationView {
    /// The numeric columns present.
    pub columns: Vec<String>,
    /// Correlation cells aligned with `columns`; `null` where undefined.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl From<CorrelationMatrix> for CorrelationView {
    fn from(matrix: CorrelationMatrix) -> Self {
        Self {
            columns: matrix.columns,
            cells: matrix
                .cells
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|value| if value.is_nan() { None } else { Some(value) })
                        .collect()
                })
                .collect(),
        }
    }
}

/// The full dashboard payload: the six aggregate outputs plus the filters
/// they were computed under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// The region filter that was applied, if any.
    pub region: Option<String>,
    /// The product filter that was applied, if any.
    pub product: Option<String>,
    /// Headline totals.
    pub kpis: KpisView,
    /// Daily series, ascending by date.
    pub daily: Vec<DailyPointView>,
    /// Top-products ranking, descending by revenue.
    pub top_products: Vec<ProductRevenueView>,
    /// Region×product pivot.
    pub pivot: PivotView,
    /// Monthly trend, ascending by month.
    pub monthly: Vec<MonthlyPointView>,
    /// Correlation matrix.
    pub correlation: CorrelationView,
}

impl DashboardResponse {
    /// Assembles the response from a computed summary and the request it was
    /// computed for.
    #[must_use]
    pub fn from_summary(request: &DashboardRequest, summary: DashboardSummary) -> Self {
        Self {
            region: request.region.clone(),
            product: request.product.clone(),
            kpis: summary.kpis.into(),
            daily: summary.daily.into_iter().map(Into::into).collect(),
            top_products: summary.top_products.into_iter().map(Into::into).collect(),
            pivot: summary.pivot.into(),
            monthly: summary.monthly.into_iter().map(Into::into).collect(),
            correlation: summary.correlation.into(),
        }
    }
}

/// The distinct filter values available in the stored data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOptionsResponse {
    /// Distinct regions, ascending.
    pub regions: Vec<Region>,
    /// Distinct products, ascending.
    pub products: Vec<Product>,
}

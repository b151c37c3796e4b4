// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derived aggregates over a loaded record set.
//!
//! Every function here is a pure reduction over records the store loaded;
//! nothing reads or writes storage. The aggregates are recomputed from the
//! full record set on every request — there is deliberately no incremental
//! caching, since no invalidation rule exists for it.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use sales_dash_domain::{Product, Region, SalesMonth, SalesRecord};
use time::Date;

use crate::error::AggregateError;

/// Optional region/product restriction for the dashboard aggregates.
///
/// Active filters combine with logical AND. A record with an absent region
/// or product never matches an active filter on that column. A filter value
/// that matches nothing yields empty aggregates, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesFilter {
    /// Restrict to this region, if set.
    pub region: Option<Region>,
    /// Restrict to this product, if set.
    pub product: Option<Product>,
}

impl SalesFilter {
    /// Creates a filter from optional region and product values.
    #[must_use]
    pub const fn new(region: Option<Region>, product: Option<Product>) -> Self {
        Self { region, product }
    }

    /// Creates the no-op filter that matches every record.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            region: None,
            product: None,
        }
    }

    /// Returns whether a record passes this filter.
    #[must_use]
    pub fn matches(&self, record: &SalesRecord) -> bool {
        let region_ok: bool = self
            .region
            .as_ref()
            .is_none_or(|want| record.region.as_ref() == Some(want));
        let product_ok: bool = self
            .product
            .as_ref()
            .is_none_or(|want| record.product.as_ref() == Some(want));
        region_ok && product_ok
    }
}

/// Headline totals over the filtered subset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpis {
    /// Sum of revenue. Zero over an empty subset.
    pub total_revenue: f64,
    /// Sum of units sold. Zero over an empty subset.
    pub total_units: u64,
}

/// One point of the daily time series.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPoint {
    /// The calendar date.
    pub date: Date,
    /// Revenue summed over the date.
    pub revenue: f64,
    /// Units summed over the date.
    pub units_sold: u64,
}

/// One entry of the top-products ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRevenue {
    /// The product.
    pub product: Product,
    /// Revenue summed over the product.
    pub revenue: f64,
}

/// The region×product revenue pivot.
///
/// `cells[r][p]` is the revenue sum for `regions[r]` × `products[p]`; both
/// axes are sorted ascending and the grid is the full cross-product, with
/// unobserved combinations zero-filled so a heatmap can render every cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    /// Distinct regions of the subset, ascending.
    pub regions: Vec<Region>,
    /// Distinct products of the subset, ascending.
    pub products: Vec<Product>,
    /// Revenue sums, rows following `regions`, columns following `products`.
    pub cells: Vec<Vec<f64>>,
}

impl PivotTable {
    /// Looks up the cell for a region/product pair, if both axes contain it.
    #[must_use]
    pub fn value(&self, region: &Region, product: &Product) -> Option<f64> {
        let row: usize = self.regions.iter().position(|r| r == region)?;
        let col: usize = self.products.iter().position(|p| p == product)?;
        Some(self.cells[row][col])
    }
}

/// One point of the monthly trend.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPoint {
    /// The calendar month.
    pub month: SalesMonth,
    /// Revenue summed over the month.
    pub revenue: f64,
    /// Units summed over the month.
    pub units_sold: u64,
}

/// Pairwise Pearson correlations between the numeric columns.
///
/// `cells[i][j]` is the correlation between `columns[i]` and `columns[j]`.
/// A zero-variance pairing is NaN, never an error. A numeric column with no
/// present values in the subset is excluded entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    /// The numeric columns present in the subset.
    pub columns: Vec<String>,
    /// The correlation grid, symmetric, aligned with `columns`.
    pub cells: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Looks up the correlation between two named columns.
    #[must_use]
    pub fn value(&self, a: &str, b: &str) -> Option<f64> {
        let row: usize = self.columns.iter().position(|c| c == a)?;
        let col: usize = self.columns.iter().position(|c| c == b)?;
        Some(self.cells[row][col])
    }
}

/// All six aggregate outputs handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Headline totals.
    pub kpis: Kpis,
    /// Daily time series, ascending by date.
    pub daily: Vec<DailyPoint>,
    /// Top-products ranking, descending by revenue.
    pub top_products: Vec<ProductRevenue>,
    /// Region×product revenue pivot.
    pub pivot: PivotTable,
    /// Monthly trend, ascending by month.
    pub monthly: Vec<MonthlyPoint>,
    /// Correlation matrix over the numeric columns.
    pub correlation: CorrelationMatrix,
}

/// Applies a filter to the full record set.
#[must_use]
pub fn filter_records<'a>(records: &'a [SalesRecord], filter: &SalesFilter) -> Vec<&'a SalesRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Fails when a non-empty subset has no values at all for a column.
///
/// This is the explicit-result analogue of a missing-key lookup: individual
/// absent values are skipped by the aggregates, but a column that is absent
/// from the entire subset cannot be aggregated meaningfully.
fn require_column(
    rows: &[&SalesRecord],
    column: &str,
    has_value: impl Fn(&SalesRecord) -> bool,
) -> Result<(), AggregateError> {
    if rows.is_empty() || rows.iter().any(|r| has_value(r)) {
        Ok(())
    } else {
        Err(AggregateError::ColumnMissing {
            column: column.to_string(),
        })
    }
}

/// Computes the headline KPIs over the filtered subset.
///
/// Both totals are zero over an empty subset; no division is involved, so
/// there are no undefined states.
///
/// # Errors
///
/// Returns `AggregateError::ColumnMissing` when a non-empty subset has no
/// `revenue` or no `units_sold` values.
pub fn compute_kpis(rows: &[&SalesRecord]) -> Result<Kpis, AggregateError> {
    require_column(rows, "revenue", |r| r.revenue.is_some())?;
    require_column(rows, "units_sold", |r| r.units_sold.is_some())?;

    let total_revenue: f64 = rows.iter().filter_map(|r| r.revenue).sum();
    let total_units: u64 = rows.iter().filter_map(|r| r.units_sold).sum();

    Ok(Kpis {
        total_revenue,
        total_units,
    })
}

/// Groups the subset by exact date, summing revenue and units.
///
/// The result is ordered ascending by date regardless of the input order;
/// the consuming renderer does not re-sort.
///
/// # Errors
///
/// Returns `AggregateError::ColumnMissing` when a non-empty subset has no
/// `revenue` or no `units_sold` values.
pub fn daily_series(rows: &[&SalesRecord]) -> Result<Vec<DailyPoint>, AggregateError> {
    require_column(rows, "revenue", |r| r.revenue.is_some())?;
    require_column(rows, "units_sold", |r| r.units_sold.is_some())?;

    let mut by_date: BTreeMap<Date, (f64, u64)> = BTreeMap::new();
    for row in rows {
        let entry: &mut (f64, u64) = by_date.entry(row.date).or_insert((0.0, 0));
        entry.0 += row.revenue.unwrap_or(0.0);
        entry.1 += row.units_sold.unwrap_or(0);
    }

    Ok(by_date
        .into_iter()
        .map(|(date, (revenue, units_sold))| DailyPoint {
            date,
            revenue,
            units_sold,
        })
        .collect())
}

/// Ranks products by summed revenue, descending.
///
/// The sort is stable, so two products with equal revenue keep their
/// first-encountered order from the subset.
///
/// # Errors
///
/// Returns `AggregateError::ColumnMissing` when a non-empty subset has no
/// `product` or no `revenue` values.
pub fn top_products(rows: &[&SalesRecord]) -> Result<Vec<ProductRevenue>, AggregateError> {
    require_column(rows, "product", |r| r.product.is_some())?;
    require_column(rows, "revenue", |r| r.revenue.is_some())?;

    let mut ranking: Vec<ProductRevenue> = Vec::new();
    let mut positions: HashMap<Product, usize> = HashMap::new();

    for row in rows {
        let Some(product) = row.product.as_ref() else {
            continue;
        };
        let revenue: f64 = row.revenue.unwrap_or(0.0);
        match positions.entry(product.clone()) {
            Entry::Occupied(entry) => ranking[*entry.get()].revenue += revenue,
            Entry::Vacant(entry) => {
                entry.insert(ranking.len());
                ranking.push(ProductRevenue {
                    product: product.clone(),
                    revenue,
                });
            }
        }
    }

    ranking.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    Ok(ranking)
}

/// Builds the zero-filled region×product revenue pivot.
///
/// Every pair in the cross-product of the subset's distinct regions and
/// products gets a cell, defaulting to `0` when the combination was never
/// observed together.
///
/// # Errors
///
/// Returns `AggregateError::ColumnMissing` when a non-empty subset has no
/// `region`, `product`, or `revenue` values.
pub fn region_product_pivot(rows: &[&SalesRecord]) -> Result<PivotTable, AggregateError> {
    require_column(rows, "region", |r| r.region.is_some())?;
    require_column(rows, "product", |r| r.product.is_some())?;
    require_column(rows, "revenue", |r| r.revenue.is_some())?;

    let regions: Vec<Region> = rows
        .iter()
        .filter_map(|r| r.region.clone())
        .collect::<BTreeSet<Region>>()
        .into_iter()
        .collect();
    let products: Vec<Product> = rows
        .iter()
        .filter_map(|r| r.product.clone())
        .collect::<BTreeSet<Product>>()
        .into_iter()
        .collect();

    let mut sums: HashMap<(&Region, &Product), f64> = HashMap::new();
    for row in rows {
        if let (Some(region), Some(product)) = (row.region.as_ref(), row.product.as_ref()) {
            *sums.entry((region, product)).or_insert(0.0) += row.revenue.unwrap_or(0.0);
        }
    }

    let cells: Vec<Vec<f64>> = regions
        .iter()
        .map(|region| {
            products
                .iter()
                .map(|product| sums.get(&(region, product)).copied().unwrap_or(0.0))
                .collect()
        })
        .collect();

    Ok(PivotTable {
        regions,
        products,
        cells,
    })
}

/// Groups the subset by calendar month, summing revenue and units.
///
/// The result is ordered ascending by month.
///
/// # Errors
///
/// Returns `AggregateError::ColumnMissing` when a non-empty subset has no
/// `revenue` or no `units_sold` values.
pub fn monthly_series(rows: &[&SalesRecord]) -> Result<Vec<MonthlyPoint>, AggregateError> {
    require_column(rows, "revenue", |r| r.revenue.is_some())?;
    require_column(rows, "units_sold", |r| r.units_sold.is_some())?;

    let mut by_month: BTreeMap<SalesMonth, (f64, u64)> = BTreeMap::new();
    for row in rows {
        let entry: &mut (f64, u64) = by_month
            .entry(SalesMonth::from_date(row.date))
            .or_insert((0.0, 0));
        entry.0 += row.revenue.unwrap_or(0.0);
        entry.1 += row.units_sold.unwrap_or(0);
    }

    Ok(by_month
        .into_iter()
        .map(|(month, (revenue, units_sold))| MonthlyPoint {
            month,
            revenue,
            units_sold,
        })
        .collect())
}

/// Extracts the numeric value of a named column from a record.
#[allow(clippy::cast_precision_loss)]
fn numeric_value(record: &SalesRecord, column: &str) -> Option<f64> {
    match column {
        "units_sold" => record.units_sold.map(|u| u as f64),
        "revenue" => record.revenue,
        _ => None,
    }
}

fn mean(values: &[f64]) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let count: f64 = values.len() as f64;
    values.iter().sum::<f64>() / count
}

/// Pearson correlation over paired observations.
///
/// NaN when there are no pairs or either side has zero variance.
#[allow(clippy::suboptimal_flops)]
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    let mean_x: f64 = mean(xs);
    let mean_y: f64 = mean(ys);

    let mut covariance: f64 = 0.0;
    let mut variance_x: f64 = 0.0;
    let mut variance_y: f64 = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx: f64 = x - mean_x;
        let dy: f64 = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    if variance_x > 0.0 && variance_y > 0.0 {
        covariance / (variance_x.sqrt() * variance_y.sqrt())
    } else {
        f64::NAN
    }
}

/// Computes pairwise Pearson correlations between the numeric columns.
///
/// Columns with no present values in the subset are excluded. Each pairing
/// uses the rows where both values are present. The diagonal is exactly
/// `1.0` for a non-constant column and NaN for a constant one; off-diagonal
/// pairings involving a zero-variance column are NaN. NaN is a value here,
/// never an error.
#[must_use]
pub fn correlation_matrix(rows: &[&SalesRecord]) -> CorrelationMatrix {
    const NUMERIC_COLUMNS: [&str; 2] = ["units_sold", "revenue"];

    let columns: Vec<String> = NUMERIC_COLUMNS
        .iter()
        .filter(|column| rows.iter().any(|r| numeric_value(r, column).is_some()))
        .map(ToString::to_string)
        .collect();

    let cells: Vec<Vec<f64>> = columns
        .iter()
        .map(|a| {
            columns
                .iter()
                .map(|b| {
                    let mut xs: Vec<f64> = Vec::new();
                    let mut ys: Vec<f64> = Vec::new();
                    for row in rows {
                        if let (Some(x), Some(y)) =
                            (numeric_value(row, a), numeric_value(row, b))
                        {
                            xs.push(x);
                            ys.push(y);
                        }
                    }
                    if a == b {
                        // Exact 1.0 on the diagonal; pearson() would only
                        // approximate it through the division.
                        let variance_is_zero: bool = pearson(&xs, &ys).is_nan();
                        if variance_is_zero { f64::NAN } else { 1.0 }
                    } else {
                        pearson(&xs, &ys)
                    }
                })
                .collect()
        })
        .collect();

    CorrelationMatrix { columns, cells }
}

/// Lists the distinct regions of the full record set, ascending.
///
/// Records without a region contribute nothing.
#[must_use]
pub fn distinct_regions(records: &[SalesRecord]) -> Vec<Region> {
    records
        .iter()
        .filter_map(|r| r.region.clone())
        .collect::<BTreeSet<Region>>()
        .into_iter()
        .collect()
}

/// Lists the distinct products of the full record set, ascending.
#[must_use]
pub fn distinct_products(records: &[SalesRecord]) -> Vec<Product> {
    records
        .iter()
        .filter_map(|r| r.product.clone())
        .collect::<BTreeSet<Product>>()
        .into_iter()
        .collect()
}

/// Computes all six dashboard outputs over the filtered record set.
///
/// # Errors
///
/// Returns `AggregateError::ColumnMissing` when any required column has no
/// present values in a non-empty filtered subset.
pub fn summarize(
    records: &[SalesRecord],
    filter: &SalesFilter,
) -> Result<DashboardSummary, AggregateError> {
    let rows: Vec<&SalesRecord> = filter_records(records, filter);

    Ok(DashboardSummary {
        kpis: compute_kpis(&rows)?,
        daily: daily_series(&rows)?,
        top_products: top_products(&rows)?,
        pivot: region_product_pivot(&rows)?,
        monthly: monthly_series(&rows)?,
        correlation: correlation_matrix(&rows),
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sales_dash_domain::{Product, Region, SalesMonth, SalesRecord, parse_sale_date};

use crate::tests::helpers::{date_only_record, example_records, record};
use crate::{
    AggregateError, CorrelationMatrix, DashboardSummary, Kpis, SalesFilter, compute_kpis,
    correlation_matrix, daily_series, distinct_products, distinct_regions, filter_records,
    monthly_series, region_product_pivot, summarize, top_products,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_worked_example_kpis() {
    let records: Vec<SalesRecord> = example_records();
    let rows: Vec<&SalesRecord> = filter_records(&records, &SalesFilter::none());

    let kpis: Kpis = compute_kpis(&rows).unwrap();
    assert_close(kpis.total_revenue, 150.0);
    assert_eq!(kpis.total_units, 15);
}

#[test]
fn test_worked_example_daily_series() {
    let records: Vec<SalesRecord> = example_records();
    let rows: Vec<&SalesRecord> = filter_records(&records, &SalesFilter::none());

    let daily = daily_series(&rows).unwrap();
    assert_eq!(daily.len(), 2);
    assert_eq!(daily[0].date, parse_sale_date("2024-06-01").unwrap());
    assert_close(daily[0].revenue, 100.0);
    assert_eq!(daily[0].units_sold, 10);
    assert_eq!(daily[1].date, parse_sale_date("2024-06-02").unwrap());
    assert_close(daily[1].revenue, 50.0);
    assert_eq!(daily[1].units_sold, 5);
}

#[test]
fn test_worked_example_top_products() {
    let records: Vec<SalesRecord> = example_records();
    let rows: Vec<&SalesRecord> = filter_records(&records, &SalesFilter::none());

    let ranking = top_products(&rows).unwrap();
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0].product, Product::new("WidgetA"));
    assert_close(ranking[0].revenue, 100.0);
    assert_eq!(ranking[1].product, Product::new("WidgetB"));
    assert_close(ranking[1].revenue, 50.0);
}

#[test]
fn test_worked_example_pivot_is_zero_filled() {
    let records: Vec<SalesRecord> = example_records();
    let rows: Vec<&SalesRecord> = filter_records(&records, &SalesFilter::none());

    let pivot = region_product_pivot(&rows).unwrap();
    assert_eq!(pivot.regions, vec![Region::new("East"), Region::new("West")]);
    assert_eq!(
        pivot.products,
        vec![Product::new("WidgetA"), Product::new("WidgetB")]
    );

    let east = Region::new("East");
    let west = Region::new("West");
    let widget_a = Product::new("WidgetA");
    let widget_b = Product::new("WidgetB");
    assert_close(pivot.value(&east, &widget_a).unwrap(), 100.0);
    assert_close(pivot.value(&east, &widget_b).unwrap(), 0.0);
    assert_close(pivot.value(&west, &widget_a).unwrap(), 0.0);
    assert_close(pivot.value(&west, &widget_b).unwrap(), 50.0);
}

#[test]
fn test_worked_example_monthly_series() {
    let records: Vec<SalesRecord> = example_records();
    let rows: Vec<&SalesRecord> = filter_records(&records, &SalesFilter::none());

    let monthly = monthly_series(&rows).unwrap();
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].month, SalesMonth::new(2024, 6));
    assert_close(monthly[0].revenue, 150.0);
    assert_eq!(monthly[0].units_sold, 15);
}

#[test]
fn test_filters_combine_with_and() {
    let records: Vec<SalesRecord> = vec![
        record("2024-06-01", "WidgetA", "East", 10, 100.0),
        record("2024-06-02", "WidgetA", "West", 5, 50.0),
        record("2024-06-03", "WidgetB", "East", 2, 20.0),
    ];

    let filter: SalesFilter = SalesFilter::new(
        Some(Region::new("East")),
        Some(Product::new("WidgetA")),
    );
    let rows: Vec<&SalesRecord> = filter_records(&records, &filter);
    assert_eq!(rows.len(), 1);

    let kpis: Kpis = compute_kpis(&rows).unwrap();
    assert_close(kpis.total_revenue, 100.0);
    assert_eq!(kpis.total_units, 10);
}

#[test]
fn test_unknown_filter_value_yields_empty_aggregates() {
    let records: Vec<SalesRecord> = example_records();
    let filter: SalesFilter = SalesFilter::new(Some(Region::new("North")), None);

    let summary: DashboardSummary = summarize(&records, &filter).unwrap();
    assert_close(summary.kpis.total_revenue, 0.0);
    assert_eq!(summary.kpis.total_units, 0);
    assert!(summary.daily.is_empty());
    assert!(summary.top_products.is_empty());
    assert!(summary.pivot.regions.is_empty());
    assert!(summary.monthly.is_empty());
    assert!(summary.correlation.columns.is_empty());
}

#[test]
fn test_record_without_region_never_matches_region_filter() {
    let records: Vec<SalesRecord> = vec![date_only_record("2024-06-01")];
    let filter: SalesFilter = SalesFilter::new(Some(Region::new("East")), None);

    assert!(filter_records(&records, &filter).is_empty());
}

#[test]
fn test_daily_series_sorted_for_any_input_order() {
    let records: Vec<SalesRecord> = vec![
        record("2024-06-03", "WidgetA", "East", 1, 10.0),
        record("2024-06-01", "WidgetA", "East", 2, 20.0),
        record("2024-06-02", "WidgetA", "East", 3, 30.0),
        record("2024-06-01", "WidgetB", "West", 4, 40.0),
    ];
    let rows: Vec<&SalesRecord> = filter_records(&records, &SalesFilter::none());

    let daily = daily_series(&rows).unwrap();
    assert_eq!(daily.len(), 3);
    assert_eq!(daily[0].date, parse_sale_date("2024-06-01").unwrap());
    assert_close(daily[0].revenue, 60.0);
    assert_eq!(daily[0].units_sold, 6);
    assert_eq!(daily[2].date, parse_sale_date("2024-06-03").unwrap());
}

#[test]
fn test_top_products_ties_keep_first_encountered_order() {
    let records: Vec<SalesRecord> = vec![
        record("2024-06-01", "Second", "East", 1, 50.0),
        record("2024-06-01", "First", "East", 1, 100.0),
        record("2024-06-02", "Third", "East", 1, 50.0),
    ];
    let rows: Vec<&SalesRecord> = filter_records(&records, &SalesFilter::none());

    let ranking = top_products(&rows).unwrap();
    assert_eq!(ranking[0].product, Product::new("First"));
    // Second and Third tie at 50; Second was encountered first.
    assert_eq!(ranking[1].product, Product::new("Second"));
    assert_eq!(ranking[2].product, Product::new("Third"));
}

#[test]
fn test_monthly_series_spans_months_in_order() {
    let records: Vec<SalesRecord> = vec![
        record("2024-07-15", "WidgetA", "East", 1, 10.0),
        record("2024-06-01", "WidgetA", "East", 2, 20.0),
        record("2023-12-31", "WidgetA", "East", 3, 30.0),
        record("2024-06-20", "WidgetA", "East", 4, 40.0),
    ];
    let rows: Vec<&SalesRecord> = filter_records(&records, &SalesFilter::none());

    let monthly = monthly_series(&rows).unwrap();
    let months: Vec<SalesMonth> = monthly.iter().map(|p| p.month).collect();
    assert_eq!(
        months,
        vec![
            SalesMonth::new(2023, 12),
            SalesMonth::new(2024, 6),
            SalesMonth::new(2024, 7),
        ]
    );
    assert_close(monthly[1].revenue, 60.0);
    assert_eq!(monthly[1].units_sold, 6);
}

#[test]
fn test_correlation_self_is_exactly_one() {
    let records: Vec<SalesRecord> = vec![
        record("2024-06-01", "WidgetA", "East", 10, 100.0),
        record("2024-06-02", "WidgetB", "West", 5, 50.0),
    ];
    let rows: Vec<&SalesRecord> = filter_records(&records, &SalesFilter::none());

    let matrix: CorrelationMatrix = correlation_matrix(&rows);
    assert_eq!(matrix.columns, vec!["units_sold", "revenue"]);
    assert!(matrix.value("units_sold", "units_sold").unwrap() == 1.0);
    assert!(matrix.value("revenue", "revenue").unwrap() == 1.0);
}

#[test]
fn test_correlation_of_proportional_columns_is_one() {
    let records: Vec<SalesRecord> = vec![
        record("2024-06-01", "WidgetA", "East", 1, 10.0),
        record("2024-06-02", "WidgetA", "East", 2, 20.0),
        record("2024-06-03", "WidgetA", "East", 3, 30.0),
    ];
    let rows: Vec<&SalesRecord> = filter_records(&records, &SalesFilter::none());

    let matrix: CorrelationMatrix = correlation_matrix(&rows);
    assert_close(matrix.value("units_sold", "revenue").unwrap(), 1.0);
    assert_close(matrix.value("revenue", "units_sold").unwrap(), 1.0);
}

#[test]
fn test_correlation_of_constant_column_is_nan() {
    let records: Vec<SalesRecord> = vec![
        record("2024-06-01", "WidgetA", "East", 7, 10.0),
        record("2024-06-02", "WidgetA", "East", 7, 20.0),
    ];
    let rows: Vec<&SalesRecord> = filter_records(&records, &SalesFilter::none());

    let matrix: CorrelationMatrix = correlation_matrix(&rows);
    assert!(matrix.value("units_sold", "units_sold").unwrap().is_nan());
    assert!(matrix.value("units_sold", "revenue").unwrap().is_nan());
    assert!(matrix.value("revenue", "revenue").unwrap() == 1.0);
}

#[test]
fn test_correlation_excludes_columns_with_no_values() {
    let records: Vec<SalesRecord> = vec![
        SalesRecord::new(
            parse_sale_date("2024-06-01").unwrap(),
            Some(Product::new("WidgetA")),
            Some(Region::new("East")),
            None,
            Some(10.0),
        ),
        SalesRecord::new(
            parse_sale_date("2024-06-02").unwrap(),
            Some(Product::new("WidgetA")),
            Some(Region::new("East")),
            None,
            Some(20.0),
        ),
    ];
    let rows: Vec<&SalesRecord> = filter_records(&records, &SalesFilter::none());

    let matrix: CorrelationMatrix = correlation_matrix(&rows);
    assert_eq!(matrix.columns, vec!["revenue"]);
}

#[test]
fn test_kpis_fail_when_revenue_entirely_absent() {
    let records: Vec<SalesRecord> = vec![date_only_record("2024-06-01")];
    let rows: Vec<&SalesRecord> = filter_records(&records, &SalesFilter::none());

    let result = compute_kpis(&rows);
    assert_eq!(
        result,
        Err(AggregateError::ColumnMissing {
            column: String::from("revenue"),
        })
    );
}

#[test]
fn test_partial_absence_is_skipped_not_an_error() {
    let records: Vec<SalesRecord> = vec![
        record("2024-06-01", "WidgetA", "East", 10, 100.0),
        date_only_record("2024-06-02"),
    ];
    let rows: Vec<&SalesRecord> = filter_records(&records, &SalesFilter::none());

    let kpis: Kpis = compute_kpis(&rows).unwrap();
    assert_close(kpis.total_revenue, 100.0);
    assert_eq!(kpis.total_units, 10);

    // The date-only row still contributes a (zero) daily point.
    let daily = daily_series(&rows).unwrap();
    assert_eq!(daily.len(), 2);
    assert_close(daily[1].revenue, 0.0);
}

#[test]
fn test_empty_record_set_summarizes_to_zeroes() {
    let summary: DashboardSummary = summarize(&[], &SalesFilter::none()).unwrap();
    assert_close(summary.kpis.total_revenue, 0.0);
    assert_eq!(summary.kpis.total_units, 0);
    assert!(summary.daily.is_empty());
    assert!(summary.top_products.is_empty());
    assert!(summary.pivot.cells.is_empty());
    assert!(summary.monthly.is_empty());
    assert!(summary.correlation.columns.is_empty());
}

#[test]
fn test_distinct_values_are_sorted_and_skip_absent() {
    let records: Vec<SalesRecord> = vec![
        record("2024-06-01", "WidgetB", "West", 1, 10.0),
        record("2024-06-02", "WidgetA", "East", 1, 10.0),
        record("2024-06-03", "WidgetA", "East", 1, 10.0),
        date_only_record("2024-06-04"),
    ];

    assert_eq!(
        distinct_regions(&records),
        vec![Region::new("East"), Region::new("West")]
    );
    assert_eq!(
        distinct_products(&records),
        vec![Product::new("WidgetA"), Product::new("WidgetB")]
    );
}

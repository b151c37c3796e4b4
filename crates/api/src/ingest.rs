// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV reading for uploaded sales data.
//!
//! This module only turns CSV text into a raw tabular batch; schema
//! normalization and validation happen in the core normalizer. Read failures
//! here mean the file is not well-formed CSV at all (bad quoting, ragged
//! rows), as opposed to a batch that parses but violates the schema.

use csv::StringRecord;
use thiserror::Error;

use sales_dash::RawBatch;

/// Errors produced while reading uploaded CSV text.
#[derive(Debug, Error)]
pub enum CsvError {
    /// The header row could not be read.
    #[error("Failed to read CSV headers: {0}")]
    Headers(csv::Error),
    /// A data row could not be read.
    #[error("Failed to read CSV row {row}: {source}")]
    Record {
        /// The row number (1-based, excluding the header).
        row: usize,
        /// The underlying reader error.
        source: csv::Error,
    },
}

/// Reads uploaded CSV text into a raw batch.
///
/// The first row is the header; rows must all have the header's field count.
///
/// # Errors
///
/// Returns a `CsvError` if the text is not well-formed CSV.
pub fn read_csv(content: &str) -> Result<RawBatch, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(content.as_bytes());

    let headers: StringRecord = reader.headers().map_err(CsvError::Headers)?.clone();
    let columns: Vec<String> = headers.iter().map(ToString::to_string).collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record: StringRecord = result.map_err(|source| CsvError::Record {
            row: idx + 1,
            source,
        })?;
        rows.push(record.iter().map(ToString::to_string).collect());
    }

    Ok(RawBatch::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_headers_and_rows() {
        let csv: &str = "date,product,revenue\n2024-06-01,WidgetA,100\n2024-06-02,WidgetB,50\n";

        let batch: RawBatch = read_csv(csv).expect("well-formed CSV");
        assert_eq!(batch.columns(), ["date", "product", "revenue"]);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.rows()[0], vec!["2024-06-01", "WidgetA", "100"]);
    }

    #[test]
    fn test_read_csv_preserves_raw_header_text() {
        let csv: &str = " Date ,PRODUCT\n2024-06-01,WidgetA\n";

        let batch: RawBatch = read_csv(csv).expect("well-formed CSV");
        assert_eq!(batch.columns(), [" Date ", "PRODUCT"]);
    }

    #[test]
    fn test_read_csv_quoted_fields() {
        let csv: &str = "date,product\n2024-06-01,\"Widget, Deluxe\"\n";

        let batch: RawBatch = read_csv(csv).expect("well-formed CSV");
        assert_eq!(batch.rows()[0][1], "Widget, Deluxe");
    }

    #[test]
    fn test_read_csv_ragged_row_fails() {
        let csv: &str = "date,product\n2024-06-01\n";

        let result = read_csv(csv);
        match result {
            Err(CsvError::Record { row, .. }) => assert_eq!(row, 1),
            other => panic!("Expected Record error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_csv_header_only_yields_empty_batch() {
        let csv: &str = "date,product\n";

        let batch: RawBatch = read_csv(csv).expect("well-formed CSV");
        assert!(batch.is_empty());
    }
}

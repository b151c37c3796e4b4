// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sales_dash_domain::DomainError;

/// Errors that reject an uploaded batch during normalization.
///
/// Validation is batch-level: a single bad value rejects the whole upload
/// rather than silently dropping rows.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// No uploaded column normalizes to `date`.
    MissingDateColumn {
        /// The columns that were found, as uploaded.
        columns: Vec<String>,
    },
    /// A cell value failed field-level parsing.
    InvalidValue {
        /// The row number (1-based, excluding the header).
        row: usize,
        /// The normalized column name.
        column: String,
        /// The underlying field error.
        source: DomainError,
    },
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDateColumn { columns } => {
                write!(
                    f,
                    "Column 'date' not found in uploaded data (columns present: {})",
                    columns.join(", ")
                )
            }
            Self::InvalidValue {
                row,
                column,
                source,
            } => {
                write!(f, "Row {row}, column '{column}': {source}")
            }
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingDateColumn { .. } => None,
            Self::InvalidValue { source, .. } => Some(source),
        }
    }
}

/// Errors that can occur while computing aggregates.
///
/// Empty filtered subsets are not errors; the only failure mode is a column
/// with no present values in a non-empty subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// A column required by the requested aggregate has no values.
    ColumnMissing {
        /// The normalized column name.
        column: String,
    },
}

impl std::fmt::Display for AggregateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ColumnMissing { column } => {
                write!(f, "Column '{column}' has no values in the selected data")
            }
        }
    }
}

impl std::error::Error for AggregateError {}

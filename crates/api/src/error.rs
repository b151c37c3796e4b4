// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use sales_dash::{AggregateError, SchemaError};
use sales_dash_persistence::PersistenceError;

use crate::ingest::CsvError;

/// API-level errors.
///
/// These are distinct from core/persistence errors and represent the API
/// contract. Inner errors are translated explicitly so they are never
/// leaked raw to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The uploaded file is not well-formed CSV.
    InvalidCsvFormat {
        /// A human-readable description of the problem.
        reason: String,
    },
    /// The uploaded batch violates the sales schema.
    SchemaViolation {
        /// A human-readable description of the violation.
        message: String,
    },
    /// An aggregate could not be computed over the stored data.
    AggregationFailed {
        /// A human-readable description of the failure.
        message: String,
    },
    /// The storage layer failed.
    StorageFailed {
        /// A human-readable description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCsvFormat { reason } => {
                write!(f, "Invalid CSV: {reason}")
            }
            Self::SchemaViolation { message } => {
                write!(f, "Schema violation: {message}")
            }
            Self::AggregationFailed { message } => {
                write!(f, "Aggregation failed: {message}")
            }
            Self::StorageFailed { message } => {
                write!(f, "Storage failure: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<CsvError> for ApiError {
    fn from(err: CsvError) -> Self {
        Self::InvalidCsvFormat {
            reason: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self::StorageFailed {
            message: err.to_string(),
        }
    }
}

/// Translates a normalization error into an API error.
///
/// This translation is explicit and ensures schema errors are not leaked
/// directly.
#[must_use]
pub fn translate_schema_error(err: SchemaError) -> ApiError {
    ApiError::SchemaViolation {
        message: err.to_string(),
    }
}

/// Translates an aggregation error into an API error.
#[must_use]
pub fn translate_aggregate_error(err: AggregateError) -> ApiError {
    ApiError::AggregationFailed {
        message: err.to_string(),
    }
}

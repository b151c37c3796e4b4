// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while parsing or validating sales record fields.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Failed to parse a date value.
    DateParse {
        /// The raw value that could not be parsed.
        value: String,
    },
    /// Failed to parse a unit count.
    UnitsParse {
        /// The raw value that could not be parsed.
        value: String,
    },
    /// Failed to parse a revenue amount.
    RevenueParse {
        /// The raw value that could not be parsed.
        value: String,
    },
    /// Revenue must be non-negative.
    NegativeRevenue {
        /// The offending value.
        value: f64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateParse { value } => {
                write!(
                    f,
                    "Failed to parse date '{value}': expected YYYY-MM-DD, YYYY/MM/DD, or MM/DD/YYYY"
                )
            }
            Self::UnitsParse { value } => {
                write!(
                    f,
                    "Failed to parse units_sold '{value}': expected a non-negative integer"
                )
            }
            Self::RevenueParse { value } => {
                write!(f, "Failed to parse revenue '{value}': expected a number")
            }
            Self::NegativeRevenue { value } => {
                write!(f, "Revenue must be non-negative, got {value}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// A calendar month (year plus month, day ignored).
///
/// Used as the grouping key for the monthly trend aggregate. Ordering is
/// chronological: years compare first, then months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SalesMonth {
    year: i32,
    month: u8,
}

impl SalesMonth {
    /// Creates a month key from its parts.
    #[must_use]
    pub const fn new(year: i32, month: u8) -> Self {
        Self { year, month }
    }

    /// Extracts the month key from a calendar date.
    #[must_use]
    pub const fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
        }
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month number (1-12).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }
}

impl std::fmt::Display for SalesMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

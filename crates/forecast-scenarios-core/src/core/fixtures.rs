// crates/forecast-scenarios-core/src/core/fixtures.rs
// ============================================================================
// Module: Synthetic Series Fixtures
// Description: Deterministic, time-indexed numeric tables for scenarios.
// Purpose: Produce byte-identical fixture data from shape parameters and a seed.
// Dependencies: rand, serde, time
// ============================================================================

//! ## Overview
//! Fixtures are generated once, when scenarios are defined, from a fixed
//! seed. The generator is a pure function of `(n_timepoints, n_columns,
//! random_state)`: the same inputs always yield the same table, in every
//! process, so parallel test workers observe identical arguments.
//!
//! The standard generator draws standard-normal values row by row, then
//! shifts every column so its minimum sits at `1.0`. Rows are indexed by
//! consecutive calendar days starting at 2000-01-01.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::f64::consts::TAU;
use std::ops::Range;

use rand::Rng;
use rand::SeedableRng;
use rand::distributions::Standard;
use rand::rngs::StdRng;
use serde::Serialize;
use thiserror::Error;
use time::Date;
use time::Duration;
use time::Month;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum number of cells (`n_timepoints * n_columns`) in one fixture.
pub const MAX_FIXTURE_CELLS: usize = 1 << 20;

/// First calendar day of every generated index.
const INDEX_START_YEAR: i32 = 2000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while generating or slicing fixtures.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    /// Requested shape has zero rows, zero columns, or too many cells.
    #[error("invalid fixture shape: {n_timepoints} timepoints x {n_columns} columns")]
    InvalidShape {
        /// Requested number of rows.
        n_timepoints: usize,
        /// Requested number of columns.
        n_columns: usize,
    },
    /// Positional slice is empty or exceeds the table length.
    #[error("invalid fixture slice {start}..{end} for {len} rows")]
    InvalidSlice {
        /// Slice start (inclusive).
        start: usize,
        /// Slice end (exclusive).
        end: usize,
        /// Number of rows in the table.
        len: usize,
    },
    /// Calendar index could not be constructed.
    #[error("fixture index overflow: {0}")]
    Calendar(String),
}

// ============================================================================
// SECTION: Series Table
// ============================================================================

/// Time-indexed numeric table.
///
/// # Invariants
/// - `rows.len() == index.len() >= 1`.
/// - Every row has exactly `columns.len() >= 1` values.
/// - Index entries are strictly increasing calendar days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesTable {
    /// Row index.
    index: Vec<Date>,
    /// Column names.
    columns: Vec<String>,
    /// Row-major values.
    rows: Vec<Vec<f64>>,
}

impl SeriesTable {
    /// Returns the number of rows.
    #[must_use]
    pub const fn n_timepoints(&self) -> usize {
        self.index.len()
    }

    /// Returns the number of value columns.
    #[must_use]
    pub const fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns true when the table holds a single value column.
    #[must_use]
    pub const fn is_univariate(&self) -> bool {
        self.columns.len() == 1
    }

    /// Returns the row index.
    #[must_use]
    pub fn index(&self) -> &[Date] {
        &self.index
    }

    /// Returns the column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the row-major values.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Returns the value at the given row and column position.
    #[must_use]
    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.rows.get(row).and_then(|values| values.get(column)).copied()
    }

    /// Returns a copy of one column's values in row order.
    #[must_use]
    pub fn column_values(&self, column: usize) -> Option<Vec<f64>> {
        if column >= self.columns.len() {
            return None;
        }
        Some(self.rows.iter().filter_map(|row| row.get(column).copied()).collect())
    }

    /// Returns the rows in `range` as a new table, keeping their index labels.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidSlice`] when the range is empty or
    /// extends past the last row.
    pub fn slice(&self, range: Range<usize>) -> Result<Self, FixtureError> {
        let len = self.rows.len();
        if range.start >= range.end || range.end > len {
            return Err(FixtureError::InvalidSlice {
                start: range.start,
                end: range.end,
                len,
            });
        }
        Ok(Self {
            index: self.index[range.clone()].to_vec(),
            columns: self.columns.clone(),
            rows: self.rows[range].to_vec(),
        })
    }
}

// ============================================================================
// SECTION: Generator Interface
// ============================================================================

/// Deterministic fixture generator.
///
/// Implementations must be pure: equal arguments yield equal tables.
pub trait SeriesGenerator {
    /// Builds a table with `n_timepoints` rows and `n_columns` value columns.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] when the shape is invalid or the index cannot
    /// be built.
    fn make_series(
        &self,
        n_timepoints: usize,
        n_columns: usize,
        random_state: u64,
    ) -> Result<SeriesTable, FixtureError>;
}

/// Seeded standard-normal generator with all-positive columns.
///
/// # Invariants
/// - Zero-sized marker type; carries no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNormalGenerator;

impl SeriesGenerator for StandardNormalGenerator {
    fn make_series(
        &self,
        n_timepoints: usize,
        n_columns: usize,
        random_state: u64,
    ) -> Result<SeriesTable, FixtureError> {
        validate_shape(n_timepoints, n_columns)?;
        let mut rng = StdRng::seed_from_u64(random_state);
        let mut rows = Vec::with_capacity(n_timepoints);
        for _ in 0 .. n_timepoints {
            let row: Vec<f64> = (0 .. n_columns).map(|_| standard_normal(&mut rng)).collect();
            rows.push(row);
        }
        shift_columns_positive(&mut rows, n_columns);
        Ok(SeriesTable {
            index: daily_index(n_timepoints)?,
            columns: (0 .. n_columns).map(|column| column.to_string()).collect(),
            rows,
        })
    }
}

/// Builds a fixture with the standard generator.
///
/// # Errors
///
/// Returns [`FixtureError`] when the shape is invalid.
pub fn make_series(
    n_timepoints: usize,
    n_columns: usize,
    random_state: u64,
) -> Result<SeriesTable, FixtureError> {
    StandardNormalGenerator.make_series(n_timepoints, n_columns, random_state)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Rejects empty or oversized shapes.
const fn validate_shape(n_timepoints: usize, n_columns: usize) -> Result<(), FixtureError> {
    let too_large = match n_timepoints.checked_mul(n_columns) {
        Some(cells) => cells > MAX_FIXTURE_CELLS,
        None => true,
    };
    if n_timepoints == 0 || n_columns == 0 || too_large {
        return Err(FixtureError::InvalidShape {
            n_timepoints,
            n_columns,
        });
    }
    Ok(())
}

/// Draws one standard-normal value using the Box-Muller transform.
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.sample(Standard);
    let u2: f64 = rng.sample(Standard);
    // 1 - u1 lies in (0, 1], keeping ln finite.
    let radius = (-2.0 * (1.0 - u1).ln()).sqrt();
    radius * (TAU * u2).cos()
}

/// Shifts each column so its minimum becomes 1.
fn shift_columns_positive(rows: &mut [Vec<f64>], n_columns: usize) {
    for column in 0 .. n_columns {
        let min = rows.iter().filter_map(|row| row.get(column)).copied().fold(f64::INFINITY, f64::min);
        let offset = min - 1.0;
        for row in rows.iter_mut() {
            if let Some(value) = row.get_mut(column) {
                *value -= offset;
            }
        }
    }
}

/// Builds `len` consecutive calendar days starting at 2000-01-01.
fn daily_index(len: usize) -> Result<Vec<Date>, FixtureError> {
    let start = Date::from_calendar_date(INDEX_START_YEAR, Month::January, 1)
        .map_err(|err| FixtureError::Calendar(err.to_string()))?;
    let mut index = Vec::with_capacity(len);
    for offset in 0 .. len {
        let days =
            i64::try_from(offset).map_err(|err| FixtureError::Calendar(err.to_string()))?;
        let day = start
            .checked_add(Duration::days(days))
            .ok_or_else(|| FixtureError::Calendar(format!("day offset {days} out of range")))?;
        index.push(day);
    }
    Ok(index)
}

//! # Table Interpolation
//!
//! Digitized code charts are read through two small types:
//!
//! - [`InterpolationTable`] - a 1-D breakpoint/value table with clamped
//!   linear interpolation
//! - [`Grid2D`] - rows of tables keyed by a primary axis, all sharing the
//!   same secondary-axis breakpoints
//!
//! Lookups outside the tabulated range saturate at the end values, the way a
//! chart is read at its edges. Lookups never fail; malformed tables are
//! rejected at construction.
//!
//! ## Example
//!
//! ```rust
//! use slab_core::interpolation::InterpolationTable;
//!
//! let t = InterpolationTable::new("demo", vec![1.0, 2.0], vec![10.0, 20.0]).unwrap();
//! assert_eq!(t.lookup(1.5), 15.0);
//! assert_eq!(t.lookup(0.0), 10.0); // clamped
//! assert_eq!(t.lookup(9.0), 20.0); // clamped
//! ```

use serde::Serialize;

use crate::errors::{CalcError, CalcResult};

/// Immutable 1-D lookup table with clamped linear interpolation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpolationTable {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl InterpolationTable {
    /// Build a table from strictly increasing breakpoints and parallel values.
    ///
    /// `name` only labels the error if the data is malformed.
    pub fn new(name: &str, x: Vec<f64>, y: Vec<f64>) -> CalcResult<Self> {
        if x.len() != y.len() {
            return Err(CalcError::invalid_table(
                name,
                format!("{} breakpoints but {} values", x.len(), y.len()),
            ));
        }
        if x.len() < 2 {
            return Err(CalcError::invalid_table(name, "at least 2 points are required"));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(CalcError::invalid_table(name, "all points must be finite"));
        }
        if let Some(w) = x.windows(2).find(|w| w[1] <= w[0]) {
            return Err(CalcError::invalid_table(
                name,
                format!("breakpoints must be strictly increasing ({} then {})", w[0], w[1]),
            ));
        }
        Ok(InterpolationTable { x, y })
    }

    /// Interpolated value at `x`, clamped to the end values outside the range.
    pub fn lookup(&self, x: f64) -> f64 {
        let n = self.x.len();
        if x <= self.x[0] {
            return self.y[0];
        }
        if x >= self.x[n - 1] {
            return self.y[n - 1];
        }
        for i in 0..n - 1 {
            let (x0, x1) = (self.x[i], self.x[i + 1]);
            // Half-open interval so an interior breakpoint returns its own value exactly
            if x >= x0 && x < x1 {
                let t = (x - x0) / (x1 - x0);
                return self.y[i] + t * (self.y[i + 1] - self.y[i]);
            }
        }
        // NaN falls through every comparison above
        self.y[n - 1]
    }

    /// Tabulated breakpoints
    pub fn breakpoints(&self) -> &[f64] {
        &self.x
    }

    /// Tabulated values
    pub fn values(&self) -> &[f64] {
        &self.y
    }

    /// First and last breakpoint
    pub fn range(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }
}

/// Two-axis table: one [`InterpolationTable`] per primary-axis value.
///
/// Lookup is a two-pass scheme (rows at the secondary value first, then the
/// derived column along the primary axis), which is how the design charts are
/// read by hand. It is not the same as a single bilinear formula and must not
/// be replaced by one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid2D {
    primary: Vec<f64>,
    rows: Vec<InterpolationTable>,
}

impl Grid2D {
    /// Build a grid from primary breakpoints, shared secondary breakpoints and
    /// one row of values per primary breakpoint.
    pub fn new(name: &str, primary: Vec<f64>, secondary: Vec<f64>, rows: Vec<Vec<f64>>) -> CalcResult<Self> {
        if rows.len() != primary.len() {
            return Err(CalcError::invalid_table(
                name,
                format!("{} primary breakpoints but {} rows", primary.len(), rows.len()),
            ));
        }
        // Validates the primary axis itself
        InterpolationTable::new(name, primary.clone(), vec![0.0; primary.len()])?;

        let rows = rows
            .into_iter()
            .map(|row| InterpolationTable::new(name, secondary.clone(), row))
            .collect::<CalcResult<Vec<_>>>()?;

        Ok(Grid2D { primary, rows })
    }

    /// Two-pass interpolated value at (`primary`, `secondary`).
    pub fn lookup(&self, primary: f64, secondary: f64) -> f64 {
        let column: Vec<f64> = self.rows.iter().map(|row| row.lookup(secondary)).collect();
        // Axis validated in `new`, so this cannot fail; build it unchecked.
        let derived = InterpolationTable {
            x: self.primary.clone(),
            y: column,
        };
        derived.lookup(primary)
    }

    /// Primary-axis breakpoints
    pub fn primary_axis(&self) -> &[f64] {
        &self.primary
    }

    /// Shared secondary-axis breakpoints
    pub fn secondary_axis(&self) -> &[f64] {
        self.rows[0].breakpoints()
    }

    /// Tabulated row for the primary breakpoint at `index`
    pub fn row(&self, index: usize) -> Option<&InterpolationTable> {
        self.rows.get(index)
    }
}

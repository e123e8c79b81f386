//! # IS 456 Code Tables
//!
//! Digitized design charts used by the slab workflow, each exposed only
//! through [`InterpolationTable`] or [`Grid2D`]:
//!
//! | Table       | Axes                          | Used for                     |
//! |-------------|-------------------------------|------------------------------|
//! | Table 27    | ly/lx → αx, αy                | two-way bending moments      |
//! | Table 19    | fck × p_t → τc                | shear strength cross-check   |
//! | Fig. 4      | p_t → allowable L/d           | deflection (basic ratio)     |
//! | Fig. 5      | aspect ratio → modifier       | deflection (panel modifier)  |
//!
//! [`CodeTables`] is built once and never mutated. Pass it by reference to
//! every design call, or use [`CodeTables::standard`] for the shared instance.
//!
//! ## Reference
//!
//! IS 456:2000, Plain and Reinforced Concrete - Code of Practice

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::errors::CalcResult;
use crate::interpolation::{Grid2D, InterpolationTable};

// ============================================================================
// IS 456 Clause References
// ============================================================================

/// IS 456 clause references recorded in the design step trace.
pub mod is456_ref {
    /// Effective span of slabs
    pub const EFFECTIVE_SPAN: &str = "IS 456 22.2";
    /// Span to effective depth ratios (control of deflection)
    pub const SPAN_DEPTH: &str = "IS 456 23.2.1";
    /// Nominal cover for exposure conditions
    pub const NOMINAL_COVER: &str = "IS 456 26.4, Table 16";
    /// Partial safety factors for loads
    pub const LOAD_FACTOR: &str = "IS 456 36.4, Table 18";
    /// Two-way slab moment coefficients (simply supported, corners free)
    pub const TWO_WAY_MOMENTS: &str = "IS 456 Annex D-2, Table 27";
    /// Flexural design of singly reinforced sections
    pub const FLEXURE: &str = "IS 456 38.1, Annex G-1.1";
    /// Minimum reinforcement in slabs
    pub const MIN_STEEL: &str = "IS 456 26.5.2.1";
    /// Design shear strength of concrete
    pub const SHEAR_STRENGTH: &str = "IS 456 40.2, Table 19";
    /// Maximum spacing of slab reinforcement
    pub const BAR_SPACING: &str = "IS 456 26.3.3";
    /// Deflection modification factors
    pub const DEFLECTION_MODIFIERS: &str = "IS 456 23.2.1, Fig. 4 & Fig. 5";
    /// Environmental exposure conditions
    pub const EXPOSURE: &str = "IS 456 8.2.2, Table 3";
    /// Control of cracking
    pub const CRACKING: &str = "IS 456 35.3.2";
}

// ============================================================================
// Tabulated Data
// ============================================================================

/// Table 27 aspect ratios ly/lx
const TABLE27_LY_LX: [f64; 10] = [1.0, 1.1, 1.2, 1.3, 1.4, 1.5, 1.75, 2.0, 2.5, 3.0];
/// Table 27 short-span coefficient αx
const TABLE27_ALPHA_X: [f64; 10] = [0.062, 0.074, 0.084, 0.093, 0.099, 0.104, 0.113, 0.118, 0.122, 0.124];
/// Table 27 long-span coefficient αy
const TABLE27_ALPHA_Y: [f64; 10] = [0.062, 0.061, 0.059, 0.055, 0.051, 0.046, 0.037, 0.029, 0.020, 0.014];

/// Table 19 concrete grades fck (MPa); M40 and above share the last row
const TABLE19_FCK: [f64; 6] = [15.0, 20.0, 25.0, 30.0, 35.0, 40.0];
/// Table 19 tension steel ratio p_t (%)
const TABLE19_PT: [f64; 13] = [0.15, 0.25, 0.50, 0.75, 1.00, 1.25, 1.50, 1.75, 2.00, 2.25, 2.50, 2.75, 3.00];
/// Table 19 design shear strength τc (N/mm²), one row per grade
const TABLE19_TAU_C: [[f64; 13]; 6] = [
    [0.28, 0.35, 0.46, 0.54, 0.60, 0.64, 0.68, 0.71, 0.71, 0.71, 0.71, 0.71, 0.71],
    [0.28, 0.36, 0.48, 0.56, 0.62, 0.67, 0.72, 0.75, 0.79, 0.81, 0.82, 0.82, 0.82],
    [0.29, 0.36, 0.49, 0.57, 0.64, 0.70, 0.74, 0.78, 0.82, 0.85, 0.88, 0.90, 0.92],
    [0.29, 0.37, 0.50, 0.59, 0.66, 0.71, 0.76, 0.80, 0.84, 0.88, 0.91, 0.94, 0.96],
    [0.29, 0.37, 0.50, 0.59, 0.67, 0.73, 0.78, 0.82, 0.86, 0.90, 0.93, 0.96, 0.99],
    [0.30, 0.38, 0.51, 0.60, 0.68, 0.74, 0.79, 0.84, 0.88, 0.92, 0.95, 0.98, 1.01],
];

/// Fig. 4 (sampled) steel ratio p_t (%)
const FIG4_PT: [f64; 7] = [0.05, 0.1, 0.2, 0.4, 0.8, 1.2, 2.0];
/// Fig. 4 (sampled) basic allowable L/d for a simply supported slab
const FIG4_ALLOWED_LD: [f64; 7] = [18.0, 20.0, 22.5, 25.0, 28.0, 30.0, 35.0];

/// Fig. 5 (sampled) panel aspect ratio
const FIG5_ASPECT: [f64; 5] = [1.0, 1.25, 1.5, 2.0, 3.0];
/// Fig. 5 (sampled) modifier applied to the basic allowable L/d
const FIG5_MODIFIER: [f64; 5] = [1.00, 0.98, 0.95, 0.92, 0.88];

static STANDARD: Lazy<CodeTables> =
    Lazy::new(|| CodeTables::is456().expect("built-in IS 456 tables are well-formed"));

/// Immutable set of digitized IS 456 design tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeTables {
    /// Table 27: ly/lx → αx
    pub alpha_x: InterpolationTable,
    /// Table 27: ly/lx → αy
    pub alpha_y: InterpolationTable,
    /// Table 19: (fck, p_t) → τc
    pub shear_strength: Grid2D,
    /// Fig. 4: p_t → basic allowable L/d
    pub allowable_span_depth: InterpolationTable,
    /// Fig. 5: aspect ratio → L/d modifier
    pub span_depth_modifier: InterpolationTable,
}

impl CodeTables {
    /// Build and validate the IS 456 tables.
    pub fn is456() -> CalcResult<Self> {
        Ok(CodeTables {
            alpha_x: InterpolationTable::new("Table 27 αx", TABLE27_LY_LX.to_vec(), TABLE27_ALPHA_X.to_vec())?,
            alpha_y: InterpolationTable::new("Table 27 αy", TABLE27_LY_LX.to_vec(), TABLE27_ALPHA_Y.to_vec())?,
            shear_strength: Grid2D::new(
                "Table 19 τc",
                TABLE19_FCK.to_vec(),
                TABLE19_PT.to_vec(),
                TABLE19_TAU_C.iter().map(|row| row.to_vec()).collect(),
            )?,
            allowable_span_depth: InterpolationTable::new("Fig. 4 L/d", FIG4_PT.to_vec(), FIG4_ALLOWED_LD.to_vec())?,
            span_depth_modifier: InterpolationTable::new("Fig. 5 modifier", FIG5_ASPECT.to_vec(), FIG5_MODIFIER.to_vec())?,
        })
    }

    /// Shared process-wide instance of the IS 456 tables.
    pub fn standard() -> &'static CodeTables {
        &STANDARD
    }

    /// Table 27 moment coefficients (αx, αy) for a panel aspect ratio ly/lx.
    pub fn moment_coefficients(&self, ly_lx: f64) -> (f64, f64) {
        (self.alpha_x.lookup(ly_lx), self.alpha_y.lookup(ly_lx))
    }

    /// Table 19 design shear strength τc (N/mm²).
    pub fn tau_c(&self, fck: f64, p_t_percent: f64) -> f64 {
        self.shear_strength.lookup(fck, p_t_percent)
    }

    /// Allowable span/effective-depth ratio: Fig. 4 basic value × Fig. 5 modifier.
    pub fn allowable_span_depth_ratio(&self, p_t_percent: f64, aspect_ratio: f64) -> f64 {
        self.allowable_span_depth.lookup(p_t_percent) * self.span_depth_modifier.lookup(aspect_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_builtin_tables_are_valid() {
        assert!(CodeTables::is456().is_ok());
        assert_eq!(CodeTables::standard(), &CodeTables::is456().unwrap());
    }

    #[test]
    fn test_square_panel_reads_first_row() {
        let (ax, ay) = CodeTables::standard().moment_coefficients(1.0);
        assert_eq!(ax, 0.062);
        assert_eq!(ay, 0.062);
    }

    #[test]
    fn test_moment_coefficient_interpolation() {
        let (ax, ay) = CodeTables::standard().moment_coefficients(1.25);
        assert_relative_eq!(ax, 0.0885, epsilon = 1e-12);
        assert_relative_eq!(ay, 0.057, epsilon = 1e-12);
    }

    #[test]
    fn test_moment_coefficients_clamp_beyond_table() {
        let tables = CodeTables::standard();
        assert_eq!(tables.moment_coefficients(4.0), (0.124, 0.014));
        assert_eq!(tables.moment_coefficients(0.5), (0.062, 0.062));
    }

    #[test]
    fn test_table19_nodes() {
        let tables = CodeTables::standard();
        assert_eq!(tables.tau_c(25.0, 0.25), 0.36);
        assert_eq!(tables.tau_c(20.0, 1.00), 0.62);
        // M50 is read as M40
        assert_eq!(tables.tau_c(50.0, 0.50), 0.51);
    }

    #[test]
    fn test_table19_between_grades() {
        // Halfway between M20 (0.48) and M25 (0.49) at p_t = 0.5
        assert_relative_eq!(CodeTables::standard().tau_c(22.5, 0.5), 0.485, epsilon = 1e-12);
    }

    #[test]
    fn test_allowable_span_depth() {
        let tables = CodeTables::standard();
        assert_eq!(tables.allowable_span_depth_ratio(0.4, 1.0), 25.0);
        assert_relative_eq!(tables.allowable_span_depth_ratio(0.4, 1.5), 25.0 * 0.95, epsilon = 1e-12);
    }
}

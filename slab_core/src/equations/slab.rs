//! # Slab Formulas
//!
//! Span, weight and strip action formulas for slabs designed as 1 m wide
//! strips.
//!
//! ## Notation
//!
//! - `Lc` = Clear span (m)
//! - `L` = Effective span (m)
//! - `d` = Effective depth (mm)
//! - `D` = Overall depth (mm)
//! - `w` = Uniform load on the strip (kN/m)
//! - `lx`, `ly` = Short and long spans of a two-way panel (m)
//! - `αx`, `αy` = Table 27 moment coefficients
//!
//! ## Sign Conventions
//!
//! - Loads: Positive downward
//! - Moment: Positive sagging
//!
//! ## References
//!
//! - IS 456:2000 Clause 22.2 (effective span), 24.4 and Annex D (two-way slabs)

// =============================================================================
// GEOMETRY
// =============================================================================

/// Effective span of a simply supported slab (IS 456 22.2 a)
///
/// ```text
///      ├──── Lc ────┤
///  ▓▓▓▓              ▓▓▓▓
///  ▓▓▓▓──────────────▓▓▓▓
///  ├ t ┤            ├ t ┤
/// ```
///
/// # Formula
/// L = min(Lc + d, Lc + t)
///
/// # Arguments
/// * `clear_span_m` - Clear span between support faces (m)
/// * `d_mm` - Effective depth (mm)
/// * `support_width_m` - Width of the supporting wall or beam (m)
#[inline]
pub fn effective_span(clear_span_m: f64, d_mm: f64, support_width_m: f64) -> f64 {
    (clear_span_m + d_mm / 1000.0).min(clear_span_m + support_width_m)
}

/// Effective depth needed for a basic span/depth ratio (mm)
///
/// # Formula
/// d = max(L·1000 / (L/d), d_min)
#[inline]
pub fn depth_for_span_ratio(span_m: f64, span_depth_ratio: f64, min_depth_mm: f64) -> f64 {
    (span_m * 1000.0 / span_depth_ratio).max(min_depth_mm)
}

/// Overall depth from effective depth (mm)
///
/// # Formula
/// D = d + cover + ø/2
#[inline]
pub fn overall_depth(d_mm: f64, cover_mm: f64, bar_dia_mm: f64) -> f64 {
    d_mm + cover_mm + bar_dia_mm / 2.0
}

// =============================================================================
// LOADS
// =============================================================================

/// Self weight of a slab per unit area (kN/m²)
///
/// # Formula
/// g = γc · D
#[inline]
pub fn self_weight(overall_depth_mm: f64, unit_weight_kn_m3: f64) -> f64 {
    unit_weight_kn_m3 * overall_depth_mm / 1000.0
}

/// Partition allowance derived from the thickness of walls carried (kN/m²)
///
/// # Formula
/// q = q₁₁₅ · t / 115
#[inline]
pub fn partition_allowance(wall_thickness_mm: f64, load_per_115mm: f64) -> f64 {
    load_per_115mm * wall_thickness_mm / 115.0
}

// =============================================================================
// STRIP ACTIONS
// =============================================================================

/// Maximum moment of a simply supported strip under uniform load
///
/// # Formula
/// M = wL²/8
#[inline]
pub fn simply_supported_moment(w: f64, l: f64) -> f64 {
    w * l * l / 8.0
}

/// Maximum shear of a simply supported strip under uniform load
///
/// # Formula
/// V = wL/2
#[inline]
pub fn simply_supported_shear(w: f64, l: f64) -> f64 {
    w * l / 2.0
}

/// Two-way panel moment per unit width from a Table 27 coefficient
///
/// # Formula
/// M = α · w · L²
///
/// Table 27 coefficients for both directions are applied to the span they
/// belong to: `Mx = αx·w·lx²`, `My = αy·w·ly²`.
#[inline]
pub fn two_way_moment(alpha: f64, w: f64, span: f64) -> f64 {
    alpha * w * span * span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_span_governed_by_support() {
        // Zero-width support: effective span equals clear span
        assert!((effective_span(4.0, 200.0, 0.0) - 4.0).abs() < 1e-12);
        // Wide support: clear span plus d governs
        assert!((effective_span(4.0, 200.0, 0.3) - 4.2).abs() < 1e-12);
    }

    #[test]
    fn test_depth_floor() {
        assert!((depth_for_span_ratio(4.0, 20.0, 100.0) - 200.0).abs() < 1e-12);
        assert!((depth_for_span_ratio(1.0, 20.0, 100.0) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_overall_depth() {
        assert!((overall_depth(200.0, 20.0, 10.0) - 225.0).abs() < 1e-12);
    }

    #[test]
    fn test_self_weight() {
        // 225 mm at 25 kN/m³
        assert!((self_weight(225.0, 25.0) - 5.625).abs() < 1e-12);
    }

    #[test]
    fn test_partition_allowance() {
        assert!((partition_allowance(230.0, 3.5) - 7.0).abs() < 1e-12);
        assert_eq!(partition_allowance(0.0, 3.5), 0.0);
    }

    #[test]
    fn test_strip_actions() {
        assert!((simply_supported_moment(13.6875, 4.0) - 27.375).abs() < 1e-12);
        assert!((simply_supported_shear(13.6875, 4.0) - 27.375).abs() < 1e-12);
        assert!((two_way_moment(0.062, 10.0, 4.0) - 9.92).abs() < 1e-12);
    }
}

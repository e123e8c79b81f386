//! # Flexural Design of Singly Reinforced Sections
//!
//! Limit-state flexure per IS 456 38.1 for a rectangular section with tension
//! steel only.
//!
//! ## Notation
//!
//! - `Mu` = Factored design moment (N·mm)
//! - `Ast` = Area of tension steel (mm²)
//! - `b` = Width of section (mm), 1000 for a unit strip
//! - `d` = Effective depth (mm)
//! - `x` = Neutral-axis depth (mm)
//! - `fck`, `fy` = Concrete and steel characteristic strengths (MPa)
//!
//! ## Stress Block
//!
//! ```text
//!   ┌──────────────┐ ─┬─  0.36·fck·b·x   (compression resultant at 0.42x)
//!   │▓▓▓▓▓▓▓▓▓▓▓▓▓▓│  x
//!   │──────────────│ ─┴─  neutral axis
//!   │              │
//!   │   ●  ●  ●    │ ───  0.87·fy·Ast    (tension resultant at d)
//!   └──────────────┘
//! ```
//!
//! Equilibrium `0.36·fck·b·x = 0.87·fy·Ast` and
//! `Mu = 0.87·fy·Ast·(d − 0.42x)` make `Mu` a quadratic in `Ast`. The
//! required area is its smaller root, solved in closed form.
//!
//! ## References
//!
//! - IS 456:2000 Clause 38.1 and Annex G-1.1

use crate::errors::{CalcError, CalcResult};
use crate::materials::limiting_depth_ratio;

/// Compression resultant factor of the stress block (0.36·fck·b·x)
pub const STRESS_BLOCK_FACTOR: f64 = 0.36;
/// Design strength factor for steel (fy / γm = 0.87·fy)
pub const STEEL_STRENGTH_FACTOR: f64 = 0.87;
/// Depth of the compression resultant below the top fiber, as a fraction of x
pub const CENTROID_FACTOR: f64 = 0.42;

/// Neutral-axis depth from force equilibrium
///
/// # Formula
/// x = 0.87·fy·Ast / (0.36·fck·b)
#[inline]
pub fn neutral_axis_depth(ast: f64, b: f64, fck: f64, fy: f64) -> f64 {
    STEEL_STRENGTH_FACTOR * fy * ast / (STRESS_BLOCK_FACTOR * fck * b)
}

/// Moment of resistance of a given steel area
///
/// # Formula
/// Mu = 0.87·fy·Ast·(d − 0.42·x)
///
/// # Returns
/// Moment capacity in N·mm (mm and MPa inputs)
#[inline]
pub fn moment_capacity(ast: f64, d: f64, b: f64, fck: f64, fy: f64) -> f64 {
    let x = neutral_axis_depth(ast, b, fck, fy);
    STEEL_STRENGTH_FACTOR * fy * ast * (d - CENTROID_FACTOR * x)
}

/// Limiting moment of resistance of a balanced section
///
/// # Formula
/// Mu,lim = 0.36·k·(1 − 0.42·k)·fck·b·d²,  k = xu,max/d
pub fn limiting_moment(d: f64, b: f64, fck: f64, fy: f64) -> f64 {
    let k = limiting_depth_ratio(fy);
    STRESS_BLOCK_FACTOR * k * (1.0 - CENTROID_FACTOR * k) * fck * b * d * d
}

/// Required tension steel for a factored moment.
///
/// Written as a quadratic in `Ast`:
///
/// ```text
/// a·Ast² − T·d·Ast + Mu = 0,   T = 0.87·fy,   a = 0.42·T² / (0.36·fck·b)
/// ```
///
/// the practical (under-reinforced) root is
///
/// ```text
/// Ast = T·d/(2a) · [1 − √(1 − 4a·Mu/(T·d)²)]
///     ≈ 0.4926·(fck/fy)·b·d · [1 − √(1 − 4.667·Mu/(fck·b·d²))]
/// ```
///
/// which is IS 456 Annex G-1.1 (`0.5` and `4.6` are its rounded constants),
/// evaluated as `2·Mu / (T·d·(1 + √disc))` to avoid cancellation at small
/// moments.
///
/// # Errors
/// - `InvalidInput` if `Mu < 0` or `d`, `b`, `fck`, `fy` are not positive
/// - `InsufficientDepth` if the discriminant is negative or the resulting
///   neutral axis falls below the steel (section cannot act as singly reinforced)
///
/// # Example
/// ```rust
/// use slab_core::equations::flexure::{moment_capacity, solve_ast};
///
/// let ast = solve_ast(20.0e6, 150.0, 1000.0, 25.0, 500.0).unwrap();
/// assert!((ast - 320.4).abs() < 1.0);
/// let back = moment_capacity(ast, 150.0, 1000.0, 25.0, 500.0);
/// assert!((back - 20.0e6).abs() / 20.0e6 < 1e-9);
/// ```
pub fn solve_ast(mu_nmm: f64, d: f64, b: f64, fck: f64, fy: f64) -> CalcResult<f64> {
    if !(mu_nmm.is_finite() && mu_nmm >= 0.0) {
        return Err(CalcError::invalid_input(
            "mu_nmm",
            mu_nmm.to_string(),
            "Design moment must be a non-negative number",
        ));
    }
    for (field, value) in [("d_mm", d), ("b_mm", b), ("fck_mpa", fck), ("fy_mpa", fy)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
        }
    }
    if mu_nmm == 0.0 {
        return Ok(0.0);
    }

    let t = STEEL_STRENGTH_FACTOR * fy;
    let a = CENTROID_FACTOR * t * t / (STRESS_BLOCK_FACTOR * fck * b);
    let disc = 1.0 - 4.0 * a * mu_nmm / (t * d).powi(2);
    if disc < 0.0 {
        return Err(CalcError::insufficient_depth(
            mu_nmm,
            d,
            "moment exceeds the singly reinforced capacity of the section; increase depth or add compression steel",
        ));
    }

    let ast = 2.0 * mu_nmm / (t * d * (1.0 + disc.sqrt()));
    if neutral_axis_depth(ast, b, fck, fy) > d {
        return Err(CalcError::insufficient_depth(
            mu_nmm,
            d,
            "neutral axis falls below the tension steel; increase depth or add compression steel",
        ));
    }
    Ok(ast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    /// IS 456 Annex G-1.1 with its rounded constants
    fn annex_g_ast(mu: f64, d: f64, b: f64, fck: f64, fy: f64) -> f64 {
        0.5 * (fck / fy) * b * d * (1.0 - (1.0 - 4.6 * mu / (fck * b * d * d)).sqrt())
    }

    #[test]
    fn test_matches_annex_g_within_one_percent() {
        let mu = 20.0e6;
        let ast = solve_ast(mu, 150.0, 1000.0, 25.0, 500.0).unwrap();
        let reference = annex_g_ast(mu, 150.0, 1000.0, 25.0, 500.0);
        assert!((ast - reference).abs() / reference < 0.01);
    }

    #[test]
    fn test_shallow_section_is_insufficient() {
        let err = solve_ast(20.0e6, 20.0, 1000.0, 25.0, 500.0).unwrap_err();
        assert_eq!(err.error_code(), "INSUFFICIENT_DEPTH");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_zero_moment_needs_no_steel() {
        assert_eq!(solve_ast(0.0, 150.0, 1000.0, 25.0, 500.0).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(solve_ast(-1.0, 150.0, 1000.0, 25.0, 500.0).is_err());
        assert!(solve_ast(1.0e6, 0.0, 1000.0, 25.0, 500.0).is_err());
        assert!(solve_ast(1.0e6, 150.0, 1000.0, 0.0, 500.0).is_err());
        assert!(solve_ast(f64::NAN, 150.0, 1000.0, 25.0, 500.0).is_err());
    }

    #[test]
    fn test_limiting_moment_fe500() {
        // Mu,lim ≈ 0.133·fck·b·d² for Fe500
        let mu_lim = limiting_moment(150.0, 1000.0, 25.0, 500.0);
        assert_relative_eq!(mu_lim / (25.0 * 1000.0 * 150.0 * 150.0), 0.133, epsilon = 0.002);
    }

    #[test]
    fn test_neutral_axis() {
        // x = 0.87·500·360 / (0.36·25·1000) = 17.4 mm
        assert_relative_eq!(neutral_axis_depth(360.0, 1000.0, 25.0, 500.0), 17.4, epsilon = 1e-9);
    }

    proptest! {
        #[test]
        fn capacity_round_trip(mu_knm in 0.5f64..60.0, d in 100.0f64..250.0) {
            let mu = mu_knm * 1.0e6;
            prop_assume!(mu < limiting_moment(d, 1000.0, 25.0, 500.0));
            let ast = solve_ast(mu, d, 1000.0, 25.0, 500.0).unwrap();
            let back = moment_capacity(ast, d, 1000.0, 25.0, 500.0);
            prop_assert!((back - mu).abs() / mu < 1.0e-3);
        }

        #[test]
        fn steel_area_is_monotonic(m1 in 0.0f64..40.0, m2 in 0.0f64..40.0) {
            let (lo, hi) = if m1 <= m2 { (m1, m2) } else { (m2, m1) };
            let a_lo = solve_ast(lo * 1.0e6, 150.0, 1000.0, 25.0, 500.0).unwrap();
            let a_hi = solve_ast(hi * 1.0e6, 150.0, 1000.0, 25.0, 500.0).unwrap();
            prop_assert!(a_lo <= a_hi);
            prop_assert!(a_lo >= 0.0);
        }
    }
}

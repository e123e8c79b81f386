//! # Shear in Slabs
//!
//! Nominal shear stress and the design shear strength of concrete without
//! shear reinforcement (IS 456 40.1, 40.2).
//!
//! The closed-form τc below is the expression IS 456 Table 19 was generated
//! from; it is the canonical evaluation. The digitized table itself is
//! available through [`CodeTables::tau_c`](crate::code_tables::CodeTables::tau_c)
//! for callers that explicitly ask for it.

/// Lower bound on p_t (%) so τc stays finite for zero steel
pub const MIN_STEEL_RATIO_PERCENT: f64 = 1.0e-3;

/// Tension steel ratio p_t = 100·Ast/(b·d) (%)
#[inline]
pub fn steel_ratio_percent(ast: f64, b: f64, d: f64) -> f64 {
    100.0 * ast / (b * d)
}

/// Nominal shear stress τv = Vu/(b·d) (N/mm²)
#[inline]
pub fn tau_v(vu_n: f64, b: f64, d: f64) -> f64 {
    vu_n / (b * d)
}

/// Maximum shear stress carried by concrete, 0.63·√fck (N/mm²)
#[inline]
pub fn tau_c_max(fck: f64) -> f64 {
    0.63 * fck.sqrt()
}

/// Design shear strength of concrete for a steel ratio (N/mm²)
///
/// # Formula
/// ```text
/// β  = 0.8·fck / (6.89·p_t),  not less than 1.0
/// τc = 0.85·√(0.8·fck)·(√(1 + 5β) − 1) / (6β),  not more than 0.63·√fck
/// ```
///
/// The β ≥ 1 floor reproduces the plateau of Table 19 at high steel ratios.
pub fn tau_c_for_ratio(fck: f64, p_t_percent: f64) -> f64 {
    let p_t = p_t_percent.max(MIN_STEEL_RATIO_PERCENT);
    let beta = (0.8 * fck / (6.89 * p_t)).max(1.0);
    let tau = 0.85 * (0.8 * fck).sqrt() * ((1.0 + 5.0 * beta).sqrt() - 1.0) / (6.0 * beta);
    tau.min(tau_c_max(fck))
}

/// Design shear strength of concrete for a steel area (N/mm²)
#[inline]
pub fn tau_c(fck: f64, ast: f64, b: f64, d: f64) -> f64 {
    tau_c_for_ratio(fck, steel_ratio_percent(ast, b, d))
}

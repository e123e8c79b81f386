//! # Bar Selection
//!
//! Turns a required steel area per metre width into a practical bar diameter
//! and spacing.
//!
//! Every diameter in the catalogue is evaluated independently. Spacing is
//! rounded to the site increment (5 mm by default) on the safe side, checked
//! against the detailing limits of IS 456 26.3.3 and 26.5.2, and the result
//! is picked deterministically:
//!
//! 1. the smallest feasible diameter whose spacing lies in the preferred band
//! 2. else the feasible candidate closest to that band (smaller bar on ties)
//! 3. else the candidate that provides the most steel, flagged not ok
//!
//! ## Example
//!
//! ```rust
//! use slab_core::reinforcement::{recommend, BarSelectionRules};
//! use slab_core::settings::DesignSettings;
//!
//! let rules = BarSelectionRules::main_bars(&DesignSettings::default(), 200.0);
//! let rec = recommend(325.4, &rules).unwrap();
//! assert!(rec.ok);
//! assert_eq!(rec.recommended.dia_mm, 8.0);
//! assert_eq!(rec.recommended.spacing_mm, 150.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::bar_area_mm2;
use crate::settings::DesignSettings;

/// Detailing rules applied to one bar selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSelectionRules {
    /// Diameters to try (mm)
    pub catalogue_mm: Vec<f64>,
    /// Largest allowed centre-to-centre spacing (mm)
    pub max_spacing_mm: f64,
    /// Smallest allowed bar diameter (mm)
    pub min_bar_dia_mm: f64,
    /// Absolute lower bound on spacing (mm); 1.5ø governs for large bars
    pub min_clear_spacing_mm: f64,
    /// Rounding increment for spacings (mm)
    pub spacing_increment_mm: f64,
    /// Preferred spacing band (mm)
    pub preferred_spacing_mm: (f64, f64),
    /// Accepted relative shortfall of provided area
    pub area_tolerance: f64,
    /// Width the required area is expressed over (mm)
    pub strip_width_mm: f64,
}

impl BarSelectionRules {
    fn from_settings(settings: &DesignSettings, max_spacing_mm: f64) -> Self {
        BarSelectionRules {
            catalogue_mm: settings.bar_catalogue_mm.clone(),
            max_spacing_mm,
            min_bar_dia_mm: settings.min_bar_dia_mm,
            min_clear_spacing_mm: settings.min_clear_spacing_mm,
            spacing_increment_mm: settings.spacing_increment_mm,
            preferred_spacing_mm: settings.preferred_spacing_mm,
            area_tolerance: settings.area_tolerance,
            strip_width_mm: settings.strip_width_mm,
        }
    }

    /// Main tension bars: spacing ≤ min(3d, configured maximum) (IS 456 26.3.3 b.1)
    pub fn main_bars(settings: &DesignSettings, d_mm: f64) -> Self {
        Self::from_settings(settings, (3.0 * d_mm).min(settings.max_bar_spacing_mm))
    }

    /// Distribution bars: spacing ≤ min(5d, configured maximum) (IS 456 26.3.3 b.2)
    pub fn distribution_bars(settings: &DesignSettings, d_mm: f64) -> Self {
        Self::from_settings(settings, (5.0 * d_mm).min(settings.max_distribution_spacing_mm))
    }

    /// Minimum spacing for a bar size: max(1.5ø, clear minimum)
    pub fn min_spacing_mm(&self, dia_mm: f64) -> f64 {
        (1.5 * dia_mm).max(self.min_clear_spacing_mm)
    }

    fn band_distance(&self, spacing_mm: f64) -> f64 {
        let (lo, hi) = self.preferred_spacing_mm;
        if spacing_mm < lo {
            lo - spacing_mm
        } else if spacing_mm > hi {
            spacing_mm - hi
        } else {
            0.0
        }
    }

    fn in_band(&self, spacing_mm: f64) -> bool {
        self.band_distance(spacing_mm) == 0.0
    }
}

/// One evaluated bar size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarCandidate {
    /// Bar diameter (mm)
    pub dia_mm: f64,
    /// Practical spacing after rounding and clamping (mm)
    pub spacing_mm: f64,
    /// Spacing that would exactly provide the required area (mm); absent
    /// when no steel is required
    pub raw_spacing_mm: Option<f64>,
    /// Area provided at the practical spacing (mm²/m)
    pub ast_provided_mm2: f64,
    /// Whether every detailing rule holds
    pub feasible: bool,
    /// Violated rules
    pub messages: Vec<String>,
}

impl BarCandidate {
    /// Detailing notation, e.g. "ø8 @ 150 mm c/c"
    pub fn notation(&self) -> String {
        format!("ø{} @ {} mm c/c", self.dia_mm, self.spacing_mm)
    }
}

/// Outcome of a bar selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRecommendation {
    /// Area the bars have to provide (mm²/m)
    pub ast_required_mm2: f64,
    /// Every catalogue size in ascending diameter order
    pub candidates: Vec<BarCandidate>,
    /// The chosen candidate
    pub recommended: BarCandidate,
    /// False when no candidate satisfies the rules
    pub ok: bool,
    /// Why the recommendation is not ok
    pub messages: Vec<String>,
}

/// Evaluate one diameter against the rules.
pub fn evaluate_bar(dia_mm: f64, ast_required_mm2: f64, rules: &BarSelectionRules) -> BarCandidate {
    let area = bar_area_mm2(dia_mm);
    let inc = rules.spacing_increment_mm;
    let provided_at = |s: f64| area * rules.strip_width_mm / s;

    let (raw_spacing_mm, spacing_mm) = if ast_required_mm2 > 0.0 {
        let raw = area * rules.strip_width_mm / ast_required_mm2;
        let mut s = (raw / inc).ceil() * inc;
        if provided_at(s) < ast_required_mm2 * (1.0 - rules.area_tolerance) {
            s -= inc;
        }
        (Some(raw), s.max(inc).min(rules.max_spacing_mm))
    } else {
        (None, rules.max_spacing_mm)
    };
    let ast_provided_mm2 = provided_at(spacing_mm);

    let mut messages = Vec::new();
    if dia_mm < rules.min_bar_dia_mm {
        messages.push(format!(
            "ø{} is below the minimum bar diameter of {} mm",
            dia_mm, rules.min_bar_dia_mm
        ));
    }
    let min_spacing = rules.min_spacing_mm(dia_mm);
    if spacing_mm < min_spacing {
        messages.push(format!(
            "spacing {} mm is below the minimum of {} mm for ø{}",
            spacing_mm, min_spacing, dia_mm
        ));
    }
    if spacing_mm > rules.max_spacing_mm {
        messages.push(format!(
            "spacing {} mm exceeds the maximum of {} mm",
            spacing_mm, rules.max_spacing_mm
        ));
    }
    if ast_provided_mm2 < ast_required_mm2 * (1.0 - rules.area_tolerance) {
        messages.push(format!(
            "provides {:.0} mm²/m against {:.0} mm²/m required",
            ast_provided_mm2, ast_required_mm2
        ));
    }

    BarCandidate {
        dia_mm,
        spacing_mm,
        raw_spacing_mm,
        ast_provided_mm2,
        feasible: messages.is_empty(),
        messages,
    }
}

/// Recommend a bar diameter and spacing for a required area (mm²/m).
///
/// # Errors
/// - `InvalidInput` if the required area is negative or not finite, or the
///   catalogue is empty
pub fn recommend(ast_required_mm2: f64, rules: &BarSelectionRules) -> CalcResult<BarRecommendation> {
    if !(ast_required_mm2.is_finite() && ast_required_mm2 >= 0.0) {
        return Err(CalcError::invalid_input(
            "ast_required_mm2",
            ast_required_mm2.to_string(),
            "Required steel area must be a non-negative number",
        ));
    }
    if rules.catalogue_mm.is_empty() {
        return Err(CalcError::invalid_input("bar_catalogue_mm", "[]", "Bar catalogue is empty"));
    }

    let mut diameters = rules.catalogue_mm.clone();
    diameters.sort_by(|a, b| a.total_cmp(b));
    diameters.dedup();

    let candidates: Vec<BarCandidate> = diameters
        .iter()
        .map(|&dia| evaluate_bar(dia, ast_required_mm2, rules))
        .collect();

    let in_band = candidates
        .iter()
        .find(|c| c.feasible && rules.in_band(c.spacing_mm));

    let nearest_band = || {
        candidates
            .iter()
            .filter(|c| c.feasible)
            .fold(None::<&BarCandidate>, |best, c| match best {
                Some(b) if rules.band_distance(b.spacing_mm) <= rules.band_distance(c.spacing_mm) => Some(b),
                _ => Some(c),
            })
    };

    if let Some(chosen) = in_band.or_else(nearest_band) {
        return Ok(BarRecommendation {
            ast_required_mm2,
            recommended: chosen.clone(),
            candidates,
            ok: true,
            messages: Vec::new(),
        });
    }

    // Nothing feasible: report the size that comes closest on area
    let fallback = candidates
        .iter()
        .fold(&candidates[0], |best, c| {
            if c.ast_provided_mm2 > best.ast_provided_mm2 {
                c
            } else {
                best
            }
        })
        .clone();

    let mut messages = vec![format!(
        "no bar in the catalogue satisfies the detailing rules for {:.0} mm²/m",
        ast_required_mm2
    )];
    messages.extend(fallback.messages.iter().cloned());

    Ok(BarRecommendation {
        ast_required_mm2,
        recommended: fallback,
        candidates,
        ok: false,
        messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn main_rules() -> BarSelectionRules {
        BarSelectionRules::main_bars(&DesignSettings::default(), 200.0)
    }

    #[test]
    fn test_spacing_limits_from_depth() {
        let s = DesignSettings::default();
        assert_eq!(BarSelectionRules::main_bars(&s, 200.0).max_spacing_mm, 300.0);
        assert_eq!(BarSelectionRules::main_bars(&s, 90.0).max_spacing_mm, 270.0);
        assert_eq!(BarSelectionRules::distribution_bars(&s, 225.0).max_spacing_mm, 450.0);
        assert_eq!(BarSelectionRules::distribution_bars(&s, 80.0).max_spacing_mm, 400.0);
    }

    #[test]
    fn test_min_spacing() {
        let rules = main_rules();
        assert_eq!(rules.min_spacing_mm(8.0), 20.0);
        assert_eq!(rules.min_spacing_mm(20.0), 30.0);
    }

    #[test]
    fn test_typical_slab_picks_8mm_at_150() {
        let rec = recommend(325.4, &main_rules()).unwrap();
        assert!(rec.ok);
        assert_eq!(rec.recommended.dia_mm, 8.0);
        // 155 mm would provide 324 mm²/m, so the spacing is tightened
        assert_eq!(rec.recommended.spacing_mm, 150.0);
        assert!(rec.recommended.ast_provided_mm2 >= 325.4);
        assert_eq!(rec.candidates.len(), 6);
    }

    #[test]
    fn test_round_up_then_tighten() {
        // Marginally more than ø10 at 100 mm: rounds up to 105, tightens back
        let rules = main_rules();
        let ast = bar_area_mm2(10.0) * 10.0;
        let c = evaluate_bar(10.0, ast * (1.0 - 1e-12), &rules);
        assert_eq!(c.spacing_mm, 100.0);
    }

    #[test]
    fn test_shortfall_within_tolerance_keeps_rounded_spacing() {
        let rules = main_rules();
        let at_105 = bar_area_mm2(10.0) * 1000.0 / 105.0;

        // 0.05 % short at 105 mm is inside the 0.1 % tolerance
        let c = evaluate_bar(10.0, at_105 * 1.0005, &rules);
        assert_eq!(c.spacing_mm, 105.0);
        assert!(c.feasible);

        // 0.2 % short is not, so the spacing drops to 100 mm
        let c = evaluate_bar(10.0, at_105 * 1.002, &rules);
        assert_eq!(c.spacing_mm, 100.0);
        assert!(c.ast_provided_mm2 >= at_105 * 1.002);
    }

    #[test]
    fn test_zero_requirement_uses_max_spacing() {
        let rec = recommend(0.0, &main_rules()).unwrap();
        assert!(rec.ok);
        assert_eq!(rec.recommended.raw_spacing_mm, None);
        assert_eq!(rec.recommended.spacing_mm, 300.0);
        // Nothing in band, smallest bar at the nearest spacing
        assert_eq!(rec.recommended.dia_mm, 8.0);
    }

    #[test]
    fn test_nearest_band_when_spacings_are_tight() {
        // Heavy steel: small bars fall below 80 mm, 16 mm lands in band
        let rec = recommend(2000.0, &main_rules()).unwrap();
        assert!(rec.ok);
        assert!(rec.recommended.spacing_mm >= 80.0 && rec.recommended.spacing_mm <= 200.0);
        assert_eq!(rec.recommended.dia_mm, 16.0);
    }

    #[test]
    fn test_infeasible_falls_back_to_largest_area() {
        let rules = BarSelectionRules {
            catalogue_mm: vec![8.0, 10.0],
            ..main_rules()
        };
        // ø10 would need about 8 mm spacing
        let rec = recommend(10_000.0, &rules).unwrap();
        assert!(!rec.ok);
        assert_eq!(rec.recommended.dia_mm, 10.0);
        assert!(!rec.messages.is_empty());
        assert!(rec.candidates.iter().all(|c| !c.feasible));
    }

    #[test]
    fn test_undersized_bar_rejected() {
        let rules = BarSelectionRules {
            catalogue_mm: vec![6.0, 8.0],
            ..main_rules()
        };
        let rec = recommend(200.0, &rules).unwrap();
        assert!(!rec.candidates[0].feasible);
        assert_eq!(rec.recommended.dia_mm, 8.0);
    }

    #[test]
    fn test_invalid_requests() {
        assert!(recommend(-1.0, &main_rules()).is_err());
        assert!(recommend(f64::NAN, &main_rules()).is_err());
        let empty = BarSelectionRules {
            catalogue_mm: vec![],
            ..main_rules()
        };
        assert!(recommend(100.0, &empty).is_err());
    }

    #[test]
    fn test_notation() {
        let rec = recommend(325.4, &main_rules()).unwrap();
        assert_eq!(rec.recommended.notation(), "ø8 @ 150 mm c/c");
    }

    proptest! {
        #[test]
        fn ok_recommendation_satisfies_rules(ast in 1.0f64..3000.0, d in 100.0f64..300.0) {
            let rules = BarSelectionRules::main_bars(&DesignSettings::default(), d);
            let rec = recommend(ast, &rules).unwrap();
            if rec.ok {
                let c = &rec.recommended;
                prop_assert!(c.ast_provided_mm2 >= ast * (1.0 - rules.area_tolerance) - 1e-9);
                prop_assert!(c.spacing_mm >= rules.min_spacing_mm(c.dia_mm));
                prop_assert!(c.spacing_mm <= rules.max_spacing_mm);
            }
        }

        #[test]
        fn selection_is_deterministic(ast in 0.0f64..3000.0) {
            let rules = main_rules();
            prop_assert_eq!(recommend(ast, &rules).unwrap(), recommend(ast, &rules).unwrap());
        }
    }
}

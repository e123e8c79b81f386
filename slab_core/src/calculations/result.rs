//! # Slab Design Result
//!
//! The typed output of both slab workflows. Every derived quantity is a named
//! field; warnings and the step trace are ordered lists.
//!
//! ## JSON Example (abridged)
//!
//! ```json
//! {
//!   "label": "S-1",
//!   "slab_type": "OneWay",
//!   "effective_span_m": 4.0,
//!   "d_mm": 200.0,
//!   "overall_depth_mm": 225.0,
//!   "warnings": [
//!     { "kind": "Cover", "message": "cover 20 mm is below the 30 mm recommended for Moderate exposure" }
//!   ],
//!   "steps": [
//!     { "title": "Effective span and depth", "body": "...", "clause": "IS 456 22.2" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::loads::LoadSummary;
use crate::reinforcement::BarRecommendation;
use crate::settings::ShearMethod;

/// How a panel carries load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlabType {
    /// Spans in one direction (long/short > 2, or supported on two edges)
    OneWay,
    /// Spans in both directions, Table 27 coefficients
    TwoWay,
}

impl SlabType {
    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SlabType::OneWay => "One-way slab",
            SlabType::TwoWay => "Two-way slab",
        }
    }
}

impl std::fmt::Display for SlabType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Category of a design warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    /// Minimum steel governs over the flexural demand
    MinimumSteel,
    /// Nominal shear stress exceeds concrete capacity
    ShearCapacity,
    /// No bar size satisfies the detailing rules
    BarSpacing,
    /// Span/depth ratio exceeds the allowable value
    Deflection,
    /// Low steel ratio, cracking likely
    CrackRisk,
    /// Aggressive exposure class
    Exposure,
    /// Cover below the recommended nominal cover
    Cover,
    /// Design moment above the limiting moment (over-reinforced)
    LimitingMoment,
}

impl WarningKind {
    /// Short label for display
    pub fn display_name(&self) -> &'static str {
        match self {
            WarningKind::MinimumSteel => "Minimum steel",
            WarningKind::ShearCapacity => "Shear capacity",
            WarningKind::BarSpacing => "Bar spacing",
            WarningKind::Deflection => "Deflection",
            WarningKind::CrackRisk => "Crack risk",
            WarningKind::Exposure => "Exposure",
            WarningKind::Cover => "Cover",
            WarningKind::LimitingMoment => "Limiting moment",
        }
    }

    /// Warnings that mean the slab as designed does not satisfy a strength
    /// or serviceability check. The rest are advisory.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            WarningKind::ShearCapacity
                | WarningKind::BarSpacing
                | WarningKind::Deflection
                | WarningKind::LimitingMoment
        )
    }
}

/// A non-fatal finding attached to a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignWarning {
    pub kind: WarningKind,
    pub message: String,
}

impl std::fmt::Display for DesignWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind.display_name(), self.message)
    }
}

/// One entry of the human-readable step trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignStep {
    pub title: String,
    pub body: String,
    /// Code clause the step follows, if any
    pub clause: Option<String>,
}

/// Flexure, shear and bars for one span direction of a 1 m strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripDesign {
    /// "main", "short" or "long"
    pub direction: String,

    /// Span the moment is computed on (m)
    pub span_m: f64,

    /// Effective depth of this layer of bars (mm)
    pub d_mm: f64,

    // === Demand ===
    /// Factored moment per metre width (kN·m/m)
    pub mu_knm: f64,

    /// Factored shear per metre width (kN/m)
    pub vu_kn: f64,

    /// Limiting moment of the section (kN·m/m)
    pub mu_lim_knm: f64,

    // === Steel ===
    /// Area from the flexural solve (mm²/m)
    pub ast_calc_mm2: f64,

    /// Minimum area ρmin·b·d (mm²/m)
    pub ast_min_mm2: f64,

    /// Design area, max(calc, min) (mm²/m)
    pub ast_required_mm2: f64,

    /// True when the minimum governs
    pub min_governed: bool,

    /// Steel ratio of the design area (%)
    pub p_t_percent: f64,

    // === Shear ===
    /// Nominal shear stress (N/mm²)
    pub tau_v_mpa: f64,

    /// Concrete shear strength (N/mm²)
    pub tau_c_mpa: f64,

    // === Bars ===
    pub bars: BarRecommendation,
}

impl StripDesign {
    /// τv ≤ τc
    pub fn shear_ok(&self) -> bool {
        self.tau_v_mpa <= self.tau_c_mpa
    }

    /// Area provided by the recommended bars (mm²/m)
    pub fn ast_provided_mm2(&self) -> f64 {
        self.bars.recommended.ast_provided_mm2
    }
}

/// Span/depth deflection control (IS 456 23.2.1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeflectionCheck {
    /// Effective span over effective depth
    pub actual_span_depth: f64,
    /// Fig. 4 value at the steel ratio
    pub basic_span_depth: f64,
    /// Fig. 5 modifier at the aspect ratio
    pub modifier: f64,
    /// basic × modifier
    pub allowable_span_depth: f64,
}

impl DeflectionCheck {
    pub fn ok(&self) -> bool {
        self.actual_span_depth <= self.allowable_span_depth
    }
}

/// Complete slab design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignResult {
    /// Label of the input
    pub label: String,

    pub slab_type: SlabType,

    // === Geometry ===
    /// Effective span of the governing (short) direction (m)
    pub effective_span_m: f64,

    /// Effective span of the long direction, two-way only (m)
    pub long_effective_span_m: Option<f64>,

    /// ly/lx for two-way, 1.0 for one-way
    pub aspect_ratio: f64,

    /// Effective depth of the outer (governing) layer (mm)
    pub d_mm: f64,

    /// Overall slab thickness (mm)
    pub overall_depth_mm: f64,

    // === Loads ===
    pub loads: LoadSummary,

    /// Table 27 coefficients (αx, αy), two-way only
    pub moment_coefficients: Option<(f64, f64)>,

    // === Strips ===
    /// One-way main steel, or two-way short direction
    pub main: StripDesign,

    /// Two-way long direction
    pub secondary: Option<StripDesign>,

    /// One-way distribution steel
    pub distribution: Option<BarRecommendation>,

    // === Serviceability ===
    pub deflection: DeflectionCheck,

    /// Which τc evaluation was used
    pub shear_method: ShearMethod,

    // === Trace ===
    pub warnings: Vec<DesignWarning>,
    pub steps: Vec<DesignStep>,
}

impl DesignResult {
    /// True when the result carries a warning of this kind
    pub fn has_warning(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }

    /// Warnings of one kind
    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &DesignWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }

    /// No strength or serviceability check failed
    pub fn passes(&self) -> bool {
        !self.warnings.iter().any(|w| w.kind.is_failure())
    }

    /// All strip designs in order (main first)
    pub fn strips(&self) -> impl Iterator<Item = &StripDesign> {
        std::iter::once(&self.main).chain(self.secondary.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let w = DesignWarning {
            kind: WarningKind::CrackRisk,
            message: "low steel".to_string(),
        };
        assert_eq!(w.to_string(), "[Crack risk] low steel");
    }

    #[test]
    fn test_failure_kinds() {
        assert!(WarningKind::Deflection.is_failure());
        assert!(!WarningKind::MinimumSteel.is_failure());
        assert!(!WarningKind::Cover.is_failure());
    }

    #[test]
    fn test_warning_kind_serializes_as_name() {
        let json = serde_json::to_string(&WarningKind::ShearCapacity).unwrap();
        assert_eq!(json, "\"ShearCapacity\"");
    }
}

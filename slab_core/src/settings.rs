//! # Design Settings
//!
//! Every code constant the slab workflow reads lives in [`DesignSettings`].
//! The `Default` values are the IS 456 simplified-method values; callers pass
//! the settings explicitly to each design call, so there is no hidden global
//! configuration.
//!
//! Settings deserialize with `#[serde(default)]`, so a JSON document only has
//! to name the values it overrides:
//!
//! ```rust
//! use slab_core::settings::DesignSettings;
//!
//! let s: DesignSettings = serde_json::from_str(r#"{ "load_factor": 1.2 }"#).unwrap();
//! assert_eq!(s.load_factor, 1.2);
//! assert_eq!(s.min_steel_ratio, 0.0012);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::UNIT_WEIGHT_RCC_KN_M3;

/// Which concrete shear strength evaluation the workflow uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ShearMethod {
    /// Closed-form expression behind IS 456 Table 19 (canonical)
    #[default]
    ClosedForm,
    /// Direct two-pass interpolation of the digitized Table 19 grid
    Table19,
}

impl ShearMethod {
    /// Display name for the step trace
    pub fn display_name(&self) -> &'static str {
        match self {
            ShearMethod::ClosedForm => "closed-form τc",
            ShearMethod::Table19 => "Table 19 interpolation",
        }
    }
}

/// Code constants and detailing rules for slab design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Partial safety factor applied to the total service load (IS 456 Table 18)
    pub load_factor: f64,

    /// Unit weight of reinforced concrete (kN/m³)
    pub unit_weight_kn_m3: f64,

    /// Width of the design strip (mm)
    pub strip_width_mm: f64,

    /// Minimum tension steel as a fraction of b·d (0.12% for HYSD bars)
    pub min_steel_ratio: f64,

    /// Practical lower bound on the effective depth (mm)
    pub min_effective_depth_mm: f64,

    /// Bar diameters considered by the bar selector (mm)
    pub bar_catalogue_mm: Vec<f64>,

    /// Smallest bar diameter allowed as slab reinforcement (mm)
    pub min_bar_dia_mm: f64,

    /// Upper limit on main bar spacing (mm); 3d governs when smaller
    pub max_bar_spacing_mm: f64,

    /// Upper limit on distribution bar spacing (mm); 5d governs when smaller
    pub max_distribution_spacing_mm: f64,

    /// Minimum centre-to-centre spacing regardless of bar size (mm)
    pub min_clear_spacing_mm: f64,

    /// Spacings are rounded to multiples of this increment (mm)
    pub spacing_increment_mm: f64,

    /// Constructability band for preferred spacings (mm)
    pub preferred_spacing_mm: (f64, f64),

    /// Relative shortfall of provided area still accepted as adequate
    pub area_tolerance: f64,

    /// Steel ratio (%) below which a crack-risk warning is raised
    pub crack_steel_ratio_percent: f64,

    /// Partition allowance per 115 mm of wall thickness (kN/m per m strip)
    pub partition_load_per_115mm_wall: f64,

    /// Concrete shear strength evaluation
    pub shear_method: ShearMethod,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            load_factor: 1.5,
            unit_weight_kn_m3: UNIT_WEIGHT_RCC_KN_M3,
            strip_width_mm: 1000.0,
            min_steel_ratio: 0.0012,
            min_effective_depth_mm: 100.0,
            bar_catalogue_mm: vec![8.0, 10.0, 12.0, 16.0, 20.0, 25.0],
            min_bar_dia_mm: 8.0,
            max_bar_spacing_mm: 300.0,
            max_distribution_spacing_mm: 450.0,
            min_clear_spacing_mm: 20.0,
            spacing_increment_mm: 5.0,
            preferred_spacing_mm: (80.0, 200.0),
            area_tolerance: 0.001,
            crack_steel_ratio_percent: 0.15,
            partition_load_per_115mm_wall: 3.5,
            shear_method: ShearMethod::ClosedForm,
        }
    }
}

impl DesignSettings {
    /// Validate settings before any design stage runs.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("load_factor", self.load_factor),
            ("unit_weight_kn_m3", self.unit_weight_kn_m3),
            ("strip_width_mm", self.strip_width_mm),
            ("min_steel_ratio", self.min_steel_ratio),
            ("min_effective_depth_mm", self.min_effective_depth_mm),
            ("max_bar_spacing_mm", self.max_bar_spacing_mm),
            ("max_distribution_spacing_mm", self.max_distribution_spacing_mm),
            ("spacing_increment_mm", self.spacing_increment_mm),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }

        if self.bar_catalogue_mm.is_empty() {
            return Err(CalcError::invalid_input("bar_catalogue_mm", "[]", "Bar catalogue is empty"));
        }
        if let Some(dia) = self.bar_catalogue_mm.iter().find(|d| !(d.is_finite() && **d > 0.0)) {
            return Err(CalcError::invalid_input(
                "bar_catalogue_mm",
                dia.to_string(),
                "Bar diameters must be positive",
            ));
        }

        let (lo, hi) = self.preferred_spacing_mm;
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && lo <= hi) {
            return Err(CalcError::invalid_input(
                "preferred_spacing_mm",
                format!("({}, {})", lo, hi),
                "Preferred spacing band must be positive and ordered",
            ));
        }

        let non_negative = [
            ("min_bar_dia_mm", self.min_bar_dia_mm),
            ("min_clear_spacing_mm", self.min_clear_spacing_mm),
            ("area_tolerance", self.area_tolerance),
            ("crack_steel_ratio_percent", self.crack_steel_ratio_percent),
            ("partition_load_per_115mm_wall", self.partition_load_per_115mm_wall),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must not be negative"));
            }
        }
        if self.area_tolerance >= 1.0 {
            return Err(CalcError::invalid_input(
                "area_tolerance",
                self.area_tolerance.to_string(),
                "Tolerance must be a fraction below 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let s = DesignSettings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.load_factor, 1.5);
        assert_eq!(s.shear_method, ShearMethod::ClosedForm);
    }

    #[test]
    fn test_empty_catalogue_rejected() {
        let s = DesignSettings {
            bar_catalogue_mm: vec![],
            ..Default::default()
        };
        let err = s.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_malformed_catalogue_rejected() {
        let s = DesignSettings {
            bar_catalogue_mm: vec![8.0, -10.0],
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_inverted_band_rejected() {
        let s = DesignSettings {
            preferred_spacing_mm: (200.0, 80.0),
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: DesignSettings = serde_json::from_str(r#"{ "shear_method": "Table19" }"#).unwrap();
        assert_eq!(s.shear_method, ShearMethod::Table19);
        assert_eq!(s.bar_catalogue_mm, DesignSettings::default().bar_catalogue_mm);
    }
}

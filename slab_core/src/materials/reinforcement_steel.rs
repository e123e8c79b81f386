//! Reinforcing Steel (IS 456 / IS 1786)
//!
//! Steel grades, bar areas and the limiting neutral-axis depth that separates
//! under- from over-reinforced sections.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Modulus of elasticity of reinforcing steel (MPa)
pub const ES_MPA: f64 = 200_000.0;

/// Ultimate compressive strain in concrete (IS 456 38.1)
const CONCRETE_ULTIMATE_STRAIN: f64 = 0.0035;

/// Standard reinforcing steel grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteelGrade {
    /// Mild steel
    Fe250,
    /// High-yield deformed bars
    Fe415,
    Fe500,
    Fe550,
}

impl SteelGrade {
    /// All grades for UI selection
    pub const ALL: [SteelGrade; 4] = [SteelGrade::Fe250, SteelGrade::Fe415, SteelGrade::Fe500, SteelGrade::Fe550];

    /// Characteristic yield strength fy (MPa)
    pub fn fy_mpa(&self) -> f64 {
        match self {
            SteelGrade::Fe250 => 250.0,
            SteelGrade::Fe415 => 415.0,
            SteelGrade::Fe500 => 500.0,
            SteelGrade::Fe550 => 550.0,
        }
    }

    /// Parse "Fe500", "fe 415" or "500"
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let cleaned = s.trim().to_lowercase().replace(' ', "");
        let digits = cleaned.trim_start_matches("fe");
        SteelGrade::ALL
            .iter()
            .copied()
            .find(|g| digits.parse::<f64>().ok() == Some(g.fy_mpa()))
            .ok_or_else(|| CalcError::invalid_input("steel_grade", s, "Unknown steel grade"))
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SteelGrade::Fe250 => "Fe250",
            SteelGrade::Fe415 => "Fe415",
            SteelGrade::Fe500 => "Fe500",
            SteelGrade::Fe550 => "Fe550",
        }
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Limiting neutral-axis depth ratio xu,max/d for any fy (IS 456 38.1 note)
///
/// xu,max/d = 0.0035 / (0.0055 + 0.87·fy/Es)
///
/// Gives 0.53, 0.48 and 0.46 for Fe250, Fe415 and Fe500.
pub fn limiting_depth_ratio(fy_mpa: f64) -> f64 {
    CONCRETE_ULTIMATE_STRAIN / (0.0055 + 0.87 * fy_mpa / ES_MPA)
}

/// Cross-sectional area of one bar, π·ø²/4 (mm²)
#[inline]
pub fn bar_area_mm2(dia_mm: f64) -> f64 {
    PI * dia_mm * dia_mm / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_limiting_depth_ratio_matches_code_values() {
        assert_relative_eq!(limiting_depth_ratio(250.0), 0.53, epsilon = 0.005);
        assert_relative_eq!(limiting_depth_ratio(415.0), 0.48, epsilon = 0.005);
        assert_relative_eq!(limiting_depth_ratio(500.0), 0.46, epsilon = 0.005);
    }

    #[test]
    fn test_bar_area() {
        assert_relative_eq!(bar_area_mm2(10.0), 78.54, epsilon = 0.01);
        assert_relative_eq!(bar_area_mm2(16.0), 201.06, epsilon = 0.01);
    }

    #[test]
    fn test_grade_parsing() {
        assert_eq!(SteelGrade::from_str_flexible("Fe500").unwrap(), SteelGrade::Fe500);
        assert_eq!(SteelGrade::from_str_flexible("fe 415").unwrap(), SteelGrade::Fe415);
        assert_eq!(SteelGrade::from_str_flexible("250").unwrap(), SteelGrade::Fe250);
        assert!(SteelGrade::from_str_flexible("Fe600").is_err());
    }
}

//! Concrete Grades and Exposure Conditions (IS 456 Tables 2, 3 and 16)
//!
//! Named grades are a convenience for UIs; design calculations accept any
//! positive fck through [`MaterialGrade`](super::MaterialGrade).

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Unit weight of reinforced concrete (kN/m³), IS 875 Part 1
pub const UNIT_WEIGHT_RCC_KN_M3: f64 = 25.0;

/// Standard concrete grades per IS 456 Table 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcreteGrade {
    M15,
    M20,
    M25,
    M30,
    M35,
    M40,
}

impl ConcreteGrade {
    /// All grades for UI selection
    pub const ALL: [ConcreteGrade; 6] = [
        ConcreteGrade::M15,
        ConcreteGrade::M20,
        ConcreteGrade::M25,
        ConcreteGrade::M30,
        ConcreteGrade::M35,
        ConcreteGrade::M40,
    ];

    /// Characteristic compressive strength fck (MPa)
    pub fn fck_mpa(&self) -> f64 {
        match self {
            ConcreteGrade::M15 => 15.0,
            ConcreteGrade::M20 => 20.0,
            ConcreteGrade::M25 => 25.0,
            ConcreteGrade::M30 => 30.0,
            ConcreteGrade::M35 => 35.0,
            ConcreteGrade::M40 => 40.0,
        }
    }

    /// Parse "M25", "m25" or "25"
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let digits = s.trim().trim_start_matches(['M', 'm']);
        ConcreteGrade::ALL
            .iter()
            .copied()
            .find(|g| digits.parse::<f64>().ok() == Some(g.fck_mpa()))
            .ok_or_else(|| CalcError::invalid_input("concrete_grade", s, "Unknown concrete grade"))
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConcreteGrade::M15 => "M15",
            ConcreteGrade::M20 => "M20",
            ConcreteGrade::M25 => "M25",
            ConcreteGrade::M30 => "M30",
            ConcreteGrade::M35 => "M35",
            ConcreteGrade::M40 => "M40",
        }
    }
}

impl std::fmt::Display for ConcreteGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Environmental exposure condition per IS 456 Table 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Exposure {
    #[default]
    Mild,
    Moderate,
    Severe,
    VerySevere,
    Extreme,
}

impl Exposure {
    /// All exposure conditions for UI selection
    pub const ALL: [Exposure; 5] = [
        Exposure::Mild,
        Exposure::Moderate,
        Exposure::Severe,
        Exposure::VerySevere,
        Exposure::Extreme,
    ];

    /// Recommended nominal cover (mm) per IS 456 Table 16
    pub fn nominal_cover_mm(&self) -> f64 {
        match self {
            Exposure::Mild => 20.0,
            Exposure::Moderate => 30.0,
            Exposure::Severe => 45.0,
            Exposure::VerySevere => 50.0,
            Exposure::Extreme => 75.0,
        }
    }

    /// Severe and worse exposures need extra durability measures
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Exposure::Severe | Exposure::VerySevere | Exposure::Extreme)
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Exposure::Mild => "Mild",
            Exposure::Moderate => "Moderate",
            Exposure::Severe => "Severe",
            Exposure::VerySevere => "Very Severe",
            Exposure::Extreme => "Extreme",
        }
    }
}

impl std::fmt::Display for Exposure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_parsing() {
        assert_eq!(ConcreteGrade::from_str_flexible("M25").unwrap(), ConcreteGrade::M25);
        assert_eq!(ConcreteGrade::from_str_flexible("m30").unwrap(), ConcreteGrade::M30);
        assert_eq!(ConcreteGrade::from_str_flexible("40").unwrap(), ConcreteGrade::M40);
        assert!(ConcreteGrade::from_str_flexible("M90").is_err());
    }

    #[test]
    fn test_nominal_cover() {
        assert_eq!(Exposure::Mild.nominal_cover_mm(), 20.0);
        assert_eq!(Exposure::Moderate.nominal_cover_mm(), 30.0);
        assert_eq!(Exposure::Extreme.nominal_cover_mm(), 75.0);
        assert!(!Exposure::Moderate.is_aggressive());
        assert!(Exposure::VerySevere.is_aggressive());
    }

    #[test]
    fn test_exposure_serialization() {
        let json = serde_json::to_string(&Exposure::VerySevere).unwrap();
        assert_eq!(json, "\"VerySevere\"");
        let parsed: Exposure = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Exposure::VerySevere);
    }
}

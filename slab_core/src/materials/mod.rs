//! # Materials
//!
//! Concrete and reinforcing steel definitions for slab design.
//!
//! - [`concrete`] - concrete grades (fck), exposure conditions, nominal cover
//! - [`reinforcement_steel`] - steel grades (fy), bar areas, limiting depth ratio
//!
//! ## Example
//!
//! ```rust
//! use slab_core::materials::{ConcreteGrade, MaterialGrade, SteelGrade};
//!
//! let m = MaterialGrade::from_grades(ConcreteGrade::M25, SteelGrade::Fe500);
//! assert_eq!(m.fck_mpa, 25.0);
//! assert_eq!(m.fy_mpa, 500.0);
//! ```

pub mod concrete;
pub mod reinforcement_steel;

pub use concrete::{ConcreteGrade, Exposure, UNIT_WEIGHT_RCC_KN_M3};
pub use reinforcement_steel::{bar_area_mm2, limiting_depth_ratio, SteelGrade, ES_MPA};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Concrete and steel strengths used by a design.
///
/// Any positive values are accepted; the named grades are only a shortcut.
///
/// ## JSON Example
///
/// ```json
/// { "fck_mpa": 25.0, "fy_mpa": 500.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialGrade {
    /// Characteristic compressive strength of concrete (MPa)
    pub fck_mpa: f64,
    /// Characteristic yield strength of steel (MPa)
    pub fy_mpa: f64,
}

impl MaterialGrade {
    /// Create from raw strengths
    pub fn new(fck_mpa: f64, fy_mpa: f64) -> Self {
        MaterialGrade { fck_mpa, fy_mpa }
    }

    /// Create from named grades
    pub fn from_grades(concrete: ConcreteGrade, steel: SteelGrade) -> Self {
        MaterialGrade {
            fck_mpa: concrete.fck_mpa(),
            fy_mpa: steel.fy_mpa(),
        }
    }

    /// Both strengths must be finite and strictly positive
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.fck_mpa.is_finite() && self.fck_mpa > 0.0) {
            return Err(CalcError::invalid_input(
                "fck_mpa",
                self.fck_mpa.to_string(),
                "Concrete strength must be positive",
            ));
        }
        if !(self.fy_mpa.is_finite() && self.fy_mpa > 0.0) {
            return Err(CalcError::invalid_input(
                "fy_mpa",
                self.fy_mpa.to_string(),
                "Steel yield strength must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for MaterialGrade {
    fn default() -> Self {
        MaterialGrade::from_grades(ConcreteGrade::M25, SteelGrade::Fe500)
    }
}

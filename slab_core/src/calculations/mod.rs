//! # Slab Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - [`DesignResult`] - Shared typed result (JSON-serializable)
//! - `calculate(input, tables, settings) -> CalcResult<DesignResult>` - Pure function
//!
//! ## Available Calculations
//!
//! - [`one_way_slab`] - Simply supported one-way slab
//! - [`two_way_slab`] - Simply supported two-way panel (Table 27)
//!
//! [`classify_panel`] decides which one applies to a rectangular panel.

pub mod one_way_slab;
pub mod result;
pub mod two_way_slab;
pub(crate) mod workflow;

use serde::{Deserialize, Serialize};

use crate::code_tables::CodeTables;
use crate::errors::CalcResult;
use crate::settings::DesignSettings;

// Re-export commonly used types
pub use one_way_slab::OneWaySlabInput;
pub use result::{DeflectionCheck, DesignResult, DesignStep, DesignWarning, SlabType, StripDesign, WarningKind};
pub use two_way_slab::TwoWaySlabInput;

/// Long/short ratio above which a panel is designed as one-way
pub const ONE_WAY_ASPECT_LIMIT: f64 = 2.0;

/// Classify a panel supported on all four edges.
///
/// One-way when long/short > 2, two-way otherwise (IS 456 24.4).
///
/// ```rust
/// use slab_core::calculations::{classify_panel, SlabType};
///
/// assert_eq!(classify_panel(3.0, 7.0), SlabType::OneWay);
/// assert_eq!(classify_panel(4.0, 5.0), SlabType::TwoWay);
/// assert_eq!(classify_panel(4.0, 8.0), SlabType::TwoWay);
/// ```
pub fn classify_panel(lx_m: f64, ly_m: f64) -> SlabType {
    let (short, long) = if lx_m <= ly_m { (lx_m, ly_m) } else { (ly_m, lx_m) };
    if long / short > ONE_WAY_ASPECT_LIMIT {
        SlabType::OneWay
    } else {
        SlabType::TwoWay
    }
}

/// Enum wrapper for all slab calculation types.
///
/// This allows storing heterogeneous calculations in a single collection
/// while maintaining type safety and clean serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// One-way slab calculation
    OneWaySlab(OneWaySlabInput),
    /// Two-way panel calculation
    TwoWaySlab(TwoWaySlabInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::OneWaySlab(s) => &s.label,
            CalculationItem::TwoWaySlab(s) => &s.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::OneWaySlab(_) => "OneWaySlab",
            CalculationItem::TwoWaySlab(_) => "TwoWaySlab",
        }
    }

    /// Run the calculation this item describes
    pub fn design(&self, tables: &CodeTables, settings: &DesignSettings) -> CalcResult<DesignResult> {
        match self {
            CalculationItem::OneWaySlab(s) => one_way_slab::calculate(s, tables, settings),
            CalculationItem::TwoWaySlab(s) => two_way_slab::calculate(s, tables, settings),
        }
    }
}

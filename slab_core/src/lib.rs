//! # slab_core - Reinforced Concrete Slab Design Engine
//!
//! `slab_core` designs simply supported one-way and two-way RC slabs per
//! IS 456:2000. All inputs and outputs are JSON-serializable, and every design
//! call is a pure function of its inputs.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Traceable**: Every result carries typed warnings and a step trace
//!
//! ## Quick Start
//!
//! ```rust
//! use slab_core::{design_one_way, OneWaySlabInput, SlabLoads};
//!
//! let input = OneWaySlabInput::new("S-1", 4.0, SlabLoads::new(0.5, 3.0));
//! let result = design_one_way(&input).unwrap();
//!
//! assert!(result.effective_span_m <= 4.0);
//! println!("D = {} mm, main steel {}", result.overall_depth_mm, result.main.bars.recommended.notation());
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - One-way and two-way workflows, typed results
//! - [`equations`] - Flexure, shear and slab formulas
//! - [`reinforcement`] - Bar size and spacing selection
//! - [`code_tables`] - IS 456 tables and figures, digitized
//! - [`interpolation`] - 1-D tables and 2-D grids with clamped lookup
//! - [`loads`] - Slab load accumulation
//! - [`materials`] - Concrete and steel grades, exposure classes
//! - [`settings`] - Design constants and detailing rules
//! - [`project`] - Batch container for several slabs
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod code_tables;
pub mod equations;
pub mod errors;
pub mod interpolation;
pub mod loads;
pub mod materials;
pub mod project;
pub mod reinforcement;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    classify_panel, CalculationItem, DesignResult, DesignStep, DesignWarning, OneWaySlabInput, SlabType,
    TwoWaySlabInput, WarningKind,
};
pub use code_tables::CodeTables;
pub use errors::{CalcError, CalcResult};
pub use loads::SlabLoads;
pub use materials::{ConcreteGrade, Exposure, MaterialGrade, SteelGrade};
pub use project::{Project, ProjectMetadata};
pub use settings::{DesignSettings, ShearMethod};

/// Design a one-way slab with the standard IS 456 tables and default settings.
pub fn design_one_way(input: &OneWaySlabInput) -> CalcResult<DesignResult> {
    calculations::one_way_slab::calculate(input, CodeTables::standard(), &DesignSettings::default())
}

/// Design a two-way panel with the standard IS 456 tables and default settings.
pub fn design_two_way(input: &TwoWaySlabInput) -> CalcResult<DesignResult> {
    calculations::two_way_slab::calculate(input, CodeTables::standard(), &DesignSettings::default())
}

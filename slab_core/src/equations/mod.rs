//! # Slab Design Equations
//!
//! The closed-form relations the slab workflow is built from. Keeping them in
//! one place makes each one easy to check against IS 456 on its own.
//!
//! ## Modules
//!
//! - [`flexure`] - Stress block, required steel area, limiting moment
//! - [`shear`] - Nominal shear stress and concrete shear strength τc
//! - [`slab`] - Effective span, self weight, strip moments and shears
//!
//! ## Units
//!
//! Section-level functions take mm, N and MPa (moments in N·mm). Strip-level
//! functions in [`slab`] take m and kN. Conversion happens in the workflow.
//!
//! ## References
//!
//! - IS 456:2000 Plain and Reinforced Concrete, Code of Practice
//! - SP 16: Design Aids for Reinforced Concrete to IS 456

pub mod flexure;
pub mod shear;
pub mod slab;

pub use flexure::{limiting_moment, moment_capacity, neutral_axis_depth, solve_ast};

pub use shear::{steel_ratio_percent, tau_c, tau_c_for_ratio, tau_c_max, tau_v};

pub use slab::{
    depth_for_span_ratio,
    effective_span,
    overall_depth,
    partition_allowance,
    self_weight,
    simply_supported_moment,
    simply_supported_shear,
    two_way_moment,
};

//! # One-Way Slab Design
//!
//! Designs a simply supported one-way slab as a 1 m wide strip per IS 456.
//!
//! ## Assumptions
//!
//! - Simply supported on two opposite edges, uniformly loaded
//! - Singly reinforced section, 1 m design strip
//! - Depth sized once from the basic span/depth ratio (no iteration)
//! - Distribution steel 0.12 % of the gross section
//!
//! ## Example
//!
//! ```rust
//! use slab_core::calculations::one_way_slab::{calculate, OneWaySlabInput};
//! use slab_core::code_tables::CodeTables;
//! use slab_core::loads::SlabLoads;
//! use slab_core::settings::DesignSettings;
//!
//! let input = OneWaySlabInput::new("S-1", 4.0, SlabLoads::new(0.5, 3.0));
//! let result = calculate(&input, CodeTables::standard(), &DesignSettings::default()).unwrap();
//!
//! assert_eq!(result.d_mm, 200.0);
//! println!("Main steel: {}", result.main.bars.recommended.notation());
//! for w in &result.warnings {
//!     println!("{}", w);
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculations::result::{DesignResult, SlabType};
use crate::calculations::workflow::{self, DistributionDemand, StripDemand, Trace};
use crate::code_tables::{is456_ref, CodeTables};
use crate::equations::slab;
use crate::errors::{CalcError, CalcResult};
use crate::loads::SlabLoads;
use crate::materials::{Exposure, MaterialGrade};
use crate::settings::DesignSettings;

pub(crate) fn default_span_depth_ratio() -> f64 {
    20.0
}

pub(crate) fn default_cover_mm() -> f64 {
    20.0
}

pub(crate) fn default_bar_dia_mm() -> f64 {
    10.0
}

/// Input parameters for a one-way slab.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "S-1",
///   "clear_span_m": 4.0,
///   "support_width_m": 0.23,
///   "loads": { "floor_finish_kn_m2": 0.5, "live_kn_m2": 3.0, "wall_thickness_mm": 115.0 },
///   "cover_mm": 20.0,
///   "bar_dia_mm": 10.0,
///   "materials": { "fck_mpa": 25.0, "fy_mpa": 500.0 },
///   "span_depth_ratio": 20.0,
///   "exposure": "Moderate"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneWaySlabInput {
    /// User label (e.g., "S-1", "Corridor slab")
    pub label: String,

    /// Clear span between supports (m)
    pub clear_span_m: f64,

    /// Width of each support (m); zero means the clear span is effective
    #[serde(default)]
    pub support_width_m: f64,

    /// Superimposed service loads
    pub loads: SlabLoads,

    /// Clear cover to main bars (mm)
    #[serde(default = "default_cover_mm")]
    pub cover_mm: f64,

    /// Main bar diameter assumed when sizing the overall depth (mm)
    #[serde(default = "default_bar_dia_mm")]
    pub bar_dia_mm: f64,

    /// Concrete and steel strengths
    #[serde(default)]
    pub materials: MaterialGrade,

    /// Basic span/effective depth ratio used to size d
    #[serde(default = "default_span_depth_ratio")]
    pub span_depth_ratio: f64,

    /// Environmental exposure
    #[serde(default)]
    pub exposure: Exposure,
}

impl OneWaySlabInput {
    /// Input with default cover, bar size, grades, L/d and exposure
    pub fn new(label: impl Into<String>, clear_span_m: f64, loads: SlabLoads) -> Self {
        OneWaySlabInput {
            label: label.into(),
            clear_span_m,
            support_width_m: 0.0,
            loads,
            cover_mm: default_cover_mm(),
            bar_dia_mm: default_bar_dia_mm(),
            materials: MaterialGrade::default(),
            span_depth_ratio: default_span_depth_ratio(),
            exposure: Exposure::default(),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        validate_positive("clear_span_m", self.clear_span_m, "Span must be positive")?;
        validate_non_negative("support_width_m", self.support_width_m)?;
        validate_non_negative("cover_mm", self.cover_mm)?;
        validate_positive("bar_dia_mm", self.bar_dia_mm, "Bar diameter must be positive")?;
        validate_positive("span_depth_ratio", self.span_depth_ratio, "L/d ratio must be positive")?;
        self.loads.validate()?;
        self.materials.validate()
    }
}

pub(crate) fn validate_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), reason))
    }
}

pub(crate) fn validate_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Must not be negative"))
    }
}

/// Design a one-way slab.
///
/// Pure function of its arguments; the tables and settings are only read.
///
/// # Errors
///
/// * `InvalidInput` - input or settings rejected before any stage runs
/// * `InsufficientDepth` - the sized depth cannot carry the moment singly reinforced
pub fn calculate(
    input: &OneWaySlabInput,
    tables: &CodeTables,
    settings: &DesignSettings,
) -> CalcResult<DesignResult> {
    settings.validate()?;
    input.validate()?;
    debug!("designing one-way slab '{}'", input.label);

    let mut trace = Trace::new(&input.label);

    // Stage 0: inputs
    workflow::check_cover(&mut trace, input.cover_mm, input.exposure);
    trace.step(
        "Inputs",
        format!(
            "Clear span Lc = {:.3} m, support width = {:.3} m\n\
             fck = {} MPa, fy = {} MPa\n\
             Cover = {} mm ({} exposure, {} mm recommended), bar ø = {} mm\n\
             Basic L/d = {}",
            input.clear_span_m,
            input.support_width_m,
            input.materials.fck_mpa,
            input.materials.fy_mpa,
            input.cover_mm,
            input.exposure,
            input.exposure.nominal_cover_mm(),
            input.bar_dia_mm,
            input.span_depth_ratio,
        ),
        Some(is456_ref::NOMINAL_COVER),
    );

    // Stage 1: depth sizing
    let sizing = workflow::size_depth(input.clear_span_m, input.support_width_m, input.span_depth_ratio, settings);
    let d_mm = sizing.d_mm;
    let overall_depth_mm = slab::overall_depth(d_mm, input.cover_mm, input.bar_dia_mm);
    trace.step(
        "Effective span and depth",
        format!(
            "Trial d = {:.1} mm -> L = min(Lc + d, Lc + support) = {:.3} m\n\
             d = max(L / {}, {}) = {:.1} mm, D = d + cover + ø/2 = {:.1} mm",
            sizing.initial_d_mm,
            sizing.effective_span_m,
            input.span_depth_ratio,
            settings.min_effective_depth_mm,
            d_mm,
            overall_depth_mm,
        ),
        Some(is456_ref::EFFECTIVE_SPAN),
    );

    // Stage 2: loads
    let loads = workflow::load_stage(&mut trace, &input.loads, overall_depth_mm, settings);

    // Stage 3: moments and shears
    let span_m = sizing.effective_span_m;
    let mu_knm = slab::simply_supported_moment(loads.ultimate_kn_per_m, span_m);
    let vu_kn = slab::simply_supported_shear(loads.ultimate_kn_per_m, span_m);
    trace.step(
        "Moments and shears",
        format!(
            "Mu = wu·L²/8 = {:.4} kN·m/m\nVu = wu·L/2 = {:.3} kN/m",
            mu_knm, vu_kn
        ),
        None,
    );

    let demands = [StripDemand {
        direction: "main",
        span_m,
        d_mm,
        mu_knm,
        vu_kn,
    }];

    // Stages 4-7
    let steel = workflow::reinforcement_stage(&mut trace, &demands, &input.materials, settings)?;
    let shear = workflow::shear_stage(&mut trace, &demands, &steel, &input.materials, tables, settings);
    let deflection =
        workflow::serviceability_stage(&mut trace, &demands, &shear, input.exposure, 1.0, tables, settings);
    let (bars, distribution) = workflow::bar_stage(
        &mut trace,
        &demands,
        &steel,
        Some(DistributionDemand { d_mm, overall_depth_mm }),
        settings,
    )?;

    // Stage 8: packaging
    let mut strips = workflow::assemble_strips(&demands, &steel, &shear, bars).into_iter();
    let main = strips.next().ok_or_else(|| {
        CalcError::invalid_input("clear_span_m", input.clear_span_m.to_string(), "No strip was designed")
    })?;
    let (warnings, steps) = trace.finish();
    debug!(
        "one-way slab '{}' done: D = {:.1} mm, {} warning(s)",
        input.label,
        overall_depth_mm,
        warnings.len()
    );

    Ok(DesignResult {
        label: input.label.clone(),
        slab_type: SlabType::OneWay,
        effective_span_m: span_m,
        long_effective_span_m: None,
        aspect_ratio: 1.0,
        d_mm,
        overall_depth_mm,
        loads,
        moment_coefficients: None,
        main,
        secondary: None,
        distribution,
        deflection,
        shear_method: settings.shear_method,
        warnings,
        steps,
    })
}

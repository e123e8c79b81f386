//! # Two-Way Slab Design
//!
//! Designs a simply supported two-way panel with corners not held down, using
//! the IS 456 Table 27 moment coefficients.
//!
//! ## Assumptions
//!
//! - Four edges simply supported, corners free to lift
//! - One slab thickness, sized from the short span
//! - Short-span bars outermost; long-span bars sit on top of them
//! - Strip shear `wu·L/2` per direction (conservative)
//!
//! ```text
//!            ly (long)
//!   ┌───────────────────────┐
//!   │  ═══════════════════  │  long-span bars, d_y = d_x − (øx + øy)/2
//!   │  ║  ║  ║  ║  ║  ║  ║  │  short-span bars, d_x
//!   └───────────────────────┘ lx (short)
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculations::one_way_slab::{
    default_bar_dia_mm, default_cover_mm, default_span_depth_ratio, validate_non_negative, validate_positive,
};
use crate::calculations::result::{DesignResult, SlabType};
use crate::calculations::workflow::{self, StripDemand, Trace};
use crate::code_tables::{is456_ref, CodeTables};
use crate::equations::slab;
use crate::errors::{CalcError, CalcResult};
use crate::loads::SlabLoads;
use crate::materials::{Exposure, MaterialGrade};
use crate::settings::DesignSettings;

/// Input parameters for a two-way panel.
///
/// `lx_m` and `ly_m` may be given in either order; the shorter one is
/// treated as the short span.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "P-1",
///   "lx_m": 4.0,
///   "ly_m": 5.0,
///   "loads": { "floor_finish_kn_m2": 1.0, "live_kn_m2": 3.0 },
///   "bar_dia_x_mm": 10.0,
///   "bar_dia_y_mm": 8.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoWaySlabInput {
    /// User label
    pub label: String,

    /// Clear span in x (m)
    pub lx_m: f64,

    /// Clear span in y (m)
    pub ly_m: f64,

    /// Width of the supports (m)
    #[serde(default)]
    pub support_width_m: f64,

    /// Superimposed service loads
    pub loads: SlabLoads,

    /// Clear cover to the outer layer (mm)
    #[serde(default = "default_cover_mm")]
    pub cover_mm: f64,

    /// Short-span bar diameter (mm)
    #[serde(default = "default_bar_dia_mm")]
    pub bar_dia_x_mm: f64,

    /// Long-span bar diameter (mm)
    #[serde(default = "default_bar_dia_mm")]
    pub bar_dia_y_mm: f64,

    #[serde(default)]
    pub materials: MaterialGrade,

    /// Basic span/effective depth ratio applied to the short span
    #[serde(default = "default_span_depth_ratio")]
    pub span_depth_ratio: f64,

    #[serde(default)]
    pub exposure: Exposure,
}

impl TwoWaySlabInput {
    /// Input with default cover, bar sizes, grades, L/d and exposure
    pub fn new(label: impl Into<String>, lx_m: f64, ly_m: f64, loads: SlabLoads) -> Self {
        TwoWaySlabInput {
            label: label.into(),
            lx_m,
            ly_m,
            support_width_m: 0.0,
            loads,
            cover_mm: default_cover_mm(),
            bar_dia_x_mm: default_bar_dia_mm(),
            bar_dia_y_mm: default_bar_dia_mm(),
            materials: MaterialGrade::default(),
            span_depth_ratio: default_span_depth_ratio(),
            exposure: Exposure::default(),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        validate_positive("lx_m", self.lx_m, "Span must be positive")?;
        validate_positive("ly_m", self.ly_m, "Span must be positive")?;
        validate_non_negative("support_width_m", self.support_width_m)?;
        validate_non_negative("cover_mm", self.cover_mm)?;
        validate_positive("bar_dia_x_mm", self.bar_dia_x_mm, "Bar diameter must be positive")?;
        validate_positive("bar_dia_y_mm", self.bar_dia_y_mm, "Bar diameter must be positive")?;
        validate_positive("span_depth_ratio", self.span_depth_ratio, "L/d ratio must be positive")?;
        self.loads.validate()?;
        self.materials.validate()
    }

    /// Effective depth of the long-span layer under a short-span depth `d_x_mm`.
    ///
    /// # Errors
    /// `InvalidInput` when the two bar layers use up the whole depth.
    pub fn check_bar_layers(&self, d_x_mm: f64) -> CalcResult<f64> {
        let d_y_mm = d_x_mm - (self.bar_dia_x_mm + self.bar_dia_y_mm) / 2.0;
        if d_y_mm > 0.0 {
            Ok(d_y_mm)
        } else {
            Err(CalcError::invalid_input(
                "bar_dia_y_mm",
                self.bar_dia_y_mm.to_string(),
                "Bar layers leave no effective depth for the long span",
            ))
        }
    }

    /// (short, long) clear spans
    pub fn short_and_long_spans(&self) -> (f64, f64) {
        if self.ly_m >= self.lx_m {
            (self.lx_m, self.ly_m)
        } else {
            (self.ly_m, self.lx_m)
        }
    }
}

/// Design a two-way panel.
///
/// # Errors
///
/// * `InvalidInput` - input or settings rejected before any stage runs
/// * `InsufficientDepth` - either direction cannot carry its moment singly reinforced
pub fn calculate(
    input: &TwoWaySlabInput,
    tables: &CodeTables,
    settings: &DesignSettings,
) -> CalcResult<DesignResult> {
    settings.validate()?;
    input.validate()?;
    debug!("designing two-way slab '{}'", input.label);

    let (short_m, long_m) = input.short_and_long_spans();
    let sizing = workflow::size_depth(short_m, input.support_width_m, input.span_depth_ratio, settings);
    let d_x_mm = sizing.d_mm;
    let d_y_mm = input.check_bar_layers(d_x_mm)?;

    let mut trace = Trace::new(&input.label);

    // Stage 0: inputs
    workflow::check_cover(&mut trace, input.cover_mm, input.exposure);
    trace.step(
        "Inputs",
        format!(
            "lx = {:.3} m, ly = {:.3} m -> short = {:.3} m, long = {:.3} m\n\
             Support width = {:.3} m\n\
             fck = {} MPa, fy = {} MPa\n\
             Cover = {} mm ({} exposure, {} mm recommended), øx = {} mm, øy = {} mm\n\
             Basic L/d = {}",
            input.lx_m,
            input.ly_m,
            short_m,
            long_m,
            input.support_width_m,
            input.materials.fck_mpa,
            input.materials.fy_mpa,
            input.cover_mm,
            input.exposure,
            input.exposure.nominal_cover_mm(),
            input.bar_dia_x_mm,
            input.bar_dia_y_mm,
            input.span_depth_ratio,
        ),
        Some(is456_ref::NOMINAL_COVER),
    );

    // Stage 1: depth sizing on the short span, one thickness for the panel.
    // Both effective spans use the trial depth.
    let overall_depth_mm = slab::overall_depth(d_x_mm, input.cover_mm, input.bar_dia_x_mm);
    let l_short = sizing.effective_span_m;
    let l_long = slab::effective_span(long_m, sizing.initial_d_mm, input.support_width_m);
    let aspect_ratio = l_long / l_short;
    trace.step(
        "Effective spans and depth",
        format!(
            "Trial d = {:.1} mm -> L_short = {:.3} m, L_long = {:.3} m, ly/lx = {:.4}\n\
             d_x = max(L_short / {}, {}) = {:.1} mm, D = {:.1} mm\n\
             d_y = d_x − (øx + øy)/2 = {:.1} mm",
            sizing.initial_d_mm,
            l_short,
            l_long,
            aspect_ratio,
            input.span_depth_ratio,
            settings.min_effective_depth_mm,
            d_x_mm,
            overall_depth_mm,
            d_y_mm,
        ),
        Some(is456_ref::EFFECTIVE_SPAN),
    );

    // Stage 2: loads
    let loads = workflow::load_stage(&mut trace, &input.loads, overall_depth_mm, settings);
    let wu = loads.ultimate_kn_per_m;

    // Stage 3: moments and shears
    let (alpha_x, alpha_y) = tables.moment_coefficients(aspect_ratio);
    let mx_knm = slab::two_way_moment(alpha_x, wu, l_short);
    let my_knm = slab::two_way_moment(alpha_y, wu, l_long);
    let vx_kn = slab::simply_supported_shear(wu, l_short);
    let vy_kn = slab::simply_supported_shear(wu, l_long);
    trace.step(
        "Moments and shears",
        format!(
            "αx = {:.6}, αy = {:.6} at ly/lx = {:.4}\n\
             Mx = αx·wu·lx² = {:.4} kN·m/m, My = αy·wu·ly² = {:.4} kN·m/m\n\
             Vx = {:.3} kN/m, Vy = {:.3} kN/m",
            alpha_x, alpha_y, aspect_ratio, mx_knm, my_knm, vx_kn, vy_kn
        ),
        Some(is456_ref::TWO_WAY_MOMENTS),
    );

    let demands = [
        StripDemand {
            direction: "short",
            span_m: l_short,
            d_mm: d_x_mm,
            mu_knm: mx_knm,
            vu_kn: vx_kn,
        },
        StripDemand {
            direction: "long",
            span_m: l_long,
            d_mm: d_y_mm,
            mu_knm: my_knm,
            vu_kn: vy_kn,
        },
    ];

    // Stages 4-7
    let steel = workflow::reinforcement_stage(&mut trace, &demands, &input.materials, settings)?;
    let shear = workflow::shear_stage(&mut trace, &demands, &steel, &input.materials, tables, settings);
    let deflection =
        workflow::serviceability_stage(&mut trace, &demands, &shear, input.exposure, aspect_ratio, tables, settings);
    let (bars, _) = workflow::bar_stage(&mut trace, &demands, &steel, None, settings)?;

    // Stage 8: packaging
    let mut strips = workflow::assemble_strips(&demands, &steel, &shear, bars).into_iter();
    let (main, secondary) = match (strips.next(), strips.next()) {
        (Some(main), secondary) => (main, secondary),
        (None, _) => {
            return Err(CalcError::invalid_input("lx_m", input.lx_m.to_string(), "No strip was designed"));
        }
    };
    let (warnings, steps) = trace.finish();
    debug!(
        "two-way slab '{}' done: D = {:.1} mm, {} warning(s)",
        input.label,
        overall_depth_mm,
        warnings.len()
    );

    Ok(DesignResult {
        label: input.label.clone(),
        slab_type: SlabType::TwoWay,
        effective_span_m: l_short,
        long_effective_span_m: Some(l_long),
        aspect_ratio,
        d_mm: d_x_mm,
        overall_depth_mm,
        loads,
        moment_coefficients: Some((alpha_x, alpha_y)),
        main,
        secondary,
        distribution: None,
        deflection,
        shear_method: settings.shear_method,
        warnings,
        steps,
    })
}

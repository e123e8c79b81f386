//! # Slab Design Stages
//!
//! Stages shared by the one-way and two-way workflows. Each stage appends
//! exactly one step to the trace and may raise warnings; stages never loop
//! back. The two workflows call them in this order:
//!
//! 1. inputs and cover advisory
//! 2. depth sizing
//! 3. loads
//! 4. moments and shears (workflow specific)
//! 5. reinforcement
//! 6. shear
//! 7. serviceability
//! 8. bar selection
//!
//! Every strip quantity here is per metre width. Moments and shears cross
//! into N·mm and N only inside [`reinforcement_stage`] and [`shear_stage`].

use log::{debug, warn};

use crate::calculations::result::{DeflectionCheck, DesignStep, DesignWarning, StripDesign, WarningKind};
use crate::code_tables::{is456_ref, CodeTables};
use crate::equations::{flexure, shear, slab};
use crate::errors::CalcResult;
use crate::loads::{LoadSummary, SlabLoads};
use crate::materials::{Exposure, MaterialGrade};
use crate::reinforcement::{recommend, BarRecommendation, BarSelectionRules};
use crate::settings::{DesignSettings, ShearMethod};
use crate::units::{KiloNewtonMeters, KiloNewtons, NewtonMillimeters, Newtons};

/// Append-only record of steps and warnings for one design call.
#[derive(Debug, Default)]
pub(crate) struct Trace {
    label: String,
    steps: Vec<DesignStep>,
    warnings: Vec<DesignWarning>,
}

impl Trace {
    pub(crate) fn new(label: &str) -> Self {
        Trace {
            label: label.to_string(),
            ..Default::default()
        }
    }

    pub(crate) fn step(&mut self, title: &str, body: String, clause: Option<&str>) {
        debug!("[{}] {}: {}", self.label, title, body.replace('\n', "; "));
        self.steps.push(DesignStep {
            title: title.to_string(),
            body,
            clause: clause.map(str::to_string),
        });
    }

    pub(crate) fn warn(&mut self, kind: WarningKind, message: String) {
        warn!("[{}] {}: {}", self.label, kind.display_name(), message);
        self.warnings.push(DesignWarning { kind, message });
    }

    pub(crate) fn finish(self) -> (Vec<DesignWarning>, Vec<DesignStep>) {
        (self.warnings, self.steps)
    }
}

// =============================================================================
// STAGE 0: INPUTS
// =============================================================================

/// Warn when the cover is below the IS 456 Table 16 value for the exposure.
pub(crate) fn check_cover(trace: &mut Trace, cover_mm: f64, exposure: Exposure) {
    let recommended = exposure.nominal_cover_mm();
    if cover_mm < recommended {
        trace.warn(
            WarningKind::Cover,
            format!(
                "cover {} mm is below the {} mm recommended for {} exposure",
                cover_mm, recommended, exposure
            ),
        );
    }
}

// =============================================================================
// STAGE 1: DEPTH SIZING
// =============================================================================

/// Effective span and effective depth from the basic span/depth ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DepthSizing {
    /// Trial depth from the clear span (mm)
    pub initial_d_mm: f64,
    /// Effective span (m)
    pub effective_span_m: f64,
    /// Design effective depth (mm)
    pub d_mm: f64,
}

/// One pass: trial depth from the clear span, effective span from that
/// trial depth, final depth from the effective span.
pub(crate) fn size_depth(
    clear_span_m: f64,
    support_width_m: f64,
    span_depth_ratio: f64,
    settings: &DesignSettings,
) -> DepthSizing {
    let initial_d_mm = slab::depth_for_span_ratio(clear_span_m, span_depth_ratio, settings.min_effective_depth_mm);
    let effective_span_m = slab::effective_span(clear_span_m, initial_d_mm, support_width_m);
    let d_mm = slab::depth_for_span_ratio(effective_span_m, span_depth_ratio, settings.min_effective_depth_mm);
    DepthSizing {
        initial_d_mm,
        effective_span_m,
        d_mm,
    }
}

// =============================================================================
// STAGE 2: LOADS
// =============================================================================

pub(crate) fn load_stage(
    trace: &mut Trace,
    loads: &SlabLoads,
    overall_depth_mm: f64,
    settings: &DesignSettings,
) -> LoadSummary {
    let summary = crate::loads::accumulate(loads, overall_depth_mm, settings);
    let partition_note = if loads.partitions_from_walls() {
        format!(" (from {} mm walls)", loads.wall_thickness_mm)
    } else {
        String::new()
    };
    trace.step(
        "Loads",
        format!(
            "Self weight = {:.3} kN/m² (D = {:.1} mm)\n\
             Floor finish = {:.3} kN/m², Partitions = {:.3} kN/m²{}\n\
             Dead = {:.3} kN/m², Live = {:.3} kN/m², Service = {:.3} kN/m²\n\
             wu = {} × {:.3} = {:.4} kN/m per metre strip",
            summary.self_weight_kn_m2,
            overall_depth_mm,
            summary.floor_finish_kn_m2,
            summary.partitions_kn_m2,
            partition_note,
            summary.dead_kn_m2,
            summary.live_kn_m2,
            summary.service_kn_m2,
            summary.load_factor,
            summary.service_kn_m2,
            summary.ultimate_kn_per_m,
        ),
        Some(is456_ref::LOAD_FACTOR),
    );
    summary
}

// =============================================================================
// STAGES 4-7: PER-DIRECTION DESIGN
// =============================================================================

/// Factored actions on one strip direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct StripDemand {
    pub direction: &'static str,
    pub span_m: f64,
    pub d_mm: f64,
    pub mu_knm: f64,
    pub vu_kn: f64,
}

/// Steel area for one strip direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SteelRequirement {
    pub ast_calc_mm2: f64,
    pub ast_min_mm2: f64,
    pub ast_required_mm2: f64,
    pub min_governed: bool,
    pub mu_lim_knm: f64,
}

/// Shear check for one strip direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ShearCheck {
    pub p_t_percent: f64,
    pub tau_v_mpa: f64,
    pub tau_c_mpa: f64,
}

/// Flexural solve, minimum steel floor and limiting moment per direction.
///
/// # Errors
/// `InsufficientDepth` from the solver aborts the whole design.
pub(crate) fn reinforcement_stage(
    trace: &mut Trace,
    demands: &[StripDemand],
    materials: &MaterialGrade,
    settings: &DesignSettings,
) -> CalcResult<Vec<SteelRequirement>> {
    let b = settings.strip_width_mm;
    let mut out = Vec::with_capacity(demands.len());
    let mut lines = Vec::with_capacity(demands.len());

    for demand in demands {
        let mu_nmm = NewtonMillimeters::from(KiloNewtonMeters(demand.mu_knm)).value();
        let mu_lim_nmm = flexure::limiting_moment(demand.d_mm, b, materials.fck_mpa, materials.fy_mpa);
        let mu_lim_knm = KiloNewtonMeters::from(NewtonMillimeters(mu_lim_nmm)).value();
        if mu_nmm > mu_lim_nmm {
            trace.warn(
                WarningKind::LimitingMoment,
                format!(
                    "{}: Mu = {:.3} kN·m/m exceeds Mu,lim = {:.3} kN·m/m, section is over-reinforced",
                    demand.direction, demand.mu_knm, mu_lim_knm
                ),
            );
        }

        let ast_calc_mm2 = flexure::solve_ast(mu_nmm, demand.d_mm, b, materials.fck_mpa, materials.fy_mpa)?;
        let ast_min_mm2 = settings.min_steel_ratio * b * demand.d_mm;
        let min_governed = ast_calc_mm2 < ast_min_mm2;
        let ast_required_mm2 = ast_calc_mm2.max(ast_min_mm2);
        if min_governed {
            trace.warn(
                WarningKind::MinimumSteel,
                format!(
                    "{}: minimum steel {:.1} mm²/m governs over {:.1} mm²/m from flexure",
                    demand.direction, ast_min_mm2, ast_calc_mm2
                ),
            );
        }

        lines.push(format!(
            "{}: Mu = {:.4} kN·m/m, d = {:.1} mm, Ast = {:.2} mm²/m, Ast,min = {:.2} mm²/m -> Ast,req = {:.2} mm²/m (Mu,lim = {:.3} kN·m/m)",
            demand.direction, demand.mu_knm, demand.d_mm, ast_calc_mm2, ast_min_mm2, ast_required_mm2, mu_lim_knm
        ));
        out.push(SteelRequirement {
            ast_calc_mm2,
            ast_min_mm2,
            ast_required_mm2,
            min_governed,
            mu_lim_knm,
        });
    }

    trace.step("Flexural reinforcement", lines.join("\n"), Some(is456_ref::FLEXURE));
    Ok(out)
}

/// τc by the configured method.
pub(crate) fn concrete_shear_strength(
    fck: f64,
    p_t_percent: f64,
    tables: &CodeTables,
    settings: &DesignSettings,
) -> f64 {
    match settings.shear_method {
        ShearMethod::ClosedForm => shear::tau_c_for_ratio(fck, p_t_percent),
        ShearMethod::Table19 => tables.tau_c(fck, p_t_percent),
    }
}

/// Nominal shear stress against concrete capacity at the design steel ratio.
pub(crate) fn shear_stage(
    trace: &mut Trace,
    demands: &[StripDemand],
    steel: &[SteelRequirement],
    materials: &MaterialGrade,
    tables: &CodeTables,
    settings: &DesignSettings,
) -> Vec<ShearCheck> {
    let b = settings.strip_width_mm;
    let mut out = Vec::with_capacity(demands.len());
    let mut lines = Vec::with_capacity(demands.len());

    for (demand, req) in demands.iter().zip(steel) {
        let vu_n = Newtons::from(KiloNewtons(demand.vu_kn)).value();
        let tau_v_mpa = shear::tau_v(vu_n, b, demand.d_mm);
        let p_t_percent = shear::steel_ratio_percent(req.ast_required_mm2, b, demand.d_mm);
        let tau_c_mpa = concrete_shear_strength(materials.fck_mpa, p_t_percent, tables, settings);

        if tau_v_mpa > tau_c_mpa {
            trace.warn(
                WarningKind::ShearCapacity,
                format!(
                    "{}: τv = {:.4} N/mm² exceeds τc = {:.4} N/mm²; increase depth or provide shear reinforcement",
                    demand.direction, tau_v_mpa, tau_c_mpa
                ),
            );
        }
        lines.push(format!(
            "{}: Vu = {:.3} kN/m, τv = {:.4} N/mm², p_t = {:.4} %, τc = {:.4} N/mm² -> {}",
            demand.direction,
            demand.vu_kn,
            tau_v_mpa,
            p_t_percent,
            tau_c_mpa,
            if tau_v_mpa <= tau_c_mpa { "OK" } else { "NOT OK" }
        ));
        out.push(ShearCheck {
            p_t_percent,
            tau_v_mpa,
            tau_c_mpa,
        });
    }

    lines.push(format!("τc by {}", settings.shear_method.display_name()));
    trace.step("Shear", lines.join("\n"), Some(is456_ref::SHEAR_STRENGTH));
    out
}

/// Crack indicator, exposure advisory and span/depth deflection control.
///
/// Deflection is checked on the first (governing) demand.
pub(crate) fn serviceability_stage(
    trace: &mut Trace,
    demands: &[StripDemand],
    shear_checks: &[ShearCheck],
    exposure: Exposure,
    aspect_ratio: f64,
    tables: &CodeTables,
    settings: &DesignSettings,
) -> DeflectionCheck {
    let mut lines = Vec::new();

    for (demand, check) in demands.iter().zip(shear_checks) {
        if check.p_t_percent < settings.crack_steel_ratio_percent {
            trace.warn(
                WarningKind::CrackRisk,
                format!(
                    "{}: steel ratio {:.4} % is below {} %, cracking likely",
                    demand.direction, check.p_t_percent, settings.crack_steel_ratio_percent
                ),
            );
        }
        lines.push(format!("{}: p_t = {:.4} %", demand.direction, check.p_t_percent));
    }

    if exposure.is_aggressive() {
        trace.warn(
            WarningKind::Exposure,
            format!(
                "{} exposure: increase cover or use corrosion-resistant reinforcement",
                exposure
            ),
        );
    }

    let (span_m, d_mm, p_t) = match (demands.first(), shear_checks.first()) {
        (Some(demand), Some(check)) => (demand.span_m, demand.d_mm, check.p_t_percent),
        _ => (0.0, 1.0, 0.0),
    };
    let actual_span_depth = span_m * 1000.0 / d_mm;
    let basic_span_depth = tables.allowable_span_depth.lookup(p_t);
    let modifier = tables.span_depth_modifier.lookup(aspect_ratio);
    let deflection = DeflectionCheck {
        actual_span_depth,
        basic_span_depth,
        modifier,
        allowable_span_depth: basic_span_depth * modifier,
    };

    if !deflection.ok() {
        trace.warn(
            WarningKind::Deflection,
            format!(
                "L/d = {:.2} exceeds the allowable {:.2}; increase depth",
                deflection.actual_span_depth, deflection.allowable_span_depth
            ),
        );
    }

    lines.push(format!("Exposure: {}", exposure));
    lines.push(format!(
        "Deflection: L/d = {:.2}, allowable = {:.2} × {:.3} = {:.2} -> {}",
        deflection.actual_span_depth,
        deflection.basic_span_depth,
        deflection.modifier,
        deflection.allowable_span_depth,
        if deflection.ok() { "OK" } else { "NOT OK" }
    ));
    trace.step("Serviceability", lines.join("\n"), Some(is456_ref::DEFLECTION_MODIFIERS));
    deflection
}

/// Distribution steel demand of a one-way slab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DistributionDemand {
    pub d_mm: f64,
    pub overall_depth_mm: f64,
}

/// Bar size and spacing per direction, plus distribution steel when asked.
pub(crate) fn bar_stage(
    trace: &mut Trace,
    demands: &[StripDemand],
    steel: &[SteelRequirement],
    distribution: Option<DistributionDemand>,
    settings: &DesignSettings,
) -> CalcResult<(Vec<BarRecommendation>, Option<BarRecommendation>)> {
    let mut lines = Vec::new();
    let mut recs = Vec::with_capacity(demands.len());

    for (demand, req) in demands.iter().zip(steel) {
        let rules = BarSelectionRules::main_bars(settings, demand.d_mm);
        let rec = recommend(req.ast_required_mm2, &rules)?;
        record_bars(trace, &mut lines, demand.direction, &rec, rules.max_spacing_mm);
        recs.push(rec);
    }

    let dist_rec = match distribution {
        Some(dist) => {
            let ast = settings.min_steel_ratio * settings.strip_width_mm * dist.overall_depth_mm;
            let rules = BarSelectionRules::distribution_bars(settings, dist.d_mm);
            let rec = recommend(ast, &rules)?;
            record_bars(trace, &mut lines, "distribution", &rec, rules.max_spacing_mm);
            Some(rec)
        }
        None => None,
    };

    trace.step("Bar selection", lines.join("\n"), Some(is456_ref::BAR_SPACING));
    Ok((recs, dist_rec))
}

fn record_bars(trace: &mut Trace, lines: &mut Vec<String>, direction: &str, rec: &BarRecommendation, max_spacing_mm: f64) {
    let chosen = &rec.recommended;
    lines.push(format!(
        "{}: Ast,req = {:.2} mm²/m -> {} (Ast,prov = {:.2} mm²/m, max spacing {} mm)",
        direction,
        rec.ast_required_mm2,
        chosen.notation(),
        chosen.ast_provided_mm2,
        max_spacing_mm
    ));
    if !rec.ok {
        trace.warn(
            WarningKind::BarSpacing,
            format!("{}: {}", direction, rec.messages.join("; ")),
        );
    }
}

/// Zip per-direction stage outputs into strip designs.
pub(crate) fn assemble_strips(
    demands: &[StripDemand],
    steel: &[SteelRequirement],
    shear_checks: &[ShearCheck],
    bars: Vec<BarRecommendation>,
) -> Vec<StripDesign> {
    demands
        .iter()
        .zip(steel)
        .zip(shear_checks)
        .zip(bars)
        .map(|(((demand, req), check), bars)| StripDesign {
            direction: demand.direction.to_string(),
            span_m: demand.span_m,
            d_mm: demand.d_mm,
            mu_knm: demand.mu_knm,
            vu_kn: demand.vu_kn,
            mu_lim_knm: req.mu_lim_knm,
            ast_calc_mm2: req.ast_calc_mm2,
            ast_min_mm2: req.ast_min_mm2,
            ast_required_mm2: req.ast_required_mm2,
            min_governed: req.min_governed,
            p_t_percent: check.p_t_percent,
            tau_v_mpa: check.tau_v_mpa,
            tau_c_mpa: check.tau_c_mpa,
            bars,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demand(mu_knm: f64, d_mm: f64) -> StripDemand {
        StripDemand {
            direction: "main",
            span_m: 4.0,
            d_mm,
            mu_knm,
            vu_kn: 27.375,
        }
    }

    #[test]
    fn test_size_depth_zero_support() {
        let s = size_depth(4.0, 0.0, 20.0, &DesignSettings::default());
        assert_eq!(s.initial_d_mm, 200.0);
        assert_eq!(s.effective_span_m, 4.0);
        assert_eq!(s.d_mm, 200.0);
    }

    #[test]
    fn test_size_depth_wide_support() {
        // Lc + d0 = 4.2 governs over Lc + 0.3
        let s = size_depth(4.0, 0.3, 20.0, &DesignSettings::default());
        assert!((s.effective_span_m - 4.2).abs() < 1e-12);
        assert!((s.d_mm - 210.0).abs() < 1e-9);
    }

    #[test]
    fn test_size_depth_minimum() {
        let s = size_depth(1.2, 0.0, 20.0, &DesignSettings::default());
        assert_eq!(s.d_mm, 100.0);
    }

    #[test]
    fn test_cover_warning() {
        let mut trace = Trace::new("t");
        check_cover(&mut trace, 20.0, Exposure::Moderate);
        check_cover(&mut trace, 30.0, Exposure::Moderate);
        let (warnings, steps) = trace.finish();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::Cover);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_minimum_steel_governs_small_moment() {
        let mut trace = Trace::new("t");
        let steel = reinforcement_stage(
            &mut trace,
            &[demand(2.0, 150.0)],
            &MaterialGrade::default(),
            &DesignSettings::default(),
        )
        .unwrap();
        assert!(steel[0].min_governed);
        assert!((steel[0].ast_required_mm2 - 180.0).abs() < 1e-9);
        let (warnings, steps) = trace.finish();
        assert!(warnings.iter().any(|w| w.kind == WarningKind::MinimumSteel));
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn test_reinforcement_stage_propagates_insufficient_depth() {
        let mut trace = Trace::new("t");
        let err = reinforcement_stage(
            &mut trace,
            &[demand(200.0, 100.0)],
            &MaterialGrade::default(),
            &DesignSettings::default(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INSUFFICIENT_DEPTH");
    }

    #[test]
    fn test_shear_method_selection() {
        let tables = CodeTables::standard();
        let closed = concrete_shear_strength(25.0, 0.5, tables, &DesignSettings::default());
        let table = concrete_shear_strength(
            25.0,
            0.5,
            tables,
            &DesignSettings {
                shear_method: ShearMethod::Table19,
                ..Default::default()
            },
        );
        assert_eq!(table, tables.tau_c(25.0, 0.5));
        assert!((closed - table).abs() < 0.01);
    }

    #[test]
    fn test_serviceability_one_way_aspect() {
        let mut trace = Trace::new("t");
        let check = ShearCheck {
            p_t_percent: 0.2,
            tau_v_mpa: 0.1,
            tau_c_mpa: 0.3,
        };
        let deflection = serviceability_stage(
            &mut trace,
            &[demand(10.0, 200.0)],
            &[check],
            Exposure::Severe,
            1.0,
            CodeTables::standard(),
            &DesignSettings::default(),
        );
        assert!((deflection.allowable_span_depth - 22.5).abs() < 1e-9);
        assert!(deflection.ok());
        let (warnings, _) = trace.finish();
        assert!(warnings.iter().any(|w| w.kind == WarningKind::Exposure));
        assert!(!warnings.iter().any(|w| w.kind == WarningKind::CrackRisk));
    }
}

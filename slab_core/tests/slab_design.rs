//! End-to-end slab designs through the public API.

use approx::assert_relative_eq;
use slab_core::calculations::{one_way_slab, two_way_slab};
use slab_core::code_tables::is456_ref;
use slab_core::equations::flexure::{moment_capacity, solve_ast};
use slab_core::{
    classify_panel, design_one_way, design_two_way, CalculationItem, CodeTables, DesignResult, DesignSettings,
    Exposure, MaterialGrade, OneWaySlabInput, Project, ShearMethod, SlabLoads, SlabType, TwoWaySlabInput,
    WarningKind,
};

fn one_way_4m() -> OneWaySlabInput {
    OneWaySlabInput::new("S-1", 4.0, SlabLoads::new(0.5, 3.0))
}

/// Clause cited by the step with the given title
fn clause_of<'a>(r: &'a DesignResult, title: &str) -> Option<&'a str> {
    r.steps.iter().find(|s| s.title == title).and_then(|s| s.clause.as_deref())
}

fn one_way_with(span_depth_ratio: f64, live_kn_m2: f64) -> OneWaySlabInput {
    OneWaySlabInput {
        span_depth_ratio,
        ..OneWaySlabInput::new("S-check", 4.0, SlabLoads::new(1.0, live_kn_m2))
    }
}

#[test]
fn one_way_four_metre_span() {
    let r = design_one_way(&one_way_4m()).unwrap();
    assert_eq!(r.slab_type, SlabType::OneWay);
    assert!(r.effective_span_m >= 3.9 && r.effective_span_m <= 4.0);
    assert!(r.d_mm >= 100.0);
    assert!(r.main.ast_required_mm2 >= r.main.ast_min_mm2);
    assert!(r.main.bars.ok);
    assert!(r.main.ast_provided_mm2() >= r.main.ast_required_mm2);
    assert_eq!(clause_of(&r, "Effective span and depth"), Some("IS 456 22.2"));
}

#[test]
fn two_way_square_panel_uses_first_row() {
    let input = TwoWaySlabInput::new("P-1", 4.0, 4.0, SlabLoads::new(0.5, 3.0));
    let r = design_two_way(&input).unwrap();
    let (ax, ay) = r.moment_coefficients.unwrap();
    assert_eq!(ax, 0.062);
    assert_eq!(ay, 0.062);
    assert!(r.secondary.is_some());
}

#[test]
fn minimum_steel_floor_raises_warning() {
    let input = OneWaySlabInput::new("S-short", 1.5, SlabLoads::new(0.5, 2.0));
    let r = design_one_way(&input).unwrap();
    assert!(r.main.ast_calc_mm2 < r.main.ast_min_mm2);
    assert_eq!(r.main.ast_required_mm2, r.main.ast_min_mm2);
    assert!(r.has_warning(WarningKind::MinimumSteel));
}

#[test]
fn invalid_input_is_a_hard_error() {
    let input = OneWaySlabInput {
        clear_span_m: f64::NAN,
        ..one_way_4m()
    };
    let err = design_one_way(&input).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
    assert!(!err.is_recoverable());
}

#[test]
fn shallow_section_reports_insufficient_depth() {
    let err = solve_ast(20.0e6, 20.0, 1000.0, 25.0, 500.0).unwrap_err();
    assert_eq!(err.error_code(), "INSUFFICIENT_DEPTH");

    let ast = solve_ast(20.0e6, 150.0, 1000.0, 25.0, 500.0).unwrap();
    let rounded = 0.5 * (25.0 / 500.0) * 1000.0 * 150.0
        * (1.0 - (1.0_f64 - 4.6 * 20.0e6 / (25.0 * 1000.0 * 150.0 * 150.0)).sqrt());
    assert!((ast - rounded).abs() / rounded < 0.01);
    assert_relative_eq!(moment_capacity(ast, 150.0, 1000.0, 25.0, 500.0), 20.0e6, max_relative = 1e-9);
}

#[test]
fn shear_methods_agree_on_typical_slab() {
    let tables = CodeTables::standard();
    let closed = one_way_slab::calculate(&one_way_4m(), tables, &DesignSettings::default()).unwrap();
    let table = one_way_slab::calculate(
        &one_way_4m(),
        tables,
        &DesignSettings {
            shear_method: ShearMethod::Table19,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(table.shear_method, ShearMethod::Table19);
    assert!((closed.main.tau_c_mpa - table.main.tau_c_mpa).abs() < 0.01);
}

#[test]
fn custom_settings_change_the_design() {
    let settings = DesignSettings {
        bar_catalogue_mm: vec![10.0, 12.0],
        ..Default::default()
    };
    let r = one_way_slab::calculate(&one_way_4m(), CodeTables::standard(), &settings).unwrap();
    assert_eq!(r.main.bars.recommended.dia_mm, 10.0);
    assert!(r.main.bars.candidates.iter().all(|c| c.dia_mm >= 10.0));
}

#[test]
fn result_serializes_to_json() {
    let r = design_one_way(&one_way_4m()).unwrap();
    let json = serde_json::to_string(&r).unwrap();
    assert!(json.contains("\"warnings\""));
    assert!(json.contains("\"steps\""));
    let back: DesignResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.warnings, r.warnings);
    assert_eq!(back.steps, r.steps);
    assert_eq!(back.main.bars.recommended.notation(), r.main.bars.recommended.notation());
    assert_relative_eq!(back.main.ast_required_mm2, r.main.ast_required_mm2, max_relative = 1e-12);
}

#[test]
fn designs_are_repeatable() {
    let input = TwoWaySlabInput {
        exposure: Exposure::VerySevere,
        materials: MaterialGrade::new(30.0, 415.0),
        ..TwoWaySlabInput::new("P-2", 3.5, 5.0, SlabLoads::new(1.0, 4.0).with_wall_thickness(115.0))
    };
    let a = two_way_slab::calculate(&input, CodeTables::standard(), &DesignSettings::default()).unwrap();
    let b = two_way_slab::calculate(&input, CodeTables::standard(), &DesignSettings::default()).unwrap();
    assert_eq!(a, b);
    assert!(a.has_warning(WarningKind::Exposure));
    assert!(a.has_warning(WarningKind::Cover));
}

#[test]
fn project_batch_follows_panel_classification() {
    let mut project = Project::new("Engineer", "26-001", "Client");
    for (label, lx, ly) in [("corridor", 2.0, 6.0), ("room", 4.0, 5.0)] {
        let loads = SlabLoads::new(1.0, 3.0);
        let item = match classify_panel(lx, ly) {
            SlabType::OneWay => CalculationItem::OneWaySlab(OneWaySlabInput::new(label, lx.min(ly), loads)),
            SlabType::TwoWay => CalculationItem::TwoWaySlab(TwoWaySlabInput::new(label, lx, ly, loads)),
        };
        project.add_item(item);
    }

    let outcomes = project.design_all(CodeTables::standard());
    assert_eq!(outcomes.len(), 2);
    let corridor = outcomes[0].result.as_ref().unwrap();
    let room = outcomes[1].result.as_ref().unwrap();
    assert_eq!(corridor.slab_type, SlabType::OneWay);
    assert_eq!(room.slab_type, SlabType::TwoWay);
}

#[test]
fn slender_slab_fails_deflection() {
    // d = 4000 / 35 mm, far above the Fig. 4 limit at this steel ratio
    let r = design_one_way(&one_way_with(35.0, 3.0)).unwrap();
    assert!(r.has_warning(WarningKind::Deflection));
    assert!(!r.deflection.ok());
    assert!(r.deflection.actual_span_depth > r.deflection.allowable_span_depth);
    assert_eq!(clause_of(&r, "Serviceability"), Some(is456_ref::DEFLECTION_MODIFIERS));
    assert!(!r.passes());
}

#[test]
fn heavy_live_load_fails_shear() {
    let r = design_one_way(&one_way_with(15.0, 50.0)).unwrap();
    assert!(r.has_warning(WarningKind::ShearCapacity));
    assert!(!r.main.shear_ok());
    assert!(r.main.tau_v_mpa > r.main.tau_c_mpa);
    assert_eq!(clause_of(&r, "Shear"), Some(is456_ref::SHEAR_STRENGTH));
    assert!(!r.passes());
}

#[test]
fn moment_above_limit_warns_but_still_designs() {
    // Mu ≈ 0.17·fck·b·d²: beyond Mu,lim, short of the singly reinforced maximum
    let r = design_one_way(&one_way_with(30.0, 20.0)).unwrap();
    assert!(r.main.mu_knm > r.main.mu_lim_knm);
    assert!(r.has_warning(WarningKind::LimitingMoment));
    assert!(r.main.ast_calc_mm2 > 0.0);
    assert_eq!(clause_of(&r, "Flexural reinforcement"), Some(is456_ref::FLEXURE));
    assert!(!r.passes());
}

#[test]
fn undersized_catalogue_fails_bar_spacing() {
    let settings = DesignSettings {
        bar_catalogue_mm: vec![6.0],
        ..Default::default()
    };
    let r = one_way_slab::calculate(&one_way_4m(), CodeTables::standard(), &settings).unwrap();
    assert!(!r.main.bars.ok);
    assert_eq!(r.main.bars.recommended.dia_mm, 6.0);
    // Main and distribution steel both report the violation
    assert_eq!(r.warnings_of(WarningKind::BarSpacing).count(), 2);
    assert_eq!(clause_of(&r, "Bar selection"), Some(is456_ref::BAR_SPACING));
    assert!(!r.passes());
}

#[test]
fn default_cover_matches_default_exposure() {
    let r = design_one_way(&one_way_4m()).unwrap();
    assert!(!r.has_warning(WarningKind::Cover));

    let input = TwoWaySlabInput::new("P-3", 4.0, 5.0, SlabLoads::new(1.0, 3.0));
    assert!(input.cover_mm >= input.exposure.nominal_cover_mm());
    assert!(!design_two_way(&input).unwrap().has_warning(WarningKind::Cover));
}

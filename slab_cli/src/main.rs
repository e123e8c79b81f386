//! # Slabwise CLI Application
//!
//! Terminal prompt for a single slab design. Reads the panel dimensions and
//! loads, classifies the panel, runs the matching workflow and prints the
//! result, its warnings, the step trace and the JSON document.
//!
//! Set `RUST_LOG=debug` to see each design stage as it runs.

use std::io::{self, BufRead, Write};

use log::info;
use slab_core::calculations::{classify_panel, DesignResult, SlabType};
use slab_core::calculations::{one_way_slab, two_way_slab, OneWaySlabInput, TwoWaySlabInput};
use slab_core::{CodeTables, ConcreteGrade, DesignSettings, Exposure, MaterialGrade, SlabLoads, SteelGrade};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn prompt_concrete_grade(default: ConcreteGrade) -> ConcreteGrade {
    let options: Vec<&str> = ConcreteGrade::ALL.iter().map(|g| g.display_name()).collect();
    let prompt = format!("Enter concrete grade ({}) [{}]: ", options.join("/"), default);
    match prompt_line(&prompt) {
        Some(text) => ConcreteGrade::from_str_flexible(&text).unwrap_or_else(|e| {
            eprintln!("  {} - using {}", e, default);
            default
        }),
        None => default,
    }
}

fn prompt_steel_grade(default: SteelGrade) -> SteelGrade {
    let options: Vec<&str> = SteelGrade::ALL.iter().map(|g| g.display_name()).collect();
    let prompt = format!("Enter steel grade ({}) [{}]: ", options.join("/"), default);
    match prompt_line(&prompt) {
        Some(text) => SteelGrade::from_str_flexible(&text).unwrap_or_else(|e| {
            eprintln!("  {} - using {}", e, default);
            default
        }),
        None => default,
    }
}

fn prompt_exposure(default: Exposure) -> Exposure {
    println!("Exposure conditions:");
    for (i, exposure) in Exposure::ALL.iter().enumerate() {
        println!("  {}. {} ({} mm nominal cover)", i + 1, exposure, exposure.nominal_cover_mm());
    }
    let choice = prompt_f64(&format!("Select exposure [{}]: ", default), 0.0) as usize;
    choice
        .checked_sub(1)
        .and_then(|i| Exposure::ALL.get(i).copied())
        .unwrap_or(default)
}

fn main() {
    env_logger::init();

    println!("Slabwise CLI - RC Slab Design (IS 456)");
    println!("======================================");
    println!();

    let tables = match CodeTables::is456() {
        Ok(tables) => tables,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let settings = DesignSettings::default();

    let lx_m = prompt_f64("Enter short span lx (m) [4.0]: ", 4.0);
    let ly_m = prompt_f64("Enter long span ly (m) [4.0]: ", 4.0);
    let live = prompt_f64("Enter live load (kN/m²) [3.0]: ", 3.0);
    let finish = prompt_f64("Enter floor finish (kN/m²) [0.5]: ", 0.5);
    let wall = prompt_f64("Enter partition wall thickness (mm, 0 for none) [0.0]: ", 0.0);
    let concrete = prompt_concrete_grade(ConcreteGrade::M25);
    let steel = prompt_steel_grade(SteelGrade::Fe500);
    let exposure = prompt_exposure(Exposure::default());
    let default_cover = exposure.nominal_cover_mm();
    let cover = prompt_f64(&format!("Enter clear cover (mm) [{:.1}]: ", default_cover), default_cover);
    let materials = MaterialGrade::from_grades(concrete, steel);
    info!("{} / {}, {} exposure, cover {} mm", concrete, steel, exposure, cover);

    let loads = SlabLoads::new(finish, live).with_wall_thickness(wall);
    let slab_type = classify_panel(lx_m, ly_m);
    info!("panel {} x {} m classified as {}", lx_m, ly_m, slab_type);

    println!();
    println!("Designing {} ({:.2} m x {:.2} m)...", slab_type, lx_m, ly_m);
    println!();

    let outcome = match slab_type {
        SlabType::OneWay => {
            let input = OneWaySlabInput {
                cover_mm: cover,
                materials,
                exposure,
                ..OneWaySlabInput::new("CLI-Demo", lx_m.min(ly_m), loads)
            };
            one_way_slab::calculate(&input, &tables, &settings)
        }
        SlabType::TwoWay => {
            let input = TwoWaySlabInput {
                cover_mm: cover,
                materials,
                exposure,
                ..TwoWaySlabInput::new("CLI-Demo", lx_m, ly_m, loads)
            };
            two_way_slab::calculate(&input, &tables, &settings)
        }
    };

    match outcome {
        Ok(result) => {
            print_result(&result);

            println!();
            println!("JSON Output:");
            if let Ok(json) = serde_json::to_string_pretty(&result) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    }
}

fn print_result(result: &DesignResult) {
    println!("═══════════════════════════════════════");
    println!("  SLAB DESIGN RESULTS ({})", result.slab_type);
    println!("═══════════════════════════════════════");
    println!();
    println!("Geometry:");
    println!("  Effective span: {:.3} m", result.effective_span_m);
    if let Some(long) = result.long_effective_span_m {
        println!("  Long span:      {:.3} m (ly/lx = {:.3})", long, result.aspect_ratio);
    }
    println!("  d = {:.1} mm, D = {:.1} mm", result.d_mm, result.overall_depth_mm);
    println!();
    println!("Loads:");
    println!(
        "  Service {:.3} kN/m², wu = {:.3} kN/m",
        result.loads.service_kn_m2, result.loads.ultimate_kn_per_m
    );
    println!();
    for strip in result.strips() {
        println!("Direction: {}", strip.direction);
        println!("  Mu = {:.3} kN·m/m, Vu = {:.3} kN/m", strip.mu_knm, strip.vu_kn);
        println!(
            "  Ast,req = {:.1} mm²/m{} -> {} ({:.1} mm²/m)",
            strip.ast_required_mm2,
            if strip.min_governed { " (minimum)" } else { "" },
            strip.bars.recommended.notation(),
            strip.ast_provided_mm2()
        );
        println!(
            "  Shear: τv = {:.3} vs τc = {:.3} N/mm² {}",
            strip.tau_v_mpa,
            strip.tau_c_mpa,
            status_icon(strip.shear_ok())
        );
        println!();
    }
    if let Some(dist) = &result.distribution {
        println!("Distribution steel: {}", dist.recommended.notation());
        println!();
    }
    println!(
        "Deflection: L/d = {:.2} vs {:.2} {}",
        result.deflection.actual_span_depth,
        result.deflection.allowable_span_depth,
        status_icon(result.deflection.ok())
    );
    println!();

    if !result.warnings.is_empty() {
        println!("Warnings:");
        for w in &result.warnings {
            println!("  - {}", w);
        }
        println!();
    }

    println!("Steps:");
    for (i, step) in result.steps.iter().enumerate() {
        match &step.clause {
            Some(clause) => println!("  {}. {} ({})", i + 1, step.title, clause),
            None => println!("  {}. {}", i + 1, step.title),
        }
        for line in step.body.lines() {
            println!("       {}", line);
        }
    }
    println!();
    println!("═══════════════════════════════════════");
    println!("  RESULT: {}", if result.passes() { "PASS" } else { "CHECK WARNINGS" });
    println!("═══════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

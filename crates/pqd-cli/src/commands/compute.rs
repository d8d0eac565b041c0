use std::io;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use pqd_cli::common::{
    json_rows, resolve_angle, write_csv_from_json, write_json, write_jsonl, OutputFormat,
};
use pqd_core::{
    find_preset, OperatingPoint, PqdError, SignConvention, Solution, VarMode, VoltAmperes,
};

/// Flat single-row projection of a solution for csv/jsonl piping.
#[derive(Debug, Serialize)]
struct ComputeRow {
    angle_rad: f64,
    angle_deg: f64,
    p: f64,
    q: f64,
    s: f64,
    cos_phi: f64,
    power_factor: f64,
    phase: &'static str,
    flow: &'static str,
    quadrant: &'static str,
    current: f64,
    current_angle_deg: f64,
    impedance: f64,
    impedance_angle_deg: f64,
    convention: &'static str,
}

impl ComputeRow {
    fn from_solution(solution: &Solution) -> Self {
        let angle = solution.point.angle();
        ComputeRow {
            angle_rad: angle.value(),
            angle_deg: angle.to_degrees().value(),
            p: solution.power.p.value(),
            q: solution.power.q.value(),
            s: solution.apparent.value(),
            cos_phi: solution.power_factor.cos_phi,
            power_factor: solution.power_factor.value,
            phase: solution.power_factor.phase.as_str(),
            flow: solution.power_factor.flow.as_str(),
            quadrant: solution.quadrant.map_or("-", |quad| quad.as_str()),
            current: solution.circuit.current.value(),
            current_angle_deg: solution.circuit.current_angle.to_degrees().value(),
            impedance: solution.circuit.impedance.value(),
            impedance_angle_deg: solution.circuit.impedance_angle.to_degrees().value(),
            convention: solution.power_factor.convention.as_str(),
        }
    }
}

pub fn handle(
    angle_deg: Option<f64>,
    angle_rad: Option<f64>,
    magnitude: f64,
    preset: Option<&str>,
    convention: &str,
    format: OutputFormat,
) -> Result<()> {
    let convention = convention.parse::<SignConvention>()?;
    let point = match preset {
        Some(id) => {
            let preset = find_preset(id).ok_or_else(|| {
                PqdError::InvalidInput(format!("unknown preset '{id}'; see `pqd presets`"))
            })?;
            info!("Solving preset '{}' under {}", preset.id, convention);
            preset.operating_point()?
        }
        None => {
            let angle = resolve_angle(angle_deg, angle_rad);
            info!(
                "Solving phi {:.4} rad at {:.3} pu under {}",
                angle.value(),
                magnitude,
                convention
            );
            OperatingPoint::new(angle, VoltAmperes(magnitude))?
        }
    };
    let solution = point.solve(convention);

    match format {
        OutputFormat::Table => print_solution(&solution),
        OutputFormat::Json => write_json(&solution, &mut io::stdout(), true)?,
        OutputFormat::Jsonl => {
            write_jsonl(&[ComputeRow::from_solution(&solution)], &mut io::stdout())?
        }
        OutputFormat::Csv => {
            let rows = json_rows(&[ComputeRow::from_solution(&solution)])?;
            write_csv_from_json(&rows, &mut io::stdout())?;
        }
    }
    Ok(())
}

fn print_solution(solution: &Solution) {
    let angle = solution.point.angle().normalized();
    let pf = &solution.power_factor;
    let circuit = &solution.circuit;

    println!(
        "Operating point: phi {:+.2} deg ({:+.4} rad), S {}",
        angle.to_degrees().value(),
        angle.value(),
        solution.apparent
    );
    match solution.quadrant {
        Some(quadrant) => println!("Quadrant {}: {}", quadrant, quadrant.describe()),
        None => println!("Origin: no power exchange"),
    }
    println!("  P  {} ({})", solution.power.p, pf.flow);
    println!(
        "  Q  {} ({})",
        solution.power.q,
        VarMode::from_vars(solution.power.q)
    );
    println!(
        "  pf {:+.3} {} [{}], cos phi {:+.3}",
        pf.value, pf.phase, pf.convention, pf.cos_phi
    );
    println!(
        "  I  {} at {:+.2} deg",
        circuit.current,
        circuit.current_angle.normalized().to_degrees().value()
    );
    println!(
        "  Z  {} at {:+.2} deg",
        circuit.impedance,
        circuit.impedance_angle.normalized().to_degrees().value()
    );
}

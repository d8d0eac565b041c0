use std::io::{self, Write};

use anyhow::{bail, Result};
use polars::prelude::*;
use tabwriter::TabWriter;
use tracing::info;

use pqd_cli::common::{
    resolve_angle, write_csv_from_json, write_frame, write_json, write_jsonl, OutputFormat,
};
use pqd_core::{
    OperatingPoint, Phasor, Radians, SignConvention, VoltAmperes, WaveformSampler, WaveformSet,
};

pub fn handle(
    angle_deg: Option<f64>,
    angle_rad: Option<f64>,
    magnitude: f64,
    voltage: f64,
    samples: usize,
    out: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    if !voltage.is_finite() || voltage <= 0.0 {
        bail!("reference voltage must be positive, got {voltage}");
    }
    let angle = resolve_angle(angle_deg, angle_rad);
    let point = OperatingPoint::new(angle, VoltAmperes(magnitude))?;
    let reference = Phasor::from_polar(voltage, Radians::ZERO);
    let solution = point.solve_at(reference, SignConvention::default());
    let sampler = WaveformSampler::with_samples(samples)?;
    info!(
        "Sampling {} points of phi {:.4} rad at {:.3} pu",
        sampler.samples(),
        angle.value(),
        magnitude
    );
    let set = sampler.sample(
        solution.circuit.voltage_phasor(),
        solution.circuit.current_phasor(),
    );

    if let Some(path) = out {
        let mut df = waveform_frame(&set)?;
        write_frame(&mut df, path)?;
        println!("Wrote {} waveform samples to {path}", set.len());
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_set(&set)?,
        OutputFormat::Json => write_json(&set, &mut io::stdout(), true)?,
        OutputFormat::Jsonl => write_jsonl(&sample_rows(&set), &mut io::stdout())?,
        OutputFormat::Csv => write_csv_from_json(&sample_rows(&set), &mut io::stdout())?,
    }
    Ok(())
}

fn waveform_frame(set: &WaveformSet) -> Result<DataFrame> {
    let mut columns = vec![Series::new("time_ms", set.time.clone())];
    for (name, values) in set.series() {
        columns.push(Series::new(name, values.to_vec()));
    }
    Ok(DataFrame::new(columns)?)
}

fn sample_rows(set: &WaveformSet) -> Vec<serde_json::Value> {
    (0..set.len())
        .map(|i| {
            serde_json::json!({
                "time_ms": set.time[i],
                "voltage": set.voltage[i],
                "current": set.current[i],
                "active_current": set.active_current[i],
                "reactive_current": set.reactive_current[i],
                "summed_current": set.summed_current[i],
                "active_power": set.active_power[i],
                "reactive_power": set.reactive_power[i],
                "apparent_power": set.apparent_power[i],
            })
        })
        .collect()
}

fn print_set(set: &WaveformSet) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(
        writer,
        "TIME MS\tVOLTAGE\tCURRENT\tI ACTIVE\tI REACTIVE\tI SUM\tP\tQ\tS"
    )?;
    for i in 0..set.len() {
        writeln!(
            writer,
            "{:+.3}\t{:+.4}\t{:+.4}\t{:+.4}\t{:+.4}\t{:+.4}\t{:+.4}\t{:+.4}\t{:+.4}",
            set.time[i],
            set.voltage[i],
            set.current[i],
            set.active_current[i],
            set.reactive_current[i],
            set.summed_current[i],
            set.active_power[i],
            set.reactive_power[i],
            set.apparent_power[i]
        )?;
    }
    writer.flush()?;
    Ok(())
}

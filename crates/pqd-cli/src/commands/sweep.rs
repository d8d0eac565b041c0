use std::io::{self, Write};

use anyhow::Result;
use polars::prelude::*;
use tabwriter::TabWriter;
use tracing::info;

use pqd_cli::common::{
    json_rows, write_csv_from_json, write_frame, write_json, write_jsonl, OutputFormat,
};
use pqd_core::{sweep_angles, Degrees, SignConvention, SweepRow, VoltAmperes};

pub fn handle(
    start_deg: f64,
    end_deg: f64,
    steps: usize,
    magnitude: f64,
    convention: &str,
    out: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let convention = convention.parse::<SignConvention>()?;
    info!("Sweeping {start_deg} deg to {end_deg} deg in {steps} steps at {magnitude} pu");
    let rows = sweep_angles(
        Degrees(start_deg).to_radians(),
        Degrees(end_deg).to_radians(),
        steps,
        VoltAmperes(magnitude),
        convention,
    )?;

    if let Some(path) = out {
        let mut df = sweep_frame(&rows)?;
        write_frame(&mut df, path)?;
        println!("Wrote {} sweep rows to {path}", rows.len());
        return Ok(());
    }

    match format {
        OutputFormat::Table => print_rows(&rows)?,
        OutputFormat::Json => write_json(&rows, &mut io::stdout(), true)?,
        OutputFormat::Jsonl => write_jsonl(&rows, &mut io::stdout())?,
        OutputFormat::Csv => write_csv_from_json(&json_rows(&rows)?, &mut io::stdout())?,
    }
    Ok(())
}

fn sweep_frame(rows: &[SweepRow]) -> Result<DataFrame> {
    let df = DataFrame::new(vec![
        Series::new("angle_rad", rows.iter().map(|r| r.angle_rad).collect::<Vec<_>>()),
        Series::new("angle_deg", rows.iter().map(|r| r.angle_deg).collect::<Vec<_>>()),
        Series::new("p", rows.iter().map(|r| r.p).collect::<Vec<_>>()),
        Series::new("q", rows.iter().map(|r| r.q).collect::<Vec<_>>()),
        Series::new("s", rows.iter().map(|r| r.s).collect::<Vec<_>>()),
        Series::new("cos_phi", rows.iter().map(|r| r.cos_phi).collect::<Vec<_>>()),
        Series::new(
            "power_factor",
            rows.iter().map(|r| r.power_factor).collect::<Vec<_>>(),
        ),
        Series::new("phase", rows.iter().map(|r| r.phase).collect::<Vec<_>>()),
        Series::new("flow", rows.iter().map(|r| r.flow).collect::<Vec<_>>()),
        Series::new("quadrant", rows.iter().map(|r| r.quadrant).collect::<Vec<_>>()),
    ])?;
    Ok(df)
}

fn print_rows(rows: &[SweepRow]) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "ANGLE DEG\tP\tQ\tS\tPF\tPHASE\tFLOW\tQUADRANT")?;
    for row in rows {
        writeln!(
            writer,
            "{:+.1}\t{:+.3}\t{:+.3}\t{:.3}\t{:+.3}\t{}\t{}\t{}",
            row.angle_deg,
            row.p,
            row.q,
            row.s,
            row.power_factor,
            row.phase,
            row.flow,
            row.quadrant
        )?;
    }
    writer.flush()?;
    Ok(())
}

use std::io::{self, Write};

use anyhow::Result;
use tabwriter::TabWriter;

use pqd_cli::common::{json_rows, write_csv_from_json, write_json, write_jsonl, OutputFormat};
use pqd_core::{SignConvention, PRESETS};

pub fn handle(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_table()?,
        OutputFormat::Json => write_json(&PRESETS, &mut io::stdout(), true)?,
        OutputFormat::Jsonl => write_jsonl(PRESETS, &mut io::stdout())?,
        OutputFormat::Csv => write_csv_from_json(&json_rows(PRESETS)?, &mut io::stdout())?,
    }
    Ok(())
}

fn print_table() -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "ID\tANGLE DEG\tS\tQUADRANT\tDESCRIPTION")?;
    for preset in PRESETS {
        let solution = preset.operating_point()?.solve(SignConvention::default());
        let quadrant = solution.quadrant.map_or("-", |quad| quad.as_str());
        writeln!(
            writer,
            "{}\t{:+.1}\t{:.2}\t{}\t{}",
            preset.id, preset.angle_deg, preset.magnitude, quadrant, preset.description
        )?;
    }
    writer.flush()?;
    Ok(())
}

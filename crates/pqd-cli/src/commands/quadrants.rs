use std::io::{self, Write};

use anyhow::Result;
use tabwriter::TabWriter;

use pqd_core::{Quadrant, SignConvention};

pub fn handle() -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "QUADRANT\tP\tQ\tFLOW\tEXCITATION\tMEANING")?;
    for quadrant in Quadrant::all() {
        let (p_sign, q_sign) = match quadrant {
            Quadrant::I => ("+", "+"),
            Quadrant::II => ("-", "+"),
            Quadrant::III => ("-", "-"),
            Quadrant::IV => ("+", "-"),
        };
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            quadrant,
            p_sign,
            q_sign,
            quadrant.power_flow(),
            quadrant.var_mode(),
            quadrant.describe()
        )?;
    }
    writer.flush()?;

    println!();
    println!("Axis points class with the positive side; the origin has no quadrant.");
    println!("Sign conventions:");
    for name in SignConvention::available() {
        let convention = name.parse::<SignConvention>()?;
        println!("  {}", convention.describe());
    }
    Ok(())
}

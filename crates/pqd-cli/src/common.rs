//! Shared output plumbing for the CLI commands.

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use polars::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use pqd_core::{Degrees, Radians};

/// Stdout format for tabular/structured data.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table (default for interactive use)
    #[default]
    Table,
    /// JSON object or array (pipe-friendly, structured)
    Json,
    /// JSON Lines - one JSON object per line (streaming-friendly)
    Jsonl,
    /// Comma-separated values (pipe to awk/cut/etc)
    Csv,
}

/// Pick the power angle from the two exclusive CLI flags; no flag means the
/// zero angle (full export).
pub fn resolve_angle(angle_deg: Option<f64>, angle_rad: Option<f64>) -> Radians {
    match (angle_deg, angle_rad) {
        (Some(deg), _) => Degrees(deg).to_radians(),
        (None, Some(rad)) => Radians(rad),
        (None, None) => Radians::ZERO,
    }
}

/// Write data as JSON to the given writer.
pub fn write_json<W: Write, T: Serialize>(
    data: &T,
    writer: &mut W,
    pretty: bool,
) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, data).map_err(io::Error::other)?;
    } else {
        serde_json::to_writer(&mut *writer, data).map_err(io::Error::other)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Write data as JSON Lines (one JSON object per line) to the given writer.
pub fn write_jsonl<W: Write, T: Serialize>(data: &[T], writer: &mut W) -> io::Result<()> {
    for item in data {
        serde_json::to_writer(&mut *writer, item).map_err(io::Error::other)?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Write flat JSON objects as CSV to the given writer. Column order follows
/// the first object's keys.
pub fn write_csv_from_json<W: Write>(data: &[serde_json::Value], writer: &mut W) -> io::Result<()> {
    if data.is_empty() {
        return Ok(());
    }

    let headers: Vec<&str> = match data[0].as_object() {
        Some(obj) => obj.keys().map(|s| s.as_str()).collect(),
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Expected JSON objects",
            ))
        }
    };
    writeln!(writer, "{}", headers.join(","))?;

    for item in data {
        if let Some(obj) = item.as_object() {
            let values: Vec<String> = headers
                .iter()
                .map(|h| {
                    obj.get(*h)
                        .map(|v| match v {
                            serde_json::Value::String(s) => {
                                if s.contains(',') || s.contains('"') {
                                    format!("\"{}\"", s.replace('"', "\"\""))
                                } else {
                                    s.clone()
                                }
                            }
                            serde_json::Value::Null => String::new(),
                            other => other.to_string(),
                        })
                        .unwrap_or_default()
                })
                .collect();
            writeln!(writer, "{}", values.join(","))?;
        }
    }
    Ok(())
}

/// Serialize rows into JSON values for the CSV writer.
pub fn json_rows<T: Serialize>(rows: &[T]) -> Result<Vec<serde_json::Value>> {
    rows.iter()
        .map(|row| serde_json::to_value(row).context("serializing row"))
        .collect()
}

/// Write a frame to `path`, dispatching on the file extension.
pub fn write_frame(df: &mut DataFrame, path: &str) -> Result<()> {
    let output = Path::new(path);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file =
        File::create(output).with_context(|| format!("creating {}", output.display()))?;
    match output
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
    {
        Some(ext) if ext == "parquet" => ParquetWriter::new(&mut file)
            .finish(df)
            .map(|_| ())
            .context("writing Parquet file"),
        Some(ext) if ext == "csv" => CsvWriter::new(&mut file)
            .finish(df)
            .context("writing CSV file"),
        _ => Err(anyhow!(
            "unsupported output extension for {}; use .csv or .parquet",
            output.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn angle_flags_resolve_with_degrees_first() {
        assert_eq!(resolve_angle(None, None), Radians::ZERO);
        let rad = resolve_angle(None, Some(FRAC_PI_2));
        assert_eq!(rad, Radians(FRAC_PI_2));
        let deg = resolve_angle(Some(180.0), None);
        assert!((deg.value() - PI).abs() < 1e-12);
    }

    #[test]
    fn json_writer_appends_newline() {
        let data = vec![serde_json::json!({"id": 1}), serde_json::json!({"id": 2})];
        let mut output = Vec::new();
        write_json(&data, &mut output, false).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.ends_with('\n'));
        assert!(text.contains("\"id\":1"));
    }

    #[test]
    fn jsonl_writer_emits_one_line_per_row() {
        let data = vec![serde_json::json!({"id": 1}), serde_json::json!({"id": 2})];
        let mut output = Vec::new();
        write_jsonl(&data, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.trim().lines().count(), 2);
    }

    #[test]
    fn csv_writer_quotes_embedded_commas() {
        let data = vec![
            serde_json::json!({"id": "a,b", "value": 1.5}),
            serde_json::json!({"id": "plain", "value": 2.0}),
        ];
        let mut output = Vec::new();
        write_csv_from_json(&data, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("id,value"));
        assert!(text.contains("\"a,b\""));
        assert!(text.contains("plain"));
    }

    #[test]
    fn frames_dispatch_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("rows.csv");
        let mut df = DataFrame::new(vec![
            Series::new("angle_deg", vec![0.0, 90.0]),
            Series::new("p", vec![1.0, 0.0]),
        ])
        .unwrap();
        write_frame(&mut df, csv_path.to_str().unwrap()).unwrap();
        let text = fs::read_to_string(&csv_path).unwrap();
        assert!(text.starts_with("angle_deg,p"));

        let parquet_path = dir.path().join("rows.parquet");
        write_frame(&mut df, parquet_path.to_str().unwrap()).unwrap();
        assert!(parquet_path.metadata().unwrap().len() > 0);

        let bad = dir.path().join("rows.tsv");
        assert!(write_frame(&mut df, bad.to_str().unwrap()).is_err());
    }
}

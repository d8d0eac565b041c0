use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::common::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "pqd", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a single operating point
    Compute {
        /// Power angle in degrees
        #[arg(long, conflicts_with = "angle_rad", allow_hyphen_values = true)]
        angle_deg: Option<f64>,
        /// Power angle in radians
        #[arg(long, allow_hyphen_values = true)]
        angle_rad: Option<f64>,
        /// Apparent-power magnitude in per unit
        #[arg(short = 's', long, default_value_t = 1.0)]
        magnitude: f64,
        /// Solve a named preset instead of explicit angle and magnitude
        #[arg(short, long, conflicts_with_all = ["angle_deg", "angle_rad", "magnitude"])]
        preset: Option<String>,
        /// Power-factor sign convention (eei, iec)
        #[arg(long, default_value = "eei")]
        convention: String,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Tabulate solutions over an angle range
    Sweep {
        /// Sweep start in degrees
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        start_deg: f64,
        /// Sweep end in degrees
        #[arg(long, default_value_t = 360.0, allow_hyphen_values = true)]
        end_deg: f64,
        /// Number of rows, endpoints included
        #[arg(long, default_value_t = 73)]
        steps: usize,
        /// Apparent-power magnitude in per unit
        #[arg(short = 's', long, default_value_t = 1.0)]
        magnitude: f64,
        /// Power-factor sign convention (eei, iec)
        #[arg(long, default_value = "eei")]
        convention: String,
        /// Write rows to a .csv or .parquet file instead of stdout
        #[arg(short, long)]
        out: Option<String>,
        /// Stdout format when no output file is given
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Sample one cycle window of voltage, current, and power waves
    Waveforms {
        /// Power angle in degrees
        #[arg(long, conflicts_with = "angle_rad", allow_hyphen_values = true)]
        angle_deg: Option<f64>,
        /// Power angle in radians
        #[arg(long, allow_hyphen_values = true)]
        angle_rad: Option<f64>,
        /// Apparent-power magnitude in per unit
        #[arg(short = 's', long, default_value_t = 1.0)]
        magnitude: f64,
        /// RMS reference voltage in per unit
        #[arg(long, default_value_t = 1.0)]
        voltage: f64,
        /// Samples across the window
        #[arg(long, default_value_t = 100)]
        samples: usize,
        /// Write columns to a .csv or .parquet file instead of stdout
        #[arg(short, long)]
        out: Option<String>,
        /// Stdout format when no output file is given
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List the built-in operating-point presets
    Presets {
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Explain the four quadrants and the sign conventions
    Quadrants,
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Helpers for the terminal dashboard
    Tui {
        #[command(subcommand)]
        command: TuiCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum TuiCommands {
    /// Write a starter pqd-tui config
    Config {
        /// Target path (defaults to the platform config dir)
        #[arg(short, long)]
        out: Option<String>,
    },
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}

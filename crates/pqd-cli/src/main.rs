use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use pqd_cli::cli::{Cli, Commands};

mod commands;

use commands::{completions, compute, presets, quadrants, sweep, tui, waveforms};

/// Log the outcome the way every command reports it; returns true on
/// failure so main can set the exit code.
fn report(label: &str, result: anyhow::Result<()>) -> bool {
    match result {
        Ok(()) => {
            info!("{label} command successful!");
            false
        }
        Err(e) => {
            error!("{label} command failed: {:?}", e);
            true
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("pqd - four-quadrant power toolkit");

    let failed = match &cli.command {
        Some(Commands::Compute {
            angle_deg,
            angle_rad,
            magnitude,
            preset,
            convention,
            format,
        }) => report(
            "Compute",
            compute::handle(
                *angle_deg,
                *angle_rad,
                *magnitude,
                preset.as_deref(),
                convention,
                *format,
            ),
        ),
        Some(Commands::Sweep {
            start_deg,
            end_deg,
            steps,
            magnitude,
            convention,
            out,
            format,
        }) => report(
            "Sweep",
            sweep::handle(
                *start_deg,
                *end_deg,
                *steps,
                *magnitude,
                convention,
                out.as_deref(),
                *format,
            ),
        ),
        Some(Commands::Waveforms {
            angle_deg,
            angle_rad,
            magnitude,
            voltage,
            samples,
            out,
            format,
        }) => report(
            "Waveforms",
            waveforms::handle(
                *angle_deg,
                *angle_rad,
                *magnitude,
                *voltage,
                *samples,
                out.as_deref(),
                *format,
            ),
        ),
        Some(Commands::Presets { format }) => report("Presets", presets::handle(*format)),
        Some(Commands::Quadrants) => report("Quadrants", quadrants::handle()),
        Some(Commands::Completions { shell, out }) => {
            report("Completions", completions::handle(*shell, out.as_deref()))
        }
        Some(Commands::Tui { command }) => report("Tui", tui::handle(command)),
        None => {
            info!("No subcommand provided. Use `pqd --help` for more information.");
            false
        }
    };

    if failed {
        std::process::exit(1);
    }
}

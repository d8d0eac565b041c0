use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use dirs::config_dir;
use tracing::info;

use pqd_cli::cli::TuiCommands;

/// Starter config with the pqd-tui defaults spelled out.
const TUI_CONFIG_TEMPLATE: &str = "\
tick_ms=250
angle_step_deg=5.0
fine_step_deg=1.0
magnitude_step=0.05
convention=\"eei\"
";

fn default_tui_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("pqd-tui").join("config.toml"))
}

fn write_tui_config(out: Option<&str>) -> Result<PathBuf> {
    let target = out
        .map(PathBuf::from)
        .or_else(default_tui_config_path)
        .ok_or_else(|| anyhow!("unable to determine pqd-tui config path"))?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, TUI_CONFIG_TEMPLATE)?;
    Ok(target)
}

pub fn handle(command: &TuiCommands) -> Result<()> {
    match command {
        TuiCommands::Config { out } => {
            let path = write_tui_config(out.as_deref())?;
            info!("pqd-tui config written to {}", path.display());
            println!("Wrote pqd-tui config to {}", path.display());
            Ok(())
        }
    }
}

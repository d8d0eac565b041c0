//! Viewer configuration, read from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use pqd_core::SignConvention;

/// Tunable knobs for the viewer. Every field has a default, so a partial
/// file (or none at all) still yields a working setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuiConfig {
    /// Redraw cadence in milliseconds.
    pub tick_ms: u64,
    /// Arrow-key angle step, in degrees.
    pub angle_step_deg: f64,
    /// h/l angle step, in degrees.
    pub fine_step_deg: f64,
    /// Up/Down apparent-power step, per unit.
    pub magnitude_step: f64,
    /// Power-factor sign convention on startup.
    pub convention: SignConvention,
    /// Starting power angle, in degrees.
    pub initial_angle_deg: Option<f64>,
    /// Starting apparent power, per unit.
    pub initial_magnitude: Option<f64>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        TuiConfig {
            tick_ms: 250,
            angle_step_deg: 5.0,
            fine_step_deg: 1.0,
            magnitude_step: 0.05,
            convention: SignConvention::Eei,
            initial_angle_deg: None,
            initial_magnitude: None,
        }
    }
}

/// Platform config path: `<config dir>/pqd-tui/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pqd-tui").join("config.toml"))
}

impl TuiConfig {
    /// Load from an explicit path, or from [`default_config_path`] when none
    /// is given. An explicit path must exist and parse; a missing default
    /// path falls back to [`TuiConfig::default`].
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::read_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::read_file(&path)?,
                _ => TuiConfig::default(),
            },
        };
        config.validated()
    }

    fn read_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    fn validated(self) -> Result<Self> {
        if self.tick_ms == 0 {
            bail!("tick_ms must be positive");
        }
        for (name, value) in [
            ("angle_step_deg", self.angle_step_deg),
            ("fine_step_deg", self.fine_step_deg),
            ("magnitude_step", self.magnitude_step),
        ] {
            if !value.is_finite() || value <= 0.0 {
                bail!("{name} must be a positive number, got {value}");
            }
        }
        if let Some(angle) = self.initial_angle_deg {
            if !angle.is_finite() {
                bail!("initial_angle_deg must be finite, got {angle}");
            }
        }
        if let Some(magnitude) = self.initial_magnitude {
            if !magnitude.is_finite() || !(0.0..=1.0).contains(&magnitude) {
                bail!("initial_magnitude must sit in [0, 1], got {magnitude}");
            }
        }
        Ok(self)
    }
}

//! Power-factor sign conventions.
//!
//! The magnitude of the power factor is always |cos φ|; the two industry
//! conventions disagree only about which *sign* to attach:
//!
//! - **IEC**: the sign follows the real-power direction, so signed pf = cos φ.
//! - **EEI**: the sign follows the reactive-power direction: negative when
//!   supplying vars (overexcited), positive when absorbing.
//!
//! The leading/lagging and exporting/importing labels are derived from the
//! signs of Q and P directly and do not depend on the convention.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PqdError;
use crate::units::Radians;

/// Band around sin φ = 0 inside which no var exchange is assumed and the
/// signed power factor reads +|cos φ|. Keeps φ = 0 and φ = π from picking up
/// an arbitrary sign from floating-point residue.
pub(crate) const UNITY_BAND: f64 = 1e-12;

/// Which sign to attach to the power-factor magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignConvention {
    /// Sign from the reactive-power direction (Edison Electric Institute).
    #[default]
    Eei,
    /// Sign from the real-power direction (plain cos φ).
    Iec,
}

impl SignConvention {
    /// Signed power factor for power angle `phi` under this convention.
    pub fn signed_power_factor(self, phi: Radians) -> f64 {
        let cos_phi = phi.cos();
        match self {
            SignConvention::Iec => cos_phi,
            SignConvention::Eei => {
                let sin_phi = phi.sin();
                if sin_phi.abs() < UNITY_BAND {
                    cos_phi.abs()
                } else {
                    -cos_phi * sin_phi.signum()
                }
            }
        }
    }

    /// The other convention; interactive views flip between the two.
    pub fn toggled(self) -> Self {
        match self {
            SignConvention::Eei => SignConvention::Iec,
            SignConvention::Iec => SignConvention::Eei,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignConvention::Eei => "eei",
            SignConvention::Iec => "iec",
        }
    }

    /// One-line description for help text and readouts.
    pub fn describe(&self) -> &'static str {
        match self {
            SignConvention::Eei => "EEI: pf sign follows var direction",
            SignConvention::Iec => "IEC: pf sign follows watt direction",
        }
    }

    pub fn available() -> &'static [&'static str] {
        &["eei", "iec"]
    }
}

impl FromStr for SignConvention {
    type Err = PqdError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "eei" | "default" => Ok(SignConvention::Eei),
            "iec" => Ok(SignConvention::Iec),
            other => Err(PqdError::Parse(format!(
                "unknown sign convention '{}'; supported values: eei, iec",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SignConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SignConvention::Eei => "EEI",
            SignConvention::Iec => "IEC",
        })
    }
}

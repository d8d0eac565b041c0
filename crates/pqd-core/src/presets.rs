//! Curated operating points for quick recall.

use serde::Serialize;

use crate::error::PqdResult;
use crate::model::OperatingPoint;
use crate::units::{Degrees, VoltAmperes};

/// A named operating point with a one-line story.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub description: &'static str,
    pub angle_deg: f64,
    pub magnitude: f64,
}

impl Preset {
    pub fn operating_point(&self) -> PqdResult<OperatingPoint> {
        OperatingPoint::new(
            Degrees(self.angle_deg).to_radians(),
            VoltAmperes(self.magnitude),
        )
    }
}

/// The built-in catalog: one or two points per quadrant plus the boundaries.
pub const PRESETS: &[Preset] = &[
    Preset {
        id: "unity-export",
        description: "Full rated export at unity power factor.",
        angle_deg: 0.0,
        magnitude: 1.0,
    },
    Preset {
        id: "overexcited-export",
        description: "Exporting with var support at 0.87 power factor.",
        angle_deg: 30.0,
        magnitude: 1.0,
    },
    Preset {
        id: "condenser",
        description: "Pure var supply, synchronous-condenser style.",
        angle_deg: 90.0,
        magnitude: 0.6,
    },
    Preset {
        id: "charging-var-support",
        description: "Importing to charge while still supplying vars.",
        angle_deg: 150.0,
        magnitude: 0.8,
    },
    Preset {
        id: "unity-import",
        description: "Full rated import at unity power factor.",
        angle_deg: 180.0,
        magnitude: 1.0,
    },
    Preset {
        id: "charging-underexcited",
        description: "Importing and absorbing vars.",
        angle_deg: -150.0,
        magnitude: 0.8,
    },
    Preset {
        id: "absorbing-export",
        description: "Exporting while absorbing vars, underexcited.",
        angle_deg: -30.0,
        magnitude: 1.0,
    },
    Preset {
        id: "idle",
        description: "No power exchange at all.",
        angle_deg: 0.0,
        magnitude: 0.0,
    },
];

/// Look up a preset by id, case-insensitively.
pub fn find_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

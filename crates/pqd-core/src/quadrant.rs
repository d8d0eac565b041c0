//! Operating-quadrant classification on the P-Q plane.
//!
//! Orientation follows the generator convention used in interconnection
//! studies: positive P exports real power, positive Q supplies vars
//! (overexcited). Axis points are classed with the positive side, so a pure
//! watt export with no var exchange reads as quadrant I. The origin belongs
//! to no quadrant.

use serde::{Deserialize, Serialize};

use crate::units::{Vars, Watts};

/// Direction of real-power flow at the terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerFlow {
    /// P >= 0: delivering real power to the grid.
    Exporting,
    /// P < 0: drawing real power from the grid.
    Importing,
}

impl PowerFlow {
    pub fn from_watts(p: Watts) -> Self {
        if p.value() >= 0.0 {
            PowerFlow::Exporting
        } else {
            PowerFlow::Importing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerFlow::Exporting => "exporting",
            PowerFlow::Importing => "importing",
        }
    }
}

impl std::fmt::Display for PowerFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of reactive-power exchange at the terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarMode {
    /// Q >= 0: supplying vars, machine field overexcited.
    Overexcited,
    /// Q < 0: absorbing vars, machine field underexcited.
    Underexcited,
}

impl VarMode {
    pub fn from_vars(q: Vars) -> Self {
        if q.value() >= 0.0 {
            VarMode::Overexcited
        } else {
            VarMode::Underexcited
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VarMode::Overexcited => "overexcited",
            VarMode::Underexcited => "underexcited",
        }
    }
}

impl std::fmt::Display for VarMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four P-Q quadrants, numbered counter-clockwise from (+P, +Q).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    I,
    II,
    III,
    IV,
}

impl Quadrant {
    /// Classify an operating point by the signs of P and Q.
    ///
    /// Returns `None` only for the exact origin, where neither watts nor
    /// vars flow and no quadrant applies.
    pub fn from_power(p: Watts, q: Vars) -> Option<Self> {
        if p.value() == 0.0 && q.value() == 0.0 {
            return None;
        }
        Some(match (p.value() >= 0.0, q.value() >= 0.0) {
            (true, true) => Quadrant::I,
            (false, true) => Quadrant::II,
            (false, false) => Quadrant::III,
            (true, false) => Quadrant::IV,
        })
    }

    pub fn power_flow(&self) -> PowerFlow {
        match self {
            Quadrant::I | Quadrant::IV => PowerFlow::Exporting,
            Quadrant::II | Quadrant::III => PowerFlow::Importing,
        }
    }

    pub fn var_mode(&self) -> VarMode {
        match self {
            Quadrant::I | Quadrant::II => VarMode::Overexcited,
            Quadrant::III | Quadrant::IV => VarMode::Underexcited,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::I => "I",
            Quadrant::II => "II",
            Quadrant::III => "III",
            Quadrant::IV => "IV",
        }
    }

    /// Short operating-mode description shown in readouts.
    pub fn describe(&self) -> &'static str {
        match self {
            Quadrant::I => "exporting watts, supplying vars (overexcited)",
            Quadrant::II => "importing watts, supplying vars (overexcited)",
            Quadrant::III => "importing watts, absorbing vars (underexcited)",
            Quadrant::IV => "exporting watts, absorbing vars (underexcited)",
        }
    }

    pub fn all() -> &'static [Quadrant] {
        &[Quadrant::I, Quadrant::II, Quadrant::III, Quadrant::IV]
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! # pqd-core: Four-Quadrant Power Geometry
//!
//! Pure computation behind the power-quadrant explorer: given a power angle
//! and an apparent-power magnitude, derive the power triangle, classify the
//! operating point on the P-Q plane, attach the signed power factor, and
//! reconstruct the circuit view and instantaneous waveforms that go with it.
//!
//! ## Orientation
//!
//! Everything uses the generator convention from DER interconnection
//! practice (IEEE 1547 / IEC 61850-7-420 framing):
//!
//! - **+P** exports real power, **−P** imports it.
//! - **+Q** supplies vars (overexcited), **−Q** absorbs them (underexcited).
//! - Quadrants count counter-clockwise from (+P, +Q).
//!
//! The power-factor *sign* is convention-dependent ([`SignConvention`]);
//! its magnitude is always |cos φ|.
//!
//! ## Quick Start
//!
//! ```rust
//! use pqd_core::*;
//!
//! let point = OperatingPoint::new(Radians(std::f64::consts::FRAC_PI_4), VoltAmperes(1.0))?;
//! let solution = point.solve(SignConvention::Eei);
//!
//! assert_eq!(solution.quadrant, Some(Quadrant::I));
//! assert!(solution.power.p.value() > 0.0);
//! assert!(solution.power.q.value() > 0.0);
//! // P² + Q² = S²
//! let s = solution.power.apparent();
//! assert!((s.value() - 1.0).abs() < 1e-12);
//! # Ok::<(), PqdError>(())
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Operating points, the solve transform, the stateful model
//! - [`quadrant`] - P-Q plane classification and operating-mode labels
//! - [`convention`] - EEI vs IEC power-factor sign conventions
//! - [`phasor`] - Complex RMS phasors
//! - [`waveform`] - Instantaneous waveform synthesis
//! - [`sweep`] - Tabular angle sweeps
//! - [`presets`] - Named operating points for quick recall
//! - [`units`] - Typed f64 newtypes for electrical quantities

pub mod convention;
pub mod error;
pub mod model;
pub mod phasor;
pub mod presets;
pub mod quadrant;
pub mod sweep;
pub mod units;
pub mod waveform;

pub use convention::SignConvention;
pub use error::{PqdError, PqdResult};
pub use model::{
    CircuitView, OperatingPoint, Phase, PowerFactor, PowerVector, QuadrantModel, Solution,
};
pub use phasor::{Phasor, SQRT_2};
pub use presets::{find_preset, Preset, PRESETS};
pub use quadrant::{PowerFlow, Quadrant, VarMode};
pub use sweep::{sweep_angles, SweepRow};
pub use units::{Amperes, Degrees, Ohms, Radians, Vars, VoltAmperes, Volts, Watts};
pub use waveform::{WaveformSampler, WaveformSet};

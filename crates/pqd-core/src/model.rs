//! Operating-point model.
//!
//! [`OperatingPoint`] is the validated polar input, [`OperatingPoint::solve_at`]
//! the pure transform from that point to the full electrical picture, and
//! [`QuadrantModel`] the stateful wrapper the interactive layers drive. The
//! model never caches derived values; every gesture re-solves from scratch.

use serde::Serialize;

use crate::convention::{SignConvention, UNITY_BAND};
use crate::error::{PqdError, PqdResult};
use crate::phasor::Phasor;
use crate::quadrant::{PowerFlow, Quadrant};
use crate::units::{Amperes, Ohms, Radians, Vars, VoltAmperes, Volts, Watts};

/// A polar operating point: power angle and apparent-power magnitude.
///
/// The angle may be any finite value; readouts wrap it to (−π, π]. The
/// magnitude is per-unit of the device rating and must be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperatingPoint {
    angle: Radians,
    magnitude: VoltAmperes,
}

impl OperatingPoint {
    pub fn new(angle: Radians, magnitude: VoltAmperes) -> PqdResult<Self> {
        if !angle.is_finite() {
            return Err(PqdError::InvalidInput(format!(
                "power angle must be finite, got {} rad",
                angle.value()
            )));
        }
        if !magnitude.is_finite() || magnitude.value() < 0.0 {
            return Err(PqdError::InvalidInput(format!(
                "apparent power must be finite and non-negative, got {}",
                magnitude.value()
            )));
        }
        Ok(OperatingPoint { angle, magnitude })
    }

    /// Build a point from cartesian (P, Q) coordinates, clamping the
    /// magnitude to `rating`. This is the mouse-drag mapping of the
    /// interactive chart.
    pub fn from_cartesian(p: Watts, q: Vars, rating: VoltAmperes) -> PqdResult<Self> {
        if !p.is_finite() || !q.is_finite() {
            return Err(PqdError::InvalidInput(
                "cartesian coordinates must be finite".into(),
            ));
        }
        let angle = Radians(q.value().atan2(p.value()));
        let hypot = p.apparent_power(q);
        let magnitude = if hypot > rating { rating } else { hypot };
        OperatingPoint::new(angle, magnitude)
    }

    pub fn angle(&self) -> Radians {
        self.angle
    }

    pub fn magnitude(&self) -> VoltAmperes {
        self.magnitude
    }

    /// Solve against the nominal reference voltage on the zero-angle axis.
    pub fn solve(&self, convention: SignConvention) -> Solution {
        self.solve_at(Phasor::from_polar(Volts::ONE.value(), Radians::ZERO), convention)
    }

    /// Deterministic transform from the polar point to the power triangle,
    /// quadrant, signed power factor, and circuit view, with `voltage` as
    /// the RMS reference phasor.
    pub fn solve_at(&self, voltage: Phasor, convention: SignConvention) -> Solution {
        let power = PowerVector::from_polar(self.magnitude, self.angle);

        let sin_phi = self.angle.sin();
        let phase = if sin_phi.abs() < UNITY_BAND {
            Phase::Unity
        } else if sin_phi > 0.0 {
            Phase::Lagging
        } else {
            Phase::Leading
        };
        let power_factor = PowerFactor {
            value: convention.signed_power_factor(self.angle),
            cos_phi: self.angle.cos(),
            phase,
            flow: PowerFlow::from_watts(power.p),
            convention,
        };

        // Under S = V·I*, the current sits at θv − φ and the impedance
        // angle equals the power angle.
        let v_rms = Volts(voltage.magnitude());
        let current = Amperes(self.magnitude.value() / v_rms.value());
        let circuit = CircuitView {
            voltage: v_rms,
            voltage_angle: voltage.angle(),
            current,
            current_angle: voltage.angle() - self.angle,
            impedance: v_rms / current,
            impedance_angle: self.angle,
        };

        Solution {
            point: *self,
            power,
            apparent: self.magnitude,
            quadrant: power.quadrant(),
            power_factor,
            circuit,
        }
    }
}

/// The (P, Q) pair under the generator orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerVector {
    pub p: Watts,
    pub q: Vars,
}

impl PowerVector {
    /// P = S·cos θ, Q = S·sin θ.
    pub fn from_polar(magnitude: VoltAmperes, angle: Radians) -> Self {
        PowerVector {
            p: Watts(magnitude.value() * angle.cos()),
            q: Vars(magnitude.value() * angle.sin()),
        }
    }

    /// S = √(P² + Q²).
    pub fn apparent(&self) -> VoltAmperes {
        self.p.apparent_power(self.q)
    }

    pub fn quadrant(&self) -> Option<Quadrant> {
        Quadrant::from_power(self.p, self.q)
    }
}

/// Current phase relative to the voltage wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Q < 0: the current peaks before the voltage.
    Leading,
    /// Q > 0: the current peaks after the voltage.
    Lagging,
    /// No var exchange.
    Unity,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Leading => "leading",
            Phase::Lagging => "lagging",
            Phase::Unity => "unity",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed power factor with its qualifiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerFactor {
    /// Signed value under `convention`.
    pub value: f64,
    /// Plain cos φ, independent of the convention.
    pub cos_phi: f64,
    pub phase: Phase,
    pub flow: PowerFlow,
    pub convention: SignConvention,
}

/// Single-phase circuit quantities consistent with the operating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircuitView {
    pub voltage: Volts,
    pub voltage_angle: Radians,
    pub current: Amperes,
    pub current_angle: Radians,
    pub impedance: Ohms,
    pub impedance_angle: Radians,
}

impl CircuitView {
    pub fn voltage_phasor(&self) -> Phasor {
        Phasor::from_polar(self.voltage.value(), self.voltage_angle)
    }

    pub fn current_phasor(&self) -> Phasor {
        Phasor::from_polar(self.current.value(), self.current_angle)
    }
}

/// Everything derived from one operating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Solution {
    pub point: OperatingPoint,
    pub power: PowerVector,
    pub apparent: VoltAmperes,
    pub quadrant: Option<Quadrant>,
    pub power_factor: PowerFactor,
    pub circuit: CircuitView,
}

/// Stateful model for the interactive layers: the current point, the
/// reference voltage, the device rating, and the active convention.
///
/// Mutators clamp and wrap instead of failing so every gesture lands on a
/// valid state; the fallible constructors are for one-shot inputs.
#[derive(Debug, Clone)]
pub struct QuadrantModel {
    point: OperatingPoint,
    voltage: Phasor,
    rating: VoltAmperes,
    convention: SignConvention,
}

impl Default for QuadrantModel {
    fn default() -> Self {
        QuadrantModel {
            point: OperatingPoint {
                angle: Radians::ZERO,
                magnitude: VoltAmperes(1.0),
            },
            voltage: Phasor::from_polar(1.0, Radians::ZERO),
            rating: VoltAmperes(1.0),
            convention: SignConvention::default(),
        }
    }
}

impl QuadrantModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_convention(mut self, convention: SignConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn point(&self) -> OperatingPoint {
        self.point
    }

    pub fn convention(&self) -> SignConvention {
        self.convention
    }

    pub fn rating(&self) -> VoltAmperes {
        self.rating
    }

    pub fn voltage(&self) -> Phasor {
        self.voltage
    }

    /// Replace the operating point wholesale (preset recall).
    pub fn set_point(&mut self, point: OperatingPoint) {
        self.point.angle = point.angle;
        self.set_magnitude(point.magnitude);
    }

    /// Step the power angle and wrap the result to (−π, π].
    pub fn nudge_angle(&mut self, delta: Radians) {
        if !delta.is_finite() {
            return;
        }
        self.point.angle = (self.point.angle + delta).normalized();
    }

    /// Set the apparent-power magnitude, clamped to [0, rating].
    pub fn set_magnitude(&mut self, magnitude: VoltAmperes) {
        if !magnitude.is_finite() {
            return;
        }
        self.point.magnitude = magnitude.clamp(VoltAmperes(0.0), self.rating);
    }

    pub fn nudge_magnitude(&mut self, delta: VoltAmperes) {
        self.set_magnitude(self.point.magnitude + delta);
    }

    /// Pull the power phasor toward chart coordinates (p, q): the angle
    /// follows atan2 and the magnitude clamps to the rating circle.
    /// Non-finite coordinates leave the point untouched.
    pub fn drag_to(&mut self, p: f64, q: f64) {
        if let Ok(point) = OperatingPoint::from_cartesian(Watts(p), Vars(q), self.rating) {
            self.point = point;
        }
    }

    pub fn set_convention(&mut self, convention: SignConvention) {
        self.convention = convention;
    }

    pub fn toggle_convention(&mut self) {
        self.convention = self.convention.toggled();
    }

    /// Back to full rated export at zero angle; the convention is a viewing
    /// preference and survives the reset.
    pub fn reset(&mut self) {
        let convention = self.convention;
        *self = QuadrantModel::default();
        self.convention = convention;
    }

    pub fn solve(&self) -> Solution {
        self.point.solve_at(self.voltage, self.convention)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    proptest! {
        /// P² + Q² = S² for every finite operating point.
        #[test]
        fn prop_power_triangle_closes(
            angle in -2.0 * PI..2.0 * PI,
            magnitude in 0.0f64..10.0,
        ) {
            let sol = OperatingPoint::new(Radians(angle), VoltAmperes(magnitude))
                .unwrap()
                .solve(SignConvention::Eei);
            let lhs = sol.power.p.value().powi(2) + sol.power.q.value().powi(2);
            let rhs = sol.apparent.value().powi(2);
            prop_assert!((lhs - rhs).abs() < 1e-9 * rhs.max(1.0));
        }

        /// The quadrant is a pure function of the component signs.
        #[test]
        fn prop_quadrant_matches_sign_table(
            angle in -2.0 * PI..2.0 * PI,
            magnitude in 0.01f64..10.0,
        ) {
            let sol = OperatingPoint::new(Radians(angle), VoltAmperes(magnitude))
                .unwrap()
                .solve(SignConvention::Eei);
            let expected = match (sol.power.p.value() >= 0.0, sol.power.q.value() >= 0.0) {
                (true, true) => Quadrant::I,
                (false, true) => Quadrant::II,
                (false, false) => Quadrant::III,
                (true, false) => Quadrant::IV,
            };
            prop_assert_eq!(sol.quadrant, Some(expected));
        }

        /// Conventions only ever disagree about the sign.
        #[test]
        fn prop_conventions_share_a_magnitude(angle in -PI..PI) {
            let eei = SignConvention::Eei.signed_power_factor(Radians(angle));
            let iec = SignConvention::Iec.signed_power_factor(Radians(angle));
            prop_assert!((eei.abs() - iec.abs()).abs() < 1e-12);
        }
    }
}

//! Typed quantities for single-phase AC power relationships.
//!
//! Keeps watts, vars, volt-amperes, and angles from being mixed by accident.
//!
//! Everything works in normalized (per-unit) magnitudes, with the reference
//! voltage and rated apparent power both 1.0, so these carry the *dimension*
//! (W, var, VA, V, A, Ω) rather than an SI prefix. All wrappers are
//! `#[repr(transparent)]` over `f64`; the compiler erases them.
//!
//! # Usage
//!
//! ```
//! use pqd_core::units::{Radians, VoltAmperes, Watts};
//!
//! let s = VoltAmperes(1.0);
//! let theta = Radians(std::f64::consts::FRAC_PI_3);
//! let p = Watts(s.value() * theta.cos());
//!
//! // Same units add; different units refuse to compile.
//! let doubled = p + p;
//! assert!(doubled.value() > 0.9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Implements the shared arithmetic and accessor surface for a unit newtype.
macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Mul<$type> for f64 {
            type Output = $type;
            fn mul(self, rhs: $type) -> Self::Output {
                <$type>::new(self * rhs.0)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.3} {}", self.0, $unit_name)
            }
        }

        impl $type {
            /// Create a new value
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Absolute value
            #[inline]
            pub fn abs(self) -> Self {
                Self(self.0.abs())
            }

            /// Check if value is finite
            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// Clamp value to range
            #[inline]
            pub fn clamp(self, min: Self, max: Self) -> Self {
                Self(self.0.clamp(min.0, max.0))
            }
        }
    };
}

// =============================================================================
// Power
// =============================================================================

/// Active (real) power in watts, per-unit scaled.
///
/// Positive under the generator convention means the device is exporting
/// real power.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Watts(pub f64);

impl_unit_ops!(Watts, "W");

/// Reactive power in volt-amperes reactive, per-unit scaled.
///
/// Positive means supplying vars (overexcited), negative means absorbing
/// (underexcited).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Vars(pub f64);

impl_unit_ops!(Vars, "var");

/// Apparent power in volt-amperes: S = √(P² + Q²).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct VoltAmperes(pub f64);

impl_unit_ops!(VoltAmperes, "VA");

impl Watts {
    /// Compute apparent power given reactive power: S = √(P² + Q²)
    #[inline]
    pub fn apparent_power(self, q: Vars) -> VoltAmperes {
        VoltAmperes((self.0.powi(2) + q.0.powi(2)).sqrt())
    }
}

// =============================================================================
// Circuit quantities
// =============================================================================

/// RMS voltage magnitude, per-unit scaled.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Volts(pub f64);

impl_unit_ops!(Volts, "V");

/// RMS current magnitude, per-unit scaled.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Amperes(pub f64);

impl_unit_ops!(Amperes, "A");

/// Impedance magnitude, per-unit scaled.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Ohms(pub f64);

impl_unit_ops!(Ohms, "Ω");

// S = V·I, I = S / V, Z = V / I.
impl Mul<Amperes> for Volts {
    type Output = VoltAmperes;
    fn mul(self, rhs: Amperes) -> VoltAmperes {
        VoltAmperes(self.0 * rhs.0)
    }
}

impl Div<Volts> for VoltAmperes {
    type Output = Amperes;
    fn div(self, rhs: Volts) -> Amperes {
        Amperes(self.0 / rhs.0)
    }
}

impl Div<Amperes> for Volts {
    type Output = Ohms;
    fn div(self, rhs: Amperes) -> Ohms {
        Ohms(self.0 / rhs.0)
    }
}

impl Volts {
    /// One per-unit (nominal voltage)
    pub const ONE: Self = Self(1.0);
}

// =============================================================================
// Angles
// =============================================================================

/// Angle in radians, the working unit for all trigonometry.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Radians(pub f64);

impl_unit_ops!(Radians, "rad");

/// Angle in degrees, for display and input.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(pub f64);

impl_unit_ops!(Degrees, "°");

impl Radians {
    /// Convert to degrees
    #[inline]
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0 * 180.0 / std::f64::consts::PI)
    }

    /// Sine of the angle
    #[inline]
    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    /// Cosine of the angle
    #[inline]
    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    /// Wrap into [-π, π] without losing the angle's direction.
    #[inline]
    pub fn normalized(self) -> Radians {
        Radians(self.0.sin().atan2(self.0.cos()))
    }

    /// Zero radians
    pub const ZERO: Self = Self(0.0);

    /// Pi radians (180°)
    pub const PI: Self = Self(std::f64::consts::PI);

    /// Pi/2 radians (90°)
    pub const FRAC_PI_2: Self = Self(std::f64::consts::FRAC_PI_2);
}

impl Degrees {
    /// Convert to radians
    #[inline]
    pub fn to_radians(self) -> Radians {
        Radians(self.0 * std::f64::consts::PI / 180.0)
    }

    /// Zero degrees
    pub const ZERO: Self = Self(0.0);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watts_arithmetic() {
        let p1 = Watts(0.8);
        let p2 = Watts(0.2);

        assert_eq!((p1 + p2).value(), 1.0);
        assert!(((p1 - p2).value() - 0.6).abs() < 1e-12);
        assert_eq!((-p1).value(), -0.8);
        assert_eq!((p1 * 2.0).value(), 1.6);
        assert_eq!((2.0 * p1).value(), 1.6);
        assert_eq!((p1 / 2.0).value(), 0.4);
        assert!((p1 / p2 - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_apparent_power_triangle() {
        let p = Watts(0.6);
        let q = Vars(0.8);
        let s = p.apparent_power(q);

        assert!((s.value() - 1.0).abs() < 1e-10); // 3-4-5 scaled down
    }

    #[test]
    fn test_circuit_relationships() {
        let v = Volts(1.0);
        let i = Amperes(0.5);

        assert!(((v * i).value() - 0.5).abs() < 1e-12);
        assert!(((VoltAmperes(0.5) / v).value() - 0.5).abs() < 1e-12);
        assert!(((v / i).value() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_angle_conversion() {
        let deg = Degrees(180.0);
        let rad = deg.to_radians();

        assert!((rad.value() - std::f64::consts::PI).abs() < 1e-10);
        assert!((rad.to_degrees().value() - 180.0).abs() < 1e-10);
    }

    #[test]
    fn test_trig_functions() {
        let angle = Degrees(30.0).to_radians();

        assert!((angle.sin() - 0.5).abs() < 1e-10);
        assert!((angle.cos() - (3.0_f64).sqrt() / 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_normalized_wraps_past_pi() {
        let wrapped = Radians(std::f64::consts::PI * 1.5).normalized();
        assert!((wrapped.value() + std::f64::consts::FRAC_PI_2).abs() < 1e-10);

        let full_turn = Radians(std::f64::consts::TAU + 0.25).normalized();
        assert!((full_turn.value() - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(
            VoltAmperes(1.5)
                .clamp(VoltAmperes(0.0), VoltAmperes(1.0))
                .value(),
            1.0
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Watts(1.0)), "1.000 W");
        assert_eq!(format!("{}", Degrees(45.0)), "45.000 °");
        assert_eq!(format!("{}", Ohms(2.0)), "2.000 Ω");
    }
}

//! Complex RMS phasors.
//!
//! A phasor is the complex number `A·e^{jθ}` standing in for the sinusoid
//! `√2·A·cos(ωt + θ)`. All waveform synthesis reduces to rotating phasors by
//! `e^{jωt}` and taking the real part.

use num_complex::Complex64;

use crate::units::Radians;

/// RMS-to-peak scaling for a sinusoid.
pub const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// A complex RMS phasor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phasor(Complex64);

impl Phasor {
    /// Build a phasor from a magnitude and an angle.
    #[inline]
    pub fn from_polar(magnitude: f64, angle: Radians) -> Self {
        Phasor(Complex64::from_polar(magnitude, angle.value()))
    }

    /// Real (in-phase) component.
    #[inline]
    pub fn re(self) -> f64 {
        self.0.re
    }

    /// Imaginary (quadrature) component.
    #[inline]
    pub fn im(self) -> f64 {
        self.0.im
    }

    /// Magnitude of the phasor.
    #[inline]
    pub fn magnitude(self) -> f64 {
        self.0.norm()
    }

    /// Angle of the phasor in [-π, π].
    #[inline]
    pub fn angle(self) -> Radians {
        Radians(self.0.arg())
    }

    /// Rotate by `angle` (multiply by `e^{j·angle}`).
    #[inline]
    pub fn rotated(self, angle: Radians) -> Self {
        Phasor(self.0 * Complex64::from_polar(1.0, angle.value()))
    }

    /// The underlying complex value.
    #[inline]
    pub fn as_complex(self) -> Complex64 {
        self.0
    }

    /// Instantaneous value of the corresponding peak-scaled sinusoid at
    /// rotation `e^{jωt}`.
    #[inline]
    pub fn instantaneous(self, rotation: Complex64) -> f64 {
        (SQRT_2 * self.0 * rotation).re
    }
}

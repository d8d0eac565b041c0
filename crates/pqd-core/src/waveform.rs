//! Instantaneous waveform synthesis.
//!
//! Re-creates the time-domain picture behind the phasors: the voltage and
//! current sinusoids, the current split into its in-phase and quadrature
//! parts, and the three instantaneous power products. The default window
//! spans two cycles of a 50 Hz wave on a millisecond axis with half a cycle
//! of lead-in.

use num_complex::Complex64;
use serde::Serialize;
use std::f64::consts::PI;

use crate::error::{PqdError, PqdResult};
use crate::phasor::{Phasor, SQRT_2};

/// Inclusive linspace with exact endpoints.
pub(crate) fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count < 2 {
        return vec![start];
    }
    let step = (end - start) / (count - 1) as f64;
    (0..count)
        .map(|i| {
            if i + 1 == count {
                end
            } else {
                start + i as f64 * step
            }
        })
        .collect()
}

/// Sampling window for waveform synthesis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformSampler {
    t_min: f64,
    t_max: f64,
    period: f64,
    samples: usize,
}

impl Default for WaveformSampler {
    fn default() -> Self {
        WaveformSampler {
            t_min: Self::MIN_TIME,
            t_max: Self::MAX_TIME,
            period: Self::PERIOD,
            samples: Self::SAMPLES,
        }
    }
}

impl WaveformSampler {
    pub const MIN_TIME: f64 = -10.0;
    pub const MAX_TIME: f64 = 30.0;
    /// One cycle at 50 Hz on a millisecond axis.
    pub const PERIOD: f64 = 20.0;
    pub const SAMPLES: usize = 100;

    pub fn new(t_min: f64, t_max: f64, period: f64, samples: usize) -> PqdResult<Self> {
        if !t_min.is_finite() || !t_max.is_finite() || t_max <= t_min {
            return Err(PqdError::InvalidInput(format!(
                "time window [{t_min}, {t_max}] must be finite and increasing"
            )));
        }
        if !period.is_finite() || period <= 0.0 {
            return Err(PqdError::InvalidInput(format!(
                "period must be positive, got {period}"
            )));
        }
        if samples < 2 {
            return Err(PqdError::InvalidInput(format!(
                "need at least 2 samples, got {samples}"
            )));
        }
        Ok(WaveformSampler {
            t_min,
            t_max,
            period,
            samples,
        })
    }

    /// Default window with a custom sample count.
    pub fn with_samples(samples: usize) -> PqdResult<Self> {
        WaveformSampler::new(Self::MIN_TIME, Self::MAX_TIME, Self::PERIOD, samples)
    }

    pub fn window(&self) -> (f64, f64) {
        (self.t_min, self.t_max)
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Synthesize the waveform columns from the RMS voltage and current
    /// phasors by rotating them through `e^{jωt}`.
    ///
    /// The current decomposition keeps `summed_current` pointwise equal to
    /// `current` and `apparent_power` pointwise equal to `voltage·current`.
    pub fn sample(&self, voltage: Phasor, current: Phasor) -> WaveformSet {
        let omega = 2.0 * PI / self.period;
        let time = linspace(self.t_min, self.t_max, self.samples);
        let n = time.len();

        // Split the current along and across the voltage phasor, so the
        // active part is the component in phase with the voltage wherever
        // the reference sits on the circle.
        let frame = Phasor::from_polar(1.0, voltage.angle());
        let in_frame = current.rotated(-voltage.angle());
        let active_phasor = in_frame.re() * frame.as_complex();
        let reactive_phasor = Complex64::new(0.0, in_frame.im()) * frame.as_complex();

        let mut set = WaveformSet {
            time,
            voltage: Vec::with_capacity(n),
            current: Vec::with_capacity(n),
            active_current: Vec::with_capacity(n),
            reactive_current: Vec::with_capacity(n),
            summed_current: Vec::with_capacity(n),
            active_power: Vec::with_capacity(n),
            reactive_power: Vec::with_capacity(n),
            apparent_power: Vec::with_capacity(n),
        };

        for &t in &set.time {
            let rotation = Complex64::from_polar(1.0, omega * t);
            let v = voltage.instantaneous(rotation);
            let i = current.instantaneous(rotation);
            let i_active = (SQRT_2 * active_phasor * rotation).re;
            let i_reactive = (SQRT_2 * reactive_phasor * rotation).re;

            set.voltage.push(v);
            set.current.push(i);
            set.active_current.push(i_active);
            set.reactive_current.push(i_reactive);
            set.summed_current.push(i_active + i_reactive);
            set.active_power.push(v * i_active);
            set.reactive_power.push(v * i_reactive);
            set.apparent_power.push(v * i);
        }

        set
    }
}

/// Columnar waveform samples over one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveformSet {
    /// Sample times, milliseconds.
    pub time: Vec<f64>,
    pub voltage: Vec<f64>,
    pub current: Vec<f64>,
    pub active_current: Vec<f64>,
    pub reactive_current: Vec<f64>,
    pub summed_current: Vec<f64>,
    pub active_power: Vec<f64>,
    pub reactive_power: Vec<f64>,
    pub apparent_power: Vec<f64>,
}

impl WaveformSet {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Named series in presentation order, time axis excluded.
    pub fn series(&self) -> [(&'static str, &[f64]); 8] {
        [
            ("voltage", &self.voltage),
            ("current", &self.current),
            ("active_current", &self.active_current),
            ("reactive_current", &self.reactive_current),
            ("summed_current", &self.summed_current),
            ("active_power", &self.active_power),
            ("reactive_power", &self.reactive_power),
            ("apparent_power", &self.apparent_power),
        ]
    }
}

//! Angle sweeps for tabular study of the quadrant plane.

use serde::Serialize;

use crate::convention::SignConvention;
use crate::error::{PqdError, PqdResult};
use crate::model::OperatingPoint;
use crate::units::{Radians, VoltAmperes};
use crate::waveform::linspace;

/// One solved row of an angle sweep, flattened for export.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SweepRow {
    pub angle_rad: f64,
    pub angle_deg: f64,
    pub p: f64,
    pub q: f64,
    pub s: f64,
    pub cos_phi: f64,
    pub power_factor: f64,
    pub phase: &'static str,
    pub flow: &'static str,
    /// Quadrant numeral, "-" at the origin.
    pub quadrant: &'static str,
}

/// Solve an inclusive linspace of angles at a fixed magnitude.
///
/// The sweep may run in either direction; both endpoints are included.
pub fn sweep_angles(
    start: Radians,
    end: Radians,
    steps: usize,
    magnitude: VoltAmperes,
    convention: SignConvention,
) -> PqdResult<Vec<SweepRow>> {
    if steps < 2 {
        return Err(PqdError::InvalidInput(format!(
            "a sweep needs at least 2 steps, got {steps}"
        )));
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(PqdError::InvalidInput("sweep bounds must be finite".into()));
    }

    linspace(start.value(), end.value(), steps)
        .into_iter()
        .map(|angle| {
            let sol = OperatingPoint::new(Radians(angle), magnitude)?.solve(convention);
            Ok(SweepRow {
                angle_rad: angle,
                angle_deg: Radians(angle).to_degrees().value(),
                p: sol.power.p.value(),
                q: sol.power.q.value(),
                s: sol.apparent.value(),
                cos_phi: sol.power_factor.cos_phi,
                power_factor: sol.power_factor.value,
                phase: sol.power_factor.phase.as_str(),
                flow: sol.power_factor.flow.as_str(),
                quadrant: sol.quadrant.map_or("-", |q| q.as_str()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn sweep_includes_both_endpoints() {
        let rows = sweep_angles(
            Radians::ZERO,
            Radians::PI,
            5,
            VoltAmperes(1.0),
            SignConvention::Eei,
        )
        .unwrap();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].angle_rad, 0.0);
        assert_eq!(rows[4].angle_rad, PI);
        assert_eq!(rows[4].angle_deg, 180.0);
    }

    #[test]
    fn sweep_walks_through_the_quadrants() {
        // Midpoints of the four quadrants plus a wrap back to the first.
        let rows = sweep_angles(
            Radians(PI / 4.0),
            Radians(9.0 * PI / 4.0),
            5,
            VoltAmperes(1.0),
            SignConvention::Eei,
        )
        .unwrap();

        let numerals: Vec<&str> = rows.iter().map(|r| r.quadrant).collect();
        assert_eq!(numerals, vec!["I", "II", "III", "IV", "I"]);
    }

    #[test]
    fn rows_hold_the_power_triangle() {
        let rows = sweep_angles(
            Radians(-PI),
            Radians(PI),
            37,
            VoltAmperes(0.8),
            SignConvention::Iec,
        )
        .unwrap();

        for row in rows {
            let lhs = row.p.powi(2) + row.q.powi(2);
            assert!((lhs - row.s.powi(2)).abs() < 1e-12);
            assert!((row.power_factor - row.cos_phi).abs() < 1e-12);
        }
    }

    #[test]
    fn descending_sweeps_are_allowed() {
        let rows = sweep_angles(
            Radians::PI,
            Radians::ZERO,
            3,
            VoltAmperes(1.0),
            SignConvention::Eei,
        )
        .unwrap();
        assert_eq!(rows[0].angle_rad, PI);
        assert_eq!(rows[2].angle_rad, 0.0);
    }

    #[test]
    fn rejects_bad_sweep_requests() {
        let one_step = sweep_angles(
            Radians::ZERO,
            Radians::PI,
            1,
            VoltAmperes(1.0),
            SignConvention::Eei,
        );
        assert!(one_step.is_err());

        let bad_bound = sweep_angles(
            Radians(f64::NAN),
            Radians::PI,
            4,
            VoltAmperes(1.0),
            SignConvention::Eei,
        );
        assert!(bad_bound.is_err());

        let bad_magnitude = sweep_angles(
            Radians::ZERO,
            Radians::PI,
            4,
            VoltAmperes(-1.0),
            SignConvention::Eei,
        );
        assert!(bad_magnitude.is_err());
    }

    #[test]
    fn rows_serialize_flat() {
        let rows = sweep_angles(
            Radians::ZERO,
            Radians::PI,
            2,
            VoltAmperes(1.0),
            SignConvention::Eei,
        )
        .unwrap();

        let json = serde_json::to_value(rows[0]).unwrap();
        assert_eq!(json["quadrant"], "I");
        assert_eq!(json["flow"], "exporting");
        assert!((json["power_factor"].as_f64().unwrap() - 1.0).abs() < 1e-12);
    }
}

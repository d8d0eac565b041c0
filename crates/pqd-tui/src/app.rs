//! Interactive state for the viewer.

use std::collections::VecDeque;

use chrono::Local;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use pqd_core::{
    Degrees, OperatingPoint, QuadrantModel, Radians, Solution, VoltAmperes, WaveformSampler,
    WaveformSet, PRESETS,
};

use crate::config::TuiConfig;

const LOG_CAPACITY: usize = 5;

/// Chart extent on both axes, leaving air around the rating circle.
pub const PLANE_BOUND: f64 = 1.4;

pub struct App {
    pub model: QuadrantModel,
    pub sampler: WaveformSampler,
    coarse_step: Radians,
    fine_step: Radians,
    magnitude_step: VoltAmperes,
    /// Index into [`PRESETS`] while the point still matches one.
    pub preset_index: Option<usize>,
    pub logs: VecDeque<String>,
    /// Inner plotting region of the P-Q chart, refreshed on every draw so
    /// mouse events can be mapped back onto the plane.
    pub plane_area: Option<Rect>,
}

impl App {
    pub fn new(config: &TuiConfig) -> Self {
        let mut model = QuadrantModel::new().with_convention(config.convention);
        if config.initial_angle_deg.is_some() || config.initial_magnitude.is_some() {
            let angle = Degrees(config.initial_angle_deg.unwrap_or(0.0)).to_radians();
            let magnitude = VoltAmperes(config.initial_magnitude.unwrap_or(1.0));
            // The config is validated, so this only skips on a logic error.
            if let Ok(point) = OperatingPoint::new(angle, magnitude) {
                model.set_point(point);
            }
        }
        let mut app = App {
            model,
            sampler: WaveformSampler::default(),
            coarse_step: Degrees(config.angle_step_deg).to_radians(),
            fine_step: Degrees(config.fine_step_deg).to_radians(),
            magnitude_step: VoltAmperes(config.magnitude_step),
            preset_index: None,
            logs: VecDeque::with_capacity(LOG_CAPACITY),
            plane_area: None,
        };
        app.push_log("ready: arrows steer, c flips the convention, q quits");
        app
    }

    pub fn solution(&self) -> Solution {
        self.model.solve()
    }

    /// One cycle-window of waves for the current point.
    pub fn waveforms(&self) -> WaveformSet {
        let solution = self.solution();
        self.sampler.sample(
            solution.circuit.voltage_phasor(),
            solution.circuit.current_phasor(),
        )
    }

    pub fn step_angle(&mut self, direction: f64, fine: bool) {
        let step = if fine { self.fine_step } else { self.coarse_step };
        self.model.nudge_angle(step * direction);
        self.preset_index = None;
        self.log_point();
    }

    pub fn step_magnitude(&mut self, direction: f64) {
        self.model.nudge_magnitude(self.magnitude_step * direction);
        self.preset_index = None;
        self.log_point();
    }

    pub fn toggle_convention(&mut self) {
        self.model.toggle_convention();
        let solution = self.solution();
        self.push_log(&format!(
            "{} convention: pf {:+.3}",
            solution.power_factor.convention, solution.power_factor.value
        ));
    }

    pub fn cycle_preset(&mut self, forward: bool) {
        let count = PRESETS.len();
        let next = match (self.preset_index, forward) {
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
            (None, true) => 0,
            (None, false) => count - 1,
        };
        let preset = &PRESETS[next];
        match preset.operating_point() {
            Ok(point) => {
                self.model.set_point(point);
                self.preset_index = Some(next);
                self.push_log(&format!("preset {}: {}", preset.id, preset.description));
            }
            Err(err) => self.push_log(&format!("preset {} rejected: {err}", preset.id)),
        }
    }

    pub fn reset(&mut self) {
        self.model.reset();
        self.preset_index = None;
        self.push_log("reset to full export at zero angle");
    }

    pub fn on_mouse(&mut self, event: MouseEvent) {
        let pressed = matches!(
            event.kind,
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
        );
        if !pressed {
            return;
        }
        if let Some((p, q)) = self.map_to_plane(event.column, event.row) {
            self.model.drag_to(p, q);
            self.preset_index = None;
            if matches!(event.kind, MouseEventKind::Down(_)) {
                self.log_point();
            }
        }
    }

    /// Map a terminal cell inside the P-Q plot to plane coordinates, with
    /// the top row at +Q. Cells outside the plot return `None`.
    pub fn map_to_plane(&self, column: u16, row: u16) -> Option<(f64, f64)> {
        let area = self.plane_area?;
        if area.width < 2 || area.height < 2 {
            return None;
        }
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside {
            return None;
        }
        let fx = f64::from(column - area.x) / f64::from(area.width - 1);
        let fy = f64::from(row - area.y) / f64::from(area.height - 1);
        let p = (2.0 * fx - 1.0) * PLANE_BOUND;
        let q = (1.0 - 2.0 * fy) * PLANE_BOUND;
        Some((p, q))
    }

    fn log_point(&mut self) {
        let solution = self.solution();
        let angle = solution.point.angle().normalized().to_degrees();
        self.push_log(&format!(
            "phi {:+.1} deg, S {:.2}: P {:+.2}, Q {:+.2}",
            angle.value(),
            solution.apparent.value(),
            solution.power.p.value(),
            solution.power.q.value()
        ));
    }

    pub fn push_log(&mut self, entry: &str) {
        if self.logs.len() == LOG_CAPACITY {
            self.logs.pop_front();
        }
        let timestamp = Local::now().format("%H:%M:%S");
        self.logs.push_back(format!("{timestamp} | {entry}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqd_core::SignConvention;
    use std::f64::consts::FRAC_PI_2;

    fn press(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: crossterm::event::KeyModifiers::NONE,
        }
    }

    #[test]
    fn starts_from_the_configured_point() {
        let config = TuiConfig {
            initial_angle_deg: Some(90.0),
            initial_magnitude: Some(0.5),
            convention: SignConvention::Iec,
            ..TuiConfig::default()
        };
        let app = App::new(&config);

        let point = app.model.point();
        assert!((point.angle().value() - FRAC_PI_2).abs() < 1e-12);
        assert!((point.magnitude().value() - 0.5).abs() < 1e-12);
        assert_eq!(app.model.convention(), SignConvention::Iec);
        assert_eq!(app.logs.len(), 1);
    }

    #[test]
    fn angle_steps_follow_the_configured_sizes() {
        let mut app = App::new(&TuiConfig::default());

        app.step_angle(1.0, false);
        let coarse = app.model.point().angle().to_degrees().value();
        assert!((coarse - 5.0).abs() < 1e-9);

        app.step_angle(-1.0, true);
        let after_fine = app.model.point().angle().to_degrees().value();
        assert!((after_fine - 4.0).abs() < 1e-9);
    }

    #[test]
    fn stepping_leaves_preset_mode() {
        let mut app = App::new(&TuiConfig::default());
        app.cycle_preset(true);
        assert_eq!(app.preset_index, Some(0));

        app.step_angle(1.0, false);
        assert_eq!(app.preset_index, None);
    }

    #[test]
    fn presets_cycle_both_ways() {
        let mut app = App::new(&TuiConfig::default());

        app.cycle_preset(false);
        assert_eq!(app.preset_index, Some(PRESETS.len() - 1));

        app.cycle_preset(true);
        assert_eq!(app.preset_index, Some(0));
        let expected = PRESETS[0].operating_point().unwrap();
        assert_eq!(app.model.point(), expected);
    }

    #[test]
    fn mouse_maps_through_the_plane_area() {
        let mut app = App::new(&TuiConfig::default());
        app.plane_area = Some(Rect::new(10, 5, 21, 11));

        // Center cell lands on the origin.
        let (p, q) = app.map_to_plane(20, 10).unwrap();
        assert!(p.abs() < 1e-12 && q.abs() < 1e-12);

        // Corners hit the plane bounds, top row at +Q.
        let (p, q) = app.map_to_plane(10, 5).unwrap();
        assert!((p + PLANE_BOUND).abs() < 1e-12);
        assert!((q - PLANE_BOUND).abs() < 1e-12);
        let (p, q) = app.map_to_plane(30, 15).unwrap();
        assert!((p - PLANE_BOUND).abs() < 1e-12);
        assert!((q + PLANE_BOUND).abs() < 1e-12);

        assert!(app.map_to_plane(9, 5).is_none());
        assert!(app.map_to_plane(31, 15).is_none());
    }

    #[test]
    fn mouse_press_drags_the_point() {
        let mut app = App::new(&TuiConfig::default());
        app.plane_area = Some(Rect::new(0, 0, 21, 11));

        // Rightmost center row: pure export, clamped to the rating.
        app.on_mouse(press(20, 5));
        let point = app.model.point();
        assert!(point.angle().value().abs() < 1e-12);
        assert!((point.magnitude().value() - 1.0).abs() < 1e-12);
        assert_eq!(app.preset_index, None);
    }

    #[test]
    fn log_ring_keeps_the_last_five() {
        let mut app = App::new(&TuiConfig::default());
        for i in 0..10 {
            app.push_log(&format!("entry {i}"));
        }
        assert_eq!(app.logs.len(), LOG_CAPACITY);
        assert!(app.logs.back().unwrap().ends_with("entry 9"));
        assert!(app.logs.front().unwrap().ends_with("entry 5"));
    }

    #[test]
    fn convention_toggle_logs_the_new_reading() {
        let mut app = App::new(&TuiConfig::default());
        app.toggle_convention();
        assert_eq!(app.model.convention(), SignConvention::Iec);
        assert!(app.logs.back().unwrap().contains("IEC"));
    }
}

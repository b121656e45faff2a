//! Pointer and wheel input translation.
//!
//! Turns raw pointer-down/move/up and wheel events into changes of the pan
//! target, and decides on release whether the gesture was a click or a drag.
//! All positions are logical (device-independent) pixels with the origin at
//! the top-left of the window.

use crate::constants::*;
use crate::pan::PanState;
use glam::Vec2;
use serde::Deserialize;
use winit::event::MouseScrollDelta;

/// Drag state machine. Start values only exist while a drag is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Pointer position at press
        start_point: Vec2,
        /// Pan target that maps `start_point` back onto the target at press
        start_target: Vec2,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// Units a wheel delta is reported in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
}

/// One wheel/trackpad event.
///
/// `delta` uses the scroll-offset convention: positive y scrolls down. `legacy` is
/// the older signed field with the opposite sign; a non-zero legacy axis
/// wins over `delta` for that axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelDelta {
    pub legacy: Option<Vec2>,
    pub delta: Vec2,
    pub mode: DeltaMode,
}

impl WheelDelta {
    pub fn pixels(delta: Vec2) -> Self {
        Self {
            legacy: None,
            delta,
            mode: DeltaMode::Pixel,
        }
    }

    pub fn lines(delta: Vec2) -> Self {
        Self {
            legacy: None,
            delta,
            mode: DeltaMode::Line,
        }
    }

    /// Convert a winit scroll delta. winit's positive values move content
    /// right and down, which is the opposite of the `delta` sign.
    pub fn from_winit(delta: MouseScrollDelta, scale_factor: f64) -> Self {
        match delta {
            MouseScrollDelta::LineDelta(x, y) => Self::lines(Vec2::new(-x, -y)),
            MouseScrollDelta::PixelDelta(pos) => {
                let logical = pos.to_logical::<f32>(scale_factor);
                Self::pixels(Vec2::new(-logical.x, -logical.y))
            }
        }
    }

    /// Signed on-screen scroll amount before calibration (positive y = up).
    fn raw(&self) -> Vec2 {
        let legacy = self.legacy.unwrap_or(Vec2::ZERO);
        let pick = |legacy: f32, delta: f32| {
            let legacy = finite_or_zero(legacy);
            if legacy != 0.0 {
                legacy
            } else {
                -finite_or_zero(delta)
            }
        };
        Vec2::new(pick(legacy.x, self.delta.x), pick(legacy.y, self.delta.y))
    }
}

/// Multipliers that normalize wheel deltas to on-screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct WheelCalibration {
    /// Pixels per line for line-mode deltas
    pub line_scale: f32,
    /// Applied to every wheel delta
    pub sensitivity: f32,
}

impl WheelCalibration {
    /// Calibration for the platform this binary was built for.
    pub fn for_platform() -> Self {
        Self::with_boost(cfg!(target_os = "windows"))
    }

    fn with_boost(boosted: bool) -> Self {
        let boost = if boosted { WHEEL_WINDOWS_BOOST } else { 1.0 };
        Self {
            line_scale: WHEEL_LINE_SCALE * boost,
            sensitivity: WHEEL_SENSITIVITY * boost,
        }
    }

    /// Scale a raw wheel delta to on-screen pixels.
    pub fn apply(&self, wheel: &WheelDelta) -> Vec2 {
        let mut scaled = wheel.raw();
        if wheel.mode == DeltaMode::Line {
            scaled *= self.line_scale;
        }
        scaled * self.sensitivity
    }
}

impl Default for WheelCalibration {
    fn default() -> Self {
        Self::for_platform()
    }
}

/// Outcome of a pointer release
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Release {
    /// No drag was in progress
    Ignored,
    /// The pointer travelled too far (or the detail view is open)
    Drag,
    /// Short press: pick at this point
    Click(Vec2),
}

/// Owns the drag state and writes the pan target.
#[derive(Debug, Default)]
pub struct InputTranslator {
    pub drag: DragState,
    pub calibration: WheelCalibration,
    /// Last known cursor position; winit button events carry no position.
    pub cursor: Vec2,
}

impl InputTranslator {
    pub fn new(calibration: WheelCalibration) -> Self {
        Self {
            drag: DragState::Idle,
            calibration,
            cursor: Vec2::ZERO,
        }
    }

    pub fn track_cursor(&mut self, point: Vec2) {
        if point.is_finite() {
            self.cursor = point;
        }
    }

    /// Idle -> Dragging. A second press while dragging is ignored.
    pub fn pointer_down(&mut self, pan: &PanState, point: Vec2) {
        if self.drag.is_dragging() {
            return;
        }
        let point = sanitize(point);
        self.drag = DragState::Dragging {
            start_point: point,
            start_target: Vec2::new(
                pan.target.x - point.x * DRAG_GAIN,
                pan.target.y + point.y * DRAG_GAIN,
            ),
        };
    }

    /// Map the absolute pointer position onto the pan target.
    pub fn pointer_move(&mut self, pan: &mut PanState, point: Vec2, popup_open: bool) {
        let DragState::Dragging { start_target, .. } = self.drag else {
            return;
        };
        if popup_open {
            return;
        }
        let point = sanitize(point);
        pan.target = Vec2::new(
            start_target.x + point.x * DRAG_GAIN,
            start_target.y - point.y * DRAG_GAIN,
        );
    }

    /// Dragging -> Idle, classifying the gesture.
    pub fn pointer_up(&mut self, point: Vec2, popup_open: bool) -> Release {
        let DragState::Dragging { start_point, .. } = self.drag else {
            return Release::Ignored;
        };
        self.drag = DragState::Idle;

        let point = sanitize(point);
        let distance = point.distance(start_point);
        if distance < CLICK_DRAG_THRESHOLD && !popup_open {
            Release::Click(point)
        } else {
            Release::Drag
        }
    }

    pub fn wheel(&mut self, pan: &mut PanState, wheel: &WheelDelta, popup_open: bool) {
        if popup_open {
            return;
        }
        let scaled = self.calibration.apply(wheel);
        pan.target.x += scaled.x;
        pan.target.y -= scaled.y;
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn sanitize(point: Vec2) -> Vec2 {
    Vec2::new(finite_or_zero(point.x), finite_or_zero(point.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> InputTranslator {
        InputTranslator::new(WheelCalibration::with_boost(false))
    }

    #[test]
    fn test_press_then_same_point_keeps_target() {
        let mut input = translator();
        let mut pan = PanState::new();
        pan.target = Vec2::new(40.0, -12.0);

        input.pointer_down(&pan, Vec2::new(300.0, 200.0));
        input.pointer_move(&mut pan, Vec2::new(300.0, 200.0), false);

        assert_eq!(pan.target, Vec2::new(40.0, -12.0));
    }

    #[test]
    fn test_drag_moves_x_forward_and_y_inverted() {
        let mut input = translator();
        let mut pan = PanState::new();

        input.pointer_down(&pan, Vec2::new(100.0, 100.0));
        input.pointer_move(&mut pan, Vec2::new(110.0, 120.0), false);

        assert_eq!(pan.target, Vec2::new(25.0, -50.0));
    }

    #[test]
    fn test_drag_replay_is_independent_of_intermediate_moves() {
        let mut input = translator();
        let mut pan = PanState::new();

        input.pointer_down(&pan, Vec2::new(50.0, 50.0));
        input.pointer_move(&mut pan, Vec2::new(90.0, 10.0), false);
        let first = pan.target;

        input.pointer_move(&mut pan, Vec2::new(-400.0, 900.0), false);
        input.pointer_move(&mut pan, Vec2::new(3.0, 7.0), false);
        input.pointer_move(&mut pan, Vec2::new(90.0, 10.0), false);

        assert_eq!(pan.target, first);
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut input = translator();
        let mut pan = PanState::new();
        input.pointer_move(&mut pan, Vec2::new(500.0, 500.0), false);
        assert_eq!(pan.target, Vec2::ZERO);
    }

    #[test]
    fn test_second_press_does_not_reset_drag() {
        let mut input = translator();
        let pan = PanState::new();
        input.pointer_down(&pan, Vec2::new(10.0, 10.0));
        let before = input.drag;
        input.pointer_down(&pan, Vec2::new(99.0, 99.0));
        assert_eq!(input.drag, before);
    }

    #[test]
    fn test_short_release_is_click() {
        let mut input = translator();
        let pan = PanState::new();
        input.pointer_down(&pan, Vec2::new(100.0, 100.0));

        let release = input.pointer_up(Vec2::new(104.0, 100.0), false);

        assert_eq!(release, Release::Click(Vec2::new(104.0, 100.0)));
        assert!(!input.drag.is_dragging());
    }

    #[test]
    fn test_threshold_distance_is_drag() {
        let mut input = translator();
        let pan = PanState::new();
        input.pointer_down(&pan, Vec2::new(100.0, 100.0));

        // 3-4-5 triangle: exactly 5px
        let release = input.pointer_up(Vec2::new(103.0, 104.0), false);

        assert_eq!(release, Release::Drag);
    }

    #[test]
    fn test_release_with_popup_open_never_clicks() {
        let mut input = translator();
        let pan = PanState::new();
        input.pointer_down(&pan, Vec2::new(10.0, 10.0));
        assert_eq!(input.pointer_up(Vec2::new(10.0, 10.0), true), Release::Drag);
    }

    #[test]
    fn test_release_when_idle_is_ignored() {
        let mut input = translator();
        assert_eq!(input.pointer_up(Vec2::ZERO, false), Release::Ignored);
    }

    #[test]
    fn test_popup_suppresses_moves_and_wheel() {
        let mut input = translator();
        let mut pan = PanState::new();
        pan.target = Vec2::new(7.0, 8.0);

        input.pointer_down(&pan, Vec2::new(0.0, 0.0));
        input.pointer_move(&mut pan, Vec2::new(300.0, 300.0), true);
        input.wheel(&mut pan, &WheelDelta::lines(Vec2::new(3.0, 3.0)), true);
        input.wheel(&mut pan, &WheelDelta::pixels(Vec2::new(-50.0, 80.0)), true);

        assert_eq!(pan.target, Vec2::new(7.0, 8.0));
    }

    #[test]
    fn test_pixel_wheel_scaled_by_sensitivity() {
        let mut input = translator();
        let mut pan = PanState::new();

        // Scrolling down 100px reports delta.y = 100 and raises the target
        input.wheel(&mut pan, &WheelDelta::pixels(Vec2::new(0.0, 100.0)), false);

        assert!((pan.target.y - 60.0).abs() < 1e-4);
        assert_eq!(pan.target.x, 0.0);
    }

    #[test]
    fn test_line_wheel_scaled_by_line_factor() {
        let mut input = translator();
        let mut pan = PanState::new();

        input.wheel(&mut pan, &WheelDelta::lines(Vec2::new(-1.0, 0.0)), false);

        // -(-1) * 20 * 0.6
        assert!((pan.target.x - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_legacy_field_wins_per_axis() {
        let wheel = WheelDelta {
            legacy: Some(Vec2::new(0.0, 120.0)),
            delta: Vec2::new(10.0, -999.0),
            mode: DeltaMode::Pixel,
        };
        // x falls through to -delta, y takes the legacy value
        assert_eq!(wheel.raw(), Vec2::new(-10.0, 120.0));
    }

    #[test]
    fn test_non_finite_wheel_is_zero() {
        let mut input = translator();
        let mut pan = PanState::new();
        let wheel = WheelDelta::pixels(Vec2::new(f32::NAN, f32::INFINITY));
        input.wheel(&mut pan, &wheel, false);
        assert_eq!(pan.target, Vec2::ZERO);
    }

    #[test]
    fn test_windows_calibration_doubles_both_tiers() {
        let base = WheelCalibration::with_boost(false);
        let boosted = WheelCalibration::with_boost(true);
        assert_eq!(boosted.line_scale, base.line_scale * 2.0);
        assert_eq!(boosted.sensitivity, base.sensitivity * 2.0);
    }

    #[test]
    fn test_winit_line_delta_flips_sign() {
        // Wheel away from the user: winit reports +y, WheelDelta stores -y
        let wheel = WheelDelta::from_winit(MouseScrollDelta::LineDelta(0.0, 1.0), 1.0);
        assert_eq!(wheel.mode, DeltaMode::Line);
        assert_eq!(wheel.delta, Vec2::new(0.0, -1.0));
    }
}

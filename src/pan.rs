//! Damped pan controller.
//!
//! Input handlers move `target`; once per frame `tick` eases `current`
//! toward it with a fixed damping factor. The size of the remaining
//! distance also drives the squash effect applied to every tile.

use crate::constants::*;
use glam::Vec2;

/// Target and smoothed pan offsets plus the derived motion intensity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanState {
    pub target: Vec2,
    pub current: Vec2,
    /// Always >= 0. Recomputed on every tick.
    pub velocity_magnitude: f32,
}

impl PanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance `current` one step toward `target`.
    pub fn tick(&mut self) {
        let diff = self.target - self.current;

        self.current.x = damp_axis(self.current.x, self.target.x, diff.x);
        self.current.y = damp_axis(self.current.y, self.target.y, diff.y);

        self.velocity_magnitude = (diff.x.abs() * MOTION_INTENSITY_SCALE)
            .max(diff.y.abs() * MOTION_INTENSITY_SCALE);
    }

    /// True once `current` has reached `target` and no motion remains.
    pub fn is_settled(&self) -> bool {
        self.current == self.target && self.velocity_magnitude == 0.0
    }
}

fn damp_axis(current: f32, target: f32, diff: f32) -> f32 {
    let next = round_offset(current + diff * PAN_DAMPING);
    // Rounding swallows steps smaller than half a hundredth; snap the tail.
    if next == current && current != target {
        target
    } else {
        next
    }
}

fn round_offset(value: f32) -> f32 {
    (value * PAN_ROUNDING_SCALE).round() / PAN_ROUNDING_SCALE
}

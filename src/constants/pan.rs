//! Pan-controller constants.

/// Fraction of the remaining distance covered by `current` on each tick
pub const PAN_DAMPING: f32 = 0.085;
/// Offsets are rounded to this many steps per pixel after each tick
pub const PAN_ROUNDING_SCALE: f32 = 100.0;
/// Scale applied to the per-axis offset delta to derive motion intensity
pub const MOTION_INTENSITY_SCALE: f32 = 0.0001;

//! Pointer and wheel input constants.

/// Pointer travel multiplier while dragging
pub const DRAG_GAIN: f32 = 2.5;
/// Release distance (logical pixels) at or beyond which a press counts as a drag
pub const CLICK_DRAG_THRESHOLD: f32 = 5.0;
/// Base pixels per wheel line
pub const WHEEL_LINE_SCALE: f32 = 20.0;
/// Base wheel sensitivity
pub const WHEEL_SENSITIVITY: f32 = 0.6;
/// Windows reports wheel deltas at half the usual on-screen distance
pub const WHEEL_WINDOWS_BOOST: f32 = 2.0;

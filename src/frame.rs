//! Frame scheduling.
//!
//! The host owns the display loop and calls `Ticker::drive` once per
//! redraw; anything that animates implements `FrameCallback`.

use std::time::Instant;

/// Information about the frame being produced
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Zero-based frame counter
    pub index: u64,
    /// Seconds since the previous frame (0 for the first)
    pub dt: f32,
}

pub trait FrameCallback {
    fn on_frame(&mut self, frame: Frame);
}

pub struct Ticker {
    last: Option<Instant>,
    frames: u64,
}

impl Ticker {
    pub fn new() -> Self {
        Self {
            last: None,
            frames: 0,
        }
    }

    /// Advance one frame and invoke `callback` exactly once.
    pub fn drive<C: FrameCallback + ?Sized>(&mut self, callback: &mut C) -> Frame {
        let now = Instant::now();
        let dt = self
            .last
            .map(|last| (now - last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);

        let frame = Frame {
            index: self.frames,
            dt,
        };
        self.frames += 1;

        callback.on_frame(frame);
        frame
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

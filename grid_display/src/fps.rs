// fps.rs - Frames-per-second counter for the window title

use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

pub struct FpsCounter {
    started: Instant,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self { started: now, frames: 0, fps: 0 }
    }

    /// Counts a frame. Returns the new rate once per elapsed second.
    pub fn frame(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;

        let elapsed = now.saturating_duration_since(self.started);
        if elapsed < WINDOW {
            return None;
        }

        self.fps = (self.frames as f64 / elapsed.as_secs_f64()).round() as u32;
        self.frames = 0;
        self.started = now;
        Some(self.fps)
    }
}

//! Time management utilities

use std::time::{Duration, Instant};

/// Fixed-cadence frame timer driving the viewer loop
pub struct FrameTimer {
    interval: Duration,
    last_frame: Instant,
    frame_count: u64,
}

impl FrameTimer {
    /// Create a new timer ticking every `interval`
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_frame: Instant::now(),
            frame_count: 0,
        }
    }

    /// Sleep until the next frame is due and advance the frame counter
    pub fn wait_for_next_frame(&mut self) {
        let elapsed = self.last_frame.elapsed();
        if elapsed < self.interval {
            std::thread::sleep(self.interval - elapsed);
        }
        self.last_frame = Instant::now();
        self.frame_count += 1;
    }

    /// Get the frame interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

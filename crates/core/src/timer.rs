//! Frame timing for the render loop.

use std::time::{Duration, Instant};

/// Number of frames averaged by [`FrameTimer::average_fps`].
const FPS_WINDOW: usize = 60;

/// Measures per-frame delta time and a rolling frame rate.
#[derive(Debug)]
pub struct FrameTimer {
    start: Instant,
    last_tick: Instant,
    frame_count: u64,
    recent: [Duration; FPS_WINDOW],
    cursor: usize,
    filled: usize,
}

impl FrameTimer {
    /// Create a new timer, starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            frame_count: 0,
            recent: [Duration::ZERO; FPS_WINDOW],
            cursor: 0,
            filled: 0,
        }
    }

    /// Total time since the timer was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Marks the end of a frame and returns the time since the previous one.
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now - self.last_tick;
        self.last_tick = now;
        self.record(delta);
        delta
    }

    /// Number of frames recorded with [`tick`](Self::tick).
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second over the most recent frames.
    ///
    /// Returns `0.0` until at least one frame with a non-zero duration
    /// was recorded.
    pub fn average_fps(&self) -> f32 {
        let total: Duration = self.recent[..self.filled].iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.filled as f32 / total.as_secs_f32()
    }

    fn record(&mut self, delta: Duration) {
        self.frame_count += 1;
        self.recent[self.cursor] = delta;
        self.cursor = (self.cursor + 1) % FPS_WINDOW;
        self.filled = (self.filled + 1).min(FPS_WINDOW);
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

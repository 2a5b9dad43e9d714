pub mod buffer;
pub mod scheduler;
pub mod session;

pub use buffer::FeedBuffer;
pub use scheduler::{ScheduleHandle, Scheduler};
pub use session::{Progress, Session};

use serde::{Deserialize, Serialize};

/// Default number of visible feed lines
pub const DEFAULT_CAPACITY: usize = 8;

pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 10.0;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Idle,
    Running,
    Stopped,
}

/// Playback configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    pub capacity: usize,
    pub speed: f64, // 1.0 = authored timing, 2.0 = twice as fast
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            speed: 1.0,
        }
    }
}

impl PlaybackConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = clamp_speed(speed);
        self
    }
}

/// Clamp a speed multiplier into the supported range
pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        1.0
    } else {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    }
}

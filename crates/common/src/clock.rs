//! Session clock utilities.
//!
//! Landmark frames are timestamped in milliseconds relative to the moment a
//! gesture session started. Recorded sessions carry their own timestamps;
//! live sources without timestamps are stamped with a [`SessionClock`].

use std::time::Instant;

/// A session clock that provides monotonic millisecond timestamps relative
/// to a fixed epoch (the moment the session started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Milliseconds elapsed since session start.
    pub fn elapsed_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Convert a millisecond value to fractional seconds.
    pub fn ms_to_secs(ms: u64) -> f64 {
        ms as f64 / 1_000.0
    }

    /// Nominal frame interval in milliseconds for a frame rate.
    ///
    /// A zero rate yields zero, which callers treat as "no nominal interval".
    pub fn frame_interval_ms(fps: u32) -> u64 {
        if fps == 0 {
            return 0;
        }
        (1_000 / fps as u64).max(1)
    }
}

//! Frame-relative time keeping for gesture deadlines.
//!
//! Deadlines are never absolute wall-clock instants. A window is measured
//! from the frame on which a sequence was armed, either in processed frames
//! or in elapsed session milliseconds, so it stays correct when the frame
//! rate varies.

use serde::{Deserialize, Serialize};

/// Position of a frame within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameTime {
    /// Zero-based index of the processed frame.
    pub index: u64,
    /// Milliseconds since session start.
    pub elapsed_ms: u64,
}

impl FrameTime {
    pub fn new(index: u64, elapsed_ms: u64) -> Self {
        Self { index, elapsed_ms }
    }
}

/// Length of a gesture window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    /// A number of processed frames.
    Frames(u64),
    /// Elapsed session milliseconds.
    Millis(u64),
}

impl TimeWindow {
    pub fn is_zero(&self) -> bool {
        matches!(self, TimeWindow::Frames(0) | TimeWindow::Millis(0))
    }

    /// Whether `now` is still inside the window opened at `since`.
    ///
    /// The bound is inclusive: an event exactly `N` frames after arming a
    /// `Frames(N)` window still counts.
    pub fn contains(&self, since: FrameTime, now: FrameTime) -> bool {
        match *self {
            TimeWindow::Frames(n) => now.index.saturating_sub(since.index) <= n,
            TimeWindow::Millis(ms) => now.elapsed_ms.saturating_sub(since.elapsed_ms) <= ms,
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeWindow::Frames(n) => write!(f, "{n} frames"),
            TimeWindow::Millis(ms) => write!(f, "{ms} ms"),
        }
    }
}

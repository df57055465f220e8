//! Gesture Gallery Landmark Model
//!
//! Defines the data contracts shared by the recognizer and its consumers:
//! - **Keypoints:** Named pose and hand landmarks
//! - **Frames:** Per-frame landmark snapshots with explicit absence
//! - **Sessions:** JSONL landmark streams with an optional header
//! - **Gestures:** Contact regions and application commands
//!
//! Coordinates are normalized to `[0.0, 1.0]` of the image unless a frame
//! declares pixel units.

pub mod frame;
pub mod gesture;
pub mod keypoint;
pub mod session;

pub use frame::*;
pub use gesture::*;
pub use keypoint::*;
pub use session::*;

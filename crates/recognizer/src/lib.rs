//! Gesture Gallery Recognizer
//!
//! Turns a stream of landmark frames into debounced application commands.
//!
//! ## Pipeline
//!
//! ```text
//! LandmarkFrame -> CoordinateNormalizer -> ProximityClassifier
//!               -> StabilityFilter -> GestureSequencer -> EventEmitter
//! ```
//!
//! The recognizer is frame-synchronous and pure apart from the caller-owned
//! [`GestureState`]: the same frames always produce the same commands.
//!
//! ## Example
//!
//! ```no_run
//! use gesture_gallery_landmark_model::parse_frames;
//! use gesture_gallery_recognizer::GestureRecognizer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let frames = parse_frames(&std::fs::read_to_string("session.jsonl")?)?;
//! let recognizer = GestureRecognizer::with_defaults()?;
//! let mut state = recognizer.start_session();
//! for frame in &frames {
//!     if let Some(event) = recognizer.process(&mut state, frame).fired {
//!         println!("{} at frame {}", event.command, event.frame);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod emitter;
pub mod engine;
pub mod normalizer;
pub mod proximity;
pub mod sequencer;
pub mod stability;
pub mod timing;

pub use catalog::{GestureCatalog, GestureDefinition};
pub use config::{RecognizerConfig, RegionTuning};
pub use emitter::{CommandSink, EventEmitter, GestureEvent, HISTORY_LIMIT, READY_FEEDBACK};
pub use engine::{FrameReport, GestureRecognizer, GestureState};
pub use normalizer::{CoordinateNormalizer, NormalizedFrame};
pub use proximity::{Contact, ProximityClassifier};
pub use sequencer::{GestureSequencer, PendingSequence, SequencerPhase};
pub use stability::{StabilityFilter, Transition};
pub use timing::{FrameTime, TimeWindow};

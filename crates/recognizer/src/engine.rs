//! The recognizer façade.
//!
//! [`GestureRecognizer`] holds the immutable pipeline (normalizer,
//! classifier, sequencer) and is shared by every session. All per-session
//! mutable state lives in a [`GestureState`] owned by the caller, so one
//! recognizer can drive any number of independent sessions.

use gesture_gallery_common::error::GestureResult;
use gesture_gallery_landmark_model::{ContactRegion, LandmarkFrame};
use serde::Serialize;

use crate::catalog::GestureCatalog;
use crate::config::RecognizerConfig;
use crate::emitter::{CommandSink, EventEmitter, GestureEvent};
use crate::normalizer::CoordinateNormalizer;
use crate::proximity::{Contact, ProximityClassifier};
use crate::sequencer::{GestureSequencer, PendingSequence, SequencerPhase};
use crate::stability::{StabilityFilter, Transition};
use crate::timing::FrameTime;

/// What happened on one frame. Read-only, for UIs and debug output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub elapsed_ms: u64,
    /// Landmarks as the classifier measured them, in the user-facing frame.
    pub landmarks: LandmarkFrame,
    /// Classifier output before debouncing.
    pub raw_contact: Option<Contact>,
    /// Debounced contact.
    pub stable_region: Option<ContactRegion>,
    pub transition: Option<Transition>,
    pub fired: Option<GestureEvent>,
    pub phase: SequencerPhase,
}

/// Mutable state of one recognition session.
#[derive(Debug, Clone)]
pub struct GestureState {
    frames_seen: u64,
    last: Option<FrameTime>,
    /// Detector timestamp corresponding to elapsed time zero.
    origin_ms: Option<u64>,
    filter: StabilityFilter,
    pending: Option<PendingSequence>,
    emitter: EventEmitter,
}

impl GestureState {
    fn new(debounce_frames: u32) -> Self {
        Self {
            frames_seen: 0,
            last: None,
            origin_ms: None,
            filter: StabilityFilter::new(debounce_frames),
            pending: None,
            emitter: EventEmitter::new(),
        }
    }

    pub fn emitter(&self) -> &EventEmitter {
        &self.emitter
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_seen
    }

    pub fn stable_region(&self) -> Option<ContactRegion> {
        self.filter.stable()
    }

    pub fn pending(&self) -> Option<&PendingSequence> {
        self.pending.as_ref()
    }

    /// Forget everything, including emitted commands.
    pub fn reset(&mut self) {
        self.frames_seen = 0;
        self.last = None;
        self.origin_ms = None;
        self.filter.reset();
        self.pending = None;
        self.emitter.reset();
    }

    /// Assign the next frame its position in the session.
    ///
    /// Timestamped frames are measured from the first timestamp seen; a
    /// timestamp that goes backwards is clamped to the previous frame's time.
    /// Frames without a timestamp advance by the nominal interval.
    fn advance(&mut self, timestamp_ms: Option<u64>, nominal_interval_ms: u64) -> FrameTime {
        let index = self.frames_seen;
        self.frames_seen += 1;

        let fallback = self
            .last
            .map_or(0, |last| last.elapsed_ms.saturating_add(nominal_interval_ms));
        let elapsed_ms = match timestamp_ms {
            None => fallback,
            Some(ts) => {
                let origin = *self.origin_ms.get_or_insert(ts.saturating_sub(fallback));
                let elapsed = ts.saturating_sub(origin);
                match self.last {
                    Some(last) if elapsed < last.elapsed_ms => {
                        tracing::warn!(
                            frame = index,
                            timestamp_ms = ts,
                            previous_elapsed_ms = last.elapsed_ms,
                            "Frame timestamp went backwards, clamping"
                        );
                        last.elapsed_ms
                    }
                    _ => elapsed,
                }
            }
        };

        let now = FrameTime::new(index, elapsed_ms);
        self.last = Some(now);
        now
    }
}

/// Turns landmark frames into gesture commands.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: RecognizerConfig,
    normalizer: CoordinateNormalizer,
    classifier: ProximityClassifier,
    sequencer: GestureSequencer,
}

impl GestureRecognizer {
    /// Validate the config and build the pipeline.
    pub fn new(config: RecognizerConfig) -> GestureResult<Self> {
        config.validate()?;

        let catalog = match &config.gestures {
            Some(definitions) => GestureCatalog::new(definitions.clone())?,
            None => GestureCatalog::standard(config.double_touch_window, config.two_step_window),
        };
        for shadowed in catalog.shadowed_single_touches() {
            tracing::warn!(
                command = %shadowed.command(),
                region = %shadowed.first_region(),
                "Single-touch gesture can never fire: its region starts a longer gesture"
            );
        }

        tracing::debug!(
            gestures = catalog.len(),
            debounce_frames = config.debounce_frames,
            source_space = ?config.source_space,
            "Gesture recognizer ready"
        );

        Ok(Self {
            normalizer: CoordinateNormalizer::from_config(&config),
            classifier: ProximityClassifier::new(config.regions.clone()),
            sequencer: GestureSequencer::new(catalog),
            config,
        })
    }

    /// Recognizer with the default configuration and standard catalog.
    pub fn with_defaults() -> GestureResult<Self> {
        Self::new(RecognizerConfig::default())
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &GestureCatalog {
        self.sequencer.catalog()
    }

    pub fn start_session(&self) -> GestureState {
        GestureState::new(self.config.debounce_frames)
    }

    /// Process one frame. Never fails: missing detections are "no contact".
    pub fn process(&self, state: &mut GestureState, frame: &LandmarkFrame) -> FrameReport {
        let now = state.advance(frame.timestamp_ms, self.config.nominal_frame_interval_ms);

        let normalized = self.normalizer.normalize(frame);
        let raw_contact = self.classifier.classify(&normalized);

        let transition = state
            .filter
            .observe(raw_contact.map(|c| c.region), now);
        if let Some(t) = transition {
            tracing::debug!(
                frame = now.index,
                from = ?t.from,
                to = ?t.to,
                "Stable contact changed"
            );
        }

        let fired = self
            .sequencer
            .step(&mut state.pending, transition, now)
            .map(|command| GestureEvent {
                command,
                frame: now.index,
                elapsed_ms: now.elapsed_ms,
            });
        if let Some(event) = fired {
            state.emitter.emit(event);
        }

        FrameReport {
            frame: now.index,
            elapsed_ms: now.elapsed_ms,
            raw_contact,
            stable_region: state.filter.stable(),
            transition,
            fired,
            phase: self.sequencer.phase(state.pending.as_ref()),
            landmarks: normalized.into_inner(),
        }
    }

    /// Process one frame and push any fired command to `sink`.
    pub fn process_with_sink(
        &self,
        state: &mut GestureState,
        frame: &LandmarkFrame,
        sink: &mut impl CommandSink,
    ) -> FrameReport {
        let report = self.process(state, frame);
        if let Some(event) = &report.fired {
            sink.on_command(event);
        }
        report
    }

    /// Run a whole recorded session and return its final state.
    pub fn run<'a>(&self, frames: impl IntoIterator<Item = &'a LandmarkFrame>) -> GestureState {
        let mut state = self.start_session();
        for frame in frames {
            self.process(&mut state, frame);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_gallery_landmark_model::{Command, CoordinateSpace, HandKeypoint, HandLandmarks, Handedness};
    use gesture_gallery_landmark_model::{PoseKeypoint, PoseLandmarks};

    fn knee_touch(t: Option<u64>) -> LandmarkFrame {
        let pose = PoseLandmarks::new().with(PoseKeypoint::RightKnee, 0.55, 0.85);
        let hand = HandLandmarks::new().with(HandKeypoint::IndexFingerTip, 0.55, 0.84);
        let frame = LandmarkFrame::empty()
            .with_pose(pose)
            .with_hand(Handedness::Right, hand);
        match t {
            Some(t) => frame.with_timestamp(t),
            None => frame,
        }
    }

    fn idle(t: Option<u64>) -> LandmarkFrame {
        match t {
            Some(t) => LandmarkFrame::empty().with_timestamp(t),
            None => LandmarkFrame::empty(),
        }
    }

    #[test]
    fn test_process_reports_debounce_then_fire() {
        let recognizer = GestureRecognizer::with_defaults().unwrap();
        let mut state = recognizer.start_session();

        let first = recognizer.process(&mut state, &knee_touch(None));
        assert_eq!(
            first.raw_contact.map(|c| c.region),
            Some(ContactRegion::RightKnee)
        );
        assert_eq!(first.stable_region, None);
        assert!(first.fired.is_none());

        let second = recognizer.process(&mut state, &knee_touch(None));
        assert_eq!(second.stable_region, Some(ContactRegion::RightKnee));
        assert_eq!(second.fired.map(|e| e.command), Some(Command::Next));
        assert_eq!(second.phase, SequencerPhase::Idle);
        assert_eq!(state.emitter().feedback(), "Next");
    }

    #[test]
    fn test_sink_receives_fired_commands() {
        let recognizer = GestureRecognizer::with_defaults().unwrap();
        let mut state = recognizer.start_session();
        let mut sink: Vec<GestureEvent> = Vec::new();
        for _ in 0..4 {
            recognizer.process_with_sink(&mut state, &knee_touch(None), &mut sink);
        }
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].frame, 1);
    }

    #[test]
    fn test_elapsed_time_without_timestamps_uses_nominal_interval() {
        let recognizer = GestureRecognizer::with_defaults().unwrap();
        let mut state = recognizer.start_session();
        let reports: Vec<u64> = (0..3)
            .map(|_| recognizer.process(&mut state, &idle(None)).elapsed_ms)
            .collect();
        assert_eq!(reports, vec![0, 33, 66]);
    }

    #[test]
    fn test_timestamps_are_relative_and_clamped() {
        let recognizer = GestureRecognizer::with_defaults().unwrap();
        let mut state = recognizer.start_session();
        let elapsed: Vec<u64> = [Some(10_000), Some(10_040), Some(10_020), None, Some(10_200)]
            .into_iter()
            .map(|t| recognizer.process(&mut state, &idle(t)).elapsed_ms)
            .collect();
        assert_eq!(elapsed, vec![0, 40, 40, 73, 200]);
    }

    #[test]
    fn test_reset_starts_a_fresh_session() {
        let recognizer = GestureRecognizer::with_defaults().unwrap();
        let mut state = recognizer.run(&[knee_touch(None), knee_touch(None)]);
        assert_eq!(state.emitter().emitted_count(), 1);
        assert_eq!(state.frames_processed(), 2);

        state.reset();
        assert_eq!(state.emitter().emitted_count(), 0);
        assert_eq!(state.stable_region(), None);
        let report = recognizer.process(&mut state, &idle(None));
        assert_eq!(report.frame, 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = RecognizerConfig {
            debounce_frames: 0,
            ..RecognizerConfig::default()
        };
        assert!(GestureRecognizer::new(config).is_err());
    }

    #[test]
    fn test_custom_catalog_replaces_standard() {
        let config: RecognizerConfig = serde_json::from_str(
            r#"{"debounce_frames":1,"gestures":[{"kind":"single_touch","region":"RIGHT_KNEE","command":"Home"}]}"#,
        )
        .unwrap();
        let recognizer = GestureRecognizer::new(config).unwrap();
        assert_eq!(recognizer.catalog().len(), 1);
        let state = recognizer.run(&[knee_touch(None)]);
        assert_eq!(state.emitter().current_command(), Some(Command::Home));
    }

    #[test]
    fn test_frame_report_serializes() {
        let recognizer = GestureRecognizer::with_defaults().unwrap();
        let mut state = recognizer.start_session();
        let report = recognizer.process(&mut state, &knee_touch(Some(5)));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["raw_contact"]["region"], "RIGHT_KNEE");
        assert_eq!(json["phase"]["phase"], "idle");
        assert!(json["landmarks"]["pose"]["RIGHT_KNEE"].is_object());
    }

    #[test]
    fn test_report_carries_normalized_landmarks() {
        let config = RecognizerConfig {
            source_space: CoordinateSpace::Camera,
            ..RecognizerConfig::default()
        };
        let recognizer = GestureRecognizer::new(config).unwrap();
        let mut state = recognizer.start_session();
        let report = recognizer.process(&mut state, &knee_touch(None));

        let knee = report
            .landmarks
            .pose
            .as_ref()
            .and_then(|pose| pose.point(PoseKeypoint::RightKnee))
            .unwrap();
        assert!((knee.x - 0.45).abs() < 1e-9);
        assert!((knee.y - 0.85).abs() < 1e-9);
        assert_eq!(report.landmarks.space, Some(CoordinateSpace::UserFacing));
    }
}

//! Synthetic subject for recognizer integration tests.
//!
//! A seated subject in the user-facing frame with the left hand raised in
//! front of the body. Region anchors are spaced so that touching one anchor
//! never lands inside a neighbouring region's threshold.

#![allow(dead_code)]

use gesture_gallery_landmark_model::{
    Command, ContactRegion, HandKeypoint, HandLandmarks, Handedness, LandmarkFrame, Point2D,
    PoseKeypoint, PoseLandmarks,
};
use gesture_gallery_recognizer::{GestureRecognizer, RecognizerConfig};

pub fn body() -> PoseLandmarks {
    PoseLandmarks::new()
        .with(PoseKeypoint::RightEyeOuter, 0.56, 0.18)
        .with(PoseKeypoint::RightEar, 0.60, 0.20)
        .with(PoseKeypoint::LeftShoulder, 0.40, 0.30)
        .with(PoseKeypoint::RightShoulder, 0.60, 0.30)
        .with(PoseKeypoint::LeftElbow, 0.25, 0.50)
        .with(PoseKeypoint::LeftWrist, 0.35, 0.60)
        .with(PoseKeypoint::LeftHip, 0.45, 0.70)
        .with(PoseKeypoint::RightHip, 0.55, 0.70)
        .with(PoseKeypoint::LeftKnee, 0.40, 0.90)
        .with(PoseKeypoint::RightKnee, 0.60, 0.90)
}

pub fn left_hand() -> HandLandmarks {
    HandLandmarks::new()
        .with(HandKeypoint::Wrist, 0.35, 0.60)
        .with(HandKeypoint::MiddleFingerMcp, 0.35, 0.52)
        .with(HandKeypoint::IndexFingerTip, 0.38, 0.44)
        .with(HandKeypoint::PinkyTip, 0.30, 0.47)
}

/// Where the right index fingertip goes to touch a region.
pub fn target(region: ContactRegion) -> Point2D {
    match region {
        ContactRegion::RightKnee => Point2D::new(0.60, 0.90),
        ContactRegion::LeftKnee => Point2D::new(0.40, 0.90),
        ContactRegion::Chest => Point2D::new(0.50, 0.40),
        ContactRegion::Belly => Point2D::new(0.50, 0.60),
        ContactRegion::RightTemple => Point2D::new(0.58, 0.19),
        ContactRegion::LeftPalmCenter => Point2D::new(0.35, 0.56),
        ContactRegion::LeftWrist => Point2D::new(0.35, 0.60),
        ContactRegion::LeftIndexTip => Point2D::new(0.38, 0.44),
        ContactRegion::LeftPinkyTip => Point2D::new(0.30, 0.47),
        ContactRegion::LeftElbowCrease => Point2D::new(0.25, 0.50),
    }
}

fn pointing(tip: Point2D) -> LandmarkFrame {
    LandmarkFrame::empty()
        .with_pose(body())
        .with_hand(Handedness::Left, left_hand())
        .with_hand(
            Handedness::Right,
            HandLandmarks::new().with(HandKeypoint::IndexFingerTip, tip.x, tip.y),
        )
}

/// Subject touching a region with the right index fingertip.
pub fn touching(region: ContactRegion) -> LandmarkFrame {
    pointing(target(region))
}

/// Subject in view, right hand raised away from every region.
pub fn resting() -> LandmarkFrame {
    pointing(Point2D::new(0.90, 0.10))
}

/// Nobody in view.
pub fn absent() -> LandmarkFrame {
    LandmarkFrame::empty()
}

/// Builds a frame script: `touch(R, n)` and `rest(n)` append `n` frames.
#[derive(Default)]
pub struct Script {
    frames: Vec<LandmarkFrame>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch(mut self, region: ContactRegion, frames: usize) -> Self {
        self.frames
            .extend(std::iter::repeat_with(|| touching(region)).take(frames));
        self
    }

    pub fn rest(mut self, frames: usize) -> Self {
        self.frames.extend(std::iter::repeat_with(resting).take(frames));
        self
    }

    pub fn absent(mut self, frames: usize) -> Self {
        self.frames.extend(std::iter::repeat_with(absent).take(frames));
        self
    }

    pub fn frames(&self) -> &[LandmarkFrame] {
        &self.frames
    }
}

pub fn recognizer(config: RecognizerConfig) -> GestureRecognizer {
    GestureRecognizer::new(config).expect("test config should be valid")
}

/// Commands fired over a whole script.
pub fn commands(recognizer: &GestureRecognizer, script: &Script) -> Vec<Command> {
    recognizer
        .run(script.frames())
        .emitter()
        .history()
        .iter()
        .map(|e| e.command)
        .collect()
}

//! Coordinate normalization.
//!
//! The single place where detector coordinates are brought into the
//! user-facing frame. Everything downstream consumes [`NormalizedFrame`] and
//! never flips or relabels coordinates again.
//!
//! Normalization:
//! 1. Converts pixel units to normalized `[0, 1]` coordinates.
//! 2. Flips the horizontal axis and/or swaps left/right labels according to
//!    the frame's coordinate space.
//! 3. Projects landmarks to 2D and drops low-visibility landmarks.
//! 4. Assigns hands reported without handedness to a side.
//!
//! The output is tagged as user-facing and normalized, so normalizing it
//! again changes nothing.

use gesture_gallery_landmark_model::{
    CoordinateSpace, CoordinateUnits, HandKeypoint, HandLandmarks, Handedness, Landmark,
    LandmarkFrame, PoseKeypoint, PoseLandmarks,
};

use crate::config::RecognizerConfig;

/// A frame in the user-facing coordinate frame.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFrame(LandmarkFrame);

impl NormalizedFrame {
    pub fn frame(&self) -> &LandmarkFrame {
        &self.0
    }

    pub fn into_inner(self) -> LandmarkFrame {
        self.0
    }

    pub fn pose(&self) -> Option<&PoseLandmarks> {
        self.0.pose.as_ref()
    }

    pub fn hand(&self, side: Handedness) -> Option<&HandLandmarks> {
        self.0.hand(side)
    }

    pub fn timestamp_ms(&self) -> Option<u64> {
        self.0.timestamp_ms
    }
}

/// Transforms detector frames into the user-facing frame.
#[derive(Debug, Clone)]
pub struct CoordinateNormalizer {
    default_space: CoordinateSpace,
    min_visibility: f64,
}

/// Per-frame point transform derived from the frame's space and units.
#[derive(Debug, Clone, Copy)]
struct PointTransform {
    scale_x: f64,
    scale_y: f64,
    flip: bool,
    min_visibility: f64,
}

impl PointTransform {
    fn apply(&self, landmark: &Landmark) -> Option<Landmark> {
        if landmark
            .visibility
            .is_some_and(|v| v < self.min_visibility)
        {
            return None;
        }
        let x = landmark.x * self.scale_x;
        let y = landmark.y * self.scale_y;
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some(Landmark {
            x: if self.flip { 1.0 - x } else { x },
            y,
            z: None,
            visibility: landmark.visibility,
        })
    }
}

impl CoordinateNormalizer {
    pub fn new(default_space: CoordinateSpace, min_visibility: f64) -> Self {
        Self {
            default_space,
            min_visibility,
        }
    }

    pub fn from_config(config: &RecognizerConfig) -> Self {
        Self::new(config.source_space, config.min_visibility)
    }

    /// Bring a frame into the user-facing frame.
    pub fn normalize(&self, frame: &LandmarkFrame) -> NormalizedFrame {
        let space = frame.space.unwrap_or(self.default_space);

        let (scale_x, scale_y) = match frame.units {
            CoordinateUnits::Normalized => (1.0, 1.0),
            CoordinateUnits::Pixels { width, height } if width > 0 && height > 0 => {
                (1.0 / width as f64, 1.0 / height as f64)
            }
            CoordinateUnits::Pixels { width, height } => {
                tracing::warn!(width, height, "Frame has an empty image size, dropping landmarks");
                (f64::NAN, f64::NAN)
            }
        };
        let transform = PointTransform {
            scale_x,
            scale_y,
            flip: space.flips_horizontal(),
            min_visibility: self.min_visibility,
        };
        let swap = space.swaps_sides();

        let pose = frame
            .pose
            .as_ref()
            .map(|pose| {
                pose.filter_map(|key, landmark| {
                    let key = if swap { key.mirrored() } else { key };
                    transform.apply(landmark).map(|l| (key, l))
                })
            })
            .filter(|pose| !pose.is_empty());

        let transform_hand = |hand: &HandLandmarks| -> Option<HandLandmarks> {
            let hand = hand.filter_map(|key, landmark| transform.apply(landmark).map(|l| (key, l)));
            (!hand.is_empty()).then_some(hand)
        };

        let mut left_hand = frame.left_hand.as_ref().and_then(transform_hand);
        let mut right_hand = frame.right_hand.as_ref().and_then(transform_hand);
        if swap {
            std::mem::swap(&mut left_hand, &mut right_hand);
        }

        for hand in frame.hands.iter().filter_map(transform_hand) {
            let Some(side) = assign_side(pose.as_ref(), &hand) else {
                tracing::trace!("Discarding unassigned hand: no shoulder or wrist reference");
                continue;
            };
            let slot = match side {
                Handedness::Left => &mut left_hand,
                Handedness::Right => &mut right_hand,
            };
            if slot.is_some() {
                tracing::trace!(?side, "Discarding unassigned hand: side already filled");
                continue;
            }
            *slot = Some(hand);
        }

        NormalizedFrame(LandmarkFrame {
            timestamp_ms: frame.timestamp_ms,
            space: Some(CoordinateSpace::UserFacing),
            units: CoordinateUnits::Normalized,
            pose,
            left_hand,
            right_hand,
            hands: Vec::new(),
        })
    }
}

/// Side of a user-facing hand, judged by its wrist against the shoulder midpoint.
///
/// In the user-facing frame the user's right side lies toward `+x`.
fn assign_side(pose: Option<&PoseLandmarks>, hand: &HandLandmarks) -> Option<Handedness> {
    let shoulders = pose?.average(&[PoseKeypoint::LeftShoulder, PoseKeypoint::RightShoulder])?;
    let wrist = hand.point(HandKeypoint::Wrist)?;
    if wrist.x > shoulders.x {
        Some(Handedness::Right)
    } else {
        Some(Handedness::Left)
    }
}

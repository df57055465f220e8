//! Landmark frames: one detector snapshot per camera frame.
//!
//! Absent detections are `None`, never zeroed coordinates: a pose that was
//! not detected is `pose: None`, a keypoint that was not detected is simply
//! missing from its [`LandmarkSet`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::keypoint::{HandKeypoint, Handedness, PoseKeypoint};

/// A 2D point in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Point translated by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Point2D {
        Point2D::new(self.x + dx, self.y + dy)
    }

    /// Centroid of a set of points. `None` for an empty slice.
    pub fn centroid(points: &[Point2D]) -> Option<Point2D> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point2D::new(sx / n, sy / n))
    }
}

/// A single detected landmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,

    /// Depth relative to the detector's reference, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,

    /// Detector confidence that the landmark is visible, in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility: None,
        }
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    pub fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Projection onto the image plane.
    pub fn xy(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Mapping from keypoint name to landmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "K: Ord + Serialize",
    deserialize = "K: Ord + Deserialize<'de>"
))]
pub struct LandmarkSet<K: Ord> {
    points: BTreeMap<K, Landmark>,
}

impl<K: Ord + Copy> LandmarkSet<K> {
    pub fn new() -> Self {
        Self {
            points: BTreeMap::new(),
        }
    }

    /// Builder-style insert of a 2D landmark.
    pub fn with(mut self, key: K, x: f64, y: f64) -> Self {
        self.points.insert(key, Landmark::new(x, y));
        self
    }

    /// Builder-style insert of a full landmark.
    pub fn with_landmark(mut self, key: K, landmark: Landmark) -> Self {
        self.points.insert(key, landmark);
        self
    }

    pub fn insert(&mut self, key: K, landmark: Landmark) {
        self.points.insert(key, landmark);
    }

    pub fn get(&self, key: K) -> Option<&Landmark> {
        self.points.get(&key)
    }

    /// 2D position of a keypoint, if present.
    pub fn point(&self, key: K) -> Option<Point2D> {
        self.get(key).map(Landmark::xy)
    }

    /// Average 2D position of several keypoints. `None` if any is absent.
    pub fn average(&self, keys: &[K]) -> Option<Point2D> {
        let points = keys
            .iter()
            .map(|k| self.point(*k))
            .collect::<Option<Vec<_>>>()?;
        Point2D::centroid(&points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &Landmark)> {
        self.points.iter().map(|(k, l)| (*k, l))
    }

    /// Rebuild the set, transforming or dropping each entry.
    pub fn filter_map(&self, mut f: impl FnMut(K, &Landmark) -> Option<(K, Landmark)>) -> Self {
        Self {
            points: self.points.iter().filter_map(|(k, l)| f(*k, l)).collect(),
        }
    }
}

impl<K: Ord + Copy> Default for LandmarkSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy> FromIterator<(K, Landmark)> for LandmarkSet<K> {
    fn from_iter<I: IntoIterator<Item = (K, Landmark)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Body pose landmarks.
pub type PoseLandmarks = LandmarkSet<PoseKeypoint>;

/// Landmarks of one hand.
pub type HandLandmarks = LandmarkSet<HandKeypoint>;

/// How a frame's coordinates relate to the user-facing frame.
///
/// The user-facing frame is the mirror view: keypoint sides name the user's
/// own sides and the user's right side lies toward `+x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSpace {
    /// Already canonical.
    #[default]
    UserFacing,
    /// Unflipped camera view: the horizontal axis is reversed.
    Camera,
    /// Mirror-view positions but left/right labels are swapped.
    MirroredLabels,
    /// Unflipped camera view with swapped left/right labels.
    CameraMirroredLabels,
}

impl CoordinateSpace {
    /// Whether the horizontal axis must be flipped to reach the user-facing frame.
    pub fn flips_horizontal(self) -> bool {
        matches!(
            self,
            CoordinateSpace::Camera | CoordinateSpace::CameraMirroredLabels
        )
    }

    /// Whether left/right labels must be swapped to reach the user-facing frame.
    pub fn swaps_sides(self) -> bool {
        matches!(
            self,
            CoordinateSpace::MirroredLabels | CoordinateSpace::CameraMirroredLabels
        )
    }
}

/// Units of the x/y values in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoordinateUnits {
    /// Normalized to `[0, 1]` of the image width and height.
    #[default]
    Normalized,
    /// Pixel coordinates in an image of the given size.
    Pixels { width: u32, height: u32 },
}

impl CoordinateUnits {
    pub fn is_normalized(&self) -> bool {
        matches!(self, CoordinateUnits::Normalized)
    }
}

/// An immutable landmark snapshot for one camera frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LandmarkFrame {
    /// Milliseconds since session start, when the source provides it.
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,

    /// Coordinate space of this frame. Untagged frames use the source default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<CoordinateSpace>,

    /// Units of the x/y values.
    #[serde(default, skip_serializing_if = "CoordinateUnits::is_normalized")]
    pub units: CoordinateUnits,

    /// Body pose landmarks, if a subject was detected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose: Option<PoseLandmarks>,

    /// The subject's left hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_hand: Option<HandLandmarks>,

    /// The subject's right hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_hand: Option<HandLandmarks>,

    /// Hands reported without handedness, to be assigned during normalization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hands: Vec<HandLandmarks>,
}

impl LandmarkFrame {
    /// A frame with no detections at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = Some(timestamp_ms);
        self
    }

    pub fn with_space(mut self, space: CoordinateSpace) -> Self {
        self.space = Some(space);
        self
    }

    pub fn with_units(mut self, units: CoordinateUnits) -> Self {
        self.units = units;
        self
    }

    pub fn with_pose(mut self, pose: PoseLandmarks) -> Self {
        self.pose = Some(pose);
        self
    }

    pub fn with_hand(mut self, side: Handedness, hand: HandLandmarks) -> Self {
        match side {
            Handedness::Left => self.left_hand = Some(hand),
            Handedness::Right => self.right_hand = Some(hand),
        }
        self
    }

    pub fn with_unassigned_hand(mut self, hand: HandLandmarks) -> Self {
        self.hands.push(hand);
        self
    }

    /// The hand stored in the given slot.
    pub fn hand(&self, side: Handedness) -> Option<&HandLandmarks> {
        match side {
            Handedness::Left => self.left_hand.as_ref(),
            Handedness::Right => self.right_hand.as_ref(),
        }
    }

    /// Whether anything at all was detected in this frame.
    pub fn has_detection(&self) -> bool {
        self.pose.is_some()
            || self.left_hand.is_some()
            || self.right_hand.is_some()
            || !self.hands.is_empty()
    }
}

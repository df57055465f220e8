//! Proximity classification: which region is the right index fingertip on?
//!
//! Each contact region is anchored to one or more landmarks; multi-point
//! anchors use the average position. Distances are 2D: the detector's depth
//! estimate is too noisy for near-face regions such as the temple.
//!
//! The classifier is stateless. Temporal behaviour belongs to the sequencer.

use gesture_gallery_landmark_model::{
    ContactRegion, HandKeypoint, Handedness, Point2D, PoseKeypoint,
};
use serde::Serialize;

use crate::config::RegionTuning;
use crate::normalizer::NormalizedFrame;

/// Distance from the fingertip to one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contact {
    pub region: ContactRegion,
    pub distance: f64,
}

/// Maps normalized frames to the touched contact region.
#[derive(Debug, Clone)]
pub struct ProximityClassifier {
    tuning: RegionTuning,
}

impl ProximityClassifier {
    pub fn new(tuning: RegionTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &RegionTuning {
        &self.tuning
    }

    /// The pointing fingertip: index tip of the user's right hand.
    pub fn fingertip(frame: &NormalizedFrame) -> Option<Point2D> {
        frame
            .hand(Handedness::Right)?
            .point(HandKeypoint::IndexFingerTip)
    }

    /// Reference point of a region, or `None` if it cannot be touched in
    /// this frame.
    pub fn anchor(&self, frame: &NormalizedFrame, region: ContactRegion) -> Option<Point2D> {
        if region.is_left_hand() {
            return self.left_hand_anchor(frame, region);
        }

        let pose = frame.pose()?;
        match region {
            ContactRegion::RightKnee => pose.point(PoseKeypoint::RightKnee),
            ContactRegion::LeftKnee => pose.point(PoseKeypoint::LeftKnee),
            ContactRegion::Chest => pose
                .average(&[PoseKeypoint::LeftShoulder, PoseKeypoint::RightShoulder])
                .map(|p| p.offset(0.0, self.tuning.chest_offset)),
            ContactRegion::Belly => pose
                .average(&[PoseKeypoint::LeftHip, PoseKeypoint::RightHip])
                .map(|p| p.offset(0.0, -self.tuning.belly_offset)),
            ContactRegion::RightTemple => {
                pose.average(&[PoseKeypoint::RightEyeOuter, PoseKeypoint::RightEar])
            }
            ContactRegion::LeftElbowCrease => pose.point(PoseKeypoint::LeftElbow),
            ContactRegion::LeftPalmCenter
            | ContactRegion::LeftWrist
            | ContactRegion::LeftIndexTip
            | ContactRegion::LeftPinkyTip => None,
        }
    }

    fn left_hand_anchor(&self, frame: &NormalizedFrame, region: ContactRegion) -> Option<Point2D> {
        let hand = frame.hand(Handedness::Left)?;

        // The hand must be backed by the pose's left wrist.
        let pose_wrist = frame.pose()?.point(PoseKeypoint::LeftWrist)?;
        if let Some(tolerance) = self.tuning.hand_wrist_tolerance {
            let hand_wrist = hand.point(HandKeypoint::Wrist)?;
            if hand_wrist.distance(&pose_wrist) > tolerance {
                return None;
            }
        }

        match region {
            ContactRegion::LeftPalmCenter => {
                hand.average(&[HandKeypoint::Wrist, HandKeypoint::MiddleFingerMcp])
            }
            ContactRegion::LeftWrist => hand.point(HandKeypoint::Wrist),
            ContactRegion::LeftIndexTip => hand.point(HandKeypoint::IndexFingerTip),
            ContactRegion::LeftPinkyTip => hand.point(HandKeypoint::PinkyTip),
            _ => None,
        }
    }

    /// Fingertip distance to every region that can be touched in this frame,
    /// in region priority order.
    pub fn measure(&self, frame: &NormalizedFrame) -> Vec<Contact> {
        let Some(tip) = Self::fingertip(frame) else {
            return Vec::new();
        };
        ContactRegion::ALL
            .iter()
            .filter_map(|&region| {
                self.anchor(frame, region).map(|anchor| Contact {
                    region,
                    distance: tip.distance(&anchor),
                })
            })
            .collect()
    }

    /// The touched region: nearest region under its threshold, ties broken
    /// by region priority.
    pub fn classify(&self, frame: &NormalizedFrame) -> Option<Contact> {
        self.measure(frame)
            .into_iter()
            .filter(|c| c.distance < self.tuning.threshold(c.region))
            .min_by(|a, b| {
                a.distance
                    .total_cmp(&b.distance)
                    .then(a.region.cmp(&b.region))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::CoordinateNormalizer;
    use gesture_gallery_landmark_model::{
        CoordinateSpace, HandLandmarks, LandmarkFrame, PoseLandmarks,
    };

    fn body() -> PoseLandmarks {
        PoseLandmarks::new()
            .with(PoseKeypoint::RightEyeOuter, 0.56, 0.18)
            .with(PoseKeypoint::RightEar, 0.60, 0.20)
            .with(PoseKeypoint::LeftShoulder, 0.40, 0.30)
            .with(PoseKeypoint::RightShoulder, 0.60, 0.30)
            .with(PoseKeypoint::LeftElbow, 0.30, 0.45)
            .with(PoseKeypoint::LeftWrist, 0.35, 0.55)
            .with(PoseKeypoint::LeftHip, 0.45, 0.60)
            .with(PoseKeypoint::RightHip, 0.55, 0.60)
            .with(PoseKeypoint::LeftKnee, 0.45, 0.85)
            .with(PoseKeypoint::RightKnee, 0.55, 0.85)
    }

    fn left_hand() -> HandLandmarks {
        HandLandmarks::new()
            .with(HandKeypoint::Wrist, 0.35, 0.55)
            .with(HandKeypoint::MiddleFingerMcp, 0.35, 0.47)
            .with(HandKeypoint::IndexFingerTip, 0.38, 0.38)
            .with(HandKeypoint::PinkyTip, 0.30, 0.42)
    }

    fn pointing_at(x: f64, y: f64, pose: Option<PoseLandmarks>) -> NormalizedFrame {
        let mut frame = LandmarkFrame::empty().with_hand(
            Handedness::Right,
            HandLandmarks::new().with(HandKeypoint::IndexFingerTip, x, y),
        );
        frame.pose = pose;
        CoordinateNormalizer::new(CoordinateSpace::UserFacing, 0.5).normalize(&frame)
    }

    fn with_left_hand(frame: NormalizedFrame, hand: HandLandmarks) -> NormalizedFrame {
        let frame = frame.into_inner().with_hand(Handedness::Left, hand);
        CoordinateNormalizer::new(CoordinateSpace::UserFacing, 0.5).normalize(&frame)
    }

    fn classifier() -> ProximityClassifier {
        ProximityClassifier::new(RegionTuning::default())
    }

    #[test]
    fn test_knee_touch() {
        let frame = pointing_at(0.56, 0.84, Some(body()));
        let contact = classifier().classify(&frame).unwrap();
        assert_eq!(contact.region, ContactRegion::RightKnee);
        assert!(contact.distance < 0.02);
    }

    #[test]
    fn test_chest_and_belly_use_offset_midpoints() {
        let chest = classifier()
            .classify(&pointing_at(0.50, 0.40, Some(body())))
            .unwrap();
        assert_eq!(chest.region, ContactRegion::Chest);
        assert!(chest.distance < 1e-9);

        let belly = classifier()
            .classify(&pointing_at(0.50, 0.50, Some(body())))
            .unwrap();
        assert_eq!(belly.region, ContactRegion::Belly);
    }

    #[test]
    fn test_temple_averages_eye_corner_and_ear() {
        let frame = pointing_at(0.58, 0.19, Some(body()));
        let contact = classifier().classify(&frame).unwrap();
        assert_eq!(contact.region, ContactRegion::RightTemple);
        assert!(contact.distance < 1e-9);
    }

    #[test]
    fn test_far_from_everything_is_no_contact() {
        let frame = pointing_at(0.95, 0.05, Some(body()));
        assert!(classifier().classify(&frame).is_none());
    }

    #[test]
    fn test_missing_fingertip_touches_nothing() {
        let frame = CoordinateNormalizer::new(CoordinateSpace::UserFacing, 0.5)
            .normalize(&LandmarkFrame::empty().with_pose(body()));
        assert!(classifier().measure(&frame).is_empty());
        assert!(classifier().classify(&frame).is_none());
    }

    #[test]
    fn test_missing_region_landmark_is_untouchable() {
        let pose = PoseLandmarks::new().with(PoseKeypoint::LeftKnee, 0.45, 0.85);
        let frame = pointing_at(0.60, 0.85, Some(pose));
        assert!(classifier().classify(&frame).is_none());
    }

    #[test]
    fn test_nearest_region_wins() {
        let frame = with_left_hand(pointing_at(0.35, 0.52, Some(body())), left_hand());
        // Palm center is (0.35, 0.51), wrist (0.35, 0.55): both qualify.
        let contact = classifier().classify(&frame).unwrap();
        assert_eq!(contact.region, ContactRegion::LeftPalmCenter);
    }

    #[test]
    fn test_equal_distance_falls_back_to_priority() {
        let tuning = RegionTuning {
            default_threshold: 0.3,
            thresholds: Default::default(),
            ..RegionTuning::default()
        };
        let knees = PoseLandmarks::new()
            .with(PoseKeypoint::LeftKnee, 0.25, 0.85)
            .with(PoseKeypoint::RightKnee, 0.75, 0.85);
        // Exactly equidistant between the two knees.
        let frame = pointing_at(0.50, 0.85, Some(knees));
        let contact = ProximityClassifier::new(tuning).classify(&frame).unwrap();
        assert_eq!(contact.region, ContactRegion::RightKnee);
    }

    #[test]
    fn test_left_hand_needs_pose_wrist() {
        let mut pose = body();
        pose = pose.filter_map(|k, l| (k != PoseKeypoint::LeftWrist).then_some((k, *l)));
        let frame = with_left_hand(pointing_at(0.35, 0.51, Some(pose)), left_hand());
        let contact = classifier().classify(&frame);
        assert!(contact.map_or(true, |c| !c.region.is_left_hand()));
    }

    #[test]
    fn test_left_hand_far_from_pose_wrist_is_inconsistent() {
        let stray = HandLandmarks::new()
            .with(HandKeypoint::Wrist, 0.80, 0.55)
            .with(HandKeypoint::MiddleFingerMcp, 0.80, 0.47);
        let frame = with_left_hand(pointing_at(0.80, 0.51, Some(body())), stray);
        assert!(classifier().classify(&frame).is_none());

        let lenient = RegionTuning {
            hand_wrist_tolerance: None,
            ..RegionTuning::default()
        };
        let contact = ProximityClassifier::new(lenient).classify(&frame).unwrap();
        assert_eq!(contact.region, ContactRegion::LeftPalmCenter);
    }
}

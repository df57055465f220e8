//! Contact debouncing.
//!
//! The detector jitters: a fingertip resting on the knee can drop out for a
//! frame, or brush past a neighbouring region. A raw contact (including "no
//! contact") only becomes the stable contact once it has been observed on
//! `required_frames` consecutive frames.

use gesture_gallery_landmark_model::ContactRegion;
use serde::Serialize;

use crate::timing::FrameTime;

/// A change of the stable contact region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: Option<ContactRegion>,
    pub to: Option<ContactRegion>,
}

impl Transition {
    /// The region that was just touched, if this is a rising edge.
    pub fn rising_edge(&self) -> Option<ContactRegion> {
        self.to
    }
}

/// Hysteresis filter over the raw per-frame contact.
#[derive(Debug, Clone)]
pub struct StabilityFilter {
    required_frames: u32,
    candidate: Option<ContactRegion>,
    streak: u32,
    stable: Option<ContactRegion>,
    stable_since: Option<FrameTime>,
}

impl StabilityFilter {
    /// `required_frames` of 0 behaves like 1 (immediate).
    pub fn new(required_frames: u32) -> Self {
        Self {
            required_frames: required_frames.max(1),
            candidate: None,
            streak: 0,
            stable: None,
            stable_since: None,
        }
    }

    /// Feed one frame's raw contact. Returns the transition when the stable
    /// contact changes.
    pub fn observe(&mut self, raw: Option<ContactRegion>, now: FrameTime) -> Option<Transition> {
        if raw == self.candidate {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.candidate = raw;
            self.streak = 1;
        }

        if self.streak < self.required_frames || self.candidate == self.stable {
            return None;
        }

        let transition = Transition {
            from: self.stable,
            to: self.candidate,
        };
        self.stable = self.candidate;
        self.stable_since = Some(now);
        Some(transition)
    }

    /// The current stable contact.
    pub fn stable(&self) -> Option<ContactRegion> {
        self.stable
    }

    /// When the current stable contact was established.
    pub fn stable_since(&self) -> Option<FrameTime> {
        self.stable_since
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.required_frames);
    }
}

//! Gesture sequencing: stable contact transitions in, commands out.
//!
//! The sequencer only reacts to rising edges (the stable contact becoming a
//! region), so holding a pose never fires twice. Its only memory is the
//! pending first touch of a two-touch gesture.
//!
//! When several gestures share a first region (the left palm starts Menu,
//! Home, and Undo) the pending state keeps every candidate until the second
//! touch picks one or every candidate's window has expired. A touch that
//! matches no candidate cancels the sequence and is consumed, unless it is
//! the sequence's own first region, which starts the sequence over.

use gesture_gallery_landmark_model::{Command, ContactRegion};
use serde::Serialize;

use crate::catalog::{GestureCatalog, GestureDefinition};
use crate::stability::Transition;
use crate::timing::FrameTime;

/// A first touch waiting for its second.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSequence {
    first: ContactRegion,
    since: FrameTime,
    candidates: Vec<usize>,
}

impl PendingSequence {
    pub fn first(&self) -> ContactRegion {
        self.first
    }

    pub fn since(&self) -> FrameTime {
        self.since
    }
}

/// Read-only view of the sequencer state, for debug output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SequencerPhase {
    Idle,
    Armed {
        first: ContactRegion,
        since: FrameTime,
        candidates: Vec<Command>,
    },
}

/// Drives gesture definitions from stable contact transitions.
#[derive(Debug, Clone)]
pub struct GestureSequencer {
    catalog: GestureCatalog,
}

impl GestureSequencer {
    pub fn new(catalog: GestureCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &GestureCatalog {
        &self.catalog
    }

    /// Advance one frame.
    ///
    /// Expires stale candidates first, then handles the frame's transition.
    /// Accepts every transition in every state; only rising edges can fire.
    pub fn step(
        &self,
        pending: &mut Option<PendingSequence>,
        transition: Option<Transition>,
        now: FrameTime,
    ) -> Option<Command> {
        self.expire(pending, now);

        let region = transition.and_then(|t| t.rising_edge())?;
        match pending.take() {
            Some(sequence) => self.complete(pending, sequence, region, now),
            None => self.start(pending, region, now),
        }
    }

    /// Drop candidates whose window has closed.
    pub fn expire(&self, pending: &mut Option<PendingSequence>, now: FrameTime) {
        let Some(sequence) = pending.as_mut() else {
            return;
        };
        let catalog = &self.catalog;
        sequence.candidates.retain(|&i| {
            catalog
                .get(i)
                .and_then(GestureDefinition::window)
                .is_some_and(|w| w.contains(sequence.since, now))
        });
        if sequence.candidates.is_empty() {
            tracing::debug!(
                first = %sequence.first,
                frame = now.index,
                "Gesture sequence timed out"
            );
            *pending = None;
        }
    }

    fn start(
        &self,
        pending: &mut Option<PendingSequence>,
        region: ContactRegion,
        now: FrameTime,
    ) -> Option<Command> {
        let candidates = self.catalog.sequences_starting_with(region);
        if !candidates.is_empty() {
            tracing::debug!(first = %region, frame = now.index, "Gesture sequence armed");
            *pending = Some(PendingSequence {
                first: region,
                since: now,
                candidates,
            });
            return None;
        }

        self.catalog
            .single_touch(region)
            .map(GestureDefinition::command)
    }

    fn complete(
        &self,
        pending: &mut Option<PendingSequence>,
        sequence: PendingSequence,
        region: ContactRegion,
        now: FrameTime,
    ) -> Option<Command> {
        let matched = sequence
            .candidates
            .iter()
            .filter_map(|&i| self.catalog.get(i))
            .find(|d| d.second_region() == Some(region))
            .map(GestureDefinition::command);
        if matched.is_some() {
            return matched;
        }

        if region == sequence.first {
            tracing::debug!(first = %region, frame = now.index, "Gesture sequence restarted");
            return self.start(pending, region, now);
        }

        tracing::debug!(
            first = %sequence.first,
            interrupted_by = %region,
            frame = now.index,
            "Gesture sequence cancelled"
        );
        None
    }

    /// Snapshot of the pending state.
    pub fn phase(&self, pending: Option<&PendingSequence>) -> SequencerPhase {
        match pending {
            None => SequencerPhase::Idle,
            Some(sequence) => SequencerPhase::Armed {
                first: sequence.first,
                since: sequence.since,
                candidates: sequence
                    .candidates
                    .iter()
                    .filter_map(|&i| self.catalog.get(i).map(GestureDefinition::command))
                    .collect(),
            },
        }
    }
}

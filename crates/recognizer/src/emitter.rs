//! Command emission.
//!
//! The emitter is the recognizer's output surface. UIs poll it for the
//! current command and feedback text; push consumers implement
//! [`CommandSink`].

use std::collections::VecDeque;

use gesture_gallery_landmark_model::Command;
use serde::Serialize;

/// Feedback shown before the first command of a session.
pub const READY_FEEDBACK: &str = "Ready";

/// Number of recent events kept for pull queries.
pub const HISTORY_LIMIT: usize = 64;

/// A fired command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GestureEvent {
    pub command: Command,
    /// Index of the frame that completed the gesture.
    pub frame: u64,
    /// Session time of that frame.
    pub elapsed_ms: u64,
}

/// Receives fired commands as they happen.
pub trait CommandSink {
    fn on_command(&mut self, event: &GestureEvent);
}

impl CommandSink for Vec<GestureEvent> {
    fn on_command(&mut self, event: &GestureEvent) {
        self.push(*event);
    }
}

impl<S: CommandSink + ?Sized> CommandSink for &mut S {
    fn on_command(&mut self, event: &GestureEvent) {
        (**self).on_command(event);
    }
}

/// Records fired commands for pull queries.
///
/// Only the most recent [`HISTORY_LIMIT`] events are kept; the count covers
/// the whole session.
#[derive(Debug, Clone, Default)]
pub struct EventEmitter {
    history: VecDeque<GestureEvent>,
    emitted: usize,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: GestureEvent) {
        tracing::info!(
            command = %event.command,
            frame = event.frame,
            elapsed_ms = event.elapsed_ms,
            "Gesture recognized"
        );
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(event);
        self.emitted += 1;
    }

    /// The most recent event. Idle frames never clear it.
    pub fn current(&self) -> Option<&GestureEvent> {
        self.history.back()
    }

    pub fn current_command(&self) -> Option<Command> {
        self.current().map(|e| e.command)
    }

    /// Text for the on-screen feedback label.
    pub fn feedback(&self) -> &'static str {
        self.current_command()
            .map_or(READY_FEEDBACK, |command| command.label())
    }

    pub fn emitted_count(&self) -> usize {
        self.emitted
    }

    /// Recent events, oldest first.
    pub fn history(&self) -> &VecDeque<GestureEvent> {
        &self.history
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.emitted = 0;
    }
}

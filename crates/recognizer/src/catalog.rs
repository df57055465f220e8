//! The gesture catalog: a closed set of gesture shapes bound to commands.
//!
//! | Command  | Gesture                                         |
//! |----------|-------------------------------------------------|
//! | Next     | touch right knee                                |
//! | Previous | touch left knee                                 |
//! | Increase | touch tip of left index finger                  |
//! | Decrease | touch tip of left pinky finger                  |
//! | OK       | touch chest                                     |
//! | Cancel   | touch belly                                     |
//! | Menu     | touch center of left palm twice                 |
//! | Home     | touch center of left palm, then left wrist      |
//! | Undo     | touch center of left palm, then left elbow crease |
//! | Help     | touch right temple twice                        |

use std::collections::{BTreeMap, BTreeSet};

use gesture_gallery_common::error::{GestureError, GestureResult};
use gesture_gallery_landmark_model::{Command, ContactRegion};
use serde::{Deserialize, Serialize};

use crate::timing::TimeWindow;

/// One gesture shape and the command it triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureDefinition {
    /// Fires on the rising edge of a touch.
    SingleTouch {
        region: ContactRegion,
        command: Command,
    },
    /// Fires when the same region is touched twice within the window.
    DoubleTouch {
        region: ContactRegion,
        command: Command,
        window: TimeWindow,
    },
    /// Fires when `first` and then `second` are touched within the window.
    TwoStep {
        first: ContactRegion,
        second: ContactRegion,
        command: Command,
        window: TimeWindow,
    },
}

impl GestureDefinition {
    pub fn command(&self) -> Command {
        match self {
            GestureDefinition::SingleTouch { command, .. }
            | GestureDefinition::DoubleTouch { command, .. }
            | GestureDefinition::TwoStep { command, .. } => *command,
        }
    }

    pub fn first_region(&self) -> ContactRegion {
        match self {
            GestureDefinition::SingleTouch { region, .. }
            | GestureDefinition::DoubleTouch { region, .. } => *region,
            GestureDefinition::TwoStep { first, .. } => *first,
        }
    }

    /// The region that completes a two-touch gesture.
    pub fn second_region(&self) -> Option<ContactRegion> {
        match self {
            GestureDefinition::SingleTouch { .. } => None,
            GestureDefinition::DoubleTouch { region, .. } => Some(*region),
            GestureDefinition::TwoStep { second, .. } => Some(*second),
        }
    }

    /// Window for the second touch; `None` for single-touch gestures.
    pub fn window(&self) -> Option<TimeWindow> {
        match self {
            GestureDefinition::SingleTouch { .. } => None,
            GestureDefinition::DoubleTouch { window, .. }
            | GestureDefinition::TwoStep { window, .. } => Some(*window),
        }
    }

    /// The region sequence that completes this gesture.
    pub fn pattern(&self) -> Vec<ContactRegion> {
        let mut pattern = vec![self.first_region()];
        pattern.extend(self.second_region());
        pattern
    }

    /// User-facing instruction for performing the gesture.
    pub fn describe(&self) -> String {
        match self {
            GestureDefinition::SingleTouch { region, .. } => {
                format!("Touch {region} with right index finger")
            }
            GestureDefinition::DoubleTouch { region, .. } => {
                format!("Touch {region} twice with right index finger")
            }
            GestureDefinition::TwoStep { first, second, .. } => {
                format!("Touch {first}, then {second} with right index finger")
            }
        }
    }
}

/// A validated set of gesture definitions.
#[derive(Debug, Clone)]
pub struct GestureCatalog {
    definitions: Vec<GestureDefinition>,
}

impl GestureCatalog {
    /// Validate and build a catalog.
    ///
    /// Rejects empty catalogs, zero windows, two-step gestures whose regions
    /// are equal, repeated region sequences, and commands bound twice.
    pub fn new(definitions: Vec<GestureDefinition>) -> GestureResult<Self> {
        if definitions.is_empty() {
            return Err(GestureError::catalog("catalog has no gestures"));
        }

        let mut patterns: BTreeMap<Vec<ContactRegion>, Command> = BTreeMap::new();
        let mut commands = BTreeSet::new();
        for def in &definitions {
            if def.window().is_some_and(|w| w.is_zero()) {
                return Err(GestureError::catalog(format!(
                    "{} has a zero window",
                    def.command()
                )));
            }
            if let GestureDefinition::TwoStep { first, second, .. } = def {
                if first == second {
                    return Err(GestureError::catalog(format!(
                        "{} is a two-step gesture on a single region ({first}); use double_touch",
                        def.command()
                    )));
                }
            }
            if let Some(existing) = patterns.insert(def.pattern(), def.command()) {
                return Err(GestureError::catalog(format!(
                    "{} and {} share the same touch sequence",
                    existing,
                    def.command()
                )));
            }
            if !commands.insert(def.command()) {
                return Err(GestureError::catalog(format!(
                    "{} is bound to more than one gesture",
                    def.command()
                )));
            }
        }

        Ok(Self { definitions })
    }

    /// The standard ten-command catalog.
    pub fn standard(double_touch_window: TimeWindow, two_step_window: TimeWindow) -> Self {
        use ContactRegion::*;
        use GestureDefinition::*;

        let single = |region, command| SingleTouch { region, command };
        let definitions = vec![
            single(RightKnee, Command::Next),
            single(LeftKnee, Command::Previous),
            single(LeftIndexTip, Command::Increase),
            single(LeftPinkyTip, Command::Decrease),
            single(Chest, Command::Ok),
            single(Belly, Command::Cancel),
            DoubleTouch {
                region: LeftPalmCenter,
                command: Command::Menu,
                window: double_touch_window,
            },
            TwoStep {
                first: LeftPalmCenter,
                second: LeftWrist,
                command: Command::Home,
                window: two_step_window,
            },
            TwoStep {
                first: LeftPalmCenter,
                second: LeftElbowCrease,
                command: Command::Undo,
                window: two_step_window,
            },
            DoubleTouch {
                region: RightTemple,
                command: Command::Help,
                window: double_touch_window,
            },
        ];
        Self { definitions }
    }

    pub fn get(&self, index: usize) -> Option<&GestureDefinition> {
        self.definitions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GestureDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// The single-touch gesture on a region, if any.
    pub fn single_touch(&self, region: ContactRegion) -> Option<&GestureDefinition> {
        self.definitions.iter().find(|d| {
            matches!(d, GestureDefinition::SingleTouch { region: r, .. } if *r == region)
        })
    }

    /// Indices of the two-touch gestures that start on a region.
    pub fn sequences_starting_with(&self, region: ContactRegion) -> Vec<usize> {
        self.definitions
            .iter()
            .enumerate()
            .filter(|(_, d)| d.second_region().is_some() && d.first_region() == region)
            .map(|(i, _)| i)
            .collect()
    }

    /// Single-touch gestures whose region also starts a longer gesture.
    ///
    /// Such gestures never fire: a touch on a sequence prefix waits for the
    /// second touch instead of firing the single-touch interpretation.
    pub fn shadowed_single_touches(&self) -> Vec<&GestureDefinition> {
        self.definitions
            .iter()
            .filter(|d| {
                matches!(d, GestureDefinition::SingleTouch { .. })
                    && !self.sequences_starting_with(d.first_region()).is_empty()
            })
            .collect()
    }
}

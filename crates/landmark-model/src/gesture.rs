//! Contact regions and application commands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A body or hand region the right index fingertip can touch.
///
/// Declaration order is the tie-break priority: when two regions are at the
/// same distance, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactRegion {
    RightKnee,
    LeftKnee,
    Chest,
    Belly,
    RightTemple,
    LeftPalmCenter,
    LeftWrist,
    LeftIndexTip,
    LeftPinkyTip,
    LeftElbowCrease,
}

impl ContactRegion {
    /// Every region, in priority order.
    pub const ALL: [ContactRegion; 10] = [
        ContactRegion::RightKnee,
        ContactRegion::LeftKnee,
        ContactRegion::Chest,
        ContactRegion::Belly,
        ContactRegion::RightTemple,
        ContactRegion::LeftPalmCenter,
        ContactRegion::LeftWrist,
        ContactRegion::LeftIndexTip,
        ContactRegion::LeftPinkyTip,
        ContactRegion::LeftElbowCrease,
    ];

    /// Human-readable name used in gesture descriptions.
    pub fn label(self) -> &'static str {
        match self {
            ContactRegion::RightKnee => "right knee",
            ContactRegion::LeftKnee => "left knee",
            ContactRegion::Chest => "chest",
            ContactRegion::Belly => "belly",
            ContactRegion::RightTemple => "right temple",
            ContactRegion::LeftPalmCenter => "center of left palm",
            ContactRegion::LeftWrist => "left wrist",
            ContactRegion::LeftIndexTip => "tip of left index finger",
            ContactRegion::LeftPinkyTip => "tip of left pinky finger",
            ContactRegion::LeftElbowCrease => "left elbow crease",
        }
    }

    /// Whether the region lies on the left hand (needs hand landmarks).
    pub fn is_left_hand(self) -> bool {
        matches!(
            self,
            ContactRegion::LeftPalmCenter
                | ContactRegion::LeftWrist
                | ContactRegion::LeftIndexTip
                | ContactRegion::LeftPinkyTip
        )
    }
}

impl fmt::Display for ContactRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An application action triggered by a completed gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Command {
    Next,
    Previous,
    Increase,
    Decrease,
    #[serde(rename = "OK")]
    Ok,
    Cancel,
    Menu,
    Home,
    Undo,
    Help,
}

impl Command {
    pub const ALL: [Command; 10] = [
        Command::Next,
        Command::Previous,
        Command::Increase,
        Command::Decrease,
        Command::Ok,
        Command::Cancel,
        Command::Menu,
        Command::Home,
        Command::Undo,
        Command::Help,
    ];

    /// Feedback text shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Command::Next => "Next",
            Command::Previous => "Previous",
            Command::Increase => "Increase",
            Command::Decrease => "Decrease",
            Command::Ok => "OK",
            Command::Cancel => "Cancel",
            Command::Menu => "Menu",
            Command::Home => "Home",
            Command::Undo => "Undo",
            Command::Help => "Help",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//! Recognizer tuning parameters.
//!
//! Every threshold, offset, and window the engine uses lives here rather
//! than inline in the algorithms. The defaults are starting points for a
//! subject seated about an arm's length from a 640x480 webcam; calibrate
//! them per setup.

use std::collections::BTreeMap;
use std::path::Path;

use gesture_gallery_common::error::{GestureError, GestureResult};
use gesture_gallery_landmark_model::{ContactRegion, CoordinateSpace};
use serde::{Deserialize, Serialize};

use crate::catalog::GestureDefinition;
use crate::timing::TimeWindow;

/// Configuration for the gesture recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Coordinate space assumed for frames that do not declare one.
    pub source_space: CoordinateSpace,

    /// Landmarks reported with a lower visibility are treated as absent.
    pub min_visibility: f64,

    /// Region geometry and touch thresholds.
    pub regions: RegionTuning,

    /// Consecutive frames a contact change must persist before it counts.
    /// `1` accepts every detection immediately.
    pub debounce_frames: u32,

    /// Window for the second touch of a double-touch gesture.
    pub double_touch_window: TimeWindow,

    /// Window for the second region of a two-step gesture.
    pub two_step_window: TimeWindow,

    /// Elapsed time assumed between frames that carry no timestamp.
    pub nominal_frame_interval_ms: u64,

    /// Replacement gesture catalog. The standard catalog is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gestures: Option<Vec<GestureDefinition>>,
}

/// Touch thresholds and anchor offsets for contact regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionTuning {
    /// Threshold for regions without an explicit entry in `thresholds`.
    pub default_threshold: f64,

    /// Per-region touch thresholds (normalized image units).
    pub thresholds: BTreeMap<ContactRegion, f64>,

    /// How far below the shoulder midpoint the chest anchor sits.
    pub chest_offset: f64,

    /// How far above the hip midpoint the belly anchor sits.
    pub belly_offset: f64,

    /// Maximum distance between the pose's left wrist and the left hand's
    /// wrist for left-hand regions to be touchable. `None` only requires the
    /// pose wrist to be present.
    pub hand_wrist_tolerance: Option<f64>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            source_space: CoordinateSpace::UserFacing,
            min_visibility: 0.5,
            regions: RegionTuning::default(),
            debounce_frames: 2,
            double_touch_window: TimeWindow::Millis(2_000),
            two_step_window: TimeWindow::Millis(2_000),
            nominal_frame_interval_ms: 33,
            gestures: None,
        }
    }
}

impl Default for RegionTuning {
    fn default() -> Self {
        let thresholds = BTreeMap::from([
            (ContactRegion::RightTemple, 0.08),
            (ContactRegion::LeftPalmCenter, 0.06),
            (ContactRegion::LeftWrist, 0.05),
            (ContactRegion::LeftIndexTip, 0.05),
            (ContactRegion::LeftPinkyTip, 0.05),
        ]);
        Self {
            default_threshold: 0.1,
            thresholds,
            chest_offset: 0.1,
            belly_offset: 0.1,
            hand_wrist_tolerance: Some(0.15),
        }
    }
}

impl RegionTuning {
    /// Touch threshold for a region.
    pub fn threshold(&self, region: ContactRegion) -> f64 {
        self.thresholds
            .get(&region)
            .copied()
            .unwrap_or(self.default_threshold)
    }

    fn validate(&self) -> GestureResult<()> {
        ensure_positive("regions.default_threshold", self.default_threshold)?;
        for (region, value) in &self.thresholds {
            ensure_positive(&format!("regions.thresholds[{region:?}]"), *value)?;
        }
        ensure_finite("regions.chest_offset", self.chest_offset)?;
        ensure_finite("regions.belly_offset", self.belly_offset)?;
        if let Some(tolerance) = self.hand_wrist_tolerance {
            ensure_positive("regions.hand_wrist_tolerance", tolerance)?;
        }
        Ok(())
    }
}

impl RecognizerConfig {
    /// Reject out-of-range values. Nothing is clamped.
    ///
    /// The gesture catalog is validated separately when the recognizer is
    /// built, see [`crate::catalog::GestureCatalog::new`].
    pub fn validate(&self) -> GestureResult<()> {
        if !(0.0..=1.0).contains(&self.min_visibility) {
            return Err(GestureError::config(format!(
                "min_visibility must be within [0, 1], got {}",
                self.min_visibility
            )));
        }
        self.regions.validate()?;
        if self.debounce_frames == 0 {
            return Err(GestureError::config("debounce_frames must be at least 1"));
        }
        if self.double_touch_window.is_zero() {
            return Err(GestureError::config("double_touch_window must be non-zero"));
        }
        if self.two_step_window.is_zero() {
            return Err(GestureError::config("two_step_window must be non-zero"));
        }
        if self.nominal_frame_interval_ms == 0 {
            return Err(GestureError::config(
                "nominal_frame_interval_ms must be at least 1",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> GestureResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| GestureError::config(format!("invalid recognizer config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> GestureResult<Self> {
        if !path.exists() {
            return Err(GestureError::file_not_found(path));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json_pretty(&self) -> GestureResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn ensure_finite(name: &str, value: f64) -> GestureResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GestureError::config(format!("{name} must be finite, got {value}")))
    }
}

fn ensure_positive(name: &str, value: f64) -> GestureResult<()> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(GestureError::config(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

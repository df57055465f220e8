pub mod check_config;
pub mod gestures;
pub mod init_config;
pub mod replay;
pub mod stream;

use std::path::Path;

use gesture_gallery_common::clock::SessionClock;
use gesture_gallery_common::config::AppConfig;
use gesture_gallery_common::error::{GestureError, GestureResult};
use gesture_gallery_landmark_model::{parse_session_lossy, LandmarkSession};
use gesture_gallery_recognizer::{CommandSink, FrameReport, GestureEvent, RecognizerConfig};

use crate::gallery::Gallery;

/// Recognizer config from `--config`, then the app config, then defaults.
pub fn load_recognizer_config(
    override_path: Option<&Path>,
    app: &AppConfig,
) -> anyhow::Result<RecognizerConfig> {
    let path = override_path.or(app.recognizer_config.as_deref());
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading recognizer config");
            RecognizerConfig::load(path)
                .map_err(|e| anyhow::anyhow!("Failed to load recognizer config: {e}"))
        }
        None => Ok(RecognizerConfig::default()),
    }
}

/// Read a JSONL landmark session. Malformed frame lines become empty frames.
pub fn load_session(path: &Path) -> GestureResult<LandmarkSession> {
    if !path.exists() {
        return Err(GestureError::file_not_found(path));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(parse_session_lossy(&content))
}

pub fn print_event(event: &GestureEvent) {
    println!(
        "  frame {:>6}  {:>9.3}s  {}",
        event.frame,
        SessionClock::ms_to_secs(event.elapsed_ms),
        event.command
    );
}

/// Print one frame's outcome and drive the gallery with any fired command.
///
/// With `trace`, every report is printed as JSON and the gallery still
/// follows along silently.
pub fn report_frame(
    report: &FrameReport,
    gallery: Option<&mut Gallery>,
    trace: bool,
) -> anyhow::Result<()> {
    if trace {
        println!("{}", serde_json::to_string(report)?);
    } else if let Some(event) = &report.fired {
        print_event(event);
    }
    if let (Some(event), Some(gallery)) = (&report.fired, gallery) {
        gallery.on_command(event);
        if !trace {
            println!("             -> {gallery}");
        }
    }
    Ok(())
}

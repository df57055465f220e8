//! Recognize gestures from landmark frames arriving on stdin.
//!
//! Frames are processed one at a time in arrival order on this task. Frames
//! without a timestamp are stamped with the session clock. Malformed lines
//! are processed as empty frames so pending gestures keep timing out.

use std::path::PathBuf;

use gesture_gallery_common::clock::SessionClock;
use gesture_gallery_common::config::AppConfig;
use gesture_gallery_landmark_model::{parse_frame_line_lossy, CoordinateSpace};
use gesture_gallery_recognizer::GestureRecognizer;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::gallery::Gallery;

pub async fn run(
    config_path: Option<PathBuf>,
    space: Option<CoordinateSpace>,
    images: Option<PathBuf>,
    trace: bool,
    app: &AppConfig,
) -> anyhow::Result<()> {
    let mut config = super::load_recognizer_config(config_path.as_deref(), app)?;
    if let Some(space) = space {
        config.source_space = space;
    }
    let recognizer = GestureRecognizer::new(config)?;
    let mut gallery = images.map(|dir| Gallery::load(&dir)).transpose()?;

    let clock = SessionClock::start();
    let mut state = recognizer.start_session();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0usize;

    tracing::info!(started_at = clock.epoch_wall(), "Streaming landmark frames from stdin");
    eprintln!("Reading landmark frames from stdin. Press Ctrl+C to stop.");

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };
        line_no += 1;

        let Some(mut frame) = parse_frame_line_lossy(&line, line_no) else {
            continue;
        };
        if frame.timestamp_ms.is_none() {
            frame.timestamp_ms = Some(clock.elapsed_ms());
        }

        let report = recognizer.process(&mut state, &frame);
        super::report_frame(&report, gallery.as_mut(), trace)?;
    }

    eprintln!(
        "{} command(s) recognized in {} frame(s). Feedback: {}",
        state.emitter().emitted_count(),
        state.frames_processed(),
        state.emitter().feedback()
    );

    Ok(())
}

//! Run the recognizer over a recorded landmark session.

use std::path::PathBuf;

use gesture_gallery_common::clock::SessionClock;
use gesture_gallery_common::config::AppConfig;
use gesture_gallery_recognizer::{GestureEvent, GestureRecognizer};

use crate::gallery::Gallery;

pub fn run(
    path: PathBuf,
    config_path: Option<PathBuf>,
    images: Option<PathBuf>,
    trace: bool,
    app: &AppConfig,
) -> anyhow::Result<()> {
    let session = super::load_session(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load session: {e}"))?;

    let mut config = super::load_recognizer_config(config_path.as_deref(), app)?;
    if let Some(header) = &session.header {
        if let Some(space) = header.space {
            config.source_space = space;
        }
        if let Some(fps) = header.fps.filter(|fps| *fps > 0) {
            config.nominal_frame_interval_ms = SessionClock::frame_interval_ms(fps);
        }
    }
    let recognizer = GestureRecognizer::new(config)?;

    let mut gallery = images.map(|dir| Gallery::load(&dir)).transpose()?;

    if !trace {
        println!("Replaying session: {}", path.display());
        if let Some(header) = &session.header {
            println!(
                "  Source: {}",
                header.source.as_deref().unwrap_or("unknown")
            );
            if let Some(recorded_at) = header.recorded_at {
                println!("  Recorded: {recorded_at}");
            }
        }
        println!(
            "  Frames: {} ({} with detections)",
            session.frames.len(),
            session.frames.iter().filter(|f| f.has_detection()).count()
        );
        if !session.malformed_lines.is_empty() {
            println!(
                "  Malformed: {} line(s) replayed as empty frames",
                session.malformed_lines.len()
            );
        }
        if let Some(gallery) = &gallery {
            println!("  Images: {}", gallery.images().len());
        }
        println!();
    }

    let mut state = recognizer.start_session();
    let mut fired: Vec<GestureEvent> = Vec::new();
    for frame in &session.frames {
        let report = recognizer.process_with_sink(&mut state, frame, &mut fired);
        super::report_frame(&report, gallery.as_mut(), trace)?;
    }

    if trace {
        return Ok(());
    }

    println!();
    println!(
        "{} command(s) recognized in {} frame(s)",
        fired.len(),
        state.frames_processed()
    );
    println!("Feedback: {}", state.emitter().feedback());
    if let Some(pending) = state.pending() {
        println!(
            "Unfinished gesture: {} touched at frame {}",
            pending.first(),
            pending.since().index
        );
    }

    Ok(())
}

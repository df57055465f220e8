//! Load and validate a recognizer config.

use std::path::PathBuf;

use gesture_gallery_recognizer::{GestureRecognizer, RecognizerConfig};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Checking recognizer config: {}", path.display());

    let config = RecognizerConfig::load(&path)
        .map_err(|e| anyhow::anyhow!("Invalid recognizer config: {e}"))?;
    let recognizer = GestureRecognizer::new(config)
        .map_err(|e| anyhow::anyhow!("Invalid gesture catalog: {e}"))?;
    let config = recognizer.config();

    println!("  Source space: {:?}", config.source_space);
    println!("  Min visibility: {}", config.min_visibility);
    println!("  Debounce frames: {}", config.debounce_frames);
    println!("  Double-touch window: {}", config.double_touch_window);
    println!("  Two-step window: {}", config.two_step_window);
    println!("  Nominal frame interval: {} ms", config.nominal_frame_interval_ms);
    println!(
        "  Gestures: {} ({})",
        recognizer.catalog().len(),
        if config.gestures.is_some() { "custom" } else { "standard" }
    );

    let shadowed = recognizer.catalog().shadowed_single_touches();
    if shadowed.is_empty() {
        println!("\nConfig is valid.");
    } else {
        println!("\nConfig is valid, with warnings:");
        for definition in shadowed {
            println!(
                "  - {} is shadowed by a gesture starting on {}",
                definition.command(),
                definition.first_region()
            );
        }
    }

    Ok(())
}

//! List the gesture catalog.

use std::path::PathBuf;

use gesture_gallery_common::config::AppConfig;
use gesture_gallery_recognizer::{GestureDefinition, GestureRecognizer};

pub fn run(config_path: Option<PathBuf>, json: bool, app: &AppConfig) -> anyhow::Result<()> {
    let config = super::load_recognizer_config(config_path.as_deref(), app)?;
    let recognizer = GestureRecognizer::new(config)?;
    let catalog = recognizer.catalog();

    if json {
        let definitions: Vec<&GestureDefinition> = catalog.iter().collect();
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    println!("Gestures ({}):", catalog.len());
    for definition in catalog.iter() {
        let window = definition
            .window()
            .map(|w| format!(" (within {w})"))
            .unwrap_or_default();
        println!(
            "  {:<9} {}{}",
            definition.command().label(),
            definition.describe(),
            window
        );
    }

    let shadowed = catalog.shadowed_single_touches();
    if !shadowed.is_empty() {
        println!();
        for definition in shadowed {
            println!(
                "  [WARN] {} can never fire: {} starts a longer gesture",
                definition.command(),
                definition.first_region()
            );
        }
    }

    Ok(())
}

//! Write a default recognizer config.

use std::path::PathBuf;

use gesture_gallery_common::config::{config_file_path, AppConfig};
use gesture_gallery_recognizer::RecognizerConfig;

pub fn run(path: PathBuf, force: bool, register: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let json = RecognizerConfig::default()
        .to_json_pretty()
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {e}"))?;
    std::fs::write(&path, json + "\n")?;

    println!("Recognizer config written to: {}", path.display());

    if register {
        let mut app = AppConfig::load();
        app.recognizer_config = Some(std::fs::canonicalize(&path)?);
        app.save()
            .map_err(|e| anyhow::anyhow!("Failed to save app config: {e}"))?;
        println!("Registered in app config: {}", config_file_path().display());
    }

    println!("Edit thresholds and windows to calibrate for your camera setup.");
    Ok(())
}

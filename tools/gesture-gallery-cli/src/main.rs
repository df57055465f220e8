//! Gesture Gallery CLI: recognize body-touch gestures from landmark streams.
//!
//! Usage:
//!   gesture-gallery replay <SESSION>      Recognize gestures in a recorded session
//!   gesture-gallery stream                Recognize gestures from frames on stdin
//!   gesture-gallery gestures              List the gesture catalog
//!   gesture-gallery init-config <PATH>    Write a default recognizer config
//!   gesture-gallery check-config <PATH>   Validate a recognizer config

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gesture_gallery_common::config::AppConfig;
use gesture_gallery_landmark_model::CoordinateSpace;

mod commands;
mod gallery;

#[derive(Parser)]
#[command(
    name = "gesture-gallery",
    about = "Touch-your-body gesture control for an image gallery",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Recognizer config file (overrides the app config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize gestures in a recorded landmark session (JSONL)
    Replay {
        /// Path to the session file
        path: PathBuf,

        /// Image directory to drive with the recognized commands
        #[arg(long)]
        images: Option<PathBuf>,

        /// Drive the image directory from the app config
        #[arg(long, conflicts_with = "images")]
        gallery: bool,

        /// Print a JSON report for every frame instead of a summary
        #[arg(long)]
        trace: bool,
    },

    /// Recognize gestures from landmark frames on stdin (JSONL)
    Stream {
        /// Coordinate space of frames that do not declare one:
        /// user_facing|camera|mirrored_labels|camera_mirrored_labels
        #[arg(long, value_parser = parse_space)]
        space: Option<CoordinateSpace>,

        /// Image directory to drive with the recognized commands
        #[arg(long)]
        images: Option<PathBuf>,

        /// Drive the image directory from the app config
        #[arg(long, conflicts_with = "images")]
        gallery: bool,

        /// Print a JSON report for every frame
        #[arg(long)]
        trace: bool,
    },

    /// List the gesture catalog
    Gestures {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default recognizer config
    InitConfig {
        /// Output path
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        /// Point the app config at the new file
        #[arg(long)]
        register: bool,
    },

    /// Load and validate a recognizer config
    CheckConfig {
        /// Path to the config file
        path: PathBuf,
    },
}

fn parse_space(value: &str) -> Result<CoordinateSpace, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("unknown coordinate space '{value}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app = AppConfig::load();
    let mut logging = app.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    gesture_gallery_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Replay {
            path,
            images,
            gallery,
            trace,
        } => {
            let images = images.or_else(|| gallery.then(|| app.images_dir.clone()));
            commands::replay::run(path, cli.config, images, trace, &app)
        }
        Commands::Stream {
            space,
            images,
            gallery,
            trace,
        } => {
            let images = images.or_else(|| gallery.then(|| app.images_dir.clone()));
            commands::stream::run(cli.config, space, images, trace, &app).await
        }
        Commands::Gestures { json } => commands::gestures::run(cli.config, json, &app),
        Commands::InitConfig {
            path,
            force,
            register,
        } => commands::init_config::run(path, force, register),
        Commands::CheckConfig { path } => commands::check_config::run(path),
    }
}

//! Headless image gallery driven by gesture commands.

use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};

use gesture_gallery_common::error::{GestureError, GestureResult};
use gesture_gallery_landmark_model::Command;
use gesture_gallery_recognizer::{CommandSink, GestureEvent};

/// Extensions recognized as images (compared case-insensitively).
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "gif"];

/// Zoom applied while in fullscreen.
pub const FULLSCREEN_ZOOM: f64 = 1.2;

/// Undo steps kept.
const HISTORY_LIMIT: usize = 20;

/// What is on screen: restorable by Undo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub index: usize,
    pub zoom: f64,
    pub fullscreen: bool,
}

impl Default for View {
    fn default() -> Self {
        Self {
            index: 0,
            zoom: 1.0,
            fullscreen: false,
        }
    }
}

/// Gallery navigation state.
#[derive(Debug)]
pub struct Gallery {
    images: Vec<PathBuf>,
    view: View,
    history: VecDeque<View>,
    show_debug: bool,
    menu_open: bool,
}

impl Gallery {
    pub fn new(images: Vec<PathBuf>) -> Self {
        Self {
            images,
            view: View::default(),
            history: VecDeque::new(),
            show_debug: true,
            menu_open: false,
        }
    }

    /// Collect the images in a directory, sorted by path.
    pub fn load(dir: &Path) -> GestureResult<Self> {
        if !dir.exists() {
            return Err(GestureError::file_not_found(dir));
        }
        if !dir.is_dir() {
            return Err(GestureError::gallery(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        let mut images = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_image(&path) {
                images.push(path);
            }
        }
        images.sort();

        if images.is_empty() {
            tracing::warn!(dir = %dir.display(), "No images found");
        } else {
            tracing::debug!(dir = %dir.display(), count = images.len(), "Loaded images");
        }
        Ok(Self::new(images))
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn current_image(&self) -> Option<&Path> {
        self.images.get(self.view.index).map(PathBuf::as_path)
    }

    pub fn show_debug(&self) -> bool {
        self.show_debug
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Apply a command. Returns whether anything changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Next => self.step(1),
            Command::Previous => self.step(-1),
            Command::Increase => self.set_view(View {
                zoom: FULLSCREEN_ZOOM,
                fullscreen: true,
                ..self.view
            }),
            Command::Decrease => self.set_view(View {
                zoom: 1.0,
                fullscreen: false,
                ..self.view
            }),
            Command::Home => self.set_view(View::default()),
            Command::Cancel => self.set_view(View {
                index: self.view.index,
                ..View::default()
            }),
            Command::Undo => match self.history.pop_back() {
                Some(previous) => {
                    self.view = previous;
                    true
                }
                None => false,
            },
            Command::Menu => {
                self.menu_open = !self.menu_open;
                true
            }
            Command::Help => {
                self.show_debug = !self.show_debug;
                true
            }
            Command::Ok => {
                tracing::info!(image = ?self.current_image(), "Selection confirmed");
                false
            }
        }
    }

    fn step(&mut self, delta: isize) -> bool {
        if self.images.is_empty() {
            return false;
        }
        let len = self.images.len() as isize;
        let index = (self.view.index as isize + delta).rem_euclid(len) as usize;
        self.set_view(View {
            index,
            ..View::default()
        })
    }

    /// Replace the view, remembering the old one for Undo.
    fn set_view(&mut self, view: View) -> bool {
        if view == self.view {
            return false;
        }
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(self.view);
        self.view = view;
        true
    }
}

impl CommandSink for Gallery {
    fn on_command(&mut self, event: &GestureEvent) {
        if self.apply(event.command) {
            tracing::debug!(command = %event.command, view = %self, "Gallery updated");
        }
    }
}

impl fmt::Display for Gallery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .current_image()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "<no images>".to_string());
        write!(
            f,
            "[{}/{}] {} zoom={:.1}",
            if self.images.is_empty() { 0 } else { self.view.index + 1 },
            self.images.len(),
            name,
            self.view.zoom
        )?;
        if self.view.fullscreen {
            write!(f, " fullscreen")?;
        }
        if self.menu_open {
            write!(f, " menu")?;
        }
        if !self.show_debug {
            write!(f, " debug-hidden")?;
        }
        Ok(())
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

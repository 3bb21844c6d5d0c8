//! Configuration for the turtle interpreter
//!
//! Where the raster and the command log are persisted, and how large the
//! canvas is. Every field has a default, so a config file only needs to name
//! what it changes.

use crate::error::{Result, TurtleError};
use crate::graphics::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File the raster is saved to and loaded from
pub const DEFAULT_IMAGE_FILE: &str = "turtle_image.png";
/// File the command log is saved to and loaded from
pub const DEFAULT_COMMANDS_FILE: &str = "turtle_commands.txt";

/// Interpreter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// PNG file used by `save` / `load`
    pub image_path: PathBuf,
    /// Text file used by `savecommands` / `loadcommands`
    pub commands_path: PathBuf,
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from(DEFAULT_IMAGE_FILE),
            commands_path: PathBuf::from(DEFAULT_COMMANDS_FILE),
            canvas_width: DEFAULT_WIDTH,
            canvas_height: DEFAULT_HEIGHT,
        }
    }
}

impl Config {
    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TurtleError::io(format!("reading config {}", path.display()), e))?;
        Self::from_json(&contents).map_err(|source| TurtleError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_json(contents: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Keep both persistence files inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            image_path: dir.join(DEFAULT_IMAGE_FILE),
            commands_path: dir.join(DEFAULT_COMMANDS_FILE),
            ..Self::default()
        }
    }
}

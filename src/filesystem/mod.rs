//! File persistence for the turtle interpreter
//!
//! Saves and loads the raster as a PNG and the command log as plain text, one
//! command per line.

use crate::config::Config;
use crate::error::{Result, TurtleError};
use crate::program::CommandLog;
use image::{ImageFormat, RgbImage};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The two fixed files a session persists to
#[derive(Debug, Clone)]
pub struct FileSystem {
    image_path: PathBuf,
    commands_path: PathBuf,
}

impl FileSystem {
    /// Create a file system interface for the configured paths
    pub fn new(config: &Config) -> Self {
        Self {
            image_path: config.image_path.clone(),
            commands_path: config.commands_path.clone(),
        }
    }

    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    pub fn commands_path(&self) -> &Path {
        &self.commands_path
    }

    /// Write the raster as PNG, overwriting any previous save
    pub fn save_raster(&self, image: &RgbImage) -> Result<()> {
        image.save_with_format(&self.image_path, ImageFormat::Png)?;
        info!(path = %self.image_path.display(), "raster saved");
        Ok(())
    }

    /// Read the saved raster
    pub fn load_raster(&self) -> Result<RgbImage> {
        if !self.image_path.exists() {
            return Err(TurtleError::FileNotFound {
                what: "No saved drawing",
                path: self.image_path.clone(),
            });
        }
        let image = image::open(&self.image_path)?.to_rgb8();
        info!(
            path = %self.image_path.display(),
            width = image.width(),
            height = image.height(),
            "raster loaded"
        );
        Ok(image)
    }

    /// Write the command log, one newline-terminated line per command
    pub fn save_commands(&self, log: &CommandLog) -> Result<()> {
        let context = || format!("writing {}", self.commands_path.display());
        let file = File::create(&self.commands_path).map_err(|e| TurtleError::io(context(), e))?;
        let mut writer = BufWriter::new(file);
        for line in log.iter() {
            writeln!(writer, "{}", line).map_err(|e| TurtleError::io(context(), e))?;
        }
        writer.flush().map_err(|e| TurtleError::io(context(), e))?;
        info!(path = %self.commands_path.display(), commands = log.len(), "command log saved");
        Ok(())
    }

    /// Read every line of the saved command log, blank lines included
    pub fn load_commands(&self) -> Result<Vec<String>> {
        let context = || format!("reading {}", self.commands_path.display());
        let file = match File::open(&self.commands_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TurtleError::FileNotFound {
                    what: "No saved commands",
                    path: self.commands_path.clone(),
                });
            }
            Err(e) => return Err(TurtleError::io(context(), e)),
        };

        let lines = BufReader::new(file)
            .lines()
            .collect::<std::io::Result<Vec<String>>>()
            .map_err(|e| TurtleError::io(context(), e))?;
        debug!(path = %self.commands_path.display(), commands = lines.len(), "command log read");
        Ok(lines)
    }
}

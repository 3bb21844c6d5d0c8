//! Turtle Graphics Interpreter
//!
//! Drives a 2D pen-plotter ("turtle") through a small text-command language:
//! move, turn, change pen attributes, draw squares, triangles and circles, and
//! persist both the rendered raster and the command history that produced it.
//! A saved command history can be replayed to rebuild the turtle state.

pub mod config;
pub mod executor;
pub mod filesystem;
pub mod geometry;
pub mod graphics;
pub mod parser;
pub mod program;
pub mod tokenizer;
pub mod turtle;

// Re-export core types for convenience
pub use crate::error::{Result, TurtleError};
pub use config::Config;
pub use executor::Executor;
pub use graphics::{Canvas, Confirmation, RasterCanvas};
pub use parser::Command;
pub use program::CommandLog;
pub use turtle::{Point, Rgb, TurtleState};

/// Core error handling types for the turtle interpreter
pub mod error {
    use std::path::PathBuf;
    use thiserror::Error;

    /// Result type for turtle operations
    pub type Result<T> = std::result::Result<T, TurtleError>;

    /// Every way a command can be rejected or fail.
    ///
    /// None of these abort a session: the executor reports them and carries on.
    #[derive(Error, Debug)]
    pub enum TurtleError {
        /// Command name matches nothing in the command table
        #[error("Unknown command: '{0}'")]
        UnknownCommand(String),

        /// Missing argument or a token that is not a base-10 integer
        #[error("{message}")]
        InvalidArgument { command: String, message: String },

        /// Numeric argument outside the command's allowed domain
        #[error("{message}")]
        OutOfRange { command: String, message: String },

        /// Triangle sides that cannot close
        #[error("{0}")]
        InvalidGeometry(String),

        /// A load was requested but nothing has been saved there
        #[error("{what} found at {}", .path.display())]
        FileNotFound { what: &'static str, path: PathBuf },

        #[error("Command failed: {context}: {source}")]
        Io {
            context: String,
            #[source]
            source: std::io::Error,
        },

        #[error("Command failed: {0}")]
        Image(#[from] image::ImageError),

        #[error("Invalid configuration in {}: {source}", .path.display())]
        Config {
            path: PathBuf,
            #[source]
            source: serde_json::Error,
        },

        /// Persistence command reached while a command log is being replayed
        #[error("'{0}' is not available while replaying commands")]
        ReplayInProgress(&'static str),
    }

    impl TurtleError {
        pub(crate) fn invalid_argument(command: &str, message: impl Into<String>) -> Self {
            TurtleError::InvalidArgument {
                command: command.to_string(),
                message: message.into(),
            }
        }

        pub(crate) fn out_of_range(command: &str, message: impl Into<String>) -> Self {
            TurtleError::OutOfRange {
                command: command.to_string(),
                message: message.into(),
            }
        }

        pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
            TurtleError::Io {
                context: context.into(),
                source,
            }
        }
    }
}

/// Install the global `tracing` subscriber.
///
/// Logs go to stderr so they never interleave with interpreter output on
/// stdout. The level defaults to `info` and can be overridden with `RUST_LOG`.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))?;

    Ok(())
}

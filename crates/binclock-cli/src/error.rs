//! Error types for the `binclock` binary.

use binclock_core::{RegistryError, RenderError};

use crate::config::ConfigError;

/// Errors that end a `binclock` run with a non-zero exit.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The clock state could not be built in single-shot mode.
    #[error("Failed to get current time")]
    ClockUnavailable,

    /// The display renderer could not be registered.
    #[error("Failed to register display function: {0}")]
    Registry(#[from] RegistryError),

    /// Rendering or writing the display failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Writing the banner or console control sequences failed.
    #[error("console write failed: {0}")]
    Console(#[from] std::io::Error),

    /// The Ctrl+C handler could not be installed.
    #[error("failed to listen for Ctrl+C: {source}")]
    Signal {
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

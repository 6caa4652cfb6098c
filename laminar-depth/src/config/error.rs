//! Configuration loading errors.

use thiserror::Error;

/// Error loading or validating a configuration file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigLoadError {
    /// File could not be read
    #[error("Failed to read config: {0}")]
    Io(String),

    /// YAML could not be parsed
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A value is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

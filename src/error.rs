//! Error handling for the SerCon core library
//!
//! This module provides the error type shared by every utility in the crate,
//! plus conversions from the I/O and configuration errors they wrap.

use thiserror::Error;

/// SerCon core error type
#[derive(Error, Debug, Clone)]
pub enum SerConError {
    /// Malformed hexadecimal or framed input
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Caller-supplied argument is unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A checksum-tagged frame failed verification
    #[error("Checksum mismatch: {0}")]
    ChecksumMismatch(String),

    /// The error-code table could not be read
    #[error("Error table unavailable: {0}")]
    TableUnavailable(String),

    /// The error-code table was read but does not parse
    #[error("Error table malformed: {0}")]
    TableMalformed(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input/Output operation errors
    #[error("IO error: {0}")]
    IoError(String),
}

/// Result type alias for the SerCon core library
pub type Result<T> = std::result::Result<T, SerConError>;

// Conversion from std::io::Error
impl From<std::io::Error> for SerConError {
    fn from(err: std::io::Error) -> Self {
        SerConError::IoError(err.to_string())
    }
}

// Conversion from figment::Error
impl From<figment::Error> for SerConError {
    fn from(err: figment::Error) -> Self {
        SerConError::ConfigError(err.to_string())
    }
}

// Helper methods for creating errors
impl SerConError {
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        SerConError::InvalidFormat(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        SerConError::InvalidArgument(msg.into())
    }

    pub fn checksum_mismatch(msg: impl Into<String>) -> Self {
        SerConError::ChecksumMismatch(msg.into())
    }

    pub fn table_unavailable(msg: impl Into<String>) -> Self {
        SerConError::TableUnavailable(msg.into())
    }

    pub fn table_malformed(msg: impl Into<String>) -> Self {
        SerConError::TableMalformed(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        SerConError::ConfigError(msg.into())
    }
}

/// Extension trait for adding context to errors
pub trait ErrorExt<T> {
    fn io_error(self, msg: &str) -> Result<T>;
    fn config_error(self, msg: &str) -> Result<T>;
}

impl<T, E> ErrorExt<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn io_error(self, msg: &str) -> Result<T> {
        self.map_err(|e| SerConError::IoError(format!("{msg}: {e}")))
    }

    fn config_error(self, msg: &str) -> Result<T> {
        self.map_err(|e| SerConError::ConfigError(format!("{msg}: {e}")))
    }
}

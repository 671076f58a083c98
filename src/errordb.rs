//! Error-code database lookup
//!
//! Devices report faults as short codes (e.g. `E0000001`) that mean nothing
//! to an operator. This module loads a code-to-description table from a
//! document on disk and resolves codes against it. Lookup failures never
//! escape as errors: a resolver always produces something displayable, so
//! a console loop can print the outcome and move on.
//!
//! The table document has a single `error_codes` list; YAML and JSON
//! formats are selected by file extension.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SerConError};

/// One record of the error-code table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Code exactly as the device reports it
    pub code: String,
    /// Human-readable description for the operator
    pub description: String,
}

/// Document shape of a table file
#[derive(Debug, Deserialize)]
struct TableDocument {
    error_codes: Vec<ErrorEntry>,
}

/// Outcome of resolving one error code
///
/// Every variant renders to operator-facing text via `Display`, including
/// the degraded ones, so callers can print the result unconditionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The code was found in the table
    Found { code: String, description: String },
    /// The table loaded but contains no matching entry
    NotFound { code: String },
    /// The table could not be read
    SourceUnavailable { message: String },
    /// The table was read but does not parse
    SourceMalformed { message: String },
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Found { code, description } => {
                write!(f, "Error code: {}\nDescription: {}", code, description)
            }
            Resolution::NotFound { code } => {
                write!(f, "No result found for error code {}", code)
            }
            Resolution::SourceUnavailable { message } => {
                write!(f, "Error database unavailable: {}", message)
            }
            Resolution::SourceMalformed { message } => {
                write!(f, "Error database malformed: {}", message)
            }
        }
    }
}

/// Find the first entry whose code equals `code`, in table order
///
/// Duplicate codes are tolerated; the earliest entry wins.
pub fn lookup<'a>(entries: &'a [ErrorEntry], code: &str) -> Option<&'a ErrorEntry> {
    entries.iter().find(|entry| entry.code == code)
}

/// Capability supplying the error-code table
///
/// `load` returns a fresh copy on every call, so a table edited on disk is
/// picked up by the next resolution without restarting the tool.
pub trait ErrorTableSource {
    fn load(&self) -> Result<Vec<ErrorEntry>>;
}

/// Table source backed by a document on disk
///
/// Supported formats are YAML (`.yaml`/`.yml`) and JSON (`.json`),
/// dispatched on the file extension.
#[derive(Debug, Clone)]
pub struct FileTableSource {
    path: PathBuf,
}

impl FileTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ErrorTableSource for FileTableSource {
    fn load(&self) -> Result<Vec<ErrorEntry>> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            SerConError::table_unavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let extension = self.path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let document: TableDocument = match extension.to_lowercase().as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| {
                SerConError::table_malformed(format!(
                    "Failed to parse YAML error table {}: {}",
                    self.path.display(),
                    e
                ))
            })?,
            "json" => serde_json::from_str(&content).map_err(|e| {
                SerConError::table_malformed(format!(
                    "Failed to parse JSON error table {}: {}",
                    self.path.display(),
                    e
                ))
            })?,
            _ => {
                return Err(SerConError::table_malformed(format!(
                    "Unsupported error table format: {}",
                    extension
                )))
            }
        };

        debug!(
            "Loaded {} error table entries from {}",
            document.error_codes.len(),
            self.path.display()
        );
        Ok(document.error_codes)
    }
}

/// Table source over an in-memory entry list
///
/// Used where no document exists, e.g. tables compiled into a host binary
/// or built up in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticTableSource {
    entries: Vec<ErrorEntry>,
}

impl StaticTableSource {
    pub fn new(entries: Vec<ErrorEntry>) -> Self {
        Self { entries }
    }
}

impl ErrorTableSource for StaticTableSource {
    fn load(&self) -> Result<Vec<ErrorEntry>> {
        Ok(self.entries.clone())
    }
}

/// Resolves device error codes against a table source
#[derive(Debug, Clone)]
pub struct ErrorCodeResolver<S> {
    source: S,
}

impl<S: ErrorTableSource> ErrorCodeResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Resolve one error code
    ///
    /// Never fails: source problems come back as the degraded `Resolution`
    /// variants instead of an `Err`.
    pub fn resolve(&self, code: &str) -> Resolution {
        let entries = match self.source.load() {
            Ok(entries) => entries,
            Err(SerConError::TableUnavailable(message)) => {
                warn!("Error table unavailable: {}", message);
                return Resolution::SourceUnavailable { message };
            }
            Err(SerConError::TableMalformed(message)) => {
                warn!("Error table malformed: {}", message);
                return Resolution::SourceMalformed { message };
            }
            Err(other) => {
                // Any other source failure still must not escape here
                let message = other.to_string();
                warn!("Error table load failed: {}", message);
                return Resolution::SourceUnavailable { message };
            }
        };

        match lookup(&entries, code) {
            Some(entry) => Resolution::Found {
                code: entry.code.clone(),
                description: entry.description.clone(),
            },
            None => Resolution::NotFound {
                code: code.to_string(),
            },
        }
    }
}

impl ErrorCodeResolver<FileTableSource> {
    /// Resolver over a table document on disk
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileTableSource::new(path))
    }
}

//! Error types for document loading and persistence
//!
//! Copyright (c) 2025 CV Claw Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Failures that can occur while reading, parsing, or writing a CV document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// File could not be read
    #[error("Failed to read file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File content is not well-formed YAML
    #[error("Failed to parse YAML file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Document could not be turned back into YAML text
    #[error("Failed to serialize document: {source}")]
    Serialize { source: serde_yaml::Error },

    /// Serialized text could not be parsed again
    #[error("Failed to reparse serialized document: {source}")]
    Reparse { source: serde_yaml::Error },

    /// File could not be written
    #[error("Failed to write file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DocumentError {
    /// Create a read error with path context
    pub fn read(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source: error,
        }
    }

    /// Create a parse error with path context
    pub fn parse(path: impl Into<PathBuf>, error: serde_yaml::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source: error,
        }
    }

    /// Create a write error with path context
    pub fn write(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source: error,
        }
    }

    /// Whether the failure happened on the way in (read or parse)
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Parse { .. })
    }
}

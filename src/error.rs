//! Error types for the submodule importer
//!
//! Covers the non-fatal refresh warnings (missing manifest, failed probe),
//! the per-candidate failures that halt an add run, and the ambient
//! configuration and I/O failures.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for importer operations
pub type Result<T> = std::result::Result<T, ImporterError>;

/// Error type for importer operations
#[derive(Error, Debug)]
pub enum ImporterError {
    /// Manifest file absent or without any entries
    #[error("Manifest not found or empty: {}", .0.display())]
    ManifestMissing(PathBuf),

    /// `git submodule status` could not be run or parsed
    #[error("Failed to probe installed submodules: {0}")]
    ProbeFailed(String),

    /// Target directory already exists on disk
    #[error("Directory for {name} already exists: {}", .path.display())]
    PathAlreadyExists { name: String, path: PathBuf },

    /// `git submodule add` exited non-zero
    #[error("Failed to add {name}: {stderr}")]
    GitCommandFailed { name: String, stderr: String },

    /// Requested name is not in the manifest
    #[error("Unknown submodule: {0}")]
    UnknownCandidate(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Interactive prompt errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// git wrapper errors
    #[error("Git error: {0}")]
    Git(#[from] gitsub::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl ImporterError {
    /// Whether this error only degrades a refresh instead of failing it
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ImporterError::ManifestMissing(_) | ImporterError::ProbeFailed(_)
        )
    }
}

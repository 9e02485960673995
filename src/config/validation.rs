//! Configuration validation
//!
//! Validates importer configuration for correctness:
//! - Submodule root stays inside the repository
//! - Manifest path is set
//! - git program is set

use super::importer_config::ImporterConfig;
use crate::ImporterError;
use std::path::{Component, Path};

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate an importer configuration
pub fn validate_config(config: &ImporterConfig) -> ValidationResult {
    let mut errors = Vec::new();

    let root = Path::new(&config.submodules_root);
    if root.has_root() || root.is_absolute() {
        errors.push(ValidationError::new(
            "submodules_root",
            format!(
                "Must be relative to the repository root: {}",
                config.submodules_root
            ),
        ));
    }
    if root
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        errors.push(ValidationError::new(
            "submodules_root",
            format!("Must not leave the repository: {}", config.submodules_root),
        ));
    }

    if config.manifest.as_os_str().is_empty() {
        errors.push(ValidationError::new("manifest", "Manifest path cannot be empty"));
    }

    if config.git.trim().is_empty() {
        errors.push(ValidationError::new("git", "git program cannot be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate and fold all findings into a single error
pub fn validate_config_result(config: &ImporterConfig) -> crate::Result<()> {
    validate_config(config).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        ImporterError::Config(messages.join("; "))
    })
}

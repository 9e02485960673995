//! Configuration system
//!
//! Optional YAML configuration describing where the manifest lives, where
//! submodules are placed, and how git is invoked. Looked up in order:
//! - an explicit `--config` path
//! - `.submodule-importer.yaml` at the repository root
//! - `~/.config/submodule-importer/config.yaml`
//! - built-in defaults

mod importer_config;
pub mod validation;

pub use importer_config::{ImporterConfig, Layout, REPO_CONFIG_FILE};
pub use validation::{validate_config, validate_config_result, ValidationError};

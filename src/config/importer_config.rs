//! Importer configuration file handling

use crate::{ImporterError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the per-repository config
pub const REPO_CONFIG_FILE: &str = ".submodule-importer.yaml";

fn default_submodules_root() -> String {
    "Assets/_Morn".to_string()
}

fn default_manifest() -> PathBuf {
    PathBuf::from("Assets/_Morn/MornSubmoduleImporter/submodule.txt")
}

fn default_git() -> String {
    "git".to_string()
}

/// Importer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImporterConfig {
    /// Directory new submodules are placed under, relative to the repository root
    #[serde(default = "default_submodules_root")]
    pub submodules_root: String,

    /// Manifest file; relative paths are resolved against the repository root
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// git executable to invoke
    #[serde(default = "default_git")]
    pub git: String,

    /// Flags placed before every git subcommand (e.g. `-c`, `protocol.file.allow=always`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub git_flags: Vec<String>,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            submodules_root: default_submodules_root(),
            manifest: default_manifest(),
            git: default_git(),
            git_flags: Vec::new(),
        }
    }
}

/// Paths resolved against a concrete repository root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Working directory for every git invocation
    pub repo_root: PathBuf,
    /// `/`-separated prefix for submodule paths, relative to `repo_root`
    pub submodules_root: String,
    /// Absolute path of the manifest file
    pub manifest: PathBuf,
}

impl Layout {
    /// Path git records for a submodule called `name`
    pub fn target_path(&self, name: &str) -> String {
        if self.submodules_root.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.submodules_root, name)
        }
    }

    /// Filesystem location of a target path
    pub fn full_path(&self, target_path: &str) -> PathBuf {
        self.repo_root.join(target_path)
    }
}

impl ImporterConfig {
    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ImporterError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading importer configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        tracing::debug!(
            submodules_root = %config.submodules_root,
            manifest = %config.manifest.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Resolve the effective configuration for a repository
    ///
    /// Returns the config together with the file it came from, if any. An
    /// explicit path must exist; the implicit locations are optional.
    pub fn discover(repo_root: &Path, explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidates = [Some(Self::repo_path(repo_root)), Self::user_path()];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                return Ok((Self::load(&path)?, Some(path)));
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok((Self::default(), None))
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving importer configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Per-repository config path
    pub fn repo_path(repo_root: &Path) -> PathBuf {
        repo_root.join(REPO_CONFIG_FILE)
    }

    /// User-level config path (~/.config/submodule-importer/config.yaml)
    pub fn user_path() -> Option<PathBuf> {
        let mut path = dirs::home_dir()?;
        path.push(".config");
        path.push("submodule-importer");
        path.push("config.yaml");
        Some(path)
    }

    /// Resolve paths against a repository root
    pub fn layout(&self, repo_root: impl Into<PathBuf>) -> Layout {
        let repo_root = repo_root.into();
        let manifest = if self.manifest.is_absolute() {
            self.manifest.clone()
        } else {
            repo_root.join(&self.manifest)
        };

        Layout {
            submodules_root: self
                .submodules_root
                .replace('\\', "/")
                .trim_matches('/')
                .to_string(),
            manifest,
            repo_root,
        }
    }

    /// Build the git handle described by this config
    pub fn git(&self, repo_root: &Path) -> gitsub::Git {
        gitsub::Git::with_workdir(repo_root)
            .with_program(&self.git)
            .with_global_flags(self.git_flags.clone())
    }
}

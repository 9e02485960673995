//! Backend trait and the git CLI implementation

use crate::{ImporterError, Result};
use gitsub::{Git, SubmoduleState, SubmoduleStatus};
use std::collections::HashMap;

/// Paths registered as submodules, keyed by the path git prints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledSet {
    paths: HashMap<String, SubmoduleState>,
}

impl InstalledSet {
    /// Build from parsed `git submodule status` lines
    pub fn from_statuses(statuses: impl IntoIterator<Item = SubmoduleStatus>) -> Self {
        Self {
            paths: statuses
                .into_iter()
                .map(|s| (s.path, s.state))
                .collect(),
        }
    }

    /// Record a path as registered
    pub fn insert(&mut self, path: impl Into<String>, state: SubmoduleState) {
        self.paths.insert(path.into(), state);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    /// State of a registered path
    pub fn state(&self, path: &str) -> Option<SubmoduleState> {
        self.paths.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FromIterator<String> for InstalledSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            paths: iter
                .into_iter()
                .map(|p| (p, SubmoduleState::Current))
                .collect(),
        }
    }
}

/// Operations the importer needs from git
///
/// Both run with the repository root as working directory. Implementations
/// must not reorder or batch `add` calls.
pub trait SubmoduleBackend {
    /// Probe registered submodules
    fn installed(&self) -> Result<InstalledSet>;

    /// Register `url` at `path` (relative to the repository root)
    fn add(&self, url: &str, path: &str) -> Result<()>;
}

/// [`SubmoduleBackend`] backed by the git executable
#[derive(Debug, Clone)]
pub struct GitBackend {
    git: Git,
}

impl GitBackend {
    pub fn new(git: Git) -> Self {
        Self { git }
    }
}

impl SubmoduleBackend for GitBackend {
    fn installed(&self) -> Result<InstalledSet> {
        let statuses = self
            .git
            .submodule_status()
            .map_err(|e| ImporterError::ProbeFailed(e.to_string()))?;
        Ok(InstalledSet::from_statuses(statuses))
    }

    fn add(&self, url: &str, path: &str) -> Result<()> {
        let output = self.git.submodule_add(url, path)?;
        tracing::debug!(url = %url, path = %path, output = %output.combined().trim(), "git submodule add finished");
        Ok(())
    }
}

/// Text to show for a failed add: git's stderr when there is one
pub(crate) fn failure_detail(err: &ImporterError) -> String {
    match err {
        ImporterError::Git(gitsub::Error::CommandFailed { stderr, .. }) if !stderr.is_empty() => {
            stderr.clone()
        }
        other => other.to_string(),
    }
}

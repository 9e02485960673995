//! Submodule importer
//!
//! Reads the manifest, probes git for registered submodules, reconciles the
//! two into [`Candidate`]s, and adds the ones the operator asks for.
//!
//! ```no_run
//! use submodule_importer::config::ImporterConfig;
//! use submodule_importer::Importer;
//!
//! let config = ImporterConfig::default();
//! let mut importer = Importer::from_config(&config, "/path/to/project");
//!
//! for candidate in importer.list_candidates() {
//!     println!("{} {}", candidate.name, candidate.status_label());
//! }
//!
//! let report = importer.add(&["MornLib"], |p| println!("{}/{} {}", p.position(), p.total, p.name))?;
//! println!("added {}", report.added_count());
//! # Ok::<(), submodule_importer::ImporterError>(())
//! ```

mod adder;
mod candidate;

pub use adder::{add_sequentially, AddFailure, AddReport, Progress};
pub use candidate::{reconcile, Candidate};

use crate::config::{ImporterConfig, Layout};
use crate::git::{GitBackend, InstalledSet, SubmoduleBackend};
use crate::manifest::Manifest;
use crate::{ImporterError, Result};
use std::collections::HashSet;
use std::path::PathBuf;

/// Candidate list for one repository plus the backend used to change it
pub struct Importer<B = GitBackend> {
    layout: Layout,
    backend: B,
    candidates: Vec<Candidate>,
    warnings: Vec<ImporterError>,
}

impl Importer<GitBackend> {
    /// Importer driving the git executable, refreshed once
    pub fn from_config(config: &ImporterConfig, repo_root: impl Into<PathBuf>) -> Self {
        let repo_root = repo_root.into();
        let backend = GitBackend::new(config.git(&repo_root));
        Self::open(config.layout(repo_root), backend)
    }
}

impl<B: SubmoduleBackend> Importer<B> {
    /// Create without touching the manifest or git
    pub fn new(layout: Layout, backend: B) -> Self {
        Self {
            layout,
            backend,
            candidates: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create and run the first refresh
    pub fn open(layout: Layout, backend: B) -> Self {
        let mut importer = Self::new(layout, backend);
        importer.refresh();
        importer
    }

    /// Rebuild the candidate list from the manifest and git
    ///
    /// Never fails: a missing manifest yields no candidates and a failed
    /// probe marks everything not installed. Both are kept in
    /// [`warnings`](Self::warnings).
    pub fn refresh(&mut self) -> &[Candidate] {
        self.warnings.clear();

        let manifest = match Manifest::from_file(&self.layout.manifest) {
            Ok(manifest) => manifest,
            Err(e) => {
                tracing::warn!(path = %self.layout.manifest.display(), error = %e, "Could not read manifest");
                self.warnings.push(e);
                self.candidates.clear();
                return &self.candidates;
            }
        };

        if manifest.is_empty() {
            tracing::warn!(path = %self.layout.manifest.display(), "Manifest has no entries");
            self.warnings
                .push(ImporterError::ManifestMissing(self.layout.manifest.clone()));
        }

        let installed = match self.backend.installed() {
            Ok(installed) => installed,
            Err(e) => {
                tracing::error!(error = %e, "Treating every submodule as not installed");
                self.warnings.push(e);
                InstalledSet::default()
            }
        };

        self.candidates = reconcile(&manifest.entries, &installed, &self.layout);

        tracing::info!(
            candidates = self.candidates.len(),
            installed = self.candidates.iter().filter(|c| c.installed).count(),
            "Candidates refreshed"
        );

        &self.candidates
    }

    /// Candidates as of the last refresh, in manifest order
    pub fn list_candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Look up a candidate by name
    pub fn candidate(&self, name: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.name == name)
    }

    /// Names of candidates not yet installed
    pub fn missing_names(&self) -> Vec<String> {
        self.candidates
            .iter()
            .filter(|c| !c.installed)
            .map(|c| c.name.clone())
            .collect()
    }

    /// Non-fatal problems from the last refresh
    pub fn warnings(&self) -> &[ImporterError] {
        &self.warnings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Add the named candidates
    ///
    /// Unknown names are rejected before anything runs. Installed names are
    /// skipped. The rest are added in manifest order, stopping at the first
    /// failure, after which the candidate list is refreshed. An empty
    /// selection does nothing.
    pub fn add<S, F>(&mut self, names: &[S], on_progress: F) -> Result<AddReport>
    where
        S: AsRef<str>,
        F: FnMut(&Progress<'_>),
    {
        if names.is_empty() {
            return Ok(AddReport::default());
        }

        let mut requested = HashSet::new();
        for name in names {
            let name = name.as_ref();
            if self.candidate(name).is_none() {
                return Err(ImporterError::UnknownCandidate(name.to_string()));
            }
            requested.insert(name);
        }

        let mut report = AddReport::default();
        let mut queued = HashSet::new();
        let mut queue = Vec::new();
        for candidate in &self.candidates {
            if !requested.contains(candidate.name.as_str()) || !queued.insert(candidate.name.as_str()) {
                continue;
            }
            if candidate.installed {
                tracing::info!(name = %candidate.name, "Already installed, skipping");
                report.skipped.push(candidate.name.clone());
            } else {
                queue.push(candidate);
            }
        }

        if queue.is_empty() {
            return Ok(report);
        }

        let run = add_sequentially(&self.backend, &self.layout, &queue, on_progress);
        report.added = run.added;
        report.failure = run.failure;

        tracing::info!(added = report.added_count(), requested = queue.len(), "Add finished");

        self.refresh();
        Ok(report)
    }

    /// Add every candidate that is not installed yet
    pub fn add_missing<F>(&mut self, on_progress: F) -> Result<AddReport>
    where
        F: FnMut(&Progress<'_>),
    {
        let names = self.missing_names();
        self.add(&names, on_progress)
    }
}

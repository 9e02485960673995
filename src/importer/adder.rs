//! Sequential, fail-fast submodule registration
//!
//! Every `git submodule add` touches `.gitmodules` and the index, so the
//! queue runs strictly in order, one candidate at a time. The first failure
//! stops the run; nothing that already succeeded is rolled back.

use super::Candidate;
use crate::config::Layout;
use crate::git::{failure_detail, SubmoduleBackend};
use crate::{ImporterError, Result};

/// Progress notification sent before each candidate is processed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress<'a> {
    /// Candidate about to be added
    pub name: &'a str,
    /// 0-based position in the queue
    pub index: usize,
    /// Queue length
    pub total: usize,
}

impl Progress<'_> {
    /// 1-based position, for display
    pub fn position(&self) -> usize {
        self.index + 1
    }

    /// Fraction of the queue already finished (0.0 for the first candidate)
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.index as f32 / self.total as f32
        }
    }
}

/// The candidate that stopped an add run
#[derive(Debug)]
pub struct AddFailure {
    pub name: String,
    pub error: ImporterError,
}

/// Outcome of an add run
#[derive(Debug, Default)]
pub struct AddReport {
    /// Names added, in order
    pub added: Vec<String>,
    /// Requested names dropped because they were already installed
    pub skipped: Vec<String>,
    /// Failure that halted the queue
    pub failure: Option<AddFailure>,
}

impl AddReport {
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Collapse into the added count, or the halting error
    pub fn into_result(self) -> Result<usize> {
        match self.failure {
            Some(failure) => Err(failure.error),
            None => Ok(self.added.len()),
        }
    }
}

/// Add `queue` in order, stopping at the first failure
///
/// `on_progress` fires once per candidate, before it is attempted.
pub fn add_sequentially<B, F>(
    backend: &B,
    layout: &Layout,
    queue: &[&Candidate],
    mut on_progress: F,
) -> AddReport
where
    B: SubmoduleBackend + ?Sized,
    F: FnMut(&Progress<'_>),
{
    let mut report = AddReport::default();
    let total = queue.len();

    for (index, candidate) in queue.iter().enumerate() {
        on_progress(&Progress {
            name: &candidate.name,
            index,
            total,
        });

        match add_one(backend, layout, candidate) {
            Ok(()) => {
                tracing::info!(name = %candidate.name, path = %candidate.path, "Submodule added");
                report.added.push(candidate.name.clone());
            }
            Err(error) => {
                tracing::error!(name = %candidate.name, error = %error, "Submodule add failed");
                report.failure = Some(AddFailure {
                    name: candidate.name.clone(),
                    error,
                });
                break;
            }
        }
    }

    if let Some(ref failure) = report.failure {
        let remaining = total - report.added.len() - 1;
        if remaining > 0 {
            tracing::warn!(failed = %failure.name, remaining, "Stopped before remaining submodules");
        }
    }

    report
}

fn add_one<B>(backend: &B, layout: &Layout, candidate: &Candidate) -> Result<()>
where
    B: SubmoduleBackend + ?Sized,
{
    let full_path = layout.full_path(&candidate.path);
    // symlink_metadata so a dangling link still counts as taken
    if std::fs::symlink_metadata(&full_path).is_ok() {
        return Err(ImporterError::PathAlreadyExists {
            name: candidate.name.clone(),
            path: full_path,
        });
    }

    backend
        .add(&candidate.url, &candidate.path)
        .map_err(|e| ImporterError::GitCommandFailed {
            name: candidate.name.clone(),
            stderr: failure_detail(&e),
        })
}

//! Recording backend for unit tests

use super::{InstalledSet, SubmoduleBackend};
use crate::{ImporterError, Result};
use gitsub::SubmoduleState;
use std::cell::RefCell;
use std::collections::HashSet;

/// Backend that records calls and registers successful adds
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub installed: RefCell<InstalledSet>,
    pub fail_urls: HashSet<String>,
    pub probe_error: Option<String>,
    pub add_calls: RefCell<Vec<(String, String)>>,
    pub probe_calls: RefCell<usize>,
}

impl RecordingBackend {
    pub fn with_installed(paths: &[&str]) -> Self {
        Self {
            installed: RefCell::new(paths.iter().map(|p| p.to_string()).collect()),
            ..Self::default()
        }
    }

    pub fn failing_on(mut self, url: &str) -> Self {
        self.fail_urls.insert(url.to_string());
        self
    }
}

impl SubmoduleBackend for RecordingBackend {
    fn installed(&self) -> Result<InstalledSet> {
        *self.probe_calls.borrow_mut() += 1;
        if let Some(ref msg) = self.probe_error {
            return Err(ImporterError::ProbeFailed(msg.clone()));
        }
        Ok(self.installed.borrow().clone())
    }

    fn add(&self, url: &str, path: &str) -> Result<()> {
        self.add_calls
            .borrow_mut()
            .push((url.to_string(), path.to_string()));
        if self.fail_urls.contains(url) {
            return Err(ImporterError::Git(gitsub::Error::CommandFailed {
                args: format!("submodule add -- {} {}", url, path),
                code: Some(128),
                stderr: format!("fatal: repository '{}' not found", url),
            }));
        }
        self.installed
            .borrow_mut()
            .insert(path, SubmoduleState::Current);
        Ok(())
    }
}

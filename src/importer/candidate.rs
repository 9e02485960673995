//! Candidates and reconciliation against the installed set

use crate::config::Layout;
use crate::git::InstalledSet;
use crate::manifest::ManifestEntry;
use gitsub::SubmoduleState;
use serde::Serialize;
use std::collections::HashMap;

/// A manifest entry paired with its install status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub url: String,
    pub name: String,
    /// Target path relative to the repository root
    pub path: String,
    pub installed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SubmoduleState>,
}

impl Candidate {
    /// Human-readable status label
    pub fn status_label(&self) -> &'static str {
        match self.state {
            None => "Not Installed",
            Some(SubmoduleState::Current) => "Installed",
            Some(SubmoduleState::Uninitialized) => "Installed (uninitialized)",
            Some(SubmoduleState::OutOfSync) => "Installed (modified)",
            Some(SubmoduleState::Conflict) => "Installed (conflict)",
        }
    }
}

/// Mark each manifest entry installed iff its target path is registered
///
/// Entries sharing a name share a target path; each is kept, and the repeat
/// is logged with both manifest lines.
pub fn reconcile(entries: &[ManifestEntry], installed: &InstalledSet, layout: &Layout) -> Vec<Candidate> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    entries
        .iter()
        .map(|entry| {
            if let Some(&first) = first_seen.get(entry.name.as_str()) {
                tracing::warn!(
                    name = %entry.name,
                    line = entry.line,
                    first_line = first,
                    "Repository name already listed in manifest"
                );
            } else {
                first_seen.insert(&entry.name, entry.line);
            }

            let path = layout.target_path(&entry.name);
            let state = installed.state(&path);
            Candidate {
                url: entry.url.clone(),
                name: entry.name.clone(),
                installed: state.is_some(),
                state,
                path,
            }
        })
        .collect()
}

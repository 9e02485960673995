//! Line-oriented manifest parser

use crate::{ImporterError, Result};
use std::path::Path;

/// A parsed manifest file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Entries in file order
    pub entries: Vec<ManifestEntry>,
}

/// One repository listed in the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Repository URL as written (trimmed)
    pub url: String,

    /// Repository name derived from the URL
    pub name: String,

    /// 1-based line number in the manifest
    pub line: usize,
}

impl Manifest {
    /// Parse manifest content
    pub fn parse(content: &str) -> Self {
        let mut entries = Vec::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match repository_name(line) {
                Some(name) => entries.push(ManifestEntry {
                    url: line.to_string(),
                    name,
                    line: idx + 1,
                }),
                None => {
                    tracing::warn!(line = idx + 1, url = %line, "Skipping manifest entry without a repository name");
                }
            }
        }

        Self { entries }
    }

    /// Parse a manifest from a file
    ///
    /// A missing file yields [`ImporterError::ManifestMissing`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ImporterError::ManifestMissing(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let manifest = Self::parse(&content);
        tracing::debug!(path = %path.display(), entries = manifest.entries.len(), "Manifest loaded");
        Ok(manifest)
    }

    /// Whether the manifest lists no repositories
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of repositories listed
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Derive a repository name from its URL
///
/// Takes the last `/`-separated segment and strips a trailing `.git`.
/// Returns `None` when nothing is left.
pub fn repository_name(url: &str) -> Option<String> {
    let last = url.trim().trim_end_matches('/').rsplit('/').next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const EXAMPLE_MANIFEST: &str = "\
# Morn libraries
https://github.com/org/MornLib.git

   # indented comment
  https://github.com/org/MornSound  
git@github.com:org/MornUI.git
";

    #[test]
    fn test_parse_manifest() {
        let manifest = Manifest::parse(EXAMPLE_MANIFEST);
        assert_eq!(manifest.len(), 3);

        assert_eq!(manifest.entries[0].url, "https://github.com/org/MornLib.git");
        assert_eq!(manifest.entries[0].name, "MornLib");
        assert_eq!(manifest.entries[0].line, 2);

        assert_eq!(manifest.entries[1].url, "https://github.com/org/MornSound");
        assert_eq!(manifest.entries[1].name, "MornSound");

        assert_eq!(manifest.entries[2].name, "MornUI");
        assert_eq!(manifest.entries[2].line, 6);
    }

    #[test]
    fn test_comments_and_blanks_only() {
        let manifest = Manifest::parse("\n# one\n   \n\t#two\n");
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_repository_name() {
        assert_eq!(repository_name("https://host/org/repo.git").as_deref(), Some("repo"));
        assert_eq!(repository_name("https://host/org/repo").as_deref(), Some("repo"));
        assert_eq!(repository_name("https://host/org/repo/").as_deref(), Some("repo"));
        assert_eq!(repository_name("plain.git").as_deref(), Some("plain"));
        // Only the suffix is stripped
        assert_eq!(repository_name("https://host/org/my.github.tools").as_deref(), Some("my.github.tools"));
        assert_eq!(repository_name("https://host/org/.git"), None);
        assert_eq!(repository_name("/"), None);
    }

    #[test]
    fn test_unnamed_entry_skipped() {
        let manifest = Manifest::parse("https://host/org/.git\nhttps://host/org/ok\n");
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.entries[0].name, "ok");
    }

    #[test]
    fn test_from_file_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("submodule.txt");
        match Manifest::from_file(&path) {
            Err(ImporterError::ManifestMissing(p)) => assert_eq!(p, path),
            other => panic!("expected ManifestMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("submodule.txt");
        std::fs::write(&path, EXAMPLE_MANIFEST).unwrap();

        let manifest = Manifest::from_file(&path).unwrap();
        assert_eq!(manifest.len(), 3);
    }
}

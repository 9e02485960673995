//! Integration tests for the submodule importer
//!
//! These tests drive the public API from manifest reading through adding,
//! with a scripted backend standing in for git. Tests that need a real git
//! executable are ignored by default.

use gitsub::SubmoduleState;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use submodule_importer::config::{ImporterConfig, Layout};
use submodule_importer::git::{InstalledSet, SubmoduleBackend};
use submodule_importer::{Importer, ImporterError, Progress, Result};
use tempfile::TempDir;

/// Backend that answers from memory and records every add
#[derive(Default)]
struct ScriptedBackend {
    installed: RefCell<InstalledSet>,
    failing: HashSet<String>,
    adds: RefCell<Vec<String>>,
}

impl ScriptedBackend {
    fn failing_on(name: &str) -> Self {
        let mut failing = HashSet::new();
        failing.insert(format!("https://example.com/org/{}.git", name));
        Self {
            failing,
            ..Self::default()
        }
    }
}

impl SubmoduleBackend for ScriptedBackend {
    fn installed(&self) -> Result<InstalledSet> {
        Ok(self.installed.borrow().clone())
    }

    fn add(&self, url: &str, path: &str) -> Result<()> {
        self.adds.borrow_mut().push(url.to_string());
        if self.failing.contains(url) {
            return Err(ImporterError::Git(gitsub::Error::CommandFailed {
                args: format!("submodule add -- {} {}", url, path),
                code: Some(128),
                stderr: "fatal: could not read from remote repository".to_string(),
            }));
        }
        self.installed
            .borrow_mut()
            .insert(path, SubmoduleState::Current);
        Ok(())
    }
}

/// Repository fixture with a manifest in the default location
fn repo_with_manifest(content: &str) -> (TempDir, Layout) {
    let repo = TempDir::new().unwrap();
    let layout = ImporterConfig::default().layout(repo.path());
    fs::create_dir_all(layout.manifest.parent().unwrap()).unwrap();
    fs::write(&layout.manifest, content).unwrap();
    (repo, layout)
}

const THREE: &str = "\
https://example.com/org/one.git
https://example.com/org/two.git
https://example.com/org/three.git
";

mod manifest_tests {
    use super::*;

    #[test]
    fn test_comments_and_blanks_never_produce_candidates() {
        let (_repo, layout) = repo_with_manifest(
            "# header\n\n   \n  # indented\nhttps://example.com/org/only.git\n#https://example.com/org/commented.git\n",
        );
        let importer = Importer::open(layout, ScriptedBackend::default());

        let names: Vec<_> = importer
            .list_candidates()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["only"]);
    }

    #[test]
    fn test_name_derivation_with_and_without_suffix() {
        let (_repo, layout) =
            repo_with_manifest("https://host/org/repo.git\nhttps://host/org/repo\n");
        let importer = Importer::open(layout, ScriptedBackend::default());

        let candidates = importer.list_candidates();
        assert_eq!(candidates[0].name, "repo");
        assert_eq!(candidates[1].name, "repo");
        assert_eq!(candidates[0].path, candidates[1].path);
    }

    #[test]
    fn test_empty_manifest_warns() {
        let (_repo, layout) = repo_with_manifest("# nothing yet\n");
        let importer = Importer::open(layout, ScriptedBackend::default());

        assert!(importer.list_candidates().is_empty());
        assert!(matches!(
            importer.warnings(),
            [ImporterError::ManifestMissing(_)]
        ));
    }
}

mod reconcile_tests {
    use super::*;

    #[test]
    fn test_probe_line_marks_candidate_installed() {
        let (_repo, layout) = repo_with_manifest("https://example.com/org/foo.git\n");
        let backend = ScriptedBackend::default();
        *backend.installed.borrow_mut() = InstalledSet::from_statuses(
            gitsub::parse_submodule_status(" abcdef1 Assets/_Morn/foo (heads/main)\n"),
        );

        let importer = Importer::open(layout, backend);
        let foo = importer.candidate("foo").unwrap();
        assert!(foo.installed);
        assert_eq!(foo.state, Some(SubmoduleState::Current));
    }

    #[test]
    fn test_prefixed_status_lines_count_as_installed() {
        let (_repo, layout) = repo_with_manifest(THREE);
        let backend = ScriptedBackend::default();
        *backend.installed.borrow_mut() =
            InstalledSet::from_statuses(gitsub::parse_submodule_status(
                "-1111111 Assets/_Morn/one\n+2222222 Assets/_Morn/two (v1)\nU3333333 Assets/_Morn/three\n",
            ));

        let importer = Importer::open(layout, backend);
        let states: Vec<_> = importer
            .list_candidates()
            .iter()
            .map(|c| (c.installed, c.state))
            .collect();
        assert_eq!(
            states,
            vec![
                (true, Some(SubmoduleState::Uninitialized)),
                (true, Some(SubmoduleState::OutOfSync)),
                (true, Some(SubmoduleState::Conflict)),
            ]
        );
    }
}

mod adder_tests {
    use super::*;

    #[test]
    fn test_second_failure_stops_third() {
        let (_repo, layout) = repo_with_manifest(THREE);
        let mut importer = Importer::open(layout, ScriptedBackend::failing_on("two"));

        let mut progress = Vec::new();
        let report = importer
            .add(&["one", "two", "three"], |p: &Progress<'_>| {
                progress.push((p.name.to_string(), p.fraction()))
            })
            .unwrap();

        assert_eq!(report.added_count(), 1);
        assert_eq!(report.added, vec!["one"]);
        assert_eq!(
            *importer.backend().adds.borrow(),
            vec![
                "https://example.com/org/one.git".to_string(),
                "https://example.com/org/two.git".to_string()
            ]
        );
        assert_eq!(progress.len(), 2);
        assert_eq!(progress[1].0, "two");

        let failure = report.failure.unwrap();
        assert_eq!(failure.name, "two");
        assert!(matches!(
            failure.error,
            ImporterError::GitCommandFailed { ref stderr, .. } if stderr.contains("could not read")
        ));

        // Refreshed after the run
        assert!(importer.candidate("one").unwrap().installed);
        assert!(!importer.candidate("three").unwrap().installed);
    }

    #[test]
    fn test_existing_directory_halts_before_git() {
        let (repo, layout) = repo_with_manifest(THREE);
        fs::create_dir_all(repo.path().join("Assets/_Morn/one")).unwrap();
        let mut importer = Importer::open(layout, ScriptedBackend::default());

        let report = importer.add(&["one", "two"], |_| {}).unwrap();

        assert_eq!(report.added_count(), 0);
        assert!(importer.backend().adds.borrow().is_empty());
        match report.failure.map(|f| f.error) {
            Some(ImporterError::PathAlreadyExists { name, path }) => {
                assert_eq!(name, "one");
                assert_eq!(path, repo.path().join("Assets/_Morn/one"));
            }
            other => panic!("expected PathAlreadyExists, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_selection_is_noop() {
        let (_repo, layout) = repo_with_manifest(THREE);
        let mut importer = Importer::open(layout, ScriptedBackend::default());
        let nothing: Vec<String> = Vec::new();

        let report = importer.add(&nothing, |_| panic!("no progress expected")).unwrap();
        assert_eq!(report.into_result().unwrap(), 0);
        assert!(importer.backend().adds.borrow().is_empty());
    }

    #[test]
    fn test_add_missing_twice_second_run_empty() {
        let (_repo, layout) = repo_with_manifest(THREE);
        let mut importer = Importer::open(layout, ScriptedBackend::default());

        let first = importer.add_missing(|_| {}).unwrap();
        assert_eq!(first.added, vec!["one", "two", "three"]);

        let second = importer.add_missing(|_| panic!("no progress expected")).unwrap();
        assert!(second.added.is_empty() && second.skipped.is_empty() && second.is_success());
        assert_eq!(importer.backend().adds.borrow().len(), 3);
    }

    #[test]
    fn test_refresh_after_add_reflects_install() {
        let (_repo, layout) = repo_with_manifest(THREE);
        let mut importer = Importer::open(layout, ScriptedBackend::default());
        assert!(!importer.candidate("three").unwrap().installed);

        importer.add(&["three"], |_| {}).unwrap().into_result().unwrap();
        importer.refresh();

        assert!(importer.candidate("three").unwrap().installed);
        assert_eq!(importer.missing_names(), vec!["one", "two"]);
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_custom_layout_from_repo_config() {
        let repo = TempDir::new().unwrap();
        let config = ImporterConfig {
            submodules_root: "vendor".to_string(),
            manifest: "submodules.txt".into(),
            ..ImporterConfig::default()
        };
        config.save(ImporterConfig::repo_path(repo.path())).unwrap();
        fs::write(repo.path().join("submodules.txt"), "https://example.com/org/lib.git\n").unwrap();

        let (loaded, _) = ImporterConfig::discover(repo.path(), None).unwrap();
        let importer = Importer::open(loaded.layout(repo.path()), ScriptedBackend::default());

        assert_eq!(importer.list_candidates()[0].path, "vendor/lib");
    }
}

/// End-to-end against the git executable
mod git_tests {
    use super::*;
    use submodule_importer::git::GitBackend;

    fn git(dir: &Path, args: &[&str]) {
        gitsub::Git::with_workdir(dir).run(args).unwrap();
    }

    fn init_repo(dir: &Path) {
        git(dir, &["init", "--quiet"]);
        git(dir, &["config", "user.email", "test@example.com"]);
        git(dir, &["config", "user.name", "Test"]);
    }

    #[test]
    #[ignore]
    fn test_add_local_submodule() {
        let upstream = TempDir::new().unwrap();
        init_repo(upstream.path());
        fs::write(upstream.path().join("README.md"), "lib\n").unwrap();
        git(upstream.path(), &["add", "README.md"]);
        git(upstream.path(), &["commit", "--quiet", "-m", "init"]);

        let (repo, layout) = repo_with_manifest(&format!("{}\n", upstream.path().display()));
        init_repo(repo.path());

        let config = ImporterConfig {
            git_flags: vec!["-c".to_string(), "protocol.file.allow=always".to_string()],
            ..ImporterConfig::default()
        };
        let backend = GitBackend::new(config.git(repo.path()));
        let mut importer = Importer::open(layout, backend);

        let name = importer.list_candidates()[0].name.clone();
        assert!(!importer.list_candidates()[0].installed);

        let report = importer.add(&[name.as_str()], |_| {}).unwrap();
        assert!(report.is_success(), "{:?}", report.failure);
        assert!(importer.candidate(&name).unwrap().installed);
        assert!(repo.path().join(".gitmodules").exists());
    }
}

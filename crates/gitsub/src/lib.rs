//! git submodule wrapper for Rust
//!
//! A typed interface to the subset of the `git` CLI needed to inspect and
//! register submodules.
//!
//! # Example
//!
//! ```no_run
//! use gitsub::Git;
//!
//! let git = Git::with_workdir("/path/to/repo");
//!
//! // Registered submodules
//! for entry in git.submodule_status()? {
//!     println!("{} {}", entry.state, entry.path);
//! }
//!
//! // Register a new one
//! git.submodule_add("https://github.com/org/lib.git", "vendor/lib")?;
//! # Ok::<(), gitsub::Error>(())
//! ```

mod status;

pub use status::{parse_submodule_status, SubmoduleState, SubmoduleStatus};

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Errors that can occur when driving git
#[derive(Error, Debug)]
pub enum Error {
    #[error("git is not installed or not in PATH")]
    NotInstalled,

    #[error("git {args} exited with {}: {stderr}", exit_label(.code))]
    CommandFailed {
        args: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "signal".to_string(),
    }
}

/// Result type for git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Output from a git command that exited with status 0
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Get combined stdout and stderr output
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// git CLI wrapper
#[derive(Debug, Clone)]
pub struct Git {
    /// Program to invoke
    program: PathBuf,
    /// Working directory
    workdir: Option<PathBuf>,
    /// Global flags placed before every subcommand (e.g. `-c key=value`)
    global_flags: Vec<String>,
}

impl Default for Git {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
            workdir: None,
            global_flags: Vec::new(),
        }
    }
}

impl Git {
    /// Create a new Git instance, failing if git cannot be launched
    pub fn new() -> Result<Self> {
        let git = Self::default();
        if !git.is_available() {
            return Err(Error::NotInstalled);
        }
        Ok(git)
    }

    /// Create with a specific working directory
    pub fn with_workdir(path: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(path.into()),
            ..Self::default()
        }
    }

    /// Use a different git executable
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Set global flags to pass to all git commands
    pub fn with_global_flags(mut self, flags: Vec<String>) -> Self {
        self.global_flags = flags;
        self
    }

    /// Working directory commands run in, if set
    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }

    /// Check if git is available
    pub fn is_available(&self) -> bool {
        self.run_command(&["--version"]).is_ok()
    }

    // --- Submodules ---

    /// List registered submodules (`git submodule status`)
    pub fn submodule_status(&self) -> Result<Vec<SubmoduleStatus>> {
        let output = self.run_command(&["submodule", "status"])?;
        Ok(parse_submodule_status(&output.stdout))
    }

    /// Register a submodule (`git submodule add -- <url> <path>`)
    ///
    /// `path` is relative to the working directory.
    pub fn submodule_add(&self, url: &str, path: &str) -> Result<CommandOutput> {
        self.run_command(&["submodule", "add", "--", url, path])
    }

    // --- Raw command execution ---

    /// Run an arbitrary git command
    pub fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        self.run_command(args)
    }

    // --- Private helpers ---

    fn run_command(&self, args: &[&str]) -> Result<CommandOutput> {
        let mut cmd = Command::new(&self.program);

        for flag in &self.global_flags {
            cmd.arg(flag);
        }

        cmd.args(args);

        if let Some(ref dir) = self.workdir {
            cmd.current_dir(dir);
        }

        tracing::debug!(program = %self.program.display(), args = ?args, "Running git");

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotInstalled
            } else {
                Error::Io(e)
            }
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(Error::CommandFailed {
                args: args.join(" "),
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(CommandOutput {
            code: output.status.code(),
            stdout,
            stderr,
        })
    }
}

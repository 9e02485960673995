//! submodule-importer - add git submodules listed in a manifest
//!
//! Reads a plain-text manifest of repository URLs, checks which of them are
//! already registered as submodules, and runs `git submodule add` for the
//! ones the operator picks, one at a time, stopping at the first failure.
//!
//! # Architecture
//!
//! - **manifest**: manifest file parsing and repository name derivation
//! - **git**: backend seam over the git CLI (`gitsub`)
//! - **importer**: reconciliation, the sequential adder, and the [`Importer`] facade
//! - **config**: optional YAML configuration and validation
//! - **logging** / **style**: tracing setup and terminal output helpers

pub mod config;
pub mod error;
pub mod git;
pub mod importer;
pub mod logging;
pub mod manifest;
pub mod style;

// Re-exports
pub use error::{ImporterError, Result};
pub use importer::{AddReport, Candidate, Importer, Progress};

//! Manifest parsing for submodule candidates
//!
//! The manifest is a plain text file with one repository URL per line.
//! Blank lines and lines starting with `#` are ignored.
//!
//! # Example Manifest
//!
//! ```text
//! # Shared runtime libraries
//! https://github.com/org/MornLib.git
//! https://github.com/org/MornSound
//!
//! git@github.com:org/MornUI.git
//! ```

mod parser;

pub use parser::{repository_name, Manifest, ManifestEntry};

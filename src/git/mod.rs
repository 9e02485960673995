//! git access for the importer
//!
//! The importer talks to git through [`SubmoduleBackend`]; [`GitBackend`]
//! implements it on top of the `gitsub` CLI wrapper.

mod backend;

pub use backend::{GitBackend, InstalledSet, SubmoduleBackend};
pub(crate) use backend::failure_detail;

#[cfg(test)]
pub(crate) mod testing;

//! CLI command definitions
//!
//! All CLI structs and subcommand enums are defined here.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// smi - add git submodules listed in a manifest
#[derive(Parser, Debug)]
#[command(name = "smi")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Repository root (git runs here; defaults to the current directory)
    #[arg(short = 'C', long, global = true, env = "SMI_REPO")]
    pub repo: Option<PathBuf>,

    /// Path to config file (default: <repo>/.submodule-importer.yaml)
    #[arg(short, long, global = true, env = "SMI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Manifest file, overriding the configured one
    #[arg(short, long, global = true)]
    pub manifest: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Verbosity level handed to logging
    pub fn verbosity(&self) -> i8 {
        if self.quiet {
            -1
        } else {
            self.verbose.min(i8::MAX as u8) as i8
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List manifest entries with their install status
    List(ListArgs),

    /// Add submodules from the manifest
    Add(AddArgs),

    /// Write a default config file into the repository
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Config,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only show installed submodules
    #[arg(long, conflicts_with = "not_installed")]
    pub installed: bool,

    /// Only show submodules that are not installed
    #[arg(long)]
    pub not_installed: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Whether a candidate with this install status is shown
    pub fn shows(&self, installed: bool) -> bool {
        if self.installed {
            installed
        } else if self.not_installed {
            !installed
        } else {
            true
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Names of the submodules to add (as shown by `smi list`)
    pub names: Vec<String>,

    /// Add every submodule that is not installed
    #[arg(long, conflicts_with_all = ["names", "interactive"])]
    pub all: bool,

    /// Pick submodules from a checklist
    #[arg(short, long)]
    pub interactive: bool,
}

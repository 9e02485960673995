//! Parser for `git submodule status` output
//!
//! Each line has the shape `<marker><sha1> <path>[ (<describe>)]`, where the
//! marker is a single character:
//!
//! - ` ` checked out at the recorded commit
//! - `-` not initialized
//! - `+` checked-out commit differs from the one recorded in the index
//! - `U` merge conflicts
//!
//! Only the second whitespace-separated token (the path) is required; the
//! rest is best-effort.

use serde::Serialize;

/// State of a registered submodule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmoduleState {
    Current,
    Uninitialized,
    OutOfSync,
    Conflict,
}

impl SubmoduleState {
    fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '-' => Some(SubmoduleState::Uninitialized),
            '+' => Some(SubmoduleState::OutOfSync),
            'U' => Some(SubmoduleState::Conflict),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubmoduleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmoduleState::Current => write!(f, "current"),
            SubmoduleState::Uninitialized => write!(f, "uninitialized"),
            SubmoduleState::OutOfSync => write!(f, "out_of_sync"),
            SubmoduleState::Conflict => write!(f, "conflict"),
        }
    }
}

/// One line of `git submodule status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmoduleStatus {
    pub state: SubmoduleState,
    /// Commit hash without the state marker
    pub commit: String,
    /// Path relative to the repository root, as git prints it
    pub path: String,
    /// `git describe` output shown in parentheses, if any
    pub describe: Option<String>,
}

/// Parse the full stdout of `git submodule status`
///
/// Blank lines and lines with fewer than two tokens are skipped.
pub fn parse_submodule_status(output: &str) -> Vec<SubmoduleStatus> {
    output.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<SubmoduleStatus> {
    let mut tokens = line.split_whitespace();
    let head = tokens.next()?;
    let path = tokens.next()?;

    // A leading space is eaten by split_whitespace, so only explicit markers
    // survive on the hash token.
    let mut chars = head.chars();
    let (state, commit) = match chars.next().and_then(SubmoduleState::from_marker) {
        Some(state) => (state, chars.as_str()),
        None => (SubmoduleState::Current, head),
    };

    let rest: Vec<&str> = tokens.collect();
    let describe = if rest.is_empty() {
        None
    } else {
        let joined = rest.join(" ");
        Some(
            joined
                .trim_start_matches('(')
                .trim_end_matches(')')
                .to_string(),
        )
    };

    Some(SubmoduleStatus {
        state,
        commit: commit.to_string(),
        path: path.to_string(),
        describe,
    })
}

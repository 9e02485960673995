//! Terminal styling utilities
//!
//! Uses crossterm for cross-platform terminal colors.

use crate::importer::{Candidate, Progress};
use crossterm::style::{StyledContent, Stylize};

/// Width of the text progress bar
const BAR_WIDTH: usize = 24;

/// Install status colors
/// - installed: Green
/// - installed but dirty/uninitialized/conflicted: Yellow
/// - not installed: Dim
pub fn status_style(candidate: &Candidate) -> StyledContent<String> {
    let label = candidate.status_label().to_string();
    match candidate.state {
        None => label.dark_grey(),
        Some(gitsub::SubmoduleState::Current) => label.green(),
        Some(_) => label.yellow(),
    }
}

/// Status indicator (circle)
pub fn status_indicator(candidate: &Candidate) -> StyledContent<&'static str> {
    if candidate.installed {
        "●".green()
    } else {
        "○".dark_grey()
    }
}

/// Repository names
pub fn name(text: &str) -> StyledContent<String> {
    text.to_string().cyan()
}

/// Section headers
pub fn header(text: &str) -> StyledContent<String> {
    text.to_string().bold()
}

/// Dim/muted text
pub fn dim(text: &str) -> StyledContent<String> {
    text.to_string().dark_grey()
}

/// Success text
pub fn success(text: &str) -> StyledContent<String> {
    text.to_string().green()
}

/// Warning text
pub fn warning(text: &str) -> StyledContent<String> {
    text.to_string().yellow()
}

/// Error text
pub fn error(text: &str) -> StyledContent<String> {
    text.to_string().red()
}

/// Path styling
pub fn path(p: &str) -> StyledContent<String> {
    p.to_string().blue()
}

/// Count styling: dim for zero, green otherwise
pub fn count(n: usize) -> StyledContent<String> {
    if n == 0 {
        n.to_string().dark_grey()
    } else {
        n.to_string().green()
    }
}

/// `[#####...........]` bar for a fraction in 0.0..=1.0
pub fn progress_bar(fraction: f32) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// One progress line, e.g. `[######..] 2/4 Processing: foo`
pub fn progress_line(progress: &Progress<'_>) -> String {
    format!(
        "{} {}/{} Processing: {}",
        progress_bar(progress.fraction()),
        progress.position(),
        progress.total,
        name(progress.name)
    )
}

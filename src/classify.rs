//! Which history lines deserve a card
//!
//! Two cheap filters: `is_ignorable` throws away lines that should never
//! reach the pipeline, `is_tricky` decides whether a canonical command is
//! worth memorizing. Both are recall-oriented heuristics that tolerate
//! false positives.

/// Lines that never become cards: blanks, comments, and low-value
/// navigation commands.
pub fn is_ignorable(line: &str) -> bool {
    if line.starts_with('#') {
        return true;
    }
    if line.starts_with("cd ") || line.starts_with("ls") {
        return true;
    }
    line.split_whitespace().next().is_none()
}

/// A command qualifies for a card if it is long, composed, flag-heavy, or
/// carries a destructive flag.
pub fn is_tricky(cmd: &str) -> bool {
    let flags = cmd.matches(" -").count() + cmd.matches(" --").count();
    cmd.len() > 40
        || cmd.contains('|')
        || cmd.contains("&&")
        || flags >= 2
        || cmd.contains("-rf")
        || cmd.contains("--force")
}

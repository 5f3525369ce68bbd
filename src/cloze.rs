//! Cloze selection and tag derivation
//!
//! Picks the one token in a canonical command worth hiding: the part a
//! human actually forgets. Sub-commands beat long flags beat short flags
//! beat everything else; placeholders, paths, and hashes never make good
//! answers.

use crate::canon::{looks_like_big_number, looks_like_hash, looks_like_path, looks_like_url};

/// Sub-commands worth quizzing, keyed by command name. Extend by adding
/// entries, not by branching logic.
const PREFERRED_SUBCOMMANDS: &[(&str, &[&str])] = &[
    (
        "git",
        &[
            "rebase",
            "cherry-pick",
            "stash",
            "reset",
            "restore",
            "revert",
            "checkout",
            "commit",
            "fetch",
            "merge",
            "push",
            "pull",
        ],
    ),
    (
        "kubectl",
        &[
            "get",
            "describe",
            "apply",
            "delete",
            "logs",
            "exec",
            "rollout",
            "scale",
            "port-forward",
            "top",
        ],
    ),
    // ffmpeg is all flags; no sub-commands worth preferring
    ("ffmpeg", &[]),
];

/// Tools recognized for tagging when they lead the command.
const KNOWN_TOOLS: &[&str] = &["git", "kubectl", "ffmpeg", "docker", "grep", "awk", "sed"];

const BLANK: &str = "_____";
const HINT: &str = "Type the missing flag/subcommand";

fn preferred_for(cmd_name: &str) -> &'static [&'static str] {
    PREFERRED_SUBCOMMANDS
        .iter()
        .find(|(name, _)| *name == cmd_name)
        .map(|(_, subs)| *subs)
        .unwrap_or(&[])
}

/// A token that would make a useless answer: placeholders, paths, hashes,
/// masked numbers.
fn is_bad_answer_token(token: &str) -> bool {
    if token.is_empty() {
        return true;
    }
    if token.contains('<') && token.contains('>') {
        return true;
    }
    if token.contains('/') || token.starts_with('~') || token.starts_with('.') {
        return true;
    }
    if looks_like_url(token) || looks_like_path(token) || looks_like_hash(token) {
        return true;
    }
    looks_like_big_number(token)
}

/// Hide one token of a canonical command.
///
/// Returns `(prompt, answer, hint)`. An empty command yields three empty
/// strings; a command with no usable candidate falls back to hiding the
/// command name itself.
pub fn cloze(cmd: &str) -> (String, String, String) {
    let words: Vec<&str> = cmd.split_whitespace().collect();
    if words.is_empty() {
        return (String::new(), String::new(), String::new());
    }

    let mut candidates: Vec<usize> = Vec::new();

    // 1) preferred sub-commands for this tool
    let preferred = preferred_for(words[0]);
    for (i, w) in words.iter().enumerate().skip(1) {
        if preferred.contains(w) {
            candidates.push(i);
        }
    }
    // 2) long flags
    for (i, w) in words.iter().enumerate() {
        if w.starts_with("--") {
            candidates.push(i);
        }
    }
    // 3) short flags
    for (i, w) in words.iter().enumerate() {
        if w.starts_with('-') && !w.starts_with("--") {
            candidates.push(i);
        }
    }
    // 4) fallback: the first static non-command token
    if candidates.is_empty() {
        if let Some(i) = (1..words.len()).find(|&i| !is_bad_answer_token(words[i])) {
            candidates.push(i);
        }
    }

    let idx = candidates
        .into_iter()
        .find(|&i| !is_bad_answer_token(words[i]))
        .unwrap_or(0);

    let answer = words[idx].to_string();
    let prompt = words
        .iter()
        .enumerate()
        .map(|(i, w)| if i == idx { BLANK } else { w })
        .collect::<Vec<_>>()
        .join(" ");
    (prompt, answer, HINT.to_string())
}

/// Tags for a canonical command: its name plus any recognized tool leading
/// one of its segments (`a && kubectl apply ...` tags kubectl). Order-
/// insensitive set, no duplicates.
pub fn derive_tags(cmd: &str) -> Vec<String> {
    let Some(cmd_name) = cmd.split_whitespace().next() else {
        return Vec::new();
    };
    let mut tags = vec![cmd_name.to_string()];
    let segments: Vec<&str> = cmd
        .split("&&")
        .flat_map(|s| s.split('|'))
        .map(str::trim)
        .collect();
    for tool in KNOWN_TOOLS {
        let leads = segments
            .iter()
            .any(|s| s.starts_with(&format!("{} ", tool)) || *s == *tool);
        if leads && !tags.iter().any(|t| t == tool) {
            tags.push(tool.to_string());
        }
    }
    tags
}

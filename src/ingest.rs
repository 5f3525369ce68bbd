//! History ingestion
//!
//! Reads raw shell history, pushes each line through scrub → filter →
//! canonicalize, and turns the survivors into candidate cards. Two history
//! formats are understood: plain one-line-per-command (bash) and the zsh
//! extended `: <epoch>:<duration>;<command>` form. Anything that fails to
//! parse as the extended form is treated as a plain command.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::canon::{canonicalize, command_id};
use crate::card::Card;
use crate::classify::{is_ignorable, is_tricky};
use crate::cloze::{cloze, derive_tags};
use crate::scrub::scrub;

lazy_static! {
    static ref ZSH_EXTENDED: Regex = Regex::new(r"^: (\d+):(\d+);").unwrap();
}

/// One executed command, as read from history. Ephemeral: consumed by card
/// generation, never persisted.
#[derive(Debug, Clone)]
pub struct CommandEvent {
    /// When the command ran; absent for history formats without timestamps.
    pub when: Option<DateTime<Utc>>,
    /// Canonical command text.
    pub command: String,
}

/// The history files we know how to read, filtered to the ones that exist.
pub fn default_history_files() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    [".zsh_history", ".bash_history"]
        .iter()
        .map(|name| home.join(name))
        .filter(|p| p.exists())
        .collect()
}

/// Split a raw history line into command text and optional timestamp.
fn parse_history_line(line: &str) -> (&str, Option<DateTime<Utc>>) {
    if let Some(caps) = ZSH_EXTENDED.captures(line) {
        let prefix_len = caps.get(0).map(|m| m.end()).unwrap_or(0);
        let cmd = line[prefix_len..].trim();
        let when = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .and_then(|epoch| Utc.timestamp_opt(epoch, 0).single());
        return (cmd, when);
    }
    (line, None)
}

/// Read every configured history file into deduplicated command events.
///
/// Each line is trimmed, scrubbed, dropped if ignorable, and canonicalized;
/// duplicate canonical commands keep the most recent timestamp. Events come
/// back newest first (timestampless ones last). Unreadable files are
/// skipped: a missing bash history is normal on a zsh machine.
pub fn parse_history<P: AsRef<Path>>(paths: &[P]) -> Vec<CommandEvent> {
    let mut events: Vec<CommandEvent> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for path in paths {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        let text = String::from_utf8_lossy(&bytes);
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (raw, when) = parse_history_line(line);
            let raw = scrub(raw);
            if is_ignorable(&raw) {
                continue;
            }
            let canon = canonicalize(&raw);

            match index.get(&canon) {
                Some(&i) => {
                    if when > events[i].when {
                        events[i].when = when;
                    }
                }
                None => {
                    index.insert(canon.clone(), events.len());
                    events.push(CommandEvent {
                        when,
                        command: canon,
                    });
                }
            }
        }
    }

    // newest first; file order breaks ties
    events.sort_by(|a, b| b.when.cmp(&a.when));
    events
}

/// Turn tricky command events into candidate cards.
///
/// A command whose id matches an existing card bumps that card's
/// `seen_count` instead of producing a duplicate; within one batch the
/// first occurrence wins. New cards start in box 1, due immediately.
pub fn generate_cards(
    events: &[CommandEvent],
    existing: &mut [Card],
    now: DateTime<Utc>,
) -> Vec<Card> {
    let mut out: Vec<Card> = Vec::new();
    let mut batch_ids: HashSet<String> = HashSet::new();

    for ev in events {
        if !is_tricky(&ev.command) {
            continue;
        }

        let canon = canonicalize(&ev.command);
        let id = command_id(&canon);

        if batch_ids.contains(&id) {
            continue;
        }
        if let Some(card) = existing.iter_mut().find(|c| c.id == id) {
            card.seen_count += 1;
            continue;
        }

        let (prompt, answer, hint) = cloze(&canon);
        let tags = derive_tags(&canon);
        out.push(Card {
            id: id.clone(),
            prompt,
            answer,
            hint,
            command: canon,
            tags,
            box_level: 1,
            next_due: now,
            last_reviewed: None,
            streak: 0,
            times_seen: 0,
            seen_count: 1,
        });
        batch_ids.insert(id);
    }
    out
}

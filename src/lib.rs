//! Memento - Shell history for your brain
//!
//! Turns the tricky commands buried in your bash/zsh history into
//! spaced-repetition flashcards, then drills you on them with a Leitner
//! box scheduler.
//!
//! # Pipeline
//!
//! | Stage | Purpose |
//! |-------|---------|
//! | scrub | redact secrets, emails, long hex blobs |
//! | canonicalize | mask volatile values into placeholders |
//! | classify | keep only commands worth memorizing |
//! | cloze | hide the one token you actually forget |
//! | merge | dedup against the persisted collection |
//! | srs | promote/demote across five Leitner boxes |
//!
//! # Quick Start
//!
//! ```
//! use memento::{canonicalize, command_id, cloze, is_tricky};
//!
//! let canon = canonicalize("git rebase -i HEAD~5 --autosquash");
//! assert!(is_tricky(&canon));
//!
//! let (prompt, answer, _hint) = cloze(&canon);
//! assert_eq!(answer, "rebase");
//! assert!(prompt.contains("_____"));
//!
//! // identity is a content hash of the canonical text
//! let id = command_id(&canon);
//! assert_eq!(id, command_id(&canonicalize(&canon)));
//! ```

pub mod canon;
pub mod card;
pub mod classify;
pub mod cloze;
pub mod config;
pub mod ingest;
pub mod scrub;
pub mod srs;
pub mod store;
pub mod tui;

pub use canon::{canonicalize, command_id};
pub use card::{merge_cards, Card};
pub use classify::{is_ignorable, is_tricky};
pub use cloze::{cloze, derive_tags};
pub use config::Config;
pub use ingest::{default_history_files, generate_cards, parse_history, CommandEvent};
pub use scrub::scrub;
pub use srs::{check_answer, due_cards, grade, BoxIntervals};
pub use store::{load_cards, save_cards, save_progress, StoreError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify core types are re-exported from crate root
        let _ = BoxIntervals::DEFAULT_DAYS;
    }
}

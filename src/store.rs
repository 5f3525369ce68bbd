//! Card persistence
//!
//! The collection lives as a pretty-printed JSON array in the XDG data
//! directory (`~/.local/share/memento/cards.json`), overridable with the
//! `MEMENTO_DATA_DIR` environment variable. The file is the single source
//! of truth; the core works on the in-memory copy this module hands out.

use std::fs;
use std::path::PathBuf;

use crate::card::Card;

pub const DATA_DIR_ENV: &str = "MEMENTO_DATA_DIR";
const CARDS_FILE: &str = "cards.json";

/// Error type for store operations
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    NoDataDir,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Json(e) => write!(f, "malformed card collection: {}", e),
            StoreError::NoDataDir => write!(f, "cannot determine a data directory"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|d| d.join("memento"))
        .ok_or(StoreError::NoDataDir)
}

/// Full path of the cards file, creating the data directory if needed.
pub fn cards_path() -> Result<PathBuf> {
    let dir = data_dir()?;
    fs::create_dir_all(&dir)?;
    Ok(dir.join(CARDS_FILE))
}

/// Load the persisted collection. A missing file is an empty collection;
/// an unreadable or malformed one is an error.
pub fn load_cards() -> Result<Vec<Card>> {
    let path = cards_path()?;
    let bytes = match fs::read(&path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_slice(&bytes)?)
}

/// Persist the whole collection. Writes to a temp file in the same
/// directory, then renames over the target, so an interrupted save leaves
/// the previous state intact.
pub fn save_cards(cards: &[Card]) -> Result<()> {
    let path = cards_path()?;
    let json = serde_json::to_vec_pretty(cards)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, &path)?;
    Ok(())
}

/// Persist a single graded card: reload, replace by id (append if the card
/// is somehow absent), save. Called after every grading event so an
/// interrupted session loses at most the in-progress card.
pub fn save_progress(updated: &Card) -> Result<()> {
    let mut cards = load_cards()?;
    match cards.iter_mut().find(|c| c.id == updated.id) {
        Some(card) => *card = updated.clone(),
        None => cards.push(updated.clone()),
    }
    save_cards(&cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::test_card;

    // Every test keeps its own data dir. MEMENTO_DATA_DIR is process-wide,
    // so these tests hold a lock to avoid clobbering each other.
    use std::sync::Mutex;
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_temp_data_dir<T>(f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(DATA_DIR_ENV, dir.path());
        let out = f();
        std::env::remove_var(DATA_DIR_ENV);
        out
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        with_temp_data_dir(|| {
            assert!(load_cards().unwrap().is_empty());
        });
    }

    #[test]
    fn test_save_and_load_round_trip() {
        with_temp_data_dir(|| {
            let cards = vec![test_card("a"), test_card("b")];
            save_cards(&cards).unwrap();
            let loaded = load_cards().unwrap();
            assert_eq!(loaded, cards);
        });
    }

    #[test]
    fn test_malformed_collection_is_an_error() {
        with_temp_data_dir(|| {
            let path = cards_path().unwrap();
            std::fs::write(&path, b"not json").unwrap();
            assert!(matches!(load_cards(), Err(StoreError::Json(_))));
        });
    }

    #[test]
    fn test_save_progress_replaces_by_id() {
        with_temp_data_dir(|| {
            let cards = vec![test_card("a"), test_card("b")];
            save_cards(&cards).unwrap();

            let mut graded = cards[1].clone();
            graded.box_level = 3;
            graded.streak = 2;
            save_progress(&graded).unwrap();

            let loaded = load_cards().unwrap();
            assert_eq!(loaded.len(), 2);
            assert_eq!(loaded[0], cards[0]);
            assert_eq!(loaded[1].box_level, 3);
        });
    }

    #[test]
    fn test_save_progress_appends_unknown_card() {
        with_temp_data_dir(|| {
            save_cards(&[test_card("a")]).unwrap();
            save_progress(&test_card("z")).unwrap();
            let loaded = load_cards().unwrap();
            assert_eq!(loaded.len(), 2);
            assert_eq!(loaded[1].id, "z");
        });
    }
}

//! The durable study unit and collection merging

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single flashcard generated from a shell command.
///
/// `id` is the hex SHA-256 of the canonical command text: two cards with
/// equal canonical text always share an id, which is the dedup/merge key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Stable hash of the canonical command.
    pub id: String,
    /// Canonical command with one token blanked out.
    pub prompt: String,
    /// The hidden token, verbatim.
    pub answer: String,
    pub hint: String,
    /// The canonical (scrubbed, masked) command, kept for display/tagging.
    pub command: String,
    pub tags: Vec<String>,
    /// Leitner box, always in 1..=5.
    #[serde(rename = "box")]
    pub box_level: u8,
    pub next_due: DateTime<Utc>,
    #[serde(default)]
    pub last_reviewed: Option<DateTime<Utc>>,
    /// Consecutive correct answers; reset on any miss.
    #[serde(default)]
    pub streak: u32,
    /// Times this card has been reviewed.
    #[serde(default)]
    pub times_seen: u32,
    /// Times the underlying command recurred in history.
    #[serde(default)]
    pub seen_count: u32,
}

impl Card {
    pub fn due(&self, now: DateTime<Utc>) -> bool {
        now >= self.next_due
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.box_level, self.prompt)
    }
}

/// Merge freshly generated cards into a persisted collection.
///
/// Matching ids union their tag sets and fill prompt/answer/hint only where
/// the existing card is blank; manual edits are never overwritten and review
/// state (box, streak, due date) is untouched. Unknown ids append at the
/// end in their incoming order. Idempotent.
pub fn merge_cards(mut existing: Vec<Card>, incoming: Vec<Card>) -> Vec<Card> {
    for card in incoming {
        match existing.iter_mut().find(|c| c.id == card.id) {
            Some(found) => {
                for tag in &card.tags {
                    if !found.tags.contains(tag) {
                        found.tags.push(tag.clone());
                    }
                }
                if found.prompt.is_empty() {
                    found.prompt = card.prompt;
                }
                if found.answer.is_empty() {
                    found.answer = card.answer;
                }
                if found.hint.is_empty() {
                    found.hint = card.hint;
                }
            }
            None => existing.push(card),
        }
    }
    existing
}

#[cfg(test)]
pub(crate) fn test_card(id: &str) -> Card {
    Card {
        id: id.to_string(),
        prompt: format!("{} _____", id),
        answer: "answer".to_string(),
        hint: "hint".to_string(),
        command: id.to_string(),
        tags: vec![id.to_string()],
        box_level: 1,
        next_due: Utc::now(),
        last_reviewed: None,
        streak: 0,
        times_seen: 0,
        seen_count: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_merge_appends_new_cards_in_order() {
        let merged = merge_cards(
            vec![test_card("a")],
            vec![test_card("b"), test_card("c")],
        );
        let ids: Vec<&str> = merged.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_merge_unions_tags() {
        let mut incoming = test_card("a");
        incoming.tags = vec!["a".to_string(), "git".to_string()];
        let merged = merge_cards(vec![test_card("a")], vec![incoming]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].tags, vec!["a".to_string(), "git".to_string()]);
    }

    #[test]
    fn test_merge_fills_only_blank_fields() {
        let mut old = test_card("a");
        old.prompt = "hand-edited".to_string();
        old.hint = String::new();
        let merged = merge_cards(vec![old], vec![test_card("a")]);
        assert_eq!(merged[0].prompt, "hand-edited");
        assert_eq!(merged[0].hint, "hint");
    }

    #[test]
    fn test_merge_preserves_review_state() {
        let mut old = test_card("a");
        old.box_level = 4;
        old.streak = 7;
        let merged = merge_cards(vec![old], vec![test_card("a")]);
        assert_eq!(merged[0].box_level, 4);
        assert_eq!(merged[0].streak, 7);
    }

    #[test]
    fn test_card_json_field_names() {
        let json = serde_json::to_value(test_card("a")).unwrap();
        assert!(json.get("box").is_some());
        assert!(json.get("next_due").is_some());
        assert!(json.get("seen_count").is_some());
    }

    proptest! {
        #[test]
        fn prop_merge_idempotent(existing_ids in proptest::collection::vec("[a-d]", 0..6),
                                 incoming_ids in proptest::collection::vec("[a-f]", 0..6)) {
            let existing: Vec<Card> = existing_ids.iter().map(|s| test_card(s)).collect();
            let incoming: Vec<Card> = incoming_ids.iter().map(|s| test_card(s)).collect();
            let once = merge_cards(existing, incoming.clone());
            let twice = merge_cards(once.clone(), incoming);
            prop_assert_eq!(once, twice);
        }
    }
}

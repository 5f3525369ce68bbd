//! Leitner box scheduler
//!
//! Five boxes, fixed intervals, no terminal state: a correct answer
//! promotes (capped at box 5), a miss demotes (floored at box 1), and a
//! card cycles indefinitely. The interval table is a value the caller
//! injects, so alternate spacing policies never touch the state machine.

use chrono::{DateTime, Duration, Utc};

use crate::card::Card;

/// Review intervals per box, boxes 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxIntervals([i64; 5]);

impl BoxIntervals {
    /// Box 1 is due immediately; then 1, 3, 7, 21 days.
    pub const DEFAULT_DAYS: [i64; 5] = [0, 1, 3, 7, 21];

    pub fn from_days(days: [i64; 5]) -> Self {
        Self(days)
    }

    /// Interval for a box. Out-of-range boxes clamp to the nearest edge,
    /// so a malformed persisted card still schedules sanely.
    pub fn interval(&self, box_level: u8) -> Duration {
        let idx = (box_level.clamp(1, 5) - 1) as usize;
        Duration::days(self.0[idx])
    }
}

impl Default for BoxIntervals {
    fn default() -> Self {
        Self(Self::DEFAULT_DAYS)
    }
}

/// Apply one grading event to a card.
///
/// Records the review, moves the box, updates the streak, and schedules the
/// next due date from the box *after* the transition.
pub fn grade(card: &mut Card, correct: bool, now: DateTime<Utc>, intervals: BoxIntervals) {
    card.last_reviewed = Some(now);
    card.times_seen += 1;
    if correct {
        card.box_level = (card.box_level + 1).min(5);
        card.streak += 1;
    } else {
        card.box_level = card.box_level.saturating_sub(1).max(1);
        card.streak = 0;
    }
    card.next_due = now + intervals.interval(card.box_level);
}

/// All cards due at `now`, most frequently seen first; ties keep their
/// original relative order.
pub fn due_cards(cards: &[Card], now: DateTime<Utc>) -> Vec<Card> {
    let mut due: Vec<Card> = cards.iter().filter(|c| c.due(now)).cloned().collect();
    due.sort_by(|a, b| b.seen_count.cmp(&a.seen_count));
    due
}

/// Tolerant answer check: trimmed, case-insensitive, and a partial recall
/// (either string containing the other) counts. An empty submission is
/// never correct.
pub fn check_answer(card: &Card, submitted: &str) -> bool {
    let submitted = submitted.trim().to_lowercase();
    if submitted.is_empty() {
        return false;
    }
    let expected = card.answer.trim().to_lowercase();
    expected == submitted || expected.contains(&submitted) || submitted.contains(&expected)
}

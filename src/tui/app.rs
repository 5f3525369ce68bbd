//! Application state for the review TUI

use chrono::Utc;

use crate::card::Card;
use crate::srs::{check_answer, due_cards, grade, BoxIntervals};

/// Where the user is with the current card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Typing an answer.
    Answering,
    /// Answer graded; waiting for next/quit.
    Checked { correct: bool },
}

/// Main application state
pub struct App {
    /// Due cards for this session, in review order.
    pub cards: Vec<Card>,
    pub idx: usize,
    pub input: String,
    pub phase: Phase,
    pub feedback: Option<String>,
    intervals: BoxIntervals,

    // Card graded but not yet persisted; the event loop drains this.
    pending_save: Option<Card>,
}

impl App {
    pub fn new(all_cards: &[Card], intervals: BoxIntervals) -> Self {
        Self {
            cards: due_cards(all_cards, Utc::now()),
            idx: 0,
            input: String::new(),
            phase: Phase::Answering,
            feedback: None,
            intervals,
            pending_save: None,
        }
    }

    pub fn current(&self) -> Option<&Card> {
        self.cards.get(self.idx)
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn progress(&self) -> f64 {
        if self.cards.is_empty() {
            return 0.0;
        }
        self.idx as f64 / self.cards.len() as f64
    }

    /// Grade the current card against the typed answer and queue it for
    /// persistence.
    pub fn submit(&mut self) {
        if self.phase != Phase::Answering {
            return;
        }
        let Some(card) = self.cards.get_mut(self.idx) else {
            return;
        };
        let correct = check_answer(card, &self.input);
        grade(card, correct, Utc::now(), self.intervals);

        self.feedback = Some(if correct {
            format!("✔ Correct → {}", card.answer)
        } else if card.hint.is_empty() {
            format!("✘ Nope. Correct: {}", card.answer)
        } else {
            format!("✘ Nope. Correct: {}  ( hint: {} )", card.answer, card.hint)
        });
        self.phase = Phase::Checked { correct };
        self.pending_save = Some(card.clone());
    }

    /// Advance to the next card. Returns false when the session is over.
    pub fn next_card(&mut self) -> bool {
        if self.idx + 1 >= self.cards.len() {
            return false;
        }
        self.idx += 1;
        self.input.clear();
        self.feedback = None;
        self.phase = Phase::Answering;
        true
    }

    pub fn take_pending_save(&mut self) -> Option<Card> {
        self.pending_save.take()
    }
}

//! Terminal review loop
//!
//! Shows one due card at a time: the cloze prompt, a text input, a progress
//! gauge. Enter checks the answer and grades the card; the graded card is
//! persisted immediately, so interrupting a session loses at most the card
//! being typed.

pub mod app;
pub mod events;
pub mod ui;

use std::io;

use crossterm::{
    event::{read, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::card::Card;
use crate::srs::BoxIntervals;
use crate::store;
use app::App;
use events::handle_event;

/// Run a review session over the due subset of `cards`.
pub fn run(cards: &[Card], intervals: BoxIntervals) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app_inner(&mut terminal, cards, intervals);

    // Restore terminal - this MUST run even if the loop fails
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}

fn run_app_inner<B: Backend>(
    terminal: &mut Terminal<B>,
    cards: &[Card],
    intervals: BoxIntervals,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(cards, intervals);

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        let quit = match read()? {
            Event::Key(key) => handle_event(&mut app, key),
            _ => false,
        };

        // Persist each graded card before reading further input.
        if let Some(card) = app.take_pending_save() {
            store::save_progress(&card)?;
        }

        if quit {
            return Ok(());
        }
    }
}

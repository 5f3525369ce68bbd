//! UI rendering for the review TUI

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use super::app::{App, Phase};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.is_empty() {
        let done = Paragraph::new("Nothing due. You're done for today. ✨\n\n(press any key)")
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center);
        frame.render_widget(done, area);
        return;
    }

    let layout = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Length(4), // prompt
        Constraint::Length(3), // input
        Constraint::Length(1), // progress
        Constraint::Length(2), // feedback
        Constraint::Length(1), // key hints
    ])
    .split(area);

    draw_header(frame, app, layout[0]);
    draw_prompt(frame, app, layout[1]);
    draw_input(frame, app, layout[2]);
    draw_progress(frame, app, layout[3]);
    draw_feedback(frame, app, layout[4]);
    draw_hints(frame, app, layout[5]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(card) = app.current() else {
        return;
    };
    let header = format!(
        " memento │ [{}/{}] box {} │ Tags: {}",
        app.idx + 1,
        app.cards.len(),
        card.box_level,
        card.tags.join(", ")
    );
    frame.render_widget(
        Paragraph::new(header).style(Style::default().bg(Color::Blue).fg(Color::White).bold()),
        area,
    );
}

fn draw_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let Some(card) = app.current() else {
        return;
    };
    let prompt = Paragraph::new(card.prompt.clone())
        .style(Style::default().fg(Color::Magenta))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::NONE).padding(
            ratatui::widgets::Padding::new(1, 1, 1, 0),
        ));
    frame.render_widget(prompt, area);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.input.is_empty() && app.phase == Phase::Answering {
        (
            "your answer (flag/word)".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.input.clone(), Style::default().fg(Color::White))
    };
    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" answer "));
    frame.render_widget(input, area);
}

fn draw_progress(frame: &mut Frame, app: &App, area: Rect) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(app.progress())
        .label(format!("{}/{}", app.idx, app.cards.len()));
    frame.render_widget(gauge, area);
}

fn draw_feedback(frame: &mut Frame, app: &App, area: Rect) {
    let Some(feedback) = &app.feedback else {
        return;
    };
    let style = match app.phase {
        Phase::Checked { correct: true } => Style::default().fg(Color::Green),
        Phase::Checked { correct: false } => Style::default().fg(Color::Red),
        Phase::Answering => Style::default(),
    };
    frame.render_widget(
        Paragraph::new(feedback.clone())
            .style(style)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.phase {
        Phase::Answering => "(enter=check, ctrl-c=quit)",
        Phase::Checked { .. } => "(n=next, q=quit)",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

//! Search screen rendering
//!
//! Renders the word input view: a centered prompt with the current input and
//! a hint line with the available keys.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders the search view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "wordbook",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[1]);

    // Input box with a trailing cursor block
    let input_line = Line::from(vec![
        Span::raw(app.search_input.as_str()),
        Span::styled("█", Style::default().fg(Color::Cyan)),
    ]);
    let input = Paragraph::new(input_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Look up a word "),
    );
    let input_area = centered_horizontal(chunks[2], 40);
    frame.render_widget(input, input_area);

    if let Some(message) = &app.status_message {
        let status = Paragraph::new(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(status, chunks[3]);
    }

    let hints = Paragraph::new(Line::from(Span::styled(
        "Enter: look up   Tab: wordbook   ?: help   Esc: quit",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[5]);
}

/// Centers a fixed-width area horizontally inside `area`
fn centered_horizontal(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    Rect {
        x,
        y: area.y,
        width,
        height: area.height,
    }
}

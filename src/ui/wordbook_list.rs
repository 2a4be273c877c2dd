//! Wordbook screen rendering
//!
//! Renders the saved-words list, newest first, with the selection
//! highlighted and each word's short definition and save date.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders the wordbook view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();

    if app.wordbook_entries.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  No saved words yet. Look one up and press 'a' to save it.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (i, entry) in app.wordbook_entries.iter().enumerate() {
        let selected = i == app.selected_index;
        let marker = if selected { "> " } else { "  " };
        let word_style = if selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(format!("{:<18}", entry.word), word_style),
            Span::styled(
                entry.added_at.format("%Y-%m-%d").to_string(),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  "),
            Span::styled(
                truncated(&entry.short_definition, 60),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }

    let title = format!(" Wordbook ({}) ", app.user);
    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title),
    );
    frame.render_widget(list, chunks[0]);

    if let Some(message) = &app.status_message {
        let status = Paragraph::new(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(status, chunks[1]);
    }

    let hints = Paragraph::new(Line::from(Span::styled(
        "Enter: look up   d: delete   j/k: move   Esc: back   q: quit",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[2]);
}

/// Shortens a definition to fit one list row
fn truncated(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_keeps_short_text() {
        assert_eq!(truncated("a greeting", 60), "a greeting");
    }

    #[test]
    fn test_truncated_shortens_long_text() {
        let long = "x".repeat(80);
        let result = truncated(&long, 60);
        assert_eq!(result.chars().count(), 60);
        assert!(result.ends_with('…'));
    }
}

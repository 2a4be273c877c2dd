//! Definition screen rendering
//!
//! Renders the result of a lookup: the word with its phonetics, every
//! meaning with its definitions and examples, and the source URL. Lookup
//! failures are rendered in the same view with distinct messaging.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::dict::DictionaryEntry;

/// Renders the definition view
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

    match (&app.current_entry, &app.lookup_error) {
        (Some(entry), _) => render_entry(frame, app, entry, chunks[0]),
        (None, Some(message)) => render_error(frame, message, chunks[0]),
        (None, None) => {}
    }

    if let Some(message) = &app.status_message {
        let status = Paragraph::new(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(status, chunks[1]);
    }

    let hint_text = if app.current_entry.is_some() {
        "a: save to wordbook   Tab: wordbook   j/k: scroll   Esc: back   q: quit"
    } else {
        "Esc: back   q: quit"
    };
    let hints = Paragraph::new(Line::from(Span::styled(
        hint_text,
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[2]);
}

/// Renders a successful lookup result
fn render_entry(frame: &mut Frame, app: &App, entry: &DictionaryEntry, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    // Headline: the word, its saved marker, and phonetic transcriptions
    let mut headline = vec![Span::styled(
        entry.word.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    let transcriptions: Vec<&str> = entry
        .phonetics
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    if !transcriptions.is_empty() {
        headline.push(Span::raw("  "));
        headline.push(Span::styled(
            transcriptions.join("  "),
            Style::default().fg(Color::Magenta),
        ));
    }
    if app.in_wordbook {
        headline.push(Span::raw("  "));
        headline.push(Span::styled("● saved", Style::default().fg(Color::Green)));
    }
    lines.push(Line::from(headline));
    lines.push(Line::from(""));

    for meaning in &entry.meanings {
        lines.push(Line::from(Span::styled(
            meaning.part_of_speech.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));

        for (i, definition) in meaning.definitions.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}. ", i + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(definition.definition.clone()),
            ]));
            if let Some(example) = &definition.example {
                lines.push(Line::from(Span::styled(
                    format!("     \"{}\"", example),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
        }

        if !meaning.synonyms.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("  Synonyms: ", Style::default().fg(Color::Green)),
                Span::raw(meaning.synonyms.join(", ")),
            ]));
        }
        if !meaning.antonyms.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("  Antonyms: ", Style::default().fg(Color::Red)),
                Span::raw(meaning.antonyms.join(", ")),
            ]));
        }
        lines.push(Line::from(""));
    }

    if let Some(url) = &entry.source_url {
        lines.push(Line::from(vec![
            Span::styled("Source: ", Style::default().fg(Color::DarkGray)),
            Span::styled(url.clone(), Style::default().fg(Color::Blue)),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Definition "))
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll_offset, 0));
    frame.render_widget(paragraph, area);
}

/// Renders a lookup failure
fn render_error(frame: &mut Frame, message: &str, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(area);

    let error = Paragraph::new(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Red),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(error, chunks[1]);
}

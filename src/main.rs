//! Wordbook CLI - look up word definitions and keep a personal wordbook
//!
//! A terminal UI application that fetches definitions from the Free
//! Dictionary API, caches them locally, and lets the user save words into a
//! personal wordbook.

mod app;
mod cache;
mod cli;
mod dict;
mod maintenance;
mod ui;
mod wordbook;

use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use app::{App, AppState};
use cache::CacheStore;
use cli::{Cli, StartupConfig};
use maintenance::{PurgeConfig, PurgeHandle};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match app.state {
        AppState::Search => ui::render_search(frame, app),
        AppState::Loading => render_loading(frame),
        AppState::Definition => ui::render_definition(frame, app),
        AppState::Wordbook => ui::render_wordbook_list(frame, app),
    }

    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Renders a message while a lookup is in flight
fn render_loading(frame: &mut ratatui::Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Style},
        widgets::Paragraph,
    };

    let area = frame.area();

    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Looking up...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // One-shot maintenance mode, no TUI
    if cli.purge_cache {
        let store =
            CacheStore::open_default().ok_or("could not determine the cache directory")?;
        let removed = store.purge_expired()?;
        println!("Removed {} expired cache record(s)", removed);
        return Ok(());
    }

    let config = StartupConfig::from_cli(&cli)?;

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app instance
    let mut app = App::with_startup_config(config);

    // Periodic cache hygiene alongside the UI
    let purge_handle = CacheStore::open_default()
        .map(|store| PurgeHandle::spawn(store, PurgeConfig::default()));

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // A requested lookup runs between frames; the loading frame above
        // is already on screen
        if app.has_pending_lookup() {
            app.perform_pending_lookup().await;
            continue;
        }

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    if let Some(handle) = purge_handle {
        handle.shutdown().await;
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

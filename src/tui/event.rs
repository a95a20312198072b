//! Key handling for the advocate browser

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::client::session::FetchRequest;

use super::app::{App, Mode};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
#[derive(Debug, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
    /// Issue this fetch
    Fetch(FetchRequest),
}

impl From<Option<FetchRequest>> for HandleResult {
    fn from(request: Option<FetchRequest>) -> Self {
        match request {
            Some(request) => HandleResult::Fetch(request),
            None => HandleResult::Continue,
        }
    }
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) -> HandleResult {
    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return HandleResult::Quit,
            KeyCode::Char('r') => return app.reset_search().into(),
            _ => {}
        }
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Search => handle_search_mode(app, key, now),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Char('q') => HandleResult::Quit,

        KeyCode::Char('/') => {
            app.enter_search();
            HandleResult::Continue
        }

        KeyCode::Char('x') => app.reset_search().into(),

        KeyCode::Char('r') => HandleResult::Fetch(app.session.retry()),

        KeyCode::Left | KeyCode::Char('h') => app.session.prev_page().into(),
        KeyCode::Right | KeyCode::Char('l') => app.session.next_page().into(),

        KeyCode::Char(c @ '1'..='9') => {
            let page = c.to_digit(10).map_or(0, u64::from);
            let total_pages = app.session.pagination().map_or(0, |p| p.total_pages);
            if page <= total_pages {
                HandleResult::Fetch(app.session.go_to_page(page))
            } else {
                HandleResult::Continue
            }
        }

        KeyCode::Char('s') => HandleResult::Fetch(app.cycle_page_size()),

        _ => HandleResult::Continue,
    }
}

fn handle_search_mode(app: &mut App, key: KeyEvent, now: Instant) -> HandleResult {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.exit_mode();
            HandleResult::Continue
        }
        KeyCode::Backspace => {
            app.search_backspace(now);
            HandleResult::Continue
        }
        KeyCode::Char(c) => {
            app.search_insert(c, now);
            HandleResult::Continue
        }
        _ => HandleResult::Continue,
    }
}

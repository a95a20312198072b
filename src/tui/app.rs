//! Application state for the advocate browser

use std::time::Instant;

use tracing::debug;

use crate::client::{
    api::{AdvocatePage, ClientError},
    debounce::{Debouncer, SEARCH_DEBOUNCE},
    session::{FetchRequest, ListingSession},
};

/// Page sizes offered by the size selector
pub const PAGE_SIZES: [u64; 4] = [5, 10, 20, 50];

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Keys drive navigation
    Normal,
    /// Keys edit the search box
    Search,
}

/// A fetch that has finished, successfully or not
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub result: Result<AdvocatePage, ClientError>,
}

pub struct App {
    pub session: ListingSession,
    /// Text currently typed in the search box, may differ from the
    /// session term until the debouncer fires
    pub search_input: String,
    pub debouncer: Debouncer<String>,
    pub mode: Mode,
    pub should_quit: bool,
}

impl App {
    pub fn new(page_size: u64) -> Self {
        Self {
            session: ListingSession::new(page_size),
            search_input: String::new(),
            debouncer: Debouncer::new(SEARCH_DEBOUNCE),
            mode: Mode::Normal,
            should_quit: false,
        }
    }

    pub fn enter_search(&mut self) {
        self.mode = Mode::Search;
    }

    pub fn exit_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn search_insert(&mut self, c: char, now: Instant) {
        self.search_input.push(c);
        self.debouncer.push(self.search_input.clone(), now);
    }

    pub fn search_backspace(&mut self, now: Instant) {
        if self.search_input.pop().is_some() {
            self.debouncer.push(self.search_input.clone(), now);
        }
    }

    /// Clear the search box and refetch at once, skipping the debounce wait.
    pub fn reset_search(&mut self) -> Option<FetchRequest> {
        self.search_input.clear();
        self.debouncer.cancel();
        if self.session.search_term().is_empty() {
            return None;
        }
        Some(self.session.search(""))
    }

    /// Issue the debounced search once the input has been quiet long enough.
    /// Nothing is fetched when the settled term equals the current one.
    pub fn poll_search(&mut self, now: Instant) -> Option<FetchRequest> {
        let term = self.debouncer.poll(now)?;
        if term == self.session.search_term() {
            return None;
        }
        Some(self.session.search(&term))
    }

    /// Advance to the next entry of [`PAGE_SIZES`].
    pub fn cycle_page_size(&mut self) -> FetchRequest {
        let current = self.session.query().limit;
        let next = PAGE_SIZES
            .iter()
            .copied()
            .find(|size| *size > current)
            .unwrap_or(PAGE_SIZES[0]);
        self.session.set_page_size(next)
    }

    pub fn apply(&mut self, outcome: FetchOutcome) {
        if !self.session.complete(outcome.generation, outcome.result) {
            debug!(generation = outcome.generation, "dropped superseded response");
        }
    }
}

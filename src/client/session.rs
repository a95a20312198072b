//! Listing state held by a client between fetches.
//!
//! The session performs no IO: every change returns a [`FetchRequest`] that
//! the caller issues, and the outcome comes back through
//! [`ListingSession::complete`]. Each request carries a generation; only the
//! latest generation may update the session, so a slow response can never
//! overwrite the result of a newer query.

use crate::{
    core::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT},
    schema::{advocate::AdvocateDetail, common::PaginationInfo},
};

use super::api::{AdvocatePage, ClientError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingQuery {
    pub page: u64,
    pub limit: u64,
    pub search: String,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub query: ListingQuery,
}

#[derive(Debug)]
pub struct ListingSession {
    query: ListingQuery,
    state: LoadState,
    records: Vec<AdvocateDetail>,
    pagination: Option<PaginationInfo>,
    generation: u64,
}

impl Default for ListingSession {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl ListingSession {
    pub fn new(page_size: u64) -> Self {
        Self {
            query: ListingQuery {
                limit: page_size.clamp(1, MAX_LIMIT),
                ..ListingQuery::default()
            },
            state: LoadState::Idle,
            records: vec![],
            pagination: None,
            generation: 0,
        }
    }

    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn records(&self) -> &[AdvocateDetail] {
        &self.records
    }

    pub fn pagination(&self) -> Option<&PaginationInfo> {
        self.pagination.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.query.search
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// First display.
    pub fn load(&mut self) -> FetchRequest {
        self.begin()
    }

    pub fn go_to_page(&mut self, page: u64) -> FetchRequest {
        self.query.page = page.max(1);
        self.begin()
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        let pagination = self.pagination.as_ref()?;
        if !pagination.has_next {
            return None;
        }
        let page = pagination.page + 1;
        Some(self.go_to_page(page))
    }

    pub fn prev_page(&mut self) -> Option<FetchRequest> {
        let pagination = self.pagination.as_ref()?;
        if !pagination.has_prev {
            return None;
        }
        let page = pagination.page - 1;
        Some(self.go_to_page(page))
    }

    pub fn set_page_size(&mut self, size: u64) -> FetchRequest {
        self.query.limit = size.clamp(1, MAX_LIMIT);
        self.query.page = 1;
        self.begin()
    }

    pub fn search(&mut self, term: &str) -> FetchRequest {
        self.query.search = term.to_string();
        self.query.page = 1;
        self.begin()
    }

    /// Re-issue the current query, typically after an error.
    pub fn retry(&mut self) -> FetchRequest {
        self.begin()
    }

    /// Apply a finished fetch. Returns `false` when the result belongs to a
    /// superseded request and was dropped.
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<AdvocatePage, ClientError>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        match result {
            Ok(page) => {
                self.records = page.data;
                self.pagination = Some(page.pagination);
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                self.state = LoadState::Errored(err.to_string());
            }
        }
        true
    }

    /// Held page narrowed locally by the search term. Pagination metadata
    /// keeps reflecting the server count.
    pub fn visible_records(&self) -> Vec<&AdvocateDetail> {
        self.records
            .iter()
            .filter(|advocate| advocate.matches(&self.query.search))
            .collect()
    }

    fn begin(&mut self) -> FetchRequest {
        self.generation += 1;
        self.state = LoadState::Loading;
        FetchRequest {
            generation: self.generation,
            query: self.query.clone(),
        }
    }
}

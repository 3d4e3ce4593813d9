//! Pagination and search state shared by every list view.

use std::future::Future;

use crate::api::{ListParams, Paged};
use crate::errors::AppError;

/// How a fetched page was applied to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The result is now the displayed page
    Updated,
    /// A newer request was issued meanwhile; the result was discarded
    OutOfDate,
    /// The requested page no longer exists; the pager moved to the last
    /// valid page and the caller should fetch again
    Clamped(u32),
}

/// Pagination/search state machine for one list view.
///
/// Results are applied through numbered tickets: only the most recently
/// issued request may update the view, so a slow page-2 response can never
/// overwrite the page-3 data the user asked for afterwards. The previous
/// page stays visible while a newer fetch is outstanding.
pub struct ListPager<E> {
    params: ListParams,
    current: Option<E>,
    next_ticket: u64,
}

impl<E: Paged> ListPager<E> {
    pub fn new(limit: u32) -> Self {
        Self {
            params: ListParams {
                limit,
                ..ListParams::default()
            },
            current: None,
            next_ticket: 0,
        }
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    /// Jump to a page (1-based).
    pub fn set_page(&mut self, page: u32) {
        if page >= 1 {
            self.params.page = page;
        }
    }

    pub fn next_page(&mut self) {
        let cap = self
            .current
            .as_ref()
            .map(|c| c.total_pages().max(1))
            .unwrap_or(u32::MAX);
        self.set_page((self.params.page + 1).min(cap));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.params.page.saturating_sub(1).max(1));
    }

    /// Change the search term. Any change resets to page 1.
    pub fn set_search(&mut self, term: &str) {
        let term = term.trim();
        let search = if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        };
        if search != self.params.search {
            self.params.search = search;
            self.params.page = 1;
        }
    }

    /// Change the page size. Any change resets to page 1.
    pub fn set_limit(&mut self, limit: u32) {
        if limit >= 1 && limit != self.params.limit {
            self.params.limit = limit;
            self.params.page = 1;
        }
    }

    /// Start a request for the current parameters, returning its ticket.
    pub fn begin_request(&mut self) -> (u64, ListParams) {
        self.next_ticket += 1;
        (self.next_ticket, self.params.clone())
    }

    /// Apply a fetched result for the given ticket.
    pub fn apply(&mut self, ticket: u64, result: E) -> Applied {
        if ticket != self.next_ticket {
            return Applied::OutOfDate;
        }

        // A mutation can empty the page we were on; fall back to the last
        // page that still exists instead of stranding on an empty view.
        let total_pages = result.total_pages().max(1);
        if self.params.page > total_pages {
            self.params.page = total_pages;
            return Applied::Clamped(total_pages);
        }

        self.current = Some(result);
        Applied::Updated
    }

    pub fn current(&self) -> Option<&E> {
        self.current.as_ref()
    }

    /// Rows currently displayed (the previous page while a fetch is pending).
    pub fn rows(&self) -> &[E::Item] {
        self.current.as_ref().map(|e| e.items()).unwrap_or(&[])
    }
}

/// Fetch the pager's current page and apply it, following at most one clamp.
pub async fn refresh<E, F, Fut>(pager: &mut ListPager<E>, fetch: F) -> Result<Applied, AppError>
where
    E: Paged,
    F: Fn(ListParams) -> Fut,
    Fut: Future<Output = Result<E, AppError>>,
{
    loop {
        let (ticket, params) = pager.begin_request();
        let result = fetch(params).await?;
        match pager.apply(ticket, result) {
            Applied::Clamped(page) => {
                tracing::debug!("Page emptied, falling back to page {}", page);
                continue;
            }
            applied => return Ok(applied),
        }
    }
}

//! Pager: on-demand fetches for the next page beyond the watermark.
//!
//! `load_more` is guarded by the loading and exhausted flags so a visible
//! sentinel cannot flood the backend with requests. Completions are matched
//! by ticket; the loading flag always clears on completion, success or not,
//! so a failed fetch never deadlocks the trigger.

use crate::backend::{Backend, FetchTicket};
use vista_core::{CursorValue, Result};

/// Issues bounded page fetches and owns the loading/exhausted flags.
#[derive(Debug)]
pub struct Pager {
    page_size: usize,
    loading: bool,
    exhausted: bool,
    next_ticket: FetchTicket,
    pending: Option<FetchTicket>,
}

impl Pager {
    /// Creates a pager fetching `page_size` records per request.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            loading: false,
            exhausted: false,
            next_ticket: 0,
            pending: None,
        }
    }

    /// Returns the configured page size.
    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns true while a page fetch is outstanding.
    #[inline]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns true once a fetch came back short. Sticky for the session.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Returns true if a completion carrying `ticket` belongs to the fetch
    /// that is currently outstanding.
    pub fn accepts(&self, ticket: FetchTicket) -> bool {
        self.pending == Some(ticket)
    }

    /// Requests the next page after `after`. A no-op while loading or once
    /// exhausted. Returns whether a fetch was issued.
    pub fn load_more<B: Backend>(
        &mut self,
        backend: &mut B,
        after: Option<CursorValue>,
    ) -> Result<bool> {
        if self.loading || self.exhausted {
            return Ok(false);
        }

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.loading = true;
        self.pending = Some(ticket);

        match backend.request_page(after, self.page_size, ticket) {
            Ok(()) => Ok(true),
            Err(err) => {
                // The request never left; unblock the trigger immediately.
                self.loading = false;
                self.pending = None;
                Err(err)
            }
        }
    }

    /// Records a successful completion. A short page (`fetched <
    /// page_size`) marks the pager exhausted.
    pub fn complete(&mut self, ticket: FetchTicket, fetched: usize) {
        if !self.accepts(ticket) {
            return;
        }
        self.pending = None;
        self.loading = false;
        if fetched < self.page_size {
            self.exhausted = true;
        }
    }

    /// Records a failed completion. Clears the loading flag so the trigger
    /// is free to retry on the next visibility transition.
    pub fn fail(&mut self, ticket: FetchTicket) {
        if !self.accepts(ticket) {
            return;
        }
        self.pending = None;
        self.loading = false;
    }

    /// Returns the pager to its initial state. Used only on full
    /// reinitialization.
    pub fn reset(&mut self) {
        self.loading = false;
        self.exhausted = false;
        self.pending = None;
    }
}

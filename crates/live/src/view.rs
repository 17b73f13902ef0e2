//! The live view: one reducer over every event the collaborators deliver.
//!
//! `LiveView` owns the loaded set, the watermark, the watch subscription,
//! and the pager, and folds all incoming events through a single `apply`
//! entry point. Events are tagged with the generation or ticket of the
//! operation that produced them; stale tags are dropped at the door, so
//! everything past the guard operates on current state only.

use crate::backend::{Backend, FetchTicket, Generation, WatchScope};
use crate::cursor::CursorTracker;
use crate::pager::Pager;
use crate::subscription::{SubscriptionManager, WatchState};
use crate::trigger::{LoadTrigger, SentinelHandle};
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use vista_core::{validate_batch, Error, RawRecord, RecordId, Result};
use vista_merge::{DeltaBatch, LoadedSet, MergeEvent, MergeOutcome, RecordUpdate};

/// An event delivered to the view by its collaborators.
#[derive(Clone, Debug)]
pub enum ViewEvent {
    /// Full result set from the watch with the given generation.
    Snapshot {
        generation: Generation,
        rows: Vec<RawRecord>,
    },
    /// Incremental changes from the watch with the given generation.
    Delta {
        generation: Generation,
        added: Vec<RawRecord>,
        updated: Vec<(Option<RawRecord>, RawRecord)>,
        removed: Vec<RecordId>,
    },
    /// The watch with the given generation failed mid-stream.
    SubscriptionError {
        generation: Generation,
        message: String,
    },
    /// A page fetch completed with the given rows.
    PageLoaded {
        ticket: FetchTicket,
        rows: Vec<RawRecord>,
    },
    /// A page fetch failed.
    PageFailed {
        ticket: FetchTicket,
        message: String,
    },
    /// The host reports the load-more sentinel's visibility.
    SentinelVisibility { visible: bool },
}

/// What one event changed, as delivered to view subscribers.
#[derive(Clone, Debug)]
pub struct ViewChange {
    /// The records added, removed, and updated by the event.
    pub outcome: MergeOutcome,
    /// Whether a load is in flight after the event.
    pub is_loading: bool,
    /// Whether the remote set is known to be fully loaded.
    pub is_exhausted: bool,
}

/// Identifies one view subscription.
pub type ViewSubscriptionId = u64;

/// Fans view changes out to registered callbacks.
#[derive(Default)]
pub struct ViewSubscribers {
    next_id: ViewSubscriptionId,
    callbacks: HashMap<ViewSubscriptionId, Box<dyn Fn(&ViewChange)>>,
}

impl ViewSubscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback, returning its id for later removal.
    pub fn subscribe<F>(&mut self, callback: F) -> ViewSubscriptionId
    where
        F: Fn(&ViewChange) + 'static,
    {
        self.next_id += 1;
        self.callbacks.insert(self.next_id, Box::new(callback));
        self.next_id
    }

    /// Removes a callback. Returns true if it was registered.
    pub fn unsubscribe(&mut self, id: ViewSubscriptionId) -> bool {
        self.callbacks.remove(&id).is_some()
    }

    /// Returns the number of registered callbacks.
    #[inline]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    fn notify_all(&self, change: &ViewChange) {
        for callback in self.callbacks.values() {
            callback(change);
        }
    }
}

/// A locally materialized, paginated, live-updating view of a remote
/// record set.
pub struct LiveView<B: Backend> {
    backend: B,
    set: LoadedSet,
    cursor: CursorTracker,
    subscription: SubscriptionManager<B::Watch>,
    pager: Pager,
    trigger: LoadTrigger,
    sentinel_seq: u64,
    last_len: usize,
    awaiting_initial: bool,
    subscribers: ViewSubscribers,
    on_error: Option<Box<dyn Fn(&Error)>>,
}

impl<B: Backend> LiveView<B> {
    /// Creates an uninitialized view over `backend`, paging `page_size`
    /// records at a time.
    pub fn new(backend: B, page_size: usize) -> Self {
        Self {
            backend,
            set: LoadedSet::new(),
            cursor: CursorTracker::new(),
            subscription: SubscriptionManager::new(),
            pager: Pager::new(page_size),
            trigger: LoadTrigger::new(),
            sentinel_seq: 0,
            last_len: 0,
            awaiting_initial: false,
            subscribers: ViewSubscribers::new(),
            on_error: None,
        }
    }

    /// Starts (or restarts) the view: drops any loaded state and opens a
    /// first-page watch. The view reports loading until the watch delivers
    /// its initial snapshot.
    pub fn init(&mut self) -> Result<()> {
        self.set.clear();
        self.cursor.reset();
        self.pager.reset();
        self.last_len = 0;
        self.awaiting_initial = true;

        self.subscription.open(
            &mut self.backend,
            WatchScope::FirstPage {
                limit: self.pager.page_size(),
            },
        )?;

        self.sentinel_seq += 1;
        self.trigger.bind(SentinelHandle(self.sentinel_seq));
        Ok(())
    }

    /// Tears the view down, releasing the live watch. Loaded records stay
    /// readable; events arriving after teardown are ignored.
    pub fn teardown(&mut self) {
        self.subscription.close();
        self.trigger.unbind();
        self.awaiting_initial = false;
    }

    /// Folds one collaborator event into the view.
    pub fn apply(&mut self, event: ViewEvent) -> Result<()> {
        match event {
            ViewEvent::Snapshot { generation, rows } => self.on_snapshot(generation, rows),
            ViewEvent::Delta {
                generation,
                added,
                updated,
                removed,
            } => self.on_delta(generation, added, updated, removed),
            ViewEvent::SubscriptionError {
                generation,
                message,
            } => {
                if self.subscription.accepts(generation) {
                    // Loaded records stay readable as last-known-good; the
                    // failed watch is released and not retried.
                    let was_loading = self.is_loading();
                    self.subscription.close();
                    self.awaiting_initial = false;
                    self.report(&Error::subscription(message));
                    if self.is_loading() != was_loading {
                        self.notify(MergeOutcome::new());
                    }
                }
                Ok(())
            }
            ViewEvent::PageLoaded { ticket, rows } => self.on_page(ticket, rows),
            ViewEvent::PageFailed { ticket, message } => {
                if self.pager.accepts(ticket) {
                    self.pager.fail(ticket);
                    self.report(&Error::fetch(message));
                    self.notify(MergeOutcome::new());
                }
                Ok(())
            }
            ViewEvent::SentinelVisibility { visible } => {
                if self.trigger.on_visibility(visible) {
                    self.request_more()?;
                }
                Ok(())
            }
        }
    }

    fn on_snapshot(&mut self, generation: Generation, rows: Vec<RawRecord>) -> Result<()> {
        if !self.subscription.accepts(generation) {
            log::debug!("dropping snapshot from superseded watch {}", generation);
            return Ok(());
        }
        let was_loading = self.is_loading();
        let was_exhausted = self.is_exhausted();

        self.subscription.on_snapshot();
        self.awaiting_initial = false;

        let (rows, dropped) = validate_batch(rows);
        if dropped > 0 {
            log::warn!("snapshot dropped {} malformed records", dropped);
        }

        let outcome = self.set.apply(MergeEvent::Snapshot { rows });
        self.advance_watermark_to_max()?;
        self.after_merge(outcome, was_loading, was_exhausted);
        Ok(())
    }

    fn on_delta(
        &mut self,
        generation: Generation,
        added: Vec<RawRecord>,
        updated: Vec<(Option<RawRecord>, RawRecord)>,
        removed: Vec<RecordId>,
    ) -> Result<()> {
        if !self.subscription.accepts(generation) {
            log::debug!("dropping delta from superseded watch {}", generation);
            return Ok(());
        }
        let was_loading = self.is_loading();
        let was_exhausted = self.is_exhausted();

        let (added, dropped_adds) = validate_batch(added);
        let mut batch = DeltaBatch {
            added,
            updated: Vec::new(),
            removed,
        };

        let mut dropped = dropped_adds;
        for (previous, current) in updated {
            match current.validate() {
                Ok(current) => {
                    // A malformed previous value degrades to a plain update.
                    let previous = previous.and_then(|p| p.validate().ok());
                    batch.updated.push(RecordUpdate { previous, current });
                }
                Err(err) => {
                    log::warn!("dropping malformed update: {}", err);
                    dropped += 1;
                }
            }
        }
        if dropped > 0 {
            log::warn!("delta dropped {} malformed records", dropped);
        }

        let outcome = self.set.apply(MergeEvent::Delta(batch));
        self.advance_watermark_to_max()?;
        self.after_merge(outcome, was_loading, was_exhausted);
        Ok(())
    }

    fn on_page(&mut self, ticket: FetchTicket, rows: Vec<RawRecord>) -> Result<()> {
        if !self.pager.accepts(ticket) {
            log::debug!("dropping page for abandoned fetch {}", ticket);
            return Ok(());
        }
        let was_loading = self.is_loading();
        let was_exhausted = self.is_exhausted();

        // Exhaustion is judged on the raw row count: a page short only
        // because of validation drops must not end pagination early.
        self.pager.complete(ticket, rows.len());

        let (rows, dropped) = validate_batch(rows);
        if dropped > 0 {
            log::warn!("page dropped {} malformed records", dropped);
        }

        let outcome = self.set.apply(MergeEvent::Page { rows });
        // Duplicates still advance the watermark: the page proves the
        // range up to its max cursor is loaded.
        if let Some(max) = outcome.max_page_cursor.clone() {
            if self.cursor.advance(max) {
                self.rescope()?;
            }
        }
        self.after_merge(outcome, was_loading, was_exhausted);
        Ok(())
    }

    /// Advances the watermark to the set's max cursor after a snapshot or
    /// delta grew the loaded range, rescoping the watch to match.
    fn advance_watermark_to_max(&mut self) -> Result<()> {
        if let Some(max) = self.set.max_cursor().cloned() {
            if self.cursor.advance(max) && self.subscription.state() != WatchState::Idle {
                self.rescope()?;
            }
        }
        Ok(())
    }

    fn rescope(&mut self) -> Result<()> {
        let scope = self.scope();
        self.subscription.open(&mut self.backend, scope)?;
        Ok(())
    }

    fn scope(&self) -> WatchScope {
        match self.cursor.get() {
            Some(cursor) => WatchScope::UpTo {
                cursor: cursor.clone(),
            },
            None => WatchScope::FirstPage {
                limit: self.pager.page_size(),
            },
        }
    }

    fn after_merge(&mut self, outcome: MergeOutcome, was_loading: bool, was_exhausted: bool) {
        if self.set.len() != self.last_len {
            self.last_len = self.set.len();
            // The row under the sentinel changed: mint a fresh handle so a
            // still-visible sentinel can fire again.
            self.sentinel_seq += 1;
            self.trigger.bind(SentinelHandle(self.sentinel_seq));
        }
        let flags_changed =
            self.is_loading() != was_loading || self.is_exhausted() != was_exhausted;
        if !outcome.is_empty() || flags_changed {
            self.notify(outcome);
        }
    }

    fn notify(&self, outcome: MergeOutcome) {
        let change = ViewChange {
            outcome,
            is_loading: self.is_loading(),
            is_exhausted: self.is_exhausted(),
        };
        self.subscribers.notify_all(&change);
    }

    fn report(&self, error: &Error) {
        if let Some(handler) = &self.on_error {
            handler(error);
        } else {
            log::error!("{}", error);
        }
    }

    /// Requests the next page beyond the watermark. A no-op until the
    /// initial snapshot has delivered records, while a fetch is in flight,
    /// or once the set is exhausted. Returns whether a fetch was issued.
    pub fn request_more(&mut self) -> Result<bool> {
        if self.awaiting_initial || self.set.is_empty() {
            return Ok(false);
        }
        let after = self.cursor.get().cloned();
        self.pager.load_more(&mut self.backend, after)
    }

    /// Registers a change callback.
    pub fn subscribe<F>(&mut self, callback: F) -> ViewSubscriptionId
    where
        F: Fn(&ViewChange) + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Removes a change callback.
    pub fn unsubscribe(&mut self, id: ViewSubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Installs the error handler. Without one, errors go to the log.
    pub fn set_error_handler<F>(&mut self, handler: F)
    where
        F: Fn(&Error) + 'static,
    {
        self.on_error = Some(Box::new(handler));
    }

    /// Returns the loaded records, sorted ascending by cursor.
    #[inline]
    pub fn records(&self) -> &[vista_core::Record] {
        self.set.records()
    }

    /// Returns the number of loaded records.
    #[inline]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Returns true while the initial snapshot or a page fetch is
    /// outstanding.
    pub fn is_loading(&self) -> bool {
        self.awaiting_initial || self.pager.is_loading()
    }

    /// Returns true once the remote set is known to be fully loaded.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pager.is_exhausted()
    }

    /// Returns the pagination watermark.
    #[inline]
    pub fn watermark(&self) -> Option<&vista_core::CursorValue> {
        self.cursor.get()
    }

    /// Returns the sentinel handle the host should currently observe.
    #[inline]
    pub fn sentinel(&self) -> Option<SentinelHandle> {
        self.trigger.sentinel()
    }

    /// Returns the generation of the current watch.
    #[inline]
    pub fn generation(&self) -> Generation {
        self.subscription.generation()
    }
}

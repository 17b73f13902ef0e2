//! Subscription manager: the single owned slot for the live watch.
//!
//! At most one watch is alive at a time. Opening a new watch closes the
//! previous one first and bumps the generation counter, so snapshot/delta
//! callbacks from a superseded watch are rejected by `accepts` instead of
//! writing into a loaded set that has since been rescoped.

use crate::backend::{Backend, Generation, WatchHandle, WatchScope};
use vista_core::Result;

/// Lifecycle state of the live watch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchState {
    /// No watch is open.
    Idle,
    /// A watch is open but has not yet delivered its first snapshot.
    Subscribing,
    /// The watch has delivered at least one snapshot.
    Active,
}

/// Owns the lifecycle of the live watch subscription.
pub struct SubscriptionManager<W: WatchHandle> {
    state: WatchState,
    generation: Generation,
    watch: Option<W>,
}

impl<W: WatchHandle> Default for SubscriptionManager<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: WatchHandle> SubscriptionManager<W> {
    /// Creates an idle manager.
    pub fn new() -> Self {
        Self {
            state: WatchState::Idle,
            generation: 0,
            watch: None,
        }
    }

    /// Returns the lifecycle state.
    #[inline]
    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Returns the generation of the current watch.
    #[inline]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns true if events carrying `generation` belong to the watch
    /// that is currently open.
    pub fn accepts(&self, generation: Generation) -> bool {
        self.watch.is_some() && generation == self.generation
    }

    /// Closes the current watch (if any) and opens a new one over `scope`.
    /// The old watch is torn down before the new one is created, so two
    /// watches never run concurrently against overlapping ranges.
    pub fn open<B>(&mut self, backend: &mut B, scope: WatchScope) -> Result<Generation>
    where
        B: Backend<Watch = W>,
    {
        self.close();
        self.generation += 1;
        let watch = backend.watch(scope, self.generation)?;
        self.watch = Some(watch);
        self.state = WatchState::Subscribing;
        Ok(self.generation)
    }

    /// Tears down the current watch, releasing its resource. Events from
    /// it are rejected from this point on.
    pub fn close(&mut self) {
        if let Some(mut watch) = self.watch.take() {
            watch.close();
        }
        self.state = WatchState::Idle;
    }

    /// Records delivery of the first snapshot: `Subscribing → Active`.
    pub fn on_snapshot(&mut self) {
        if self.state == WatchState::Subscribing {
            self.state = WatchState::Active;
        }
    }
}

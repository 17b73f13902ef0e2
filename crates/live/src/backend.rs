//! Storage collaborator traits.
//!
//! The storage/sync engine is an external collaborator: it accepts a scope
//! description, returns an owned watch handle, and serves on-demand page
//! fetches. Both operations may suspend on the host side; their results are
//! delivered back to the view as `ViewEvent`s tagged with the generation or
//! ticket they belong to, so callbacks from a superseded watch or an
//! abandoned fetch can be ignored.

use alloc::string::String;
use vista_core::{CursorValue, Result};

/// Identifies one incarnation of the live watch. Bumped on every rescope.
pub type Generation = u64;

/// Identifies one outstanding page fetch.
pub type FetchTicket = u64;

/// The range a live watch covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WatchScope {
    /// No watermark yet: the first `limit` records in cursor order.
    FirstPage { limit: usize },
    /// Everything loaded so far: records with cursor ≤ the watermark.
    UpTo { cursor: CursorValue },
}

/// An owned handle to one live watch. Closing (or dropping) the handle must
/// release the underlying live-query resource.
pub trait WatchHandle {
    /// Tears down the watch. Idempotent.
    fn close(&mut self);

    /// A short description of the watch for diagnostics.
    fn describe(&self) -> String {
        String::from("watch")
    }
}

/// The storage/sync engine as seen by the view.
pub trait Backend {
    /// The watch handle type owned by the subscription slot.
    type Watch: WatchHandle;

    /// Creates a live watch over `scope`. Snapshot, delta, and error
    /// callbacks from this watch must be delivered as `ViewEvent`s carrying
    /// `generation`.
    fn watch(&mut self, scope: WatchScope, generation: Generation) -> Result<Self::Watch>;

    /// Starts a bounded fetch for `cursor > after ORDER BY cursor ASC
    /// LIMIT limit`. Completion must be delivered as a `PageLoaded` or
    /// `PageFailed` event carrying `ticket`.
    fn request_page(
        &mut self,
        after: Option<CursorValue>,
        limit: usize,
        ticket: FetchTicket,
    ) -> Result<()>;
}

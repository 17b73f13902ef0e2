//! Live view orchestration.
//!
//! This crate keeps a locally materialized view of a remote record set
//! alive: it opens and rescopes the watch subscription, advances the
//! pagination watermark, issues on-demand page fetches, and converts
//! sentinel visibility into load-more requests. The merge semantics
//! themselves live in `vista-merge`; this crate decides when each merge
//! happens and which events are still current.

#![no_std]

extern crate alloc;

mod backend;
mod cursor;
mod pager;
mod subscription;
mod trigger;
mod view;

pub use backend::{Backend, FetchTicket, Generation, WatchHandle, WatchScope};
pub use cursor::CursorTracker;
pub use pager::Pager;
pub use subscription::{SubscriptionManager, WatchState};
pub use trigger::{LoadTrigger, SentinelHandle};
pub use view::{LiveView, ViewChange, ViewEvent, ViewSubscribers, ViewSubscriptionId};

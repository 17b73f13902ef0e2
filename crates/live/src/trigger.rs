//! Edge-triggered load-more sensing.
//!
//! The host places a sentinel after the last rendered row and reports its
//! visibility here. Only the invisible-to-visible transition fires; a
//! sentinel that stays visible while a page loads does not re-fire until
//! the view rebinds it under a fresh handle.

/// Opaque identity for the sentinel currently bound to the trigger.
///
/// The view mints a new handle whenever the rendered row count changes, so
/// a sentinel that remains on-screen across a page load is observed as a
/// fresh element and can fire again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SentinelHandle(pub(crate) u64);

impl SentinelHandle {
    /// Returns the raw handle value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Latches sentinel visibility and reports rising edges.
#[derive(Debug, Default)]
pub struct LoadTrigger {
    sentinel: Option<SentinelHandle>,
    visible: bool,
}

impl LoadTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the trigger to a sentinel. Binding a different handle resets
    /// the visibility latch so the next sighting counts as a rising edge.
    pub fn bind(&mut self, sentinel: SentinelHandle) {
        if self.sentinel != Some(sentinel) {
            self.sentinel = Some(sentinel);
            self.visible = false;
        }
    }

    /// Returns the currently bound sentinel, if any.
    #[inline]
    pub fn sentinel(&self) -> Option<SentinelHandle> {
        self.sentinel
    }

    /// Records a visibility report. Returns true only on the transition
    /// from invisible to visible.
    pub fn on_visibility(&mut self, visible: bool) -> bool {
        if self.sentinel.is_none() {
            return false;
        }
        let fired = visible && !self.visible;
        self.visible = visible;
        fired
    }

    /// Unbinds the sentinel. Visibility reports are ignored until the next
    /// bind.
    pub fn unbind(&mut self) {
        self.sentinel = None;
        self.visible = false;
    }
}

//! Lightweight pull accounting.
//!
//! Wrap a cursor in `TrackedCursor` to count how many cursors a sequence
//! hands out and how many times they are advanced. Single-threaded by
//! construction, like the rest of the engine.

use std::cell::Cell;
use std::rc::Rc;

use lazyq_core::Result;

use crate::enumerator::Enumerator;

#[derive(Default)]
struct Counters {
    cursors: Cell<usize>,
    advances: Cell<usize>,
    yielded: Cell<usize>,
}

/// Shared pull counters. Clones observe the same counts.
#[derive(Clone, Default)]
pub struct PullTracker {
    counters: Rc<Counters>,
}

impl PullTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cursor(&self) {
        let c = &self.counters.cursors;
        c.set(c.get() + 1);
    }

    /// Record one `advance()` call and whether it produced an element.
    pub fn record_advance(&self, produced: bool) {
        let a = &self.counters.advances;
        a.set(a.get() + 1);
        if produced {
            let y = &self.counters.yielded;
            y.set(y.get() + 1);
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            advances = a.get(),
            yielded = self.counters.yielded.get(),
            "pull"
        );
    }

    /// Cursors handed out so far.
    pub fn cursors(&self) -> usize {
        self.counters.cursors.get()
    }

    /// `advance()` calls so far, successful or not.
    pub fn advances(&self) -> usize {
        self.counters.advances.get()
    }

    /// Elements produced so far.
    pub fn yielded(&self) -> usize {
        self.counters.yielded.get()
    }

    pub fn reset(&self) {
        self.counters.cursors.set(0);
        self.counters.advances.set(0);
        self.counters.yielded.set(0);
    }
}

/// Cursor wrapper that reports every pull to a `PullTracker`.
pub struct TrackedCursor<E> {
    inner: E,
    tracker: PullTracker,
}

impl<E> TrackedCursor<E> {
    pub fn new(inner: E, tracker: PullTracker) -> Self {
        tracker.record_cursor();
        Self { inner, tracker }
    }
}

impl<E: Enumerator> Enumerator for TrackedCursor<E> {
    type Item = E::Item;

    fn advance(&mut self) -> bool {
        let produced = self.inner.advance();
        self.tracker.record_advance(produced);
        produced
    }

    fn current(&self) -> Option<&Self::Item> {
        self.inner.current()
    }

    fn restart(&mut self) -> Result<()> {
        self.inner.restart()
    }
}

//! The cursor contract.
//!
//! Invariants every implementation upholds:
//! - `current()` is `None` before the first successful `advance()`.
//! - once `advance()` returns false it keeps returning false, and
//!   `current()` keeps the last produced value.
//! - `restart()` rebinds to the beginning of the source and clears
//!   `current()`; cursors over one-shot iterators refuse with
//!   `Error::RestartUnsupported`.

use lazyq_core::Result;

pub trait Enumerator {
    type Item;

    /// Move to the next element. Returns whether one is now available.
    fn advance(&mut self) -> bool;

    /// The element staged by the most recent successful `advance()`.
    fn current(&self) -> Option<&Self::Item>;

    /// Rebind to the beginning of the source.
    fn restart(&mut self) -> Result<()>;
}

/// Owned, type-erased cursor as handed out by sequences.
pub type BoxedEnumerator<T> = Box<dyn Enumerator<Item = T>>;

impl<E: Enumerator + ?Sized> Enumerator for Box<E> {
    type Item = E::Item;

    #[inline]
    fn advance(&mut self) -> bool {
        (**self).advance()
    }

    #[inline]
    fn current(&self) -> Option<&Self::Item> {
        (**self).current()
    }

    fn restart(&mut self) -> Result<()> {
        (**self).restart()
    }
}

/// Helpers available on every cursor.
pub trait EnumeratorExt: Enumerator {
    /// Advance and clone out the newly staged element.
    #[inline]
    fn next_value(&mut self) -> Option<Self::Item>
    where
        Self::Item: Clone,
    {
        if self.advance() {
            self.current().cloned()
        } else {
            None
        }
    }

    /// View the remaining elements as a `std` iterator.
    fn values(self) -> Values<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Values { cursor: self }
    }
}

impl<E: Enumerator + ?Sized> EnumeratorExt for E {}

/// `Iterator` over the remaining elements of a cursor.
pub struct Values<E> {
    cursor: E,
}

impl<E> Values<E> {
    pub fn into_inner(self) -> E {
        self.cursor
    }
}

impl<E> Iterator for Values<E>
where
    E: Enumerator,
    E::Item: Clone,
{
    type Item = E::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next_value()
    }
}

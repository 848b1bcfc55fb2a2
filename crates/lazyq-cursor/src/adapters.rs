//! Native source adapters.
//!
//! Each adapter decides its own restart story:
//! - `SliceCursor` and `IterCursor` rewind to the start of their (re-iterable) source.
//! - `OnceCursor` wraps a shared one-shot iterator and refuses to restart.

use std::cell::RefCell;
use std::iter::Fuse;
use std::marker::PhantomData;
use std::rc::Rc;

use lazyq_core::{Error, Result};

use crate::enumerator::Enumerator;

/// Cursor over shared, indexed storage (vectors, slices, strings as chars).
pub struct SliceCursor<T> {
    items: Rc<[T]>,
    next: usize,
    staged: Option<usize>,
    exhausted: bool,
}

impl<T> SliceCursor<T> {
    pub fn new(items: Rc<[T]>) -> Self {
        Self {
            items,
            next: 0,
            staged: None,
            exhausted: false,
        }
    }
}

impl<T> Enumerator for SliceCursor<T> {
    type Item = T;

    #[inline]
    fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        if self.next < self.items.len() {
            self.staged = Some(self.next);
            self.next += 1;
            true
        } else {
            self.exhausted = true;
            false
        }
    }

    #[inline]
    fn current(&self) -> Option<&T> {
        self.staged.and_then(|i| self.items.get(i))
    }

    fn restart(&mut self) -> Result<()> {
        self.next = 0;
        self.staged = None;
        self.exhausted = false;
        Ok(())
    }
}

/// Cursor over a re-iterable source. Restart re-derives a fresh iterator
/// from a clone of the source.
pub struct IterCursor<I: IntoIterator> {
    source: I,
    iter: Option<I::IntoIter>,
    staged: Option<I::Item>,
    exhausted: bool,
}

impl<I> IterCursor<I>
where
    I: IntoIterator + Clone,
{
    pub fn new(source: I) -> Self {
        Self {
            source,
            iter: None,
            staged: None,
            exhausted: false,
        }
    }
}

impl<I> Enumerator for IterCursor<I>
where
    I: IntoIterator + Clone,
{
    type Item = I::Item;

    fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let source = &self.source;
        let iter = self.iter.get_or_insert_with(|| source.clone().into_iter());
        match iter.next() {
            Some(item) => {
                self.staged = Some(item);
                true
            }
            None => {
                self.exhausted = true;
                self.iter = None;
                false
            }
        }
    }

    #[inline]
    fn current(&self) -> Option<&I::Item> {
        self.staged.as_ref()
    }

    fn restart(&mut self) -> Result<()> {
        self.iter = None;
        self.staged = None;
        self.exhausted = false;
        Ok(())
    }
}

/// Shared handle to a one-shot iterator. All cursors pull from the same
/// underlying iterator, so elements are handed out at most once overall.
pub type SharedIter<I> = Rc<RefCell<Fuse<I>>>;

/// Cursor over a one-shot iterator. Restart is refused.
pub struct OnceCursor<I: Iterator> {
    shared: SharedIter<I>,
    staged: Option<I::Item>,
    exhausted: bool,
}

impl<I: Iterator> OnceCursor<I> {
    pub fn share(iter: I) -> SharedIter<I> {
        Rc::new(RefCell::new(iter.fuse()))
    }

    pub fn new(shared: SharedIter<I>) -> Self {
        Self {
            shared,
            staged: None,
            exhausted: false,
        }
    }
}

impl<I: Iterator> Enumerator for OnceCursor<I> {
    type Item = I::Item;

    fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let next = self.shared.borrow_mut().next();
        match next {
            Some(item) => {
                self.staged = Some(item);
                true
            }
            None => {
                self.exhausted = true;
                false
            }
        }
    }

    #[inline]
    fn current(&self) -> Option<&I::Item> {
        self.staged.as_ref()
    }

    fn restart(&mut self) -> Result<()> {
        Err(Error::RestartUnsupported)
    }
}

/// Cursor that never yields.
pub struct EmptyCursor<T> {
    _marker: PhantomData<T>,
}

impl<T> EmptyCursor<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for EmptyCursor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Enumerator for EmptyCursor<T> {
    type Item = T;

    fn advance(&mut self) -> bool {
        false
    }

    fn current(&self) -> Option<&T> {
        None
    }

    fn restart(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerator::EnumeratorExt;

    #[test]
    fn test_slice_cursor_freezes_current_after_exhaustion() {
        let mut cursor = SliceCursor::new(vec![10, 20].into());
        assert!(cursor.advance());
        assert!(cursor.advance());
        assert!(!cursor.advance());
        assert!(!cursor.advance());
        assert_eq!(cursor.current(), Some(&20));
    }

    #[test]
    fn test_slice_cursor_restart_reproduces_order() {
        let mut cursor = SliceCursor::new(vec![3, 1, 2].into());
        let first: Vec<_> = std::iter::from_fn(|| cursor.next_value()).collect();
        cursor.restart().expect("restart");
        assert_eq!(cursor.current(), None);
        let second: Vec<_> = std::iter::from_fn(|| cursor.next_value()).collect();
        assert_eq!(first, vec![3, 1, 2]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_iter_cursor_rederives_on_restart() {
        let set: std::collections::BTreeSet<i32> = [5, 1, 3].into_iter().collect();
        let mut cursor = IterCursor::new(set);
        let first: Vec<_> = std::iter::from_fn(|| cursor.next_value()).collect();
        cursor.restart().expect("restart");
        let second: Vec<_> = std::iter::from_fn(|| cursor.next_value()).collect();
        assert_eq!(first, vec![1, 3, 5]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_once_cursor_refuses_restart() {
        let shared = OnceCursor::share(vec![1, 2, 3].into_iter());
        let mut a = OnceCursor::new(Rc::clone(&shared));
        assert_eq!(a.next_value(), Some(1));
        assert_eq!(a.restart(), Err(Error::RestartUnsupported));

        // A second cursor continues from the shared position.
        let mut b = OnceCursor::new(shared);
        assert_eq!(b.next_value(), Some(2));
        assert_eq!(a.next_value(), Some(3));
        assert!(!b.advance());
        assert_eq!(b.current(), Some(&2));
    }

    #[test]
    fn test_empty_cursor() {
        let mut cursor = EmptyCursor::<u8>::new();
        assert!(!cursor.advance());
        assert_eq!(cursor.current(), None);
    }
}

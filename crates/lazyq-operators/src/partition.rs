//! Partitioning operators: `take`, `take_while`, `take_last`, `skip`,
//! `skip_while`, `skip_last`.
//!
//! `take_last` and `skip_last` must know the total length before they can
//! stream, so their first `advance()` counts the source and then enumerates
//! it again. Over a single-pass source that second pass is impossible; the
//! configured `SinglePassPolicy` either rejects the operator or buffers the
//! source once.

use std::rc::Rc;

use lazyq_core::Result;
use lazyq_cursor::{Enumerator, EnumeratorExt, Step};

use crate::enumerable::Enumerable;

impl<T: Clone + 'static> Enumerable<T> {
    /// The first `count` elements. Never pulls past the bound.
    pub fn take(&self, count: usize) -> Enumerable<T> {
        let source = self.clone();
        self.derive(move || -> Step<T> {
            let mut cursor = source.cursor();
            let mut remaining = count;
            Box::new(move || {
                if remaining == 0 {
                    return None;
                }
                remaining -= 1;
                cursor.next_value()
            })
        })
    }

    /// Leading elements while `predicate` holds.
    pub fn take_while<P>(&self, predicate: P) -> Enumerable<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        self.derive(move || -> Step<T> {
            let mut cursor = source.cursor();
            let predicate = Rc::clone(&predicate);
            Box::new(move || {
                let item = cursor.next_value()?;
                predicate(&item).then_some(item)
            })
        })
    }

    /// The final `count` elements.
    pub fn take_last(&self, count: usize) -> Result<Enumerable<T>> {
        let buffered = self.two_pass_buffered("take_last")?;
        let source = self.clone();
        Ok(self.derive(move || -> Step<T> {
            let (mut cursor, total) = source.two_pass_cursor(buffered);
            let mut to_skip = total.saturating_sub(count);
            Box::new(move || {
                while to_skip > 0 {
                    to_skip -= 1;
                    if !cursor.advance() {
                        return None;
                    }
                }
                cursor.next_value()
            })
        }))
    }

    /// Everything after the first `count` elements.
    pub fn skip(&self, count: usize) -> Enumerable<T> {
        let source = self.clone();
        self.derive(move || -> Step<T> {
            let mut cursor = source.cursor();
            let mut to_skip = count;
            Box::new(move || {
                while to_skip > 0 {
                    to_skip -= 1;
                    if !cursor.advance() {
                        return None;
                    }
                }
                cursor.next_value()
            })
        })
    }

    /// Everything from the first element for which `predicate` fails.
    /// The predicate is not consulted again after that.
    pub fn skip_while<P>(&self, predicate: P) -> Enumerable<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        self.derive(move || -> Step<T> {
            let mut cursor = source.cursor();
            let predicate = Rc::clone(&predicate);
            let mut skipping = true;
            Box::new(move || loop {
                let item = cursor.next_value()?;
                if skipping && predicate(&item) {
                    continue;
                }
                skipping = false;
                return Some(item);
            })
        })
    }

    /// Everything except the final `count` elements.
    pub fn skip_last(&self, count: usize) -> Result<Enumerable<T>> {
        let buffered = self.two_pass_buffered("skip_last")?;
        let source = self.clone();
        Ok(self.derive(move || -> Step<T> {
            let (mut cursor, total) = source.two_pass_cursor(buffered);
            let mut remaining = total.saturating_sub(count);
            Box::new(move || {
                if remaining == 0 {
                    return None;
                }
                remaining -= 1;
                cursor.next_value()
            })
        }))
    }
}

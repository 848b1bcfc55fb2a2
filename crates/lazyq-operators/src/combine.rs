//! Combining operators: `concat` (chain), `append`, `prepend`, `zip`,
//! `default_if_empty`.

use std::rc::Rc;

use lazyq_cursor::{Enumerator, EnumeratorExt, Step};

use crate::enumerable::Enumerable;

impl<T: Clone + 'static> Enumerable<T> {
    /// All of `self`, then all of `second`.
    #[doc(alias = "chain")]
    pub fn concat(&self, second: &Enumerable<T>) -> Enumerable<T> {
        let source = self.clone();
        let other = second.clone();
        self.derive_with(second, move || -> Step<T> {
            let mut first = source.cursor();
            let mut second = other.cursor();
            let mut on_first = true;
            Box::new(move || {
                if on_first {
                    if let Some(item) = first.next_value() {
                        return Some(item);
                    }
                    on_first = false;
                }
                second.next_value()
            })
        })
    }

    /// `self` followed by `value`, exactly once.
    pub fn append(&self, value: T) -> Enumerable<T> {
        let source = self.clone();
        self.derive(move || -> Step<T> {
            let mut cursor = source.cursor();
            let mut tail = Some(value.clone());
            Box::new(move || cursor.next_value().or_else(|| tail.take()))
        })
    }

    /// `value`, exactly once, followed by `self`.
    pub fn prepend(&self, value: T) -> Enumerable<T> {
        let source = self.clone();
        self.derive(move || -> Step<T> {
            let mut cursor = source.cursor();
            let mut head = Some(value.clone());
            Box::new(move || head.take().or_else(|| cursor.next_value()))
        })
    }

    /// Pairs elements of `self` and `second` in lock-step; stops at the
    /// shorter of the two.
    pub fn zip<U, R, F>(&self, second: &Enumerable<U>, result: F) -> Enumerable<R>
    where
        U: Clone + 'static,
        R: 'static,
        F: Fn(&T, &U) -> R + 'static,
    {
        let source = self.clone();
        let other = second.clone();
        let result = Rc::new(result);
        self.derive_with(second, move || -> Step<R> {
            let mut first = source.cursor();
            let mut second = other.cursor();
            let result = Rc::clone(&result);
            Box::new(move || {
                if !first.advance() || !second.advance() {
                    return None;
                }
                Some(result(first.current()?, second.current()?))
            })
        })
    }

    /// `self`, or a single `value` if `self` turns out to be empty.
    pub fn default_if_empty(&self, value: T) -> Enumerable<T> {
        let source = self.clone();
        self.derive(move || -> Step<T> {
            let mut cursor = source.cursor();
            let mut fallback = Some(value.clone());
            Box::new(move || match cursor.next_value() {
                Some(item) => {
                    fallback = None;
                    Some(item)
                }
                None => fallback.take(),
            })
        })
    }
}

//! Single-element terminals: `first`, `last`, `single`, `element_at`.
//!
//! Indexed sources answer `first`, `last` and `element_at` by position
//! without creating a cursor. The `*_or_default` forms turn the empty,
//! no-match and ambiguous cases into the caller's `default`; they never
//! hide an out-of-range argument.

use lazyq_core::{Error, Result};
use lazyq_cursor::{Enumerator, EnumeratorExt};

use crate::enumerable::Enumerable;

impl<T: Clone + 'static> Enumerable<T> {
    pub fn first(&self) -> Result<T> {
        if let Some(items) = self.as_slice() {
            return items.first().cloned().ok_or(Error::EmptySequence { op: "first" });
        }
        self.cursor()
            .next_value()
            .ok_or(Error::EmptySequence { op: "first" })
    }

    pub fn first_where<P>(&self, predicate: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        self.find_first(&predicate).ok_or(Error::NoMatch { op: "first" })
    }

    pub fn first_or_default(&self, default: Option<T>) -> Option<T> {
        self.first().ok().or(default)
    }

    pub fn first_where_or_default<P>(&self, predicate: P, default: Option<T>) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.find_first(&predicate).or(default)
    }

    pub fn last(&self) -> Result<T> {
        if let Some(items) = self.as_slice() {
            return items.last().cloned().ok_or(Error::EmptySequence { op: "last" });
        }
        self.find_last(&|_: &T| true)
            .ok_or(Error::EmptySequence { op: "last" })
    }

    pub fn last_where<P>(&self, predicate: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        self.find_last(&predicate).ok_or(Error::NoMatch { op: "last" })
    }

    pub fn last_or_default(&self, default: Option<T>) -> Option<T> {
        self.last().ok().or(default)
    }

    pub fn last_where_or_default<P>(&self, predicate: P, default: Option<T>) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.find_last(&predicate).or(default)
    }

    /// The only element. Fails on an empty source or a second element.
    pub fn single(&self) -> Result<T> {
        match self.find_single(&|_: &T| true)? {
            Some(item) => Ok(item),
            None => Err(Error::EmptySequence { op: "single" }),
        }
    }

    /// The only element satisfying `predicate`.
    pub fn single_where<P>(&self, predicate: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        match self.find_single(&predicate)? {
            Some(item) => Ok(item),
            None => Err(Error::NoMatch { op: "single" }),
        }
    }

    pub fn single_or_default(&self, default: Option<T>) -> Option<T> {
        self.single().ok().or(default)
    }

    pub fn single_where_or_default<P>(&self, predicate: P, default: Option<T>) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        self.single_where(predicate).ok().or(default)
    }

    /// Element at zero-based `index`.
    pub fn element_at(&self, index: usize) -> Result<T> {
        let found = match self.as_slice() {
            Some(items) => items.get(index).cloned(),
            None => self.iter().nth(index),
        };
        found.ok_or_else(|| {
            Error::out_of_range("index", index, "past the end of the sequence")
        })
    }

    pub fn element_at_or_default(&self, index: usize, default: Option<T>) -> Option<T> {
        self.element_at(index).ok().or(default)
    }

    fn find_first(&self, predicate: &dyn Fn(&T) -> bool) -> Option<T> {
        let mut cursor = self.cursor();
        while cursor.advance() {
            match cursor.current() {
                Some(item) if predicate(item) => return Some(item.clone()),
                _ => {}
            }
        }
        None
    }

    fn find_last(&self, predicate: &dyn Fn(&T) -> bool) -> Option<T> {
        let mut cursor = self.cursor();
        let mut found = None;
        while cursor.advance() {
            match cursor.current() {
                Some(item) if predicate(item) => found = Some(item.clone()),
                _ => {}
            }
        }
        found
    }

    /// Zero or one match; stops at the second match.
    fn find_single(&self, predicate: &dyn Fn(&T) -> bool) -> Result<Option<T>> {
        let mut cursor = self.cursor();
        let mut found = None;
        while cursor.advance() {
            match cursor.current() {
                Some(item) if predicate(item) => {
                    if found.is_some() {
                        return Err(Error::AmbiguousMatch { op: "single" });
                    }
                    found = Some(item.clone());
                }
                _ => {}
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyq_cursor::PullTracker;

    #[test]
    fn test_single_outcomes() {
        assert_eq!(
            Enumerable::<i32>::empty().single(),
            Err(Error::EmptySequence { op: "single" })
        );
        assert_eq!(
            Enumerable::from_vec(vec![1, 2]).single(),
            Err(Error::AmbiguousMatch { op: "single" })
        );
        assert_eq!(Enumerable::from_vec(vec![1]).single(), Ok(1));
        assert_eq!(Enumerable::from_vec(vec![1, 2]).single_or_default(None), None);
        assert_eq!(Enumerable::<i32>::empty().single_or_default(Some(7)), Some(7));
    }

    #[test]
    fn test_single_where_stops_at_second_match() {
        let tracker = PullTracker::new();
        let seq = Enumerable::from_iterable(vec![1, 2, 3, 4, 5]).tracked(&tracker);
        assert_eq!(
            seq.single_where(|x| *x > 1),
            Err(Error::AmbiguousMatch { op: "single" })
        );
        assert_eq!(tracker.yielded(), 3);
        assert_eq!(seq.single_where(|x| *x == 9), Err(Error::NoMatch { op: "single" }));
        assert_eq!(seq.single_where(|x| *x == 4), Ok(4));
    }

    #[test]
    fn test_first_and_last_fast_path() {
        let tracker = PullTracker::new();
        let seq = Enumerable::from_vec(vec![5, 6, 7]).tracked(&tracker);
        assert_eq!(seq.first(), Ok(5));
        assert_eq!(seq.last(), Ok(7));
        assert_eq!(tracker.cursors(), 0);

        let filtered = seq.filter(|x| *x > 5);
        assert_eq!(filtered.first(), Ok(6));
        assert_eq!(filtered.last(), Ok(7));
        assert_eq!(tracker.cursors(), 2);
    }

    #[test]
    fn test_first_last_errors_and_defaults() {
        let seq = Enumerable::from_vec(vec![1, 2, 3, 4]);
        assert_eq!(seq.first_where(|x| x % 2 == 0), Ok(2));
        assert_eq!(seq.last_where(|x| x % 2 == 1), Ok(3));
        assert_eq!(seq.first_where(|x| *x > 9), Err(Error::NoMatch { op: "first" }));
        assert_eq!(seq.last_where_or_default(|x| *x > 9, Some(0)), Some(0));
        assert_eq!(
            Enumerable::<i32>::empty().last(),
            Err(Error::EmptySequence { op: "last" })
        );
        assert_eq!(Enumerable::<i32>::empty().first_or_default(None), None);
    }

    #[test]
    fn test_element_at() {
        let seq = Enumerable::from_vec(vec!['a', 'b', 'c']);
        assert_eq!(seq.element_at(1), Ok('b'));
        assert_eq!(seq.filter(|c| *c != 'a').element_at(1), Ok('c'));
        assert!(matches!(
            seq.element_at(3),
            Err(Error::OutOfRange { param: "index", .. })
        ));
        assert_eq!(seq.element_at_or_default(3, Some('z')), Some('z'));
    }
}

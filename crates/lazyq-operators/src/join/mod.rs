//! Key-matching joins built on `Lookup`.
//!
//! Both joins index the inner sequence on the first `advance()` and then
//! stream the outer sequence:
//! - `inner_join`: one result per (outer, matching inner) pair; an outer
//!   element with no matching inner group contributes nothing.
//! - `group_join`: exactly one result per outer element, paired with its
//!   (possibly empty) inner group.

use std::rc::Rc;

use lazyq_core::Equality;
use lazyq_cursor::{EnumeratorExt, Step};

use crate::enumerable::Enumerable;
use crate::lookup::{Grouping, Lookup};

impl<T: Clone + 'static> Enumerable<T> {
    pub fn inner_join<I, K, R, OK, IK, RF>(
        &self,
        inner: &Enumerable<I>,
        outer_key: OK,
        inner_key: IK,
        result: RF,
    ) -> Enumerable<R>
    where
        I: Clone + 'static,
        K: Clone + PartialEq + 'static,
        R: 'static,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&I) -> K + 'static,
        RF: Fn(&T, &I) -> R + 'static,
    {
        self.inner_join_with(inner, outer_key, inner_key, result, Equality::default())
    }

    pub fn inner_join_with<I, K, R, OK, IK, RF>(
        &self,
        inner: &Enumerable<I>,
        outer_key: OK,
        inner_key: IK,
        result: RF,
        comparer: Equality<K>,
    ) -> Enumerable<R>
    where
        I: Clone + 'static,
        K: Clone + 'static,
        R: 'static,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&I) -> K + 'static,
        RF: Fn(&T, &I) -> R + 'static,
    {
        let outer = self.clone();
        let inner_source = inner.clone();
        let outer_key = Rc::new(outer_key);
        let inner_key = Rc::new(inner_key);
        let result = Rc::new(result);
        self.derive_with(inner, move || -> Step<R> {
            let lookup = Lookup::build(&inner_source, &*inner_key, I::clone, comparer.clone());
            let mut cursor = outer.cursor();
            let outer_key = Rc::clone(&outer_key);
            let result = Rc::clone(&result);
            let mut matched: Option<(T, Grouping<K, I>)> = None;
            let mut index = 0;
            Box::new(move || loop {
                if let Some((item, group)) = &matched {
                    if let Some(value) = group.as_slice().get(index) {
                        index += 1;
                        return Some(result(item, value));
                    }
                }
                let item = cursor.next_value()?;
                let key = outer_key(&item);
                matched = lookup.get(&key).map(|group| (item, group.clone()));
                index = 0;
            })
        })
    }

    pub fn group_join<I, K, R, OK, IK, RF>(
        &self,
        inner: &Enumerable<I>,
        outer_key: OK,
        inner_key: IK,
        result: RF,
    ) -> Enumerable<R>
    where
        I: Clone + 'static,
        K: PartialEq + 'static,
        R: 'static,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&I) -> K + 'static,
        RF: Fn(&T, Enumerable<I>) -> R + 'static,
    {
        self.group_join_with(inner, outer_key, inner_key, result, Equality::default())
    }

    pub fn group_join_with<I, K, R, OK, IK, RF>(
        &self,
        inner: &Enumerable<I>,
        outer_key: OK,
        inner_key: IK,
        result: RF,
        comparer: Equality<K>,
    ) -> Enumerable<R>
    where
        I: Clone + 'static,
        K: 'static,
        R: 'static,
        OK: Fn(&T) -> K + 'static,
        IK: Fn(&I) -> K + 'static,
        RF: Fn(&T, Enumerable<I>) -> R + 'static,
    {
        let outer = self.clone();
        let inner_source = inner.clone();
        let outer_key = Rc::new(outer_key);
        let inner_key = Rc::new(inner_key);
        let result = Rc::new(result);
        self.derive_with(inner, move || -> Step<R> {
            let lookup = Lookup::build(&inner_source, &*inner_key, I::clone, comparer.clone());
            let mut cursor = outer.cursor();
            let outer_key = Rc::clone(&outer_key);
            let result = Rc::clone(&result);
            Box::new(move || {
                let item = cursor.next_value()?;
                let group = lookup.get_group_elements(&outer_key(&item));
                Some(result(&item, group))
            })
        })
    }
}

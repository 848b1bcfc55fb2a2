//! Set operators: `distinct`, `except`, `intersect`, `union` and their
//! `_by` (key selector) and `_with` (custom comparer) variants.
//!
//! Comparers are arbitrary pairwise predicates, so "seen" buffers are plain
//! vectors scanned linearly: O(n * distinct) per stage. Buffers hold keys of
//! elements already seen (or of the materialized second sequence), never
//! elements that have not been requested yet.

use std::rc::Rc;

use lazyq_core::Equality;
use lazyq_cursor::{BoxedEnumerator, Enumerator, Step};

use crate::enumerable::Enumerable;

fn contains_key<K>(buffer: &[K], key: &K, comparer: &Equality<K>) -> bool {
    buffer.iter().any(|seen| comparer.equals(seen, key))
}

impl<T: Clone + 'static> Enumerable<T> {
    fn distinct_core<K, KF>(&self, key: KF, comparer: Equality<K>) -> Enumerable<T>
    where
        K: 'static,
        KF: Fn(&T) -> K + 'static,
    {
        let source = self.clone();
        let key = Rc::new(key);
        let hint = self.capacity_hint();
        self.derive(move || -> Step<T> {
            let mut cursor = source.cursor();
            let key = Rc::clone(&key);
            let comparer = comparer.clone();
            let mut seen: Vec<K> = Vec::with_capacity(hint);
            Box::new(move || {
                while cursor.advance() {
                    let Some(item) = cursor.current() else {
                        continue;
                    };
                    let k = key(item);
                    if !contains_key(&seen, &k, &comparer) {
                        seen.push(k);
                        return Some(item.clone());
                    }
                }
                None
            })
        })
    }

    /// Elements of `self` whose key is found (`keep_found`) or not found in
    /// the keys of `second`, which is drained once on the first `advance()`.
    fn filter_against<K, KF>(
        &self,
        second: &Enumerable<T>,
        key: KF,
        comparer: Equality<K>,
        keep_found: bool,
    ) -> Enumerable<T>
    where
        K: 'static,
        KF: Fn(&T) -> K + 'static,
    {
        let source = self.clone();
        let other = second.clone();
        let key = Rc::new(key);
        let hint = self.capacity_hint();
        self.derive_with(second, move || -> Step<T> {
            let mut keys: Vec<K> = Vec::with_capacity(hint);
            let mut other_cursor = other.cursor();
            while other_cursor.advance() {
                if let Some(item) = other_cursor.current() {
                    keys.push(key(item));
                }
            }

            let mut cursor = source.cursor();
            let key = Rc::clone(&key);
            let comparer = comparer.clone();
            Box::new(move || {
                while cursor.advance() {
                    let Some(item) = cursor.current() else {
                        continue;
                    };
                    if contains_key(&keys, &key(item), &comparer) == keep_found {
                        return Some(item.clone());
                    }
                }
                None
            })
        })
    }

    fn union_core<K, KF>(&self, second: &Enumerable<T>, key: KF, comparer: Equality<K>) -> Enumerable<T>
    where
        K: 'static,
        KF: Fn(&T) -> K + 'static,
    {
        let source = self.clone();
        let other = second.clone();
        let key = Rc::new(key);
        let hint = self.capacity_hint();
        self.derive_with(second, move || -> Step<T> {
            let mut first = source.cursor();
            let mut second = other.cursor();
            let mut on_first = true;
            let key = Rc::clone(&key);
            let comparer = comparer.clone();
            let mut seen: Vec<K> = Vec::with_capacity(hint);
            Box::new(move || loop {
                let cursor: &mut BoxedEnumerator<T> = if on_first { &mut first } else { &mut second };
                if !cursor.advance() {
                    if on_first {
                        on_first = false;
                        continue;
                    }
                    return None;
                }
                let Some(item) = cursor.current() else {
                    continue;
                };
                let k = key(item);
                if !contains_key(&seen, &k, &comparer) {
                    seen.push(k);
                    return Some(item.clone());
                }
            })
        })
    }

    /// First occurrence of each element.
    pub fn distinct(&self) -> Enumerable<T>
    where
        T: PartialEq,
    {
        self.distinct_with(Equality::default())
    }

    pub fn distinct_with(&self, comparer: Equality<T>) -> Enumerable<T> {
        self.distinct_core(T::clone, comparer)
    }

    /// First element for each distinct key.
    pub fn distinct_by<K, KF>(&self, key: KF) -> Enumerable<T>
    where
        K: PartialEq + 'static,
        KF: Fn(&T) -> K + 'static,
    {
        self.distinct_core(key, Equality::default())
    }

    pub fn distinct_by_with<K, KF>(&self, key: KF, comparer: Equality<K>) -> Enumerable<T>
    where
        K: 'static,
        KF: Fn(&T) -> K + 'static,
    {
        self.distinct_core(key, comparer)
    }

    /// Elements of `self` not present in `second`.
    pub fn except(&self, second: &Enumerable<T>) -> Enumerable<T>
    where
        T: PartialEq,
    {
        self.except_with(second, Equality::default())
    }

    pub fn except_with(&self, second: &Enumerable<T>, comparer: Equality<T>) -> Enumerable<T> {
        self.filter_against(second, T::clone, comparer, false)
    }

    /// Elements of `self` whose key matches no key of `second`.
    pub fn except_by<K, KF>(&self, second: &Enumerable<T>, key: KF) -> Enumerable<T>
    where
        K: PartialEq + 'static,
        KF: Fn(&T) -> K + 'static,
    {
        self.filter_against(second, key, Equality::default(), false)
    }

    pub fn except_by_with<K, KF>(
        &self,
        second: &Enumerable<T>,
        key: KF,
        comparer: Equality<K>,
    ) -> Enumerable<T>
    where
        K: 'static,
        KF: Fn(&T) -> K + 'static,
    {
        self.filter_against(second, key, comparer, false)
    }

    /// Elements of `self` also present in `second`.
    pub fn intersect(&self, second: &Enumerable<T>) -> Enumerable<T>
    where
        T: PartialEq,
    {
        self.intersect_with(second, Equality::default())
    }

    pub fn intersect_with(&self, second: &Enumerable<T>, comparer: Equality<T>) -> Enumerable<T> {
        self.filter_against(second, T::clone, comparer, true)
    }

    /// Elements of `self` whose key matches some key of `second`.
    pub fn intersect_by<K, KF>(&self, second: &Enumerable<T>, key: KF) -> Enumerable<T>
    where
        K: PartialEq + 'static,
        KF: Fn(&T) -> K + 'static,
    {
        self.filter_against(second, key, Equality::default(), true)
    }

    pub fn intersect_by_with<K, KF>(
        &self,
        second: &Enumerable<T>,
        key: KF,
        comparer: Equality<K>,
    ) -> Enumerable<T>
    where
        K: 'static,
        KF: Fn(&T) -> K + 'static,
    {
        self.filter_against(second, key, comparer, true)
    }

    /// Unique elements of `self`, then unique elements of `second` not
    /// already yielded.
    pub fn union(&self, second: &Enumerable<T>) -> Enumerable<T>
    where
        T: PartialEq,
    {
        self.union_with(second, Equality::default())
    }

    pub fn union_with(&self, second: &Enumerable<T>, comparer: Equality<T>) -> Enumerable<T> {
        self.union_core(second, T::clone, comparer)
    }

    pub fn union_by<K, KF>(&self, second: &Enumerable<T>, key: KF) -> Enumerable<T>
    where
        K: PartialEq + 'static,
        KF: Fn(&T) -> K + 'static,
    {
        self.union_core(second, key, Equality::default())
    }

    pub fn union_by_with<K, KF>(
        &self,
        second: &Enumerable<T>,
        key: KF,
        comparer: Equality<K>,
    ) -> Enumerable<T>
    where
        K: 'static,
        KF: Fn(&T) -> K + 'static,
    {
        self.union_core(second, key, comparer)
    }
}

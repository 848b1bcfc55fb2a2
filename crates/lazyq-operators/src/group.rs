//! Grouping operators built on `Lookup`.
//!
//! `group_by*` are deferred: the lookup is built on the first `advance()`
//! and then its groups are streamed. `to_lookup*` build it immediately.

use std::rc::Rc;

use lazyq_core::Equality;
use lazyq_cursor::Step;

use crate::enumerable::Enumerable;
use crate::lookup::{Grouping, Lookup};

impl<T: Clone + 'static> Enumerable<T> {
    /// One grouping per distinct key, in first-occurrence-of-key order.
    pub fn group_by<K, KF>(&self, key: KF) -> Enumerable<Grouping<K, T>>
    where
        K: Clone + PartialEq + 'static,
        KF: Fn(&T) -> K + 'static,
    {
        self.group_by_with(key, T::clone, Equality::default())
    }

    /// `group_by` with an element projection and a key comparer.
    pub fn group_by_with<K, V, KF, EF>(
        &self,
        key: KF,
        element: EF,
        comparer: Equality<K>,
    ) -> Enumerable<Grouping<K, V>>
    where
        K: Clone + 'static,
        V: 'static,
        KF: Fn(&T) -> K + 'static,
        EF: Fn(&T) -> V + 'static,
    {
        let source = self.clone();
        let key = Rc::new(key);
        let element = Rc::new(element);
        self.derive(move || -> Step<Grouping<K, V>> {
            let lookup = Lookup::build(&source, &*key, &*element, comparer.clone());
            let mut index = 0;
            Box::new(move || {
                let group = lookup.groups().get(index)?.clone();
                index += 1;
                Some(group)
            })
        })
    }

    /// `group_by` with an element projection and a final projection over
    /// each key and its elements.
    pub fn group_by_result<K, V, R, KF, EF, RF>(
        &self,
        key: KF,
        element: EF,
        result: RF,
    ) -> Enumerable<R>
    where
        K: Clone + PartialEq + 'static,
        V: 'static,
        R: 'static,
        KF: Fn(&T) -> K + 'static,
        EF: Fn(&T) -> V + 'static,
        RF: Fn(&K, Enumerable<V>) -> R + 'static,
    {
        self.group_by_with(key, element, Equality::default())
            .map(move |group| result(group.key(), group.elements()))
    }

    /// Build a lookup over this sequence now.
    pub fn to_lookup<K, KF>(&self, key: KF) -> Lookup<K, T>
    where
        K: PartialEq + 'static,
        KF: Fn(&T) -> K,
    {
        Lookup::build(self, key, T::clone, Equality::default())
    }

    pub fn to_lookup_with<K, V, KF, EF>(
        &self,
        key: KF,
        element: EF,
        comparer: Equality<K>,
    ) -> Lookup<K, V>
    where
        KF: Fn(&T) -> K,
        EF: Fn(&T) -> V,
    {
        Lookup::build(self, key, element, comparer)
    }
}

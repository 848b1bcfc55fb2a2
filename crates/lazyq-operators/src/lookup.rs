//! Eager, key-partitioned index over a drained sequence.
//!
//! Keys are matched with a caller-supplied `Equality`, not a hash, so each
//! insert scans the existing groups linearly. Group order is the order in
//! which keys first appear; elements keep source order within a group.
//! A `Lookup` is immutable once built and never re-reads its source.

use std::fmt;
use std::rc::Rc;

use lazyq_core::{Equality, QueryConfig};
use lazyq_cursor::Enumerator;

use crate::enumerable::Enumerable;

/// A key and the elements that mapped to it.
pub struct Grouping<K, V> {
    key: K,
    elements: Rc<[V]>,
    config: Rc<QueryConfig>,
}

impl<K: Clone, V> Clone for Grouping<K, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            elements: Rc::clone(&self.elements),
            config: Rc::clone(&self.config),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Grouping<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grouping")
            .field("key", &self.key)
            .field("elements", &&*self.elements)
            .finish()
    }
}

impl<K, V> Grouping<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn as_slice(&self) -> &[V] {
        &self.elements
    }
}

impl<K, V: 'static> Grouping<K, V> {
    /// The group's elements as a sequence (indexed, known length).
    pub fn elements(&self) -> Enumerable<V> {
        Enumerable::from_shared(Rc::clone(&self.elements)).with_config((*self.config).clone())
    }
}

pub struct Lookup<K, V> {
    groups: Rc<[Grouping<K, V>]>,
    comparer: Equality<K>,
    config: Rc<QueryConfig>,
}

impl<K, V> Clone for Lookup<K, V> {
    fn clone(&self) -> Self {
        Self {
            groups: Rc::clone(&self.groups),
            comparer: self.comparer.clone(),
            config: Rc::clone(&self.config),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Lookup<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.groups.iter()).finish()
    }
}

impl<K, V> Lookup<K, V> {
    /// Drain `source` once, partitioning `element_selector(e)` by
    /// `key_selector(e)` under `comparer`.
    pub fn build<T, KS, ES>(
        source: &Enumerable<T>,
        key_selector: KS,
        element_selector: ES,
        comparer: Equality<K>,
    ) -> Self
    where
        T: 'static,
        KS: Fn(&T) -> K,
        ES: Fn(&T) -> V,
    {
        let hint = source.capacity_hint();
        let mut keys: Vec<K> = Vec::with_capacity(hint);
        let mut buckets: Vec<Vec<V>> = Vec::with_capacity(hint);
        #[cfg(feature = "tracing")]
        let mut elements = 0usize;

        let mut cursor = source.cursor();
        while cursor.advance() {
            let Some(item) = cursor.current() else {
                continue;
            };
            let key = key_selector(item);
            let value = element_selector(item);
            match keys.iter().position(|k| comparer.equals(k, &key)) {
                Some(slot) => buckets[slot].push(value),
                None => {
                    keys.push(key);
                    buckets.push(vec![value]);
                }
            }
            #[cfg(feature = "tracing")]
            {
                elements += 1;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(groups = keys.len(), elements, "lookup built");

        let config = source.shared_config();
        let groups: Vec<Grouping<K, V>> = keys
            .into_iter()
            .zip(buckets)
            .map(|(key, values)| Grouping {
                key,
                elements: values.into(),
                config: Rc::clone(&config),
            })
            .collect();

        Self {
            groups: groups.into(),
            comparer,
            config,
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<&Grouping<K, V>> {
        self.groups
            .iter()
            .find(|group| self.comparer.equals(&group.key, key))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Groups in first-occurrence-of-key order.
    pub fn groups(&self) -> &[Grouping<K, V>] {
        &self.groups
    }
}

impl<K, V: 'static> Lookup<K, V> {
    /// Elements of the group matching `key`, or an empty sequence.
    pub fn get_group_elements(&self, key: &K) -> Enumerable<V> {
        match self.get(key) {
            Some(group) => group.elements(),
            None => Enumerable::empty().with_config((*self.config).clone()),
        }
    }
}

impl<K: Clone + 'static, V: 'static> Lookup<K, V> {
    /// The groups as a sequence.
    pub fn to_enumerable(&self) -> Enumerable<Grouping<K, V>> {
        Enumerable::from_shared(Rc::clone(&self.groups)).with_config((*self.config).clone())
    }
}

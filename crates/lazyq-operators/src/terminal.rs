//! Collecting terminals.

use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Write};
use std::hash::Hash;

use lazyq_core::Equality;
use lazyq_cursor::{Enumerator, EnumeratorExt};

use crate::enumerable::Enumerable;

impl<T: Clone + 'static> Enumerable<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.materialize()
    }

    /// Collect into a map. A repeated key keeps the last value.
    pub fn to_map<K, V, KF, VF>(&self, key: KF, value: VF) -> HashMap<K, V>
    where
        K: Eq + Hash,
        KF: Fn(&T) -> K,
        VF: Fn(&T) -> V,
    {
        let mut map = HashMap::with_capacity(self.len_hint().unwrap_or(self.capacity_hint()));
        let mut cursor = self.cursor();
        while cursor.advance() {
            if let Some(item) = cursor.current() {
                map.insert(key(item), value(item));
            }
        }
        map
    }

    pub fn to_set(&self) -> HashSet<T>
    where
        T: Eq + Hash,
    {
        self.iter().collect()
    }

    /// Run `action` on every element, in order.
    pub fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(&T),
    {
        let mut cursor = self.cursor();
        while cursor.advance() {
            if let Some(item) = cursor.current() {
                action(item);
            }
        }
    }

    /// Display every element, separated by `separator`.
    pub fn join_by(&self, separator: &str) -> String
    where
        T: Display,
    {
        let mut out = String::new();
        let mut first = true;
        self.for_each(|item| {
            if !first {
                out.push_str(separator);
            }
            first = false;
            // Writing to a String cannot fail.
            let _ = write!(out, "{item}");
        });
        out
    }

    pub fn sequence_equal(&self, other: &Enumerable<T>) -> bool
    where
        T: PartialEq,
    {
        self.sequence_equal_with(other, &Equality::default())
    }

    /// Same length and pairwise equal under `comparer`.
    pub fn sequence_equal_with(&self, other: &Enumerable<T>, comparer: &Equality<T>) -> bool {
        if let (Some(a), Some(b)) = (self.len_hint(), other.len_hint()) {
            if a != b {
                return false;
            }
        }
        let mut left = self.cursor();
        let mut right = other.cursor();
        loop {
            match (left.next_value(), right.next_value()) {
                (Some(a), Some(b)) if comparer.equals(&a, &b) => continue,
                (None, None) => return true,
                _ => return false,
            }
        }
    }
}

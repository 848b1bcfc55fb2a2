//! Terminal folds: counting, quantifiers, accumulation, and extremes.
//!
//! `count` and `any` answer from a known length without creating a cursor.
//! Everything else drains a fresh cursor, stopping early where the answer
//! is already decided (`any_where`, `all`, `contains`).

use std::cmp::Ordering;
use std::ops::Add;

use lazyq_core::{Comparison, Equality, Error, Result};
use lazyq_cursor::{Enumerator, EnumeratorExt};

use crate::enumerable::Enumerable;

impl<T: 'static> Enumerable<T> {
    /// Number of elements. Known-length sources answer without a cursor.
    pub fn count(&self) -> usize {
        if let Some(len) = self.len_hint() {
            return len;
        }
        let mut cursor = self.cursor();
        let mut n = 0usize;
        while cursor.advance() {
            n += 1;
        }
        n
    }

    pub fn count_where<P>(&self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        let mut cursor = self.cursor();
        let mut n = 0usize;
        while cursor.advance() {
            if cursor.current().is_some_and(&predicate) {
                n += 1;
            }
        }
        n
    }

    /// Whether the sequence has at least one element.
    pub fn any(&self) -> bool {
        match self.len_hint() {
            Some(len) => len > 0,
            None => self.cursor().advance(),
        }
    }

    pub fn any_where<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        let mut cursor = self.cursor();
        while cursor.advance() {
            if cursor.current().is_some_and(&predicate) {
                return true;
            }
        }
        false
    }

    /// Whether every element satisfies `predicate`; vacuously true when empty.
    pub fn all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        !self.any_where(|item| !predicate(item))
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.any_where(|item| item == value)
    }

    pub fn contains_with(&self, value: &T, comparer: &Equality<T>) -> bool {
        self.any_where(|item| comparer.equals(item, value))
    }

    /// Fold with an explicit seed. Never fails; an empty source returns `seed`.
    pub fn aggregate_seed<A, F>(&self, seed: A, f: F) -> A
    where
        F: Fn(A, &T) -> A,
    {
        let mut cursor = self.cursor();
        let mut acc = seed;
        while cursor.advance() {
            if let Some(item) = cursor.current() {
                acc = f(acc, item);
            }
        }
        acc
    }

    /// Seeded fold followed by a projection of the final accumulator.
    pub fn aggregate_with<A, R, F, RF>(&self, seed: A, f: F, result: RF) -> R
    where
        F: Fn(A, &T) -> A,
        RF: FnOnce(A) -> R,
    {
        result(self.aggregate_seed(seed, f))
    }

    /// Mean of `selector` over the sequence.
    pub fn average<F>(&self, selector: F) -> Result<f64>
    where
        F: Fn(&T) -> f64,
    {
        let (sum, n) = self.aggregate_seed((0.0f64, 0usize), |(sum, n), item| {
            (sum + selector(item), n + 1)
        });
        if n == 0 {
            return Err(Error::EmptySequence { op: "average" });
        }
        Ok(sum / n as f64)
    }
}

impl<T: Clone + 'static> Enumerable<T> {
    /// Fold without a seed: the first element is the initial accumulator
    /// and is not passed to `f`.
    pub fn aggregate<F>(&self, f: F) -> Result<T>
    where
        F: Fn(T, &T) -> T,
    {
        let mut cursor = self.cursor();
        let mut acc = cursor
            .next_value()
            .ok_or(Error::EmptySequence { op: "aggregate" })?;
        while cursor.advance() {
            if let Some(item) = cursor.current() {
                acc = f(acc, item);
            }
        }
        Ok(acc)
    }

    /// Unseeded fold followed by a projection of the final accumulator.
    pub fn aggregate_then<R, F, RF>(&self, f: F, result: RF) -> Result<R>
    where
        F: Fn(T, &T) -> T,
        RF: FnOnce(T) -> R,
    {
        self.aggregate(f).map(result)
    }

    /// Sum of the elements. An empty source is an error, not zero.
    pub fn sum(&self) -> Result<T>
    where
        T: Add<Output = T>,
    {
        self.aggregate(|acc, item| acc + item.clone())
            .map_err(|_| Error::EmptySequence { op: "sum" })
    }

    pub fn sum_by<N, F>(&self, selector: F) -> Result<N>
    where
        N: Add<Output = N>,
        F: Fn(&T) -> N,
    {
        let total = self.aggregate_seed(None, |acc: Option<N>, item| {
            let value = selector(item);
            Some(match acc {
                Some(acc) => acc + value,
                None => value,
            })
        });
        total.ok_or(Error::EmptySequence { op: "sum" })
    }

    pub fn min(&self) -> Result<T>
    where
        T: PartialOrd,
    {
        self.min_with(&Comparison::natural())
    }

    pub fn min_with(&self, comparison: &Comparison<T>) -> Result<T> {
        self.extreme("min", Ordering::Less, T::clone, comparison)
    }

    /// Element with the smallest key; the first one wins ties.
    pub fn min_by<K, KF>(&self, key: KF) -> Result<T>
    where
        K: PartialOrd + 'static,
        KF: Fn(&T) -> K,
    {
        self.min_by_with(key, &Comparison::natural())
    }

    pub fn min_by_with<K, KF>(&self, key: KF, comparison: &Comparison<K>) -> Result<T>
    where
        KF: Fn(&T) -> K,
    {
        self.extreme("min", Ordering::Less, key, comparison)
    }

    pub fn max(&self) -> Result<T>
    where
        T: PartialOrd,
    {
        self.max_with(&Comparison::natural())
    }

    pub fn max_with(&self, comparison: &Comparison<T>) -> Result<T> {
        self.extreme("max", Ordering::Greater, T::clone, comparison)
    }

    /// Element with the largest key; the first one wins ties.
    pub fn max_by<K, KF>(&self, key: KF) -> Result<T>
    where
        K: PartialOrd + 'static,
        KF: Fn(&T) -> K,
    {
        self.max_by_with(key, &Comparison::natural())
    }

    pub fn max_by_with<K, KF>(&self, key: KF, comparison: &Comparison<K>) -> Result<T>
    where
        KF: Fn(&T) -> K,
    {
        self.extreme("max", Ordering::Greater, key, comparison)
    }

    /// Keep the element whose key compares `wanted` against the best so far.
    fn extreme<K, KF>(
        &self,
        op: &'static str,
        wanted: Ordering,
        key: KF,
        comparison: &Comparison<K>,
    ) -> Result<T>
    where
        KF: Fn(&T) -> K,
    {
        let mut cursor = self.cursor();
        let mut best: Option<(K, T)> = None;
        while cursor.advance() {
            let Some(item) = cursor.current() else {
                continue;
            };
            let k = key(item);
            let replace = match &best {
                None => true,
                Some((best_key, _)) => comparison.compare(&k, best_key) == wanted,
            };
            if replace {
                best = Some((k, item.clone()));
            }
        }
        best.map(|(_, item)| item).ok_or(Error::EmptySequence { op })
    }
}

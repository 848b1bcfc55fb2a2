//! Ordering operators.
//!
//! Sorting cannot yield anything before it has seen every element, so the
//! sorted view materializes its source on the first `advance()` and then
//! streams the buffer. Building or refining an ordering touches nothing.

mod chain;

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use lazyq_core::Comparison;
use lazyq_cursor::Step;

use crate::enumerable::Enumerable;

use chain::{key_order, Compare};

/// A sequence with a primary ordering that `then_by*` can refine.
///
/// Dereferences to the sorted `Enumerable`, so every operator is available
/// directly on it.
pub struct OrderedEnumerable<T> {
    source: Enumerable<T>,
    compare: Compare<T>,
    sorted: Enumerable<T>,
}

impl<T> Clone for OrderedEnumerable<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            compare: Rc::clone(&self.compare),
            sorted: self.sorted.clone(),
        }
    }
}

impl<T> fmt::Debug for OrderedEnumerable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedEnumerable")
            .field("source", &self.source)
            .finish()
    }
}

impl<T> Deref for OrderedEnumerable<T> {
    type Target = Enumerable<T>;

    fn deref(&self) -> &Enumerable<T> {
        &self.sorted
    }
}

impl<T> From<OrderedEnumerable<T>> for Enumerable<T> {
    fn from(ordered: OrderedEnumerable<T>) -> Self {
        ordered.sorted
    }
}

impl<T: Clone + 'static> OrderedEnumerable<T> {
    fn new(source: Enumerable<T>, compare: Compare<T>) -> Self {
        let sorted = sorted_view(&source, Rc::clone(&compare));
        Self {
            source,
            compare,
            sorted,
        }
    }

    /// Break ties of the current ordering by `key`, ascending.
    pub fn then_by<K, KF>(&self, key: KF) -> Self
    where
        K: PartialOrd + 'static,
        KF: Fn(&T) -> K + 'static,
    {
        self.then_by_with(key, Comparison::natural())
    }

    pub fn then_by_descending<K, KF>(&self, key: KF) -> Self
    where
        K: PartialOrd + 'static,
        KF: Fn(&T) -> K + 'static,
    {
        self.then_by_with(key, Comparison::natural().reversed())
    }

    pub fn then_by_with<K, KF>(&self, key: KF, comparison: Comparison<K>) -> Self
    where
        K: 'static,
        KF: Fn(&T) -> K + 'static,
    {
        let primary = Rc::clone(&self.compare);
        let secondary = key_order(key, comparison);
        let compare: Compare<T> = Rc::new(move |a: &T, b: &T| -> Ordering {
            primary(a, b).then_with(|| secondary(a, b))
        });
        Self::new(self.source.clone(), compare)
    }

    pub fn into_enumerable(self) -> Enumerable<T> {
        self.sorted
    }
}

fn sorted_view<T: Clone + 'static>(source: &Enumerable<T>, compare: Compare<T>) -> Enumerable<T> {
    let upstream = source.clone();
    source.derive(move || -> Step<T> {
        let mut items = upstream.materialize();
        // `sort_by` is stable: equal keys keep source order.
        items.sort_by(|a, b| compare(a, b));
        #[cfg(feature = "tracing")]
        tracing::trace!(elements = items.len(), "ordered sequence materialized");
        let mut items = items.into_iter();
        Box::new(move || items.next())
    })
}

impl<T: Clone + 'static> Enumerable<T> {
    /// Stable ascending order by `key`.
    pub fn order_by<K, KF>(&self, key: KF) -> OrderedEnumerable<T>
    where
        K: PartialOrd + 'static,
        KF: Fn(&T) -> K + 'static,
    {
        self.order_by_with(key, Comparison::natural())
    }

    /// Stable descending order by `key`; equal keys keep source order.
    pub fn order_by_descending<K, KF>(&self, key: KF) -> OrderedEnumerable<T>
    where
        K: PartialOrd + 'static,
        KF: Fn(&T) -> K + 'static,
    {
        self.order_by_with(key, Comparison::natural().reversed())
    }

    pub fn order_by_with<K, KF>(&self, key: KF, comparison: Comparison<K>) -> OrderedEnumerable<T>
    where
        K: 'static,
        KF: Fn(&T) -> K + 'static,
    {
        OrderedEnumerable::new(self.clone(), key_order(key, comparison))
    }

    /// Back-to-front. The source is drained on the first `advance()`.
    pub fn reverse(&self) -> Enumerable<T> {
        let source = self.clone();
        self.derive(move || -> Step<T> {
            let items = source.materialize();
            #[cfg(feature = "tracing")]
            tracing::trace!(elements = items.len(), "reverse materialized");
            let mut items = items.into_iter().rev();
            Box::new(move || items.next())
        })
    }
}

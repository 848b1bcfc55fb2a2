//! Caller-supplied equality and ordering comparers.
//!
//! Equality is deliberately not tied to `Hash`: lookups and set operators
//! scan linearly so that any pairwise predicate can serve as a key comparer.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Pairwise equality over `K`. Cheap to clone.
pub struct Equality<K: ?Sized> {
    eq: Rc<dyn Fn(&K, &K) -> bool>,
}

impl<K: ?Sized> Equality<K> {
    pub fn new<F>(eq: F) -> Self
    where
        F: Fn(&K, &K) -> bool + 'static,
    {
        Self { eq: Rc::new(eq) }
    }

    #[inline]
    pub fn equals(&self, a: &K, b: &K) -> bool {
        (self.eq)(a, b)
    }
}

impl<K: PartialEq + ?Sized + 'static> Default for Equality<K> {
    fn default() -> Self {
        Self::new(|a: &K, b: &K| a == b)
    }
}

impl<K: ?Sized> Clone for Equality<K> {
    fn clone(&self) -> Self {
        Self {
            eq: Rc::clone(&self.eq),
        }
    }
}

impl<K: ?Sized> fmt::Debug for Equality<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Equality(..)")
    }
}

/// Three-way ordering over `K`. Cheap to clone.
pub struct Comparison<K: ?Sized> {
    cmp: Rc<dyn Fn(&K, &K) -> Ordering>,
}

impl<K: ?Sized> Comparison<K> {
    pub fn new<F>(cmp: F) -> Self
    where
        F: Fn(&K, &K) -> Ordering + 'static,
    {
        Self { cmp: Rc::new(cmp) }
    }

    /// Build from a boolean "a sorts before b" predicate.
    pub fn from_less<F>(less: F) -> Self
    where
        F: Fn(&K, &K) -> bool + 'static,
    {
        Self::new(move |a, b| {
            if less(a, b) {
                Ordering::Less
            } else if less(b, a) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
    }

    #[inline]
    pub fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.cmp)(a, b)
    }

    pub fn reversed(&self) -> Self
    where
        K: 'static,
    {
        let inner = Rc::clone(&self.cmp);
        Self::new(move |a, b| inner(b, a))
    }
}

impl<K: PartialOrd + ?Sized + 'static> Comparison<K> {
    /// Built-in ordering, made total: values unequal to themselves (NaN)
    /// sort after every other value and equal to each other.
    pub fn natural() -> Self {
        Self::new(|a: &K, b: &K| {
            a.partial_cmp(b)
                .unwrap_or_else(|| is_unordered(a).cmp(&is_unordered(b)))
        })
    }
}

#[allow(clippy::eq_op)]
fn is_unordered<K: PartialOrd + ?Sized>(value: &K) -> bool {
    value != value
}

impl<K: PartialOrd + ?Sized + 'static> Default for Comparison<K> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<K: ?Sized> Clone for Comparison<K> {
    fn clone(&self) -> Self {
        Self {
            cmp: Rc::clone(&self.cmp),
        }
    }
}

impl<K: ?Sized> fmt::Debug for Comparison<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Comparison(..)")
    }
}

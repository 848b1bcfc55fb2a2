//! Comparer chains for `order_by`/`then_by`.

use std::cmp::Ordering;
use std::rc::Rc;

use lazyq_core::Comparison;

pub(crate) type Compare<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// Order elements by a projected key. Keys are recomputed per comparison.
pub(crate) fn key_order<T, K, KF>(key: KF, comparison: Comparison<K>) -> Compare<T>
where
    T: 'static,
    K: 'static,
    KF: Fn(&T) -> K + 'static,
{
    Rc::new(move |a: &T, b: &T| -> Ordering { comparison.compare(&key(a), &key(b)) })
}

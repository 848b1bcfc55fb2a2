//! `Enumerable<T>`: a reusable, deferred sequence.
//!
//! A sequence is a cursor factory plus what is known about its shape. It owns
//! no cursor state; every `cursor()` call manufactures an independent one.
//! Source adapters are explicit constructors (`from_vec`, `from_iterable`,
//! `from_iter_once`, `from_factory`, ...); nothing sniffs the argument type
//! at runtime.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use lazyq_core::{Error, QueryConfig, Result, SinglePassPolicy};
use lazyq_cursor::{
    BoxedEnumerator, EmptyCursor, EnumeratorExt, IterCursor, OnceCursor, PullTracker, Setup,
    SliceCursor, StateMachine, Step, TrackedCursor, Values,
};

/// What a sequence knows about its elements without enumerating them.
pub(crate) enum Shape<T> {
    /// Random-access storage with a known length.
    Indexed(Rc<[T]>),
    /// Known length, no random access (sets, maps, ranges).
    Sized(usize),
    /// Must be enumerated to learn anything.
    Unknown,
    /// Backed (directly or upstream) by a one-shot iterator.
    SinglePass,
}

impl<T> Clone for Shape<T> {
    fn clone(&self) -> Self {
        match self {
            Shape::Indexed(items) => Shape::Indexed(Rc::clone(items)),
            Shape::Sized(n) => Shape::Sized(*n),
            Shape::Unknown => Shape::Unknown,
            Shape::SinglePass => Shape::SinglePass,
        }
    }
}

pub struct Enumerable<T> {
    factory: Rc<dyn Fn() -> BoxedEnumerator<T>>,
    shape: Shape<T>,
    config: Rc<QueryConfig>,
}

impl<T> Clone for Enumerable<T> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
            shape: self.shape.clone(),
            config: Rc::clone(&self.config),
        }
    }
}

impl<T> fmt::Debug for Enumerable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match &self.shape {
            Shape::Indexed(items) => format!("indexed({})", items.len()),
            Shape::Sized(n) => format!("sized({n})"),
            Shape::Unknown => "deferred".to_string(),
            Shape::SinglePass => "single-pass".to_string(),
        };
        f.debug_struct("Enumerable")
            .field("shape", &shape)
            .field("config", &self.config)
            .finish()
    }
}

impl<T: 'static> Enumerable<T> {
    fn with_shape<F>(shape: Shape<T>, factory: F) -> Self
    where
        F: Fn() -> BoxedEnumerator<T> + 'static,
    {
        Self {
            factory: Rc::new(factory),
            shape,
            config: Rc::new(QueryConfig::default()),
        }
    }

    /// Sequence over an explicit zero-argument cursor factory.
    pub fn from_factory<F>(factory: F) -> Self
    where
        F: Fn() -> BoxedEnumerator<T> + 'static,
    {
        Self::with_shape(Shape::Unknown, factory)
    }

    /// Like `from_factory`, for sources whose length is known up front.
    /// `count()` answers from `len` without calling the factory.
    pub fn from_factory_sized<F>(len: usize, factory: F) -> Self
    where
        F: Fn() -> BoxedEnumerator<T> + 'static,
    {
        Self::with_shape(Shape::Sized(len), factory)
    }

    pub fn empty() -> Self {
        Self::with_shape(Shape::Sized(0), || -> BoxedEnumerator<T> {
            Box::new(EmptyCursor::new())
        })
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self::from_shared(items.into())
    }

    /// Sequence over shared indexed storage. The storage is only read.
    pub fn from_shared(items: Rc<[T]>) -> Self {
        let storage = Rc::clone(&items);
        Self::with_shape(Shape::Indexed(items), move || -> BoxedEnumerator<T> {
            Box::new(SliceCursor::new(Rc::clone(&storage)))
        })
    }

    /// Sequence over a re-iterable source; each cursor iterates a clone of it.
    pub fn from_iterable<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + 'static,
    {
        Self::with_shape(Shape::Unknown, move || -> BoxedEnumerator<T> {
            Box::new(IterCursor::new(source.clone()))
        })
    }

    /// Like `from_iterable` with a length known up front.
    pub fn from_sized_iterable<I>(len: usize, source: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + 'static,
    {
        Self::with_shape(Shape::Sized(len), move || -> BoxedEnumerator<T> {
            Box::new(IterCursor::new(source.clone()))
        })
    }

    /// Sequence over a one-shot iterator.
    ///
    /// All cursors pull from the same underlying iterator, so a second cursor
    /// continues where the first stopped, and `restart()` fails with
    /// `Error::RestartUnsupported`.
    pub fn from_iter_once<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        let shared = OnceCursor::share(iter.into_iter());
        Self::with_shape(Shape::SinglePass, move || -> BoxedEnumerator<T> {
            Box::new(OnceCursor::new(Rc::clone(&shared)))
        })
    }

    /// Manufacture a fresh, independent cursor.
    #[inline]
    pub fn cursor(&self) -> BoxedEnumerator<T> {
        (self.factory)()
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Same sequence, different config. Operators built on the result
    /// inherit `config`.
    pub fn with_config(&self, config: QueryConfig) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
            shape: self.shape.clone(),
            config: Rc::new(config),
        }
    }

    pub fn is_single_pass(&self) -> bool {
        matches!(self.shape, Shape::SinglePass)
    }

    /// Length, if known without enumerating.
    pub fn len_hint(&self) -> Option<usize> {
        match &self.shape {
            Shape::Indexed(items) => Some(items.len()),
            Shape::Sized(n) => Some(*n),
            Shape::Unknown | Shape::SinglePass => None,
        }
    }

    pub(crate) fn as_slice(&self) -> Option<&[T]> {
        match &self.shape {
            Shape::Indexed(items) => Some(items),
            _ => None,
        }
    }

    pub(crate) fn shared_config(&self) -> Rc<QueryConfig> {
        Rc::clone(&self.config)
    }

    pub(crate) fn capacity_hint(&self) -> usize {
        self.config.buffer_capacity_hint
    }

    /// Report every cursor and pull of this sequence to `tracker`.
    /// Shape is preserved, so fast paths still bypass the cursor.
    pub fn tracked(&self, tracker: &PullTracker) -> Self {
        let factory = Rc::clone(&self.factory);
        let tracker = tracker.clone();
        Self {
            factory: Rc::new(move || -> BoxedEnumerator<T> {
                Box::new(TrackedCursor::new(factory(), tracker.clone()))
            }),
            shape: self.shape.clone(),
            config: Rc::clone(&self.config),
        }
    }

    /// Build a state-machine sequence downstream of `self`.
    pub(crate) fn derive<U, S>(&self, setup: S) -> Enumerable<U>
    where
        U: 'static,
        S: Fn() -> Step<U> + 'static,
    {
        Enumerable::from_setup(self.is_single_pass(), Rc::clone(&self.config), setup)
    }

    /// Build a state-machine sequence downstream of `self` and `other`.
    pub(crate) fn derive_with<V, U, S>(&self, other: &Enumerable<V>, setup: S) -> Enumerable<U>
    where
        V: 'static,
        U: 'static,
        S: Fn() -> Step<U> + 'static,
    {
        let single_pass = self.is_single_pass() || other.is_single_pass();
        Enumerable::from_setup(single_pass, Rc::clone(&self.config), setup)
    }

    fn from_setup<S>(single_pass: bool, config: Rc<QueryConfig>, setup: S) -> Self
    where
        S: Fn() -> Step<T> + 'static,
    {
        let setup: Setup<T> = Rc::new(setup);
        Self {
            factory: Rc::new(move || -> BoxedEnumerator<T> {
                let setup = Rc::clone(&setup);
                if single_pass {
                    Box::new(StateMachine::single_pass(setup))
                } else {
                    Box::new(StateMachine::new(setup))
                }
            }),
            shape: if single_pass {
                Shape::SinglePass
            } else {
                Shape::Unknown
            },
            config,
        }
    }

    /// Whether an operator that enumerates twice must buffer first.
    pub(crate) fn two_pass_buffered(&self, op: &'static str) -> Result<bool> {
        if !self.is_single_pass() {
            return Ok(false);
        }
        match self.config.single_pass {
            SinglePassPolicy::Reject => Err(Error::SinglePass { op }),
            SinglePassPolicy::Buffer => Ok(true),
        }
    }
}

impl<T: Clone + 'static> Enumerable<T> {
    pub fn from_slice(items: &[T]) -> Self {
        Self::from_shared(items.into())
    }

    /// `value` repeated `count` times.
    pub fn repeat(value: T, count: usize) -> Self {
        Self::from_sized_iterable(count, std::iter::repeat(value).take(count))
    }

    /// `std` iterator over a fresh cursor.
    pub fn iter(&self) -> Values<BoxedEnumerator<T>> {
        self.cursor().values()
    }

    /// Drain a fresh cursor into a vector.
    pub(crate) fn materialize(&self) -> Vec<T> {
        if let Some(items) = self.as_slice() {
            return items.to_vec();
        }
        let mut items = Vec::with_capacity(self.len_hint().unwrap_or(self.capacity_hint()));
        let mut cursor = self.cursor();
        while let Some(item) = cursor.next_value() {
            items.push(item);
        }
        items
    }

    /// Cursor plus total length for operators that size a window first.
    ///
    /// Re-iterable sources are counted and then enumerated again; buffered
    /// single-pass sources are drained once and served from the buffer.
    pub(crate) fn two_pass_cursor(&self, buffered: bool) -> (BoxedEnumerator<T>, usize) {
        if buffered {
            let items = self.materialize();
            let total = items.len();
            #[cfg(feature = "tracing")]
            tracing::trace!(total, "buffered single-pass source");
            (Box::new(SliceCursor::new(items.into())), total)
        } else {
            let total = self.count();
            #[cfg(feature = "tracing")]
            tracing::trace!(total, "sized source for trailing window");
            (self.cursor(), total)
        }
    }
}

impl Enumerable<char> {
    /// A string as a sequence of `char`s.
    pub fn from_chars(s: &str) -> Self {
        let chars: Vec<char> = s.chars().collect();
        Self::from_vec(chars)
    }
}

impl Enumerable<i64> {
    /// Integers in `from..to`.
    pub fn range(from: i64, to: i64) -> Result<Self> {
        if from > to {
            return Err(Error::out_of_range(
                "from",
                from,
                "must not be greater than 'to'",
            ));
        }
        let len = usize::try_from(to.abs_diff(from))
            .map_err(|_| Error::out_of_range("to", to, "range length exceeds usize"))?;
        Ok(Self::from_sized_iterable(len, from..to))
    }
}

impl<T: Clone + 'static> From<Vec<T>> for Enumerable<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: Clone + 'static> From<&[T]> for Enumerable<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl From<&str> for Enumerable<char> {
    fn from(s: &str) -> Self {
        Self::from_chars(s)
    }
}

impl<T> From<HashSet<T>> for Enumerable<T>
where
    T: Clone + Eq + Hash + 'static,
{
    fn from(set: HashSet<T>) -> Self {
        Self::from_sized_iterable(set.len(), set)
    }
}

impl<T> From<BTreeSet<T>> for Enumerable<T>
where
    T: Clone + Ord + 'static,
{
    fn from(set: BTreeSet<T>) -> Self {
        Self::from_sized_iterable(set.len(), set)
    }
}

impl<K, V> From<HashMap<K, V>> for Enumerable<(K, V)>
where
    K: Clone + Eq + Hash + 'static,
    V: Clone + 'static,
{
    fn from(map: HashMap<K, V>) -> Self {
        Self::from_sized_iterable(map.len(), map)
    }
}

impl<K, V> From<BTreeMap<K, V>> for Enumerable<(K, V)>
where
    K: Clone + Ord + 'static,
    V: Clone + 'static,
{
    fn from(map: BTreeMap<K, V>) -> Self {
        Self::from_sized_iterable(map.len(), map)
    }
}

impl<T: Clone + 'static> FromIterator<T> for Enumerable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T: Clone + 'static> IntoIterator for &'a Enumerable<T> {
    type Item = T;
    type IntoIter = Values<BoxedEnumerator<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

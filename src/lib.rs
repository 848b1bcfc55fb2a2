#![forbid(unsafe_code)]
//! lazyq: lazy, pull-based query operators over reusable sequences.
//!
//! ```
//! use lazyq::Enumerable;
//!
//! let evens: Vec<i32> = Enumerable::from_vec(vec![1, 2, 3, 4, 5, 6])
//!     .filter(|x| x % 2 == 0)
//!     .map(|x| x * 10)
//!     .iter()
//!     .collect();
//! assert_eq!(evens, vec![20, 40, 60]);
//! ```
//!
//! Crates:
//! - `lazyq-core`: errors, `QueryConfig`, comparers
//! - `lazyq-cursor`: the cursor contract, state-machine cursor, source adapters
//! - `lazyq-operators`: `Enumerable`, the operator catalog, `Lookup`

pub use lazyq_core as query_core;
pub use lazyq_cursor as cursor;
pub use lazyq_operators as operators;

pub use lazyq_core::{Comparison, Equality, Error, QueryConfig, Result, SinglePassPolicy};
pub use lazyq_cursor::{
    BoxedEnumerator, Enumerator, EnumeratorExt, PullTracker, SliceCursor, StateMachine, Step,
};
pub use lazyq_operators::{Enumerable, Grouping, Lookup, OrderedEnumerable};

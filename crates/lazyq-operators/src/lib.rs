#![forbid(unsafe_code)]
//! lazyq-operators: composable, deferred sequences.
//!
//! Design intent:
//! - Building a pipeline is O(1) per operator and touches no element; each
//!   operator only records a setup closure over its source sequence(s).
//! - Elements flow one at a time, depth-first, when a terminal consumer
//!   pulls on a cursor.
//! - Every operator cursor is a `StateMachine`; its setup acquires fresh
//!   upstream cursors so independent consumers never share a position.
//! - The operators that must see everything before yielding (`reverse`,
//!   ordering, grouping, joins, `take_last`/`skip_last`) do that work on
//!   the first `advance()`, never at construction.

pub mod enumerable;
pub mod lookup;

pub mod chunk;
pub mod combine;
pub mod filter;
pub mod map;
pub mod partition;
pub mod set;

pub mod group;
pub mod join;
pub mod sort;

pub mod aggregate;
pub mod element;
pub mod terminal;

pub use enumerable::Enumerable;
pub use lookup::{Grouping, Lookup};
pub use sort::OrderedEnumerable;

pub use lazyq_core::{Comparison, Equality, Error, QueryConfig, Result, SinglePassPolicy};
pub use lazyq_cursor::{BoxedEnumerator, Enumerator, EnumeratorExt, PullTracker};

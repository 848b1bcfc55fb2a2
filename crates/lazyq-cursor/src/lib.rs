#![forbid(unsafe_code)]
//! lazyq-cursor: the pull protocol every sequence is built on.
//!
//! - `Enumerator` is the cursor contract: `advance`, `current`, `restart`.
//! - `StateMachine` drives an operator's setup/step closure pair through
//!   `Setup -> HasValue -> Exhausted` without generator overhead.
//! - `adapters` expose native collections and iterators as cursors.
//! - `tracking` counts cursor creation and pulls for laziness checks.
//!
//! Every cursor here freezes `current` at the last produced value once it
//! is exhausted, and clears it on `restart`.

pub mod adapters;
pub mod enumerator;
pub mod state_machine;
pub mod tracking;

pub use adapters::{EmptyCursor, IterCursor, OnceCursor, SliceCursor};
pub use enumerator::{BoxedEnumerator, Enumerator, EnumeratorExt, Values};
pub use state_machine::{Setup, State, StateMachine, Step};
pub use tracking::{PullTracker, TrackedCursor};

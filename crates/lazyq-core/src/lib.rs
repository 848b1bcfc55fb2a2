#![forbid(unsafe_code)]
//! lazyq-core: error taxonomy, configuration, and comparers.
//!
//! Nothing here touches elements. The cursor and operator crates build on
//! these types so every layer reports the same error kinds and honors the
//! same `QueryConfig`.

pub mod comparer;
pub mod config;
pub mod error;
pub mod prelude;

pub use comparer::{Comparison, Equality};
pub use config::{QueryConfig, SinglePassPolicy};
pub use error::{Error, Result};

//! Convenient re-exports for downstream crates.

pub use crate::comparer::{Comparison, Equality};
pub use crate::config::{QueryConfig, SinglePassPolicy};
pub use crate::error::{Error, Result};

//! Query configuration that downstream crates can serialize/deserialize.
//!
//! A config is attached to every sequence and inherited by each operator
//! built on top of it. There is no process-wide mutable configuration.

use serde::{Deserialize, Serialize};

/// How operators that must enumerate their source twice (`take_last`,
/// `skip_last`) treat a source built over a one-shot iterator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinglePassPolicy {
    /// Refuse at operator construction with `Error::SinglePass`.
    #[default]
    Reject,
    /// Drain the source once into a buffer and run both passes over it.
    Buffer,
}

impl SinglePassPolicy {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Some(Self::Reject),
            "buffer" => Some(Self::Buffer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Policy for `take_last`/`skip_last` over single-pass sources.
    pub single_pass: SinglePassPolicy,

    /// Initial capacity for seen-buffers, lookups, and materializations.
    pub buffer_capacity_hint: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            single_pass: SinglePassPolicy::Reject,
            buffer_capacity_hint: 16,
        }
    }
}

impl QueryConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `LAZYQ_SINGLE_PASS`: `reject` or `buffer`
    /// - `LAZYQ_BUFFER_CAPACITY`: initial buffer capacity
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("LAZYQ_SINGLE_PASS") {
            if let Some(v) = SinglePassPolicy::parse(&s) {
                cfg.single_pass = v;
            }
        }

        if let Ok(s) = std::env::var("LAZYQ_BUFFER_CAPACITY") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.buffer_capacity_hint = v;
            }
        }

        cfg
    }

    pub fn with_single_pass(mut self, policy: SinglePassPolicy) -> Self {
        self.single_pass = policy;
        self
    }

    pub fn with_buffer_capacity_hint(mut self, capacity: usize) -> Self {
        self.buffer_capacity_hint = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rejects_single_pass() {
        let cfg = QueryConfig::default();
        assert_eq!(cfg.single_pass, SinglePassPolicy::Reject);
        assert_eq!(cfg.buffer_capacity_hint, 16);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(SinglePassPolicy::parse(" Buffer "), Some(SinglePassPolicy::Buffer));
        assert_eq!(SinglePassPolicy::parse("reject"), Some(SinglePassPolicy::Reject));
        assert_eq!(SinglePassPolicy::parse("spill"), None);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let cfg = QueryConfig::default()
            .with_single_pass(SinglePassPolicy::Buffer)
            .with_buffer_capacity_hint(64);
        let json = serde_json::to_string(&cfg).expect("serialize");
        assert!(json.contains("\"single_pass\":\"buffer\""));
        let back: QueryConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cfg);
    }
}

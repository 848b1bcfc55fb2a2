use thiserror::Error;

/// Canonical result for every lazyq crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by operators and terminal consumers.
///
/// Errors raised inside caller-supplied closures are not represented here:
/// a panicking predicate unwinds through the terminal call that drove it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("argument '{param}' out of range ({value}): {reason}")]
    OutOfRange {
        param: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("{op}: sequence contains no elements")]
    EmptySequence { op: &'static str },

    #[error("{op}: no element satisfies the predicate")]
    NoMatch { op: &'static str },

    #[error("{op}: more than one element satisfies the condition")]
    AmbiguousMatch { op: &'static str },

    #[error("{op}: source is single-pass and cannot be enumerated twice")]
    SinglePass { op: &'static str },

    #[error("restart is not supported by a cursor over a one-shot iterator")]
    RestartUnsupported,
}

impl Error {
    pub fn out_of_range(
        param: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Error::OutOfRange {
            param,
            value: value.to_string(),
            reason,
        }
    }
}

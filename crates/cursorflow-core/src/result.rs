//! The two-shape result every cursor operation returns.

use serde::{Deserialize, Serialize};

/// Outcome of a single cursor operation.
///
/// `Done(None)` is the "null" terminal value used whenever a cursor has to
/// manufacture a terminal result on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "value")]
pub enum IterationResult<Y, R> {
    /// A yielded value; iteration continues.
    Pending(Y),
    /// Iteration has ended with this final value.
    Done(Option<R>),
}

impl<Y, R> IterationResult<Y, R> {
    /// `Done(None)`.
    pub fn finished() -> Self {
        IterationResult::Done(None)
    }

    /// `Done(Some(value))`.
    pub fn done(value: R) -> Self {
        IterationResult::Done(Some(value))
    }

    pub fn is_done(&self) -> bool {
        matches!(self, IterationResult::Done(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, IterationResult::Pending(_))
    }

    /// The yielded value, if any.
    pub fn pending(self) -> Option<Y> {
        match self {
            IterationResult::Pending(v) => Some(v),
            IterationResult::Done(_) => None,
        }
    }

    /// The terminal value; `None` while pending and for a null terminal.
    pub fn terminal(self) -> Option<R> {
        match self {
            IterationResult::Pending(_) => None,
            IterationResult::Done(v) => v,
        }
    }

    /// Transform a yielded value. Terminal values pass through untouched.
    pub fn map_pending<U>(self, f: impl FnOnce(Y) -> U) -> IterationResult<U, R> {
        match self {
            IterationResult::Pending(v) => IterationResult::Pending(f(v)),
            IterationResult::Done(v) => IterationResult::Done(v),
        }
    }

    pub fn as_ref(&self) -> IterationResult<&Y, &R> {
        match self {
            IterationResult::Pending(v) => IterationResult::Pending(v),
            IterationResult::Done(v) => IterationResult::Done(v.as_ref()),
        }
    }
}

//! Result-shape validation for untrusted producer output.
//!
//! Caller-supplied step functions and handlers return a [`RawResult`], which
//! may be malformed. [`validate`] turns it into an [`IterationResult`] or a
//! [`ProtocolViolation`](crate::error::ProtocolViolation) naming the
//! operation that produced it.

use serde_json::Value;

use crate::error::{Error, Operation, Result, ViolationKind};
use crate::result::IterationResult;

/// Unchecked output of a producer.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResult<Y, R> {
    /// Nothing was produced (a null/undefined result).
    Missing,
    /// An object carrying neither a `done` flag nor a `value`.
    Shapeless,
    Yielded(Y),
    Finished(Option<R>),
}

impl<Y, R> From<IterationResult<Y, R>> for RawResult<Y, R> {
    fn from(r: IterationResult<Y, R>) -> Self {
        match r {
            IterationResult::Pending(v) => RawResult::Yielded(v),
            IterationResult::Done(v) => RawResult::Finished(v),
        }
    }
}

impl<Y, R> From<Option<IterationResult<Y, R>>> for RawResult<Y, R> {
    fn from(r: Option<IterationResult<Y, R>>) -> Self {
        r.map_or(RawResult::Missing, RawResult::from)
    }
}

impl RawResult<Value, Value> {
    /// Read an iteration-result object out of a JSON value.
    ///
    /// `{"done": true, "value": v}` is terminal; a present `value` or a boolean
    /// `done` otherwise yields (a missing value yields `null`). A JSON `null`
    /// terminal value is the null terminal.
    pub fn from_json(json: Value) -> Self {
        let Value::Object(mut obj) = json else {
            return RawResult::Missing;
        };
        let done = obj.get("done").and_then(Value::as_bool);
        let value = obj.remove("value");
        match (done, value) {
            (Some(true), value) => RawResult::Finished(value.filter(|v| !v.is_null())),
            (Some(false), value) => RawResult::Yielded(value.unwrap_or(Value::Null)),
            (None, Some(value)) => RawResult::Yielded(value),
            (None, None) => RawResult::Shapeless,
        }
    }
}

/// Check `raw` against the result-shape contract.
pub fn validate<Y, R>(operation: Operation, raw: RawResult<Y, R>) -> Result<IterationResult<Y, R>> {
    match raw {
        RawResult::Yielded(v) => Ok(IterationResult::Pending(v)),
        RawResult::Finished(v) => Ok(IterationResult::Done(v)),
        RawResult::Missing => Err(Error::violation(operation, ViolationKind::NonObject)),
        RawResult::Shapeless => Err(Error::violation(operation, ViolationKind::NotAResult)),
    }
}

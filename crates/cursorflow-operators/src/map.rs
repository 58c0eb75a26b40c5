//! Transform yielded values.
//!
//! Only `Pending` values go through the mapper. Terminal values, whether they
//! come from `next`, `stop` or `abort`, are relayed as-is. When the source
//! answers `stop`/`abort` with a value instead of terminating, the wrapper
//! still terminates but hands that one value back mapped. `stop`/`abort` are
//! `Unsupported` unless the source supports them.

use std::marker::PhantomData;

use cursorflow_core::{Capabilities, Cursor, Error, IterationResult, Operation, Result, Termination};

pub struct Map<S: Cursor, F, U> {
    source: S,
    mapper: F,
    termination: Termination<S::Return>,
    capabilities: Capabilities,
    _out: PhantomData<fn() -> U>,
}

/// Yield `mapper(value, next_arg)` for every value `source` yields.
pub fn map<S, F, U>(source: S, mapper: F) -> Map<S, F, U>
where
    S: Cursor,
    S::Next: Clone,
    S::Return: Clone,
    F: FnMut(S::Yield, Option<&S::Next>) -> U,
{
    Map {
        capabilities: source.capabilities(),
        source,
        mapper,
        termination: Termination::new(),
        _out: PhantomData,
    }
}

impl<S: Cursor, F, U> Map<S, F, U> {
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S, F, U> Map<S, F, U>
where
    S: Cursor,
    S::Return: Clone,
    F: FnMut(S::Yield, Option<&S::Next>) -> U,
{
    /// Shared tail of `stop`/`abort` once the source has answered.
    fn settle(&mut self, result: IterationResult<S::Yield, S::Return>) -> IterationResult<U, S::Return> {
        match result {
            IterationResult::Done(v) => self.termination.record(v),
            IterationResult::Pending(v) => {
                #[cfg(feature = "tracing")]
                tracing::trace!("map terminated with a final mapped value");
                self.termination.terminate(None);
                IterationResult::Pending((self.mapper)(v, None))
            }
        }
    }
}

impl<S, F, U> Cursor for Map<S, F, U>
where
    S: Cursor,
    S::Next: Clone,
    S::Return: Clone,
    F: FnMut(S::Yield, Option<&S::Next>) -> U,
{
    type Yield = U;
    type Return = S::Return;
    type Next = S::Next;
    type Abort = S::Abort;

    fn next(&mut self, arg: Option<S::Next>) -> Result<IterationResult<U, S::Return>> {
        if let Some(cached) = self.termination.cached() {
            return Ok(cached);
        }
        match self.source.next(arg.clone())? {
            IterationResult::Pending(v) => Ok(IterationResult::Pending((self.mapper)(v, arg.as_ref()))),
            IterationResult::Done(v) => Ok(self.termination.record(v)),
        }
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn stop(&mut self, value: Option<S::Return>) -> Result<IterationResult<U, S::Return>> {
        if !self.capabilities.stop {
            return Err(Error::unsupported(Operation::Return));
        }
        if let Some(cached) = self.termination.cached() {
            return Ok(cached);
        }
        let result = self.source.stop(value)?;
        Ok(self.settle(result))
    }

    fn abort(&mut self, error: Option<S::Abort>) -> Result<IterationResult<U, S::Return>> {
        if !self.capabilities.abort {
            return Err(Error::unsupported(Operation::Throw));
        }
        if let Some(cached) = self.termination.cached() {
            return Ok(cached);
        }
        let result = self.source.abort(error)?;
        Ok(self.settle(result))
    }
}

//! Array-backed cursors.
//!
//! An [`ArrayFactory`] owns a fixed sequence and hands out independent
//! cursors over windows of it. Each cursor yields clones of the elements in
//! its window, then resolves its end-of-iteration policy once and replays
//! that terminal result forever.

use std::marker::PhantomData;
use std::sync::Arc;

use cursorflow_core::config::{ArrayOptions, CursorOptions, EndOfIteration};
use cursorflow_core::{
    validate, Capabilities, Cursor, Error, IterationResult, Operation, Result, Termination,
    ViolationKind,
};

use crate::handlers;

/// Shared, immutable sequence cursors are cut from.
#[derive(Debug, Clone)]
pub struct ArrayFactory<T> {
    source: Arc<[T]>,
}

impl<T: Clone> ArrayFactory<T> {
    pub fn new(source: impl Into<Arc<[T]>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.source
    }

    /// Cursor over the whole sequence, terminating with `Done(None)` and
    /// exposing neither `stop` nor `abort`.
    pub fn cursor(&self) -> ArrayCursor<T> {
        self.iterator(ArrayOptions::default())
    }

    pub fn iterator<R: Clone, N, E>(
        &self,
        options: ArrayOptions<T, R, N, E>,
    ) -> ArrayCursor<T, R, N, E> {
        let ArrayOptions {
            window,
            end_of_iteration,
            handlers,
        } = options;
        let (index, end) = window.bounds(self.source.len());
        ArrayCursor {
            array: Arc::clone(&self.source),
            index,
            end,
            end_of_iteration,
            capabilities: handlers.capabilities(),
            handlers,
            termination: Termination::new(),
            _next: PhantomData,
        }
    }
}

impl<T> From<Vec<T>> for ArrayFactory<T> {
    fn from(source: Vec<T>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Shorthand for `ArrayFactory::new(items).cursor()`.
pub fn array_cursor<T: Clone>(items: impl Into<Arc<[T]>>) -> ArrayCursor<T> {
    ArrayFactory::new(items).cursor()
}

pub struct ArrayCursor<T, R = (), N = (), E = ()> {
    array: Arc<[T]>,
    index: usize,
    end: usize,
    end_of_iteration: EndOfIteration<T, R, N>,
    handlers: CursorOptions<T, R, E>,
    capabilities: Capabilities,
    termination: Termination<R>,
    _next: PhantomData<fn(N)>,
}

impl<T, R, N, E> ArrayCursor<T, R, N, E> {
    /// Index of the next element to yield.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Elements left in the window.
    pub fn remaining(&self) -> usize {
        self.end.saturating_sub(self.index)
    }
}

impl<T: Clone, R: Clone, N, E> ArrayCursor<T, R, N, E> {
    fn end_of_sequence(&mut self, arg: Option<N>) -> Result<IterationResult<T, R>> {
        #[cfg(feature = "tracing")]
        tracing::trace!(index = self.index, len = self.array.len(), "array window exhausted");
        let value = match &mut self.end_of_iteration {
            EndOfIteration::Default => None,
            EndOfIteration::Value(v) => Some(v.clone()),
            EndOfIteration::Callback(handler) => match validate(Operation::Next, handler(arg))? {
                IterationResult::Done(v) => v,
                IterationResult::Pending(_) => {
                    return Err(Error::violation(Operation::Next, ViolationKind::NotTerminal))
                }
            },
        };
        Ok(self.termination.record(value))
    }
}

impl<T: Clone, R: Clone, N, E> Cursor for ArrayCursor<T, R, N, E> {
    type Yield = T;
    type Return = R;
    type Next = N;
    type Abort = E;

    fn next(&mut self, arg: Option<N>) -> Result<IterationResult<T, R>> {
        if let Some(cached) = self.termination.cached() {
            return Ok(cached);
        }
        if self.index < self.end {
            let value = self.array[self.index].clone();
            self.index += 1;
            return Ok(IterationResult::Pending(value));
        }
        self.end_of_sequence(arg)
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn stop(&mut self, value: Option<R>) -> Result<IterationResult<T, R>> {
        handlers::stop(&mut self.handlers, &mut self.termination, value)
    }

    fn abort(&mut self, error: Option<E>) -> Result<IterationResult<T, R>> {
        handlers::abort(&mut self.handlers, &mut self.termination, error)
    }
}

//! Cursors built directly from a step function.
//!
//! There is no wrapped source here: the step function and the optional
//! handlers *are* the cursor's operations. Their output is validated on every
//! call and terminal results are cached.

use std::marker::PhantomData;

use cursorflow_core::config::CursorOptions;
use cursorflow_core::{
    validate, Capabilities, Cursor, IterationResult, Operation, RawResult, Result, Termination,
};

use crate::handlers;

pub struct FnCursor<F, Y, R, N, E> {
    step: F,
    handlers: CursorOptions<Y, R, E>,
    capabilities: Capabilities,
    termination: Termination<R>,
    _next: PhantomData<fn(N)>,
}

/// Build a cursor from `step` plus optional early-stop/abort handlers.
pub fn create<F, O, Y, R, N, E>(step: F, options: CursorOptions<Y, R, E>) -> FnCursor<F, Y, R, N, E>
where
    F: FnMut(Option<N>) -> O,
    O: Into<RawResult<Y, R>>,
    R: Clone,
{
    FnCursor {
        step,
        capabilities: options.capabilities(),
        handlers: options,
        termination: Termination::new(),
        _next: PhantomData,
    }
}

/// A handler-less cursor whose step ignores `next` arguments.
pub fn from_fn<F, O, Y, R>(
    mut step: F,
) -> FnCursor<impl FnMut(Option<()>) -> O, Y, R, (), ()>
where
    F: FnMut() -> O,
    O: Into<RawResult<Y, R>>,
    R: Clone,
{
    create(move |_: Option<()>| step(), CursorOptions::new())
}

impl<F, O, Y, R, N, E> Cursor for FnCursor<F, Y, R, N, E>
where
    F: FnMut(Option<N>) -> O,
    O: Into<RawResult<Y, R>>,
    R: Clone,
{
    type Yield = Y;
    type Return = R;
    type Next = N;
    type Abort = E;

    fn next(&mut self, arg: Option<N>) -> Result<IterationResult<Y, R>> {
        if let Some(cached) = self.termination.cached() {
            return Ok(cached);
        }
        let result = validate(Operation::Next, (self.step)(arg).into())?;
        Ok(self.termination.observe(result))
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn stop(&mut self, value: Option<R>) -> Result<IterationResult<Y, R>> {
        handlers::stop(&mut self.handlers, &mut self.termination, value)
    }

    fn abort(&mut self, error: Option<E>) -> Result<IterationResult<Y, R>> {
        handlers::abort(&mut self.handlers, &mut self.termination, error)
    }
}

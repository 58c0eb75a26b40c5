//! Early-stop/abort dispatch shared by the primitive cursors.

use cursorflow_core::config::{CursorOptions, ReturnHandling};
use cursorflow_core::{validate, Error, IterationResult, Operation, Result, Termination};

pub(crate) fn stop<Y, R: Clone, E>(
    options: &mut CursorOptions<Y, R, E>,
    termination: &mut Termination<R>,
    value: Option<R>,
) -> Result<IterationResult<Y, R>> {
    if !options.handle_return.is_present() {
        return Err(Error::unsupported(Operation::Return));
    }
    if let Some(cached) = termination.cached() {
        return Ok(cached);
    }
    match &mut options.handle_return {
        ReturnHandling::Custom(handler) => {
            let result = validate(Operation::Return, handler(value))?;
            // A handler may decline to stop; only terminal results are cached.
            Ok(termination.observe(result))
        }
        _ => Ok(termination.record(value)),
    }
}

pub(crate) fn abort<Y, R: Clone, E>(
    options: &mut CursorOptions<Y, R, E>,
    termination: &mut Termination<R>,
    error: Option<E>,
) -> Result<IterationResult<Y, R>> {
    let Some(handler) = options.on_throw.as_mut() else {
        return Err(Error::unsupported(Operation::Throw));
    };
    if let Some(cached) = termination.cached() {
        return Ok(cached);
    }
    let result = validate(Operation::Throw, handler(error))?;
    Ok(termination.observe(result))
}

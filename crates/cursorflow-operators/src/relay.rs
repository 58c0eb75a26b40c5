//! Derived cursors built from a source plus a replacement `next` step.
//!
//! The relay owns the source, the termination cache and the capability
//! descriptor. `stop`/`abort` are synthesized here so every relay-based
//! combinator forwards early termination the same way. A relay only accepts
//! `stop`/`abort` when its source does; otherwise the call fails with
//! `Unsupported`, exactly as on a primitive cursor.

use cursorflow_core::{Capabilities, Cursor, Error, IterationResult, Operation, Result, Termination};

/// Replacement `next` behaviour for a [`Relay`].
///
/// The relay has already checked its cache when `step` runs. A step that sees
/// a terminal result should pass it through `termination` so later calls
/// replay it.
pub trait RelayStep<S: Cursor> {
    fn step(
        &mut self,
        source: &mut S,
        termination: &mut Termination<S::Return>,
        arg: Option<S::Next>,
    ) -> Result<IterationResult<S::Yield, S::Return>>;
}

impl<S, F> RelayStep<S> for F
where
    S: Cursor,
    F: FnMut(
        &mut S,
        &mut Termination<S::Return>,
        Option<S::Next>,
    ) -> Result<IterationResult<S::Yield, S::Return>>,
{
    fn step(
        &mut self,
        source: &mut S,
        termination: &mut Termination<S::Return>,
        arg: Option<S::Next>,
    ) -> Result<IterationResult<S::Yield, S::Return>> {
        self(source, termination, arg)
    }
}

pub struct Relay<S: Cursor, St> {
    source: S,
    step: St,
    termination: Termination<S::Return>,
    capabilities: Capabilities,
}

/// Wrap `source` with a custom `next` step.
pub fn relay<S, St>(source: S, step: St) -> Relay<S, St>
where
    S: Cursor,
    S::Return: Clone,
    St: RelayStep<S>,
{
    Relay::new(source, step)
}

impl<S, St> Relay<S, St>
where
    S: Cursor,
    S::Return: Clone,
    St: RelayStep<S>,
{
    pub fn new(source: S, step: St) -> Self {
        Self {
            capabilities: source.capabilities(),
            source,
            step,
            termination: Termination::new(),
        }
    }
}

impl<S: Cursor, St> Relay<S, St> {
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    pub fn step(&self) -> &St {
        &self.step
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.termination, Termination::Terminated(_))
    }
}

impl<S, St> Cursor for Relay<S, St>
where
    S: Cursor,
    S::Return: Clone,
    St: RelayStep<S>,
{
    type Yield = S::Yield;
    type Return = S::Return;
    type Next = S::Next;
    type Abort = S::Abort;

    fn next(&mut self, arg: Option<S::Next>) -> Result<IterationResult<S::Yield, S::Return>> {
        if let Some(cached) = self.termination.cached() {
            return Ok(cached);
        }
        self.step
            .step(&mut self.source, &mut self.termination, arg)
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn stop(&mut self, value: Option<S::Return>) -> Result<IterationResult<S::Yield, S::Return>> {
        if !self.capabilities.stop {
            return Err(Error::unsupported(Operation::Return));
        }
        if let Some(cached) = self.termination.cached() {
            return Ok(cached);
        }
        match self.source.stop(value.clone())? {
            IterationResult::Done(v) => Ok(self.termination.record(v)),
            IterationResult::Pending(_) => {
                #[cfg(feature = "tracing")]
                tracing::trace!("source declined stop; relay terminates anyway");
                Ok(self.termination.record(value))
            }
        }
    }

    fn abort(&mut self, error: Option<S::Abort>) -> Result<IterationResult<S::Yield, S::Return>> {
        if !self.capabilities.abort {
            return Err(Error::unsupported(Operation::Throw));
        }
        if let Some(cached) = self.termination.cached() {
            return Ok(cached);
        }
        Ok(self.termination.observe(self.source.abort(error)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursorflow_core::config::ArrayOptions;
    use cursorflow_source::{array_cursor, ArrayFactory};

    fn passthrough<S: Cursor>(
        source: &mut S,
        termination: &mut Termination<S::Return>,
        arg: Option<S::Next>,
    ) -> Result<IterationResult<S::Yield, S::Return>>
    where
        S::Return: Clone,
    {
        Ok(termination.observe(source.next(arg)?))
    }

    #[test]
    fn closure_step_and_cached_terminal() {
        let mut r = relay(array_cursor(vec![1, 2]), passthrough);
        assert_eq!(r.next(None).unwrap(), IterationResult::Pending(1));
        assert_eq!(r.next(None).unwrap(), IterationResult::Pending(2));
        assert_eq!(r.next(None).unwrap(), IterationResult::Done(None));
        assert!(r.is_terminated());
        assert_eq!(r.next(None).unwrap(), IterationResult::Done(None));
    }

    #[test]
    fn capabilities_mirror_source() {
        let r = relay(array_cursor(vec![1]), passthrough);
        assert_eq!(r.capabilities(), Capabilities::NONE);

        let factory = ArrayFactory::new(vec![1]);
        let src = factory.iterator(ArrayOptions::<i32, (), (), ()>::new().handle_return(true));
        let r = relay(src, passthrough);
        assert_eq!(r.capabilities(), Capabilities::new(true, false));
    }

    #[test]
    fn stop_without_source_support_is_unsupported() {
        let factory = ArrayFactory::new(vec![1, 2, 3]);
        let src = factory.iterator(ArrayOptions::<i32, &str, (), ()>::new());
        let mut r = relay(src, passthrough);
        assert!(!r.capabilities().stop);
        assert_eq!(r.stop(Some("early")).unwrap_err(), Error::unsupported(Operation::Return));
        assert!(!r.is_terminated());
        assert_eq!(r.next(None).unwrap(), IterationResult::Pending(1));

        // Still rejected once the relay is exhausted.
        r.next(None).unwrap();
        r.next(None).unwrap();
        assert_eq!(r.next(None).unwrap(), IterationResult::Done(None));
        assert_eq!(r.stop(None).unwrap_err(), Error::unsupported(Operation::Return));
    }

    #[test]
    fn stop_takes_source_terminal() {
        let factory = ArrayFactory::new(vec![1, 2, 3]);
        let src = factory.iterator(
            ArrayOptions::<i32, &str, (), ()>::new().return_with(|_| IterationResult::<i32, &str>::done("source")),
        );
        let mut r = relay(src, passthrough);
        assert_eq!(r.stop(Some("caller")).unwrap(), IterationResult::Done(Some("source")));
        assert_eq!(r.stop(Some("again")).unwrap(), IterationResult::Done(Some("source")));
    }

    #[test]
    fn stop_declined_by_source_still_terminates() {
        let factory = ArrayFactory::new(vec![1, 2, 3]);
        let src = factory.iterator(
            ArrayOptions::<i32, &str, (), ()>::new().return_with(|_| IterationResult::<i32, &str>::Pending(0)),
        );
        let mut r = relay(src, passthrough);
        assert_eq!(r.stop(Some("caller")).unwrap(), IterationResult::Done(Some("caller")));
        assert_eq!(r.next(None).unwrap(), IterationResult::Done(Some("caller")));
    }

    #[test]
    fn abort_recovery_passes_through_uncached() {
        let factory = ArrayFactory::new(vec![1, 2, 3]);
        let src = factory.iterator(ArrayOptions::<i32, &str, (), bool>::new().on_throw(
            |fatal: Option<bool>| {
                if fatal == Some(true) {
                    IterationResult::done("aborted")
                } else {
                    IterationResult::Pending(-1)
                }
            },
        ));
        let mut r = relay(src, passthrough);
        assert_eq!(r.abort(Some(false)).unwrap(), IterationResult::Pending(-1));
        assert_eq!(r.next(None).unwrap(), IterationResult::Pending(1));
        assert_eq!(r.abort(Some(true)).unwrap(), IterationResult::Done(Some("aborted")));
        assert_eq!(r.next(None).unwrap(), IterationResult::Done(Some("aborted")));
    }

    #[test]
    fn abort_without_source_support_is_unsupported() {
        let mut r = relay(array_cursor(vec![1, 2]), passthrough);
        assert_eq!(r.abort(None).unwrap_err(), Error::unsupported(Operation::Throw));
        assert!(!r.is_terminated());
        assert_eq!(r.next(None).unwrap(), IterationResult::Pending(1));
    }
}

//! Keep only values matching a predicate.

use cursorflow_core::{Cursor, IterationResult, Result, Termination};

use crate::relay::{Relay, RelayStep};

pub type Filter<S, P> = Relay<S, FilterStep<P>>;

pub struct FilterStep<P> {
    predicate: P,
}

/// Yield only values for which `predicate(value, next_arg)` holds.
///
/// Non-matching values are skipped by pulling again with a clone of the same
/// argument.
pub fn filter<S, P>(source: S, predicate: P) -> Filter<S, P>
where
    S: Cursor,
    S::Next: Clone,
    S::Return: Clone,
    P: FnMut(&S::Yield, Option<&S::Next>) -> bool,
{
    Relay::new(source, FilterStep { predicate })
}

impl<S, P> RelayStep<S> for FilterStep<P>
where
    S: Cursor,
    S::Next: Clone,
    S::Return: Clone,
    P: FnMut(&S::Yield, Option<&S::Next>) -> bool,
{
    fn step(
        &mut self,
        source: &mut S,
        termination: &mut Termination<S::Return>,
        arg: Option<S::Next>,
    ) -> Result<IterationResult<S::Yield, S::Return>> {
        loop {
            match source.next(arg.clone())? {
                IterationResult::Pending(v) => {
                    if (self.predicate)(&v, arg.as_ref()) {
                        return Ok(IterationResult::Pending(v));
                    }
                }
                IterationResult::Done(v) => return Ok(termination.record(v)),
            }
        }
    }
}

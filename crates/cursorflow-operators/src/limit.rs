//! Cap the number of yielded values.

use cursorflow_core::{Cursor, IterationResult, Result, Termination};

use crate::relay::{Relay, RelayStep};

pub type Limit<S> = Relay<S, LimitStep>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitStep {
    count: usize,
    iterations: usize,
}

impl LimitStep {
    pub fn count(&self) -> usize {
        self.count
    }

    /// `next` calls that reached this step, including the one that tripped
    /// the limit.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Yield at most `count` values, then terminate with the null terminal.
/// The source is left as it is when the limit trips.
pub fn limit<S>(source: S, count: usize) -> Limit<S>
where
    S: Cursor,
    S::Return: Clone,
{
    Relay::new(
        source,
        LimitStep {
            count,
            iterations: 0,
        },
    )
}

impl<S> RelayStep<S> for LimitStep
where
    S: Cursor,
    S::Return: Clone,
{
    fn step(
        &mut self,
        source: &mut S,
        termination: &mut Termination<S::Return>,
        arg: Option<S::Next>,
    ) -> Result<IterationResult<S::Yield, S::Return>> {
        self.iterations = self.iterations.saturating_add(1);
        if self.iterations > self.count {
            #[cfg(feature = "tracing")]
            tracing::trace!(count = self.count, "limit reached");
            return Ok(termination.record(None));
        }
        Ok(termination.observe(source.next(arg)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursorflow_core::config::ArrayOptions;
    use cursorflow_source::{array_cursor, ArrayFactory};

    #[test]
    fn zero_yields_nothing() {
        let mut c = limit(array_cursor(vec![1, 2, 3]), 0);
        assert_eq!(c.next(None).unwrap(), IterationResult::Done(None));
        assert_eq!(c.get_ref().position(), 0);
    }

    #[test]
    fn caps_long_sequences() {
        let mut c = limit(array_cursor((1..=10).collect::<Vec<_>>()), 3);
        assert_eq!(c.next(None).unwrap(), IterationResult::Pending(1));
        assert_eq!(c.next(None).unwrap(), IterationResult::Pending(2));
        assert_eq!(c.next(None).unwrap(), IterationResult::Pending(3));
        assert_eq!(c.next(None).unwrap(), IterationResult::Done(None));
        assert_eq!(c.next(None).unwrap(), IterationResult::Done(None));
        assert_eq!(c.get_ref().position(), 3);
    }

    #[test]
    fn counter_includes_tripping_call_and_stops_after() {
        let mut c = limit(array_cursor(vec![1, 2, 3, 4]), 2);
        assert_eq!(c.step().count(), 2);
        assert_eq!(c.step().iterations(), 0);
        assert_eq!(c.next(None).unwrap(), IterationResult::Pending(1));
        assert_eq!(c.next(None).unwrap(), IterationResult::Pending(2));
        assert_eq!(c.step().iterations(), 2);
        assert_eq!(c.next(None).unwrap(), IterationResult::Done(None));
        assert_eq!(c.step().iterations(), 3);

        // Cached replays never reach the step.
        assert_eq!(c.next(None).unwrap(), IterationResult::Done(None));
        assert_eq!(c.next(None).unwrap(), IterationResult::Done(None));
        assert_eq!(c.step().iterations(), 3);
        assert_eq!(c.get_ref().position(), 2);
    }

    #[test]
    fn short_source_keeps_its_terminal() {
        let factory = ArrayFactory::new(vec![1]);
        let mut c = limit(
            factory.iterator(ArrayOptions::<i32, &str, (), ()>::new().end_value("eos")),
            5,
        );
        assert_eq!(c.next(None).unwrap(), IterationResult::Pending(1));
        assert_eq!(c.next(None).unwrap(), IterationResult::Done(Some("eos")));
        assert_eq!(c.next(None).unwrap(), IterationResult::Done(Some("eos")));
    }

    #[test]
    fn limit_trip_leaves_source_unstopped() {
        let factory = ArrayFactory::new(vec![1, 2, 3]);
        let mut c = limit(
            factory.iterator(ArrayOptions::<i32, &str, (), ()>::new().handle_return(true)),
            1,
        );
        assert!(c.capabilities().stop);
        c.next(None).unwrap();
        assert_eq!(c.next(None).unwrap(), IterationResult::Done(None));
        let mut source = c.into_inner();
        assert_eq!(source.next(None).unwrap(), IterationResult::Pending(2));
    }
}

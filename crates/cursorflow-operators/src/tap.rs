//! Observe values as they pass through.

use cursorflow_core::{Cursor, IterationResult, Result, Termination};

use crate::relay::{Relay, RelayStep};

pub type Tap<S, F> = Relay<S, TapStep<F>>;

pub struct TapStep<F> {
    callback: F,
}

/// Run `callback(value, next_arg)` on every yielded value and relay it
/// unchanged. Terminal results skip the callback.
pub fn reiterate<S, F>(source: S, callback: F) -> Tap<S, F>
where
    S: Cursor,
    S::Next: Clone,
    S::Return: Clone,
    F: FnMut(&S::Yield, Option<&S::Next>),
{
    Relay::new(source, TapStep { callback })
}

impl<S, F> RelayStep<S> for TapStep<F>
where
    S: Cursor,
    S::Next: Clone,
    S::Return: Clone,
    F: FnMut(&S::Yield, Option<&S::Next>),
{
    fn step(
        &mut self,
        source: &mut S,
        termination: &mut Termination<S::Return>,
        arg: Option<S::Next>,
    ) -> Result<IterationResult<S::Yield, S::Return>> {
        match source.next(arg.clone())? {
            IterationResult::Pending(v) => {
                (self.callback)(&v, arg.as_ref());
                Ok(IterationResult::Pending(v))
            }
            IterationResult::Done(v) => Ok(termination.record(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursorflow_core::config::ArrayOptions;
    use cursorflow_source::{array_cursor, ArrayFactory};

    #[test]
    fn callback_sees_each_value_once() {
        let mut seen = Vec::new();
        let mut c = reiterate(array_cursor(vec!["a", "b"]), |v: &&str, _| seen.push(v.to_string()));
        assert_eq!(c.next(None).unwrap(), IterationResult::Pending("a"));
        assert_eq!(c.next(None).unwrap(), IterationResult::Pending("b"));
        assert_eq!(c.next(None).unwrap(), IterationResult::Done(None));
        assert_eq!(c.next(None).unwrap(), IterationResult::Done(None));
        drop(c);
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn callback_receives_next_argument() {
        let mut args = Vec::new();
        let factory = ArrayFactory::new(vec![1, 2]);
        let mut c = reiterate(
            factory.iterator(ArrayOptions::<i32, (), char, ()>::new()),
            |_: &i32, arg: Option<&char>| args.push(arg.copied()),
        );
        c.next(Some('x')).unwrap();
        c.next(None).unwrap();
        drop(c);
        assert_eq!(args, vec![Some('x'), None]);
    }

    #[test]
    fn terminal_bypasses_callback() {
        let mut calls = 0;
        let factory = ArrayFactory::new(Vec::<i32>::new());
        let mut c = reiterate(
            factory.iterator(ArrayOptions::<i32, &str, (), ()>::new().end_value("end")),
            |_: &i32, _| calls += 1,
        );
        assert_eq!(c.next(None).unwrap(), IterationResult::Done(Some("end")));
        drop(c);
        assert_eq!(calls, 0);
    }
}

//! Per-cursor memo of the first terminal result.

use crate::result::IterationResult;

/// Termination cache: empty while the cursor is live, then written once with
/// the first observed terminal value and replayed forever after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination<R> {
    Active,
    Terminated(Option<R>),
}

impl<R> Default for Termination<R> {
    fn default() -> Self {
        Termination::Active
    }
}

impl<R: Clone> Termination<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, Termination::Terminated(_))
    }

    /// Replay of the cached terminal result, if there is one.
    pub fn cached<Y>(&self) -> Option<IterationResult<Y, R>> {
        match self {
            Termination::Active => None,
            Termination::Terminated(v) => Some(IterationResult::Done(v.clone())),
        }
    }

    /// Cache `value` as the terminal value unless one is already cached, and
    /// return whatever the cache now holds.
    pub fn record<Y>(&mut self, value: Option<R>) -> IterationResult<Y, R> {
        match self {
            Termination::Terminated(cached) => IterationResult::Done(cached.clone()),
            Termination::Active => {
                #[cfg(feature = "tracing")]
                tracing::trace!(null = value.is_none(), "terminal result cached");
                *self = Termination::Terminated(value.clone());
                IterationResult::Done(value)
            }
        }
    }

    /// Force termination with `value` when nothing is cached yet.
    pub fn terminate(&mut self, value: Option<R>) {
        if let Termination::Active = self {
            #[cfg(feature = "tracing")]
            tracing::trace!(null = value.is_none(), "terminal result cached");
            *self = Termination::Terminated(value);
        }
    }

    /// Pass `result` through, caching it first when it is terminal.
    pub fn observe<Y>(&mut self, result: IterationResult<Y, R>) -> IterationResult<Y, R> {
        match result {
            IterationResult::Done(v) => self.record(v),
            pending => pending,
        }
    }
}

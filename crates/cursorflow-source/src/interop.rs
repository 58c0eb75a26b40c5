//! Bridges between cursors and `std::iter::Iterator`.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use cursorflow_core::{Capabilities, Cursor, Error, IterationResult, Result, Termination};

/// Cursor over a std iterator. Supports `stop`, which drops the iterator.
pub struct IterCursor<I, R = (), N = ()> {
    iter: Option<I>,
    termination: Termination<R>,
    _next: PhantomData<fn(N)>,
}

pub fn from_iter<I: IntoIterator>(iter: I) -> IterCursor<I::IntoIter> {
    IterCursor::new(iter)
}

impl<I: Iterator, R: Clone, N> IterCursor<I, R, N> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: Some(iter.into_iter()),
            termination: Termination::new(),
            _next: PhantomData,
        }
    }
}

impl<I: Iterator, R: Clone, N> Cursor for IterCursor<I, R, N> {
    type Yield = I::Item;
    type Return = R;
    type Next = N;
    type Abort = ();

    fn next(&mut self, _arg: Option<N>) -> Result<IterationResult<I::Item, R>> {
        if let Some(cached) = self.termination.cached() {
            return Ok(cached);
        }
        match self.iter.as_mut().and_then(Iterator::next) {
            Some(v) => Ok(IterationResult::Pending(v)),
            None => {
                self.iter = None;
                Ok(self.termination.record(None))
            }
        }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::new(true, false)
    }

    fn stop(&mut self, value: Option<R>) -> Result<IterationResult<I::Item, R>> {
        self.iter = None;
        Ok(self.termination.record(value))
    }
}

/// A std iterator over a cursor's yielded values.
///
/// Ends at the first `Done` (keeping the terminal value) or after yielding
/// the first error.
pub struct Results<C: Cursor> {
    cursor: C,
    terminal: Option<Option<C::Return>>,
    failed: bool,
}

pub fn into_results<C: Cursor>(cursor: C) -> Results<C> {
    Results {
        cursor,
        terminal: None,
        failed: false,
    }
}

impl<C: Cursor> Results<C> {
    /// Whether the cursor has reported `Done`.
    pub fn is_exhausted(&self) -> bool {
        self.terminal.is_some()
    }

    /// The terminal value, once the cursor is exhausted and the value is not null.
    pub fn terminal(&self) -> Option<&C::Return> {
        self.terminal.as_ref().and_then(Option::as_ref)
    }

    pub fn into_inner(self) -> C {
        self.cursor
    }
}

impl<C: Cursor> Iterator for Results<C> {
    type Item = std::result::Result<C::Yield, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.terminal.is_some() {
            return None;
        }
        match self.cursor.next(None) {
            Ok(IterationResult::Pending(v)) => Some(Ok(v)),
            Ok(IterationResult::Done(v)) => {
                self.terminal = Some(v);
                None
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl<C: Cursor> FusedIterator for Results<C> {}

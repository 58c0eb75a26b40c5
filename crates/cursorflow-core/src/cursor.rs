//! The cursor trait and its capability descriptor.
//!
//! A cursor always supports `next`. Early-stop (`stop`, the protocol's
//! `return`) and abort (`abort`, the protocol's `throw`) are optional; a
//! cursor advertises which ones it implements through [`Capabilities`], and
//! wrappers read that descriptor once when they are built.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Operation, Result};
use crate::result::IterationResult;

/// Which optional operations a cursor exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub stop: bool,
    pub abort: bool,
}

impl Capabilities {
    pub const NONE: Capabilities = Capabilities {
        stop: false,
        abort: false,
    };

    pub const ALL: Capabilities = Capabilities {
        stop: true,
        abort: true,
    };

    pub fn new(stop: bool, abort: bool) -> Self {
        Self { stop, abort }
    }
}

/// A stateful handle over one pass of a lazy sequence.
///
/// Invariant: once any operation has returned `Done(v)`, every later call to
/// any operation returns `Done(v)` again.
///
/// Cursors are driven by a single owner; nothing here is synchronized.
pub trait Cursor {
    /// Values handed out while iterating.
    type Yield;
    /// Final value carried by `Done`.
    type Return;
    /// Optional argument accepted by `next`.
    type Next;
    /// Optional payload accepted by `abort`.
    type Abort;

    /// Advance the cursor. `None` means `next` was called without an argument.
    fn next(&mut self, arg: Option<Self::Next>)
        -> Result<IterationResult<Self::Yield, Self::Return>>;

    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    /// Request early termination.
    fn stop(
        &mut self,
        _value: Option<Self::Return>,
    ) -> Result<IterationResult<Self::Yield, Self::Return>> {
        Err(Error::unsupported(Operation::Return))
    }

    /// Signal an abort. The cursor may recover and keep yielding.
    fn abort(
        &mut self,
        _error: Option<Self::Abort>,
    ) -> Result<IterationResult<Self::Yield, Self::Return>> {
        Err(Error::unsupported(Operation::Throw))
    }
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Yield = C::Yield;
    type Return = C::Return;
    type Next = C::Next;
    type Abort = C::Abort;

    fn next(&mut self, arg: Option<Self::Next>) -> Result<IterationResult<C::Yield, C::Return>> {
        (**self).next(arg)
    }

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn stop(&mut self, value: Option<C::Return>) -> Result<IterationResult<C::Yield, C::Return>> {
        (**self).stop(value)
    }

    fn abort(&mut self, error: Option<C::Abort>) -> Result<IterationResult<C::Yield, C::Return>> {
        (**self).abort(error)
    }
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Yield = C::Yield;
    type Return = C::Return;
    type Next = C::Next;
    type Abort = C::Abort;

    fn next(&mut self, arg: Option<Self::Next>) -> Result<IterationResult<C::Yield, C::Return>> {
        (**self).next(arg)
    }

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn stop(&mut self, value: Option<C::Return>) -> Result<IterationResult<C::Yield, C::Return>> {
        (**self).stop(value)
    }

    fn abort(&mut self, error: Option<C::Abort>) -> Result<IterationResult<C::Yield, C::Return>> {
        (**self).abort(error)
    }
}

//! Options for the primitive cursor factories.
//!
//! The window is plain data and can be (de)serialized; the handler options
//! hold boxed closures and are built in code.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cursor::Capabilities;
use crate::validate::RawResult;

/// Custom early-stop handler. Receives the caller's stop value.
pub type ReturnHandler<Y, R> = Box<dyn FnMut(Option<R>) -> RawResult<Y, R>>;

/// Custom abort handler. Receives the caller's abort payload.
pub type AbortHandler<Y, R, E> = Box<dyn FnMut(Option<E>) -> RawResult<Y, R>>;

/// Produces the terminal result of an exhausted array cursor. Receives the
/// argument of the `next` call that ran off the end.
pub type EndHandler<Y, R, N> = Box<dyn FnMut(Option<N>) -> RawResult<Y, R>>;

/// Slice of the backing sequence an array cursor walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Window {
    /// First index to yield. Negative values clamp to 0.
    pub start_index: i64,

    /// Number of elements to yield; `None` runs to the end of the sequence,
    /// anything below 1 gives an empty window.
    pub count: Option<i64>,
}

impl Window {
    pub fn new(start_index: i64, count: Option<i64>) -> Self {
        Self { start_index, count }
    }

    /// Resolve to `(start, end)` indices over a sequence of `len` elements.
    /// `start >= end` means there is nothing to yield.
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let start = usize::try_from(self.start_index.max(0)).unwrap_or(usize::MAX);
        let end = match self.count {
            None => len,
            Some(count) if count < 1 => start,
            Some(count) => start
                .saturating_add(usize::try_from(count).unwrap_or(usize::MAX))
                .min(len),
        };
        (start, end)
    }
}

/// What an array cursor reports once its window is exhausted.
pub enum EndOfIteration<Y, R, N> {
    /// `Done(None)`.
    Default,
    /// `Done(Some(value))`.
    Value(R),
    /// Ask a callback for the terminal result (validated).
    Callback(EndHandler<Y, R, N>),
}

impl<Y, R, N> Default for EndOfIteration<Y, R, N> {
    fn default() -> Self {
        EndOfIteration::Default
    }
}

impl<Y, R: fmt::Debug, N> fmt::Debug for EndOfIteration<Y, R, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndOfIteration::Default => f.write_str("Default"),
            EndOfIteration::Value(v) => f.debug_tuple("Value").field(v).finish(),
            EndOfIteration::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// How a primitive cursor answers `stop`.
pub enum ReturnHandling<Y, R> {
    /// No early-stop capability.
    Absent,
    /// Terminate with the caller's value (or the null terminal).
    Auto,
    Custom(ReturnHandler<Y, R>),
}

impl<Y, R> ReturnHandling<Y, R> {
    pub fn custom<F, O>(mut f: F) -> Self
    where
        F: FnMut(Option<R>) -> O + 'static,
        O: Into<RawResult<Y, R>>,
    {
        ReturnHandling::Custom(Box::new(move |value| f(value).into()))
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, ReturnHandling::Absent)
    }
}

impl<Y, R> Default for ReturnHandling<Y, R> {
    fn default() -> Self {
        ReturnHandling::Absent
    }
}

impl<Y, R> From<bool> for ReturnHandling<Y, R> {
    fn from(flag: bool) -> Self {
        if flag {
            ReturnHandling::Auto
        } else {
            ReturnHandling::Absent
        }
    }
}

impl<Y, R> fmt::Debug for ReturnHandling<Y, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnHandling::Absent => f.write_str("Absent"),
            ReturnHandling::Auto => f.write_str("Auto"),
            ReturnHandling::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Early-stop and abort handling shared by `create` and array cursors.
pub struct CursorOptions<Y, R, E> {
    pub handle_return: ReturnHandling<Y, R>,
    pub on_throw: Option<AbortHandler<Y, R, E>>,
}

impl<Y, R, E> CursorOptions<Y, R, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` builds `Done(value)` from the caller's stop value.
    pub fn handle_return(mut self, handling: impl Into<ReturnHandling<Y, R>>) -> Self {
        self.handle_return = handling.into();
        self
    }

    pub fn return_with<F, O>(mut self, f: F) -> Self
    where
        F: FnMut(Option<R>) -> O + 'static,
        O: Into<RawResult<Y, R>>,
    {
        self.handle_return = ReturnHandling::custom(f);
        self
    }

    pub fn on_throw<F, O>(mut self, mut f: F) -> Self
    where
        F: FnMut(Option<E>) -> O + 'static,
        O: Into<RawResult<Y, R>>,
    {
        self.on_throw = Some(Box::new(move |error| f(error).into()));
        self
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::new(self.handle_return.is_present(), self.on_throw.is_some())
    }
}

impl<Y, R, E> Default for CursorOptions<Y, R, E> {
    fn default() -> Self {
        Self {
            handle_return: ReturnHandling::Absent,
            on_throw: None,
        }
    }
}

impl<Y, R, E> fmt::Debug for CursorOptions<Y, R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorOptions")
            .field("handle_return", &self.handle_return)
            .field("on_throw", &self.on_throw.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Full configuration of an array-backed cursor.
pub struct ArrayOptions<Y, R, N, E> {
    pub window: Window,
    pub end_of_iteration: EndOfIteration<Y, R, N>,
    pub handlers: CursorOptions<Y, R, E>,
}

impl<Y, R, N, E> ArrayOptions<Y, R, N, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    pub fn start_index(mut self, start_index: i64) -> Self {
        self.window.start_index = start_index;
        self
    }

    pub fn count(mut self, count: i64) -> Self {
        self.window.count = Some(count);
        self
    }

    /// Fixed terminal value. Ignored when an end-of-iteration callback is set.
    pub fn end_value(mut self, value: R) -> Self {
        if !matches!(self.end_of_iteration, EndOfIteration::Callback(_)) {
            self.end_of_iteration = EndOfIteration::Value(value);
        }
        self
    }

    /// Terminal-result callback; takes precedence over [`Self::end_value`].
    pub fn on_end<F, O>(mut self, mut f: F) -> Self
    where
        F: FnMut(Option<N>) -> O + 'static,
        O: Into<RawResult<Y, R>>,
    {
        self.end_of_iteration = EndOfIteration::Callback(Box::new(move |arg| f(arg).into()));
        self
    }

    pub fn handle_return(mut self, handling: impl Into<ReturnHandling<Y, R>>) -> Self {
        self.handlers = self.handlers.handle_return(handling);
        self
    }

    pub fn return_with<F, O>(mut self, f: F) -> Self
    where
        F: FnMut(Option<R>) -> O + 'static,
        O: Into<RawResult<Y, R>>,
    {
        self.handlers = self.handlers.return_with(f);
        self
    }

    pub fn on_throw<F, O>(mut self, f: F) -> Self
    where
        F: FnMut(Option<E>) -> O + 'static,
        O: Into<RawResult<Y, R>>,
    {
        self.handlers = self.handlers.on_throw(f);
        self
    }
}

impl<Y, R, N, E> Default for ArrayOptions<Y, R, N, E> {
    fn default() -> Self {
        Self {
            window: Window::default(),
            end_of_iteration: EndOfIteration::Default,
            handlers: CursorOptions::default(),
        }
    }
}

impl<Y, R: fmt::Debug, N, E> fmt::Debug for ArrayOptions<Y, R, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayOptions")
            .field("window", &self.window)
            .field("end_of_iteration", &self.end_of_iteration)
            .field("handlers", &self.handlers)
            .finish()
    }
}

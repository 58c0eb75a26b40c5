#![forbid(unsafe_code)]
//! cursorflow-core: the pull-based iteration protocol.
//!
//! Everything above this crate speaks in terms of:
//! - [`IterationResult`]: `Pending(value)` or `Done(final)`.
//! - [`Cursor`]: `next` plus the optional `stop` (early-stop) and `abort`
//!   operations, advertised through a [`Capabilities`] descriptor.
//! - [`Termination`]: the per-cursor cache that makes exhaustion idempotent.
//! - [`validate`]: the shape check applied to untrusted producer output.
//!
//! No combinators and no sources live here; see `cursorflow-operators` and
//! `cursorflow-source`.

pub mod config;
pub mod cursor;
pub mod error;
pub mod prelude;
pub mod result;
pub mod termination;
pub mod validate;

pub use cursor::{Capabilities, Cursor};
pub use error::{Error, Operation, ProtocolViolation, Result, ViolationKind};
pub use result::IterationResult;
pub use termination::Termination;
pub use validate::{validate, RawResult};

//! Convenient re-exports for downstream crates.

pub use crate::config::{
    AbortHandler, ArrayOptions, CursorOptions, EndOfIteration, ReturnHandler, ReturnHandling,
    Window,
};
pub use crate::cursor::{Capabilities, Cursor};
pub use crate::error::{Error, Operation, ProtocolViolation, Result, ViolationKind};
pub use crate::result::IterationResult;
pub use crate::termination::Termination;
pub use crate::validate::{validate, RawResult};

#![forbid(unsafe_code)]
//! cursorflow-source: cursors that produce values rather than wrap them.
//!
//! - `array`: windowed cursors over a shared, fixed sequence.
//! - `create`: cursors driven by a caller-supplied step function.
//! - `interop`: bridges to and from `std::iter::Iterator`.
//! - `script`: replays JSON result objects through the validator.
//!
//! Every producer output that is not already a typed `IterationResult` is
//! validated before it is trusted or cached.

pub mod array;
pub mod create;
mod handlers;
pub mod interop;
pub mod script;

pub use array::{array_cursor, ArrayCursor, ArrayFactory};
pub use create::{create, from_fn, FnCursor};
pub use interop::{from_iter, into_results, IterCursor, Results};
pub use script::scripted;

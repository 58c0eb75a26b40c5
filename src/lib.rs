#![forbid(unsafe_code)]
//! cursorflow: composable lazy cursors over a pull-based iteration protocol.
//!
//! Facade over the workspace crates:
//! - [`protocol`]: results, the `Cursor` trait, validation, options.
//! - [`source`]: array-backed, step-function and iterator-backed cursors.
//! - [`operators`]: relays and the `filter`/`map`/`reiterate`/`limit` combinators.
//! - [`exec`]: eager consumers and the pipeline engine.
//! - [`planner`]: YAML pipeline documents.

pub use cursorflow_core as protocol;
pub use cursorflow_exec as exec;
pub use cursorflow_operators as operators;
pub use cursorflow_planner as planner;
pub use cursorflow_source as source;

pub mod prelude {
    pub use cursorflow_core::prelude::*;
    pub use cursorflow_exec::{
        first, first_or_default, first_or_default_where, first_where, reduce, to_array, Fallback,
    };
    pub use cursorflow_operators::{filter, limit, map, reiterate, relay, CursorExt, Relay, RelayStep};
    pub use cursorflow_source::{
        array_cursor, create, from_fn, from_iter, into_results, scripted, ArrayCursor,
        ArrayFactory, IterCursor, Results,
    };
}

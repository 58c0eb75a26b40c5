#![forbid(unsafe_code)]
//! cursorflow-exec: eager consumers and the pipeline runtime.
//!
//! The consumers in [`consume`] are where lazy chains actually run: each one
//! pumps `next` until the cursor is exhausted or it has what it needs.
//! [`runtime::Engine`] builds a boxed cursor chain from a compiled pipeline
//! plan and drives it into one of those consumers.

pub mod config;
pub mod consume;
pub mod metrics;
pub mod runtime;

pub use config::EngineConfig;
pub use consume::{first, first_or_default, first_or_default_where, first_where, reduce, to_array, Fallback};
pub use runtime::{Engine, ExecError, RunReport};

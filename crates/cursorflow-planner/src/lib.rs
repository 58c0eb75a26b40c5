#![forbid(unsafe_code)]
//! cursorflow-planner: YAML pipeline documents → checked [`Plan`]s.
//!
//! A pipeline is linear: one source, any number of lazy steps, one eager
//! sink. This crate only parses and checks; building and driving the cursor
//! chain is `cursorflow-exec`'s job.

pub mod dsl;
pub mod error;
pub mod expr;
pub mod plan;

pub use dsl::yaml::{parse_yaml_pipeline, Pipeline, PipelineConfig, Sink, SourceDef, Step};
pub use error::{PlanError, Result};
pub use expr::{Arith, ArithOp, CompareOp, Predicate, Reducer};
pub use plan::{compile, Plan, SinkPlan, SourcePlan, StepPlan};

//! Checked pipeline plans.
//!
//! `compile` parses every expression up front, so a plan that compiles can
//! only fail at run time on malformed scripted results.

use std::fmt::Write as _;

use serde_json::Value;

use cursorflow_core::config::Window;

use crate::dsl::yaml::{Pipeline, PipelineConfig, Sink, SourceDef, Step};
use crate::error::{PlanError, Result};
use crate::expr::{Arith, Predicate, Reducer};

#[derive(Debug, Clone, PartialEq)]
pub enum SourcePlan {
    Values {
        values: Vec<Value>,
        window: Window,
        end_value: Option<Value>,
    },
    Script(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepPlan {
    Filter(Predicate),
    Map(Arith),
    Tap,
    Limit(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkPlan {
    ToArray { limit: Option<usize> },
    Reduce { reducer: Reducer, initial: Value },
    First(Option<Predicate>),
    FirstOrDefault {
        default: Value,
        predicate: Option<Predicate>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub config: PipelineConfig,
    pub source: SourcePlan,
    pub steps: Vec<StepPlan>,
    pub sink: SinkPlan,
}

pub fn compile(pipeline: &Pipeline) -> Result<Plan> {
    let source = compile_source(&pipeline.source)?;
    let steps = pipeline
        .steps
        .iter()
        .map(|step| -> Result<StepPlan> {
            Ok(match step {
                Step::Filter { expr } => StepPlan::Filter(Predicate::parse(expr)?),
                Step::Map { expr } => StepPlan::Map(Arith::parse(expr)?),
                Step::Tap => StepPlan::Tap,
                Step::Limit { count } => StepPlan::Limit(*count),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let sink = match &pipeline.sink {
        Sink::ToArray { limit } => SinkPlan::ToArray { limit: *limit },
        Sink::Reduce { expr, initial } => SinkPlan::Reduce {
            reducer: Reducer::parse(expr)?,
            initial: initial.clone(),
        },
        Sink::First { expr } => SinkPlan::First(expr.as_deref().map(Predicate::parse).transpose()?),
        Sink::FirstOrDefault { default, expr } => SinkPlan::FirstOrDefault {
            default: default.clone(),
            predicate: expr.as_deref().map(Predicate::parse).transpose()?,
        },
    };
    Ok(Plan {
        config: pipeline.config.clone().unwrap_or_default(),
        source,
        steps,
        sink,
    })
}

fn compile_source(def: &SourceDef) -> Result<SourcePlan> {
    match (&def.values, &def.script) {
        (Some(values), None) => Ok(SourcePlan::Values {
            values: values.clone(),
            window: def.window,
            end_value: def.end_of_iteration_value.clone(),
        }),
        (None, Some(script)) => {
            if def.window != Window::default() || def.end_of_iteration_value.is_some() {
                return Err(PlanError::Source(
                    "window and end_of_iteration_value only apply to `values` sources".into(),
                ));
            }
            Ok(SourcePlan::Script(script.clone()))
        }
        (Some(_), Some(_)) => Err(PlanError::Source(
            "`values` and `script` are mutually exclusive".into(),
        )),
        (None, None) => Err(PlanError::Source(
            "one of `values` or `script` is required".into(),
        )),
    }
}

impl Plan {
    /// Human-readable rendering, one stage per line, source first.
    pub fn explain(&self) -> String {
        let mut out = String::new();
        match &self.source {
            SourcePlan::Values {
                values,
                window,
                end_value,
            } => {
                let _ = write!(
                    out,
                    "source: values[{}] start_index={} count={}",
                    values.len(),
                    window.start_index,
                    window
                        .count
                        .map_or_else(|| "all".to_string(), |c| c.to_string())
                );
                if let Some(v) = end_value {
                    let _ = write!(out, " end={}", v);
                }
            }
            SourcePlan::Script(script) => {
                let _ = write!(out, "source: script[{}]", script.len());
            }
        }
        out.push('\n');
        for step in &self.steps {
            let _ = match step {
                StepPlan::Filter(p) => writeln!(out, "  filter: {}", p),
                StepPlan::Map(a) => writeln!(out, "  map: {}", a),
                StepPlan::Tap => writeln!(out, "  tap"),
                StepPlan::Limit(n) => writeln!(out, "  limit: {}", n),
            };
        }
        let _ = match &self.sink {
            SinkPlan::ToArray { limit: Some(n) } => writeln!(out, "sink: to_array (limit {})", n),
            SinkPlan::ToArray { limit: None } => writeln!(out, "sink: to_array"),
            SinkPlan::Reduce { reducer, initial } => {
                writeln!(out, "sink: reduce {} from {}", reducer, initial)
            }
            SinkPlan::First(None) => writeln!(out, "sink: first"),
            SinkPlan::First(Some(p)) => writeln!(out, "sink: first where {}", p),
            SinkPlan::FirstOrDefault { default, predicate } => match predicate {
                Some(p) => writeln!(out, "sink: first_or_default {} where {}", default, p),
                None => writeln!(out, "sink: first_or_default {}", default),
            },
        };
        out
    }
}

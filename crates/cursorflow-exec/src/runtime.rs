//! Runtime: build a cursor chain from a pipeline plan and drive its sink.
//!
//! - Sources become array or scripted cursors over JSON values.
//! - Steps wrap the chain one boxed combinator at a time.
//! - A final relay records the chain's terminal value if the sink drains it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use cursorflow_core::config::ArrayOptions;
use cursorflow_core::{Cursor, IterationResult, Termination};
use cursorflow_operators::{relay, CursorExt, RelayStep};
use cursorflow_planner::{compile, Pipeline, Plan, PlanError, SinkPlan, SourcePlan, StepPlan};
use cursorflow_source::{scripted, ArrayFactory};

use crate::config::EngineConfig;
use crate::consume::{first, first_or_default, first_or_default_where, first_where, reduce, to_array};
use crate::metrics::emit_span;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("plan: {0}")]
    Plan(#[from] PlanError),
    #[error("cursor: {0}")]
    Cursor(#[from] cursorflow_core::Error),
}

/// A cursor chain over JSON values.
pub type JsonCursor<'a> =
    Box<dyn Cursor<Yield = Value, Return = Value, Next = Value, Abort = Value> + 'a>;

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// What the sink produced: an array for `to_array`, a single value
    /// otherwise (`null` when `first` found nothing).
    pub output: Value,
    /// Whether the sink drove the chain to exhaustion.
    pub exhausted: bool,
    /// The chain's terminal value, when exhausted with a non-null one.
    pub terminal: Option<Value>,
    /// Values observed by `tap` steps.
    pub pulled: usize,
}

pub struct Engine {
    cfg: EngineConfig,
}

impl Engine {
    pub fn new(cfg: EngineConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Compile and run `pipeline`. The pipeline's `config:` block overrides
    /// the engine configuration for this run only.
    pub fn run(&self, pipeline: &Pipeline) -> Result<RunReport, ExecError> {
        let plan = compile(pipeline)?;
        self.run_plan(&plan)
    }

    pub fn run_plan(&self, plan: &Plan) -> Result<RunReport, ExecError> {
        let cfg = self.cfg.with_overrides(&plan.config);
        let pulled = Rc::new(Cell::new(0usize));
        let terminal = Rc::new(RefCell::new(None));

        let mut chain = build_source(&plan.source);
        for step in &plan.steps {
            chain = match step {
                StepPlan::Filter(predicate) => {
                    let predicate = predicate.clone();
                    chain.filter(move |v, _| predicate.matches(v)).boxed()
                }
                StepPlan::Map(arith) => {
                    let arith = arith.clone();
                    chain.map(move |v, _| arith.apply(&v)).boxed()
                }
                StepPlan::Tap => {
                    let pulled = Rc::clone(&pulled);
                    let trace_values = cfg.trace_values;
                    chain
                        .reiterate(move |v, _| {
                            pulled.set(pulled.get() + 1);
                            if trace_values {
                                emit_span("tap", &[("value", v.to_string())]);
                            }
                        })
                        .boxed()
                }
                StepPlan::Limit(count) => chain.limit(*count).boxed(),
            };
        }
        let mut chain = relay(
            chain,
            TerminalCapture {
                slot: Rc::clone(&terminal),
            },
        );

        let output = drive_sink(&mut chain, &plan.sink, &cfg)?;
        drop(chain);

        let seen = terminal.borrow_mut().take();
        let report = RunReport {
            output,
            exhausted: seen.is_some(),
            terminal: seen.flatten(),
            pulled: pulled.get(),
        };
        emit_span(
            "pipeline_complete",
            &[
                ("pulled", report.pulled.to_string()),
                ("exhausted", report.exhausted.to_string()),
            ],
        );
        Ok(report)
    }
}

fn build_source(source: &SourcePlan) -> JsonCursor<'static> {
    match source {
        SourcePlan::Values {
            values,
            window,
            end_value,
        } => {
            let factory = ArrayFactory::new(values.clone());
            let mut options = ArrayOptions::<Value, Value, Value, Value>::new()
                .window(*window)
                .handle_return(true);
            if let Some(v) = end_value {
                options = options.end_value(v.clone());
            }
            factory.iterator(options).boxed()
        }
        SourcePlan::Script(script) => scripted(script.clone()).boxed(),
    }
}

fn drive_sink<C>(chain: &mut C, sink: &SinkPlan, cfg: &EngineConfig) -> Result<Value, ExecError>
where
    C: Cursor<Yield = Value, Return = Value>,
{
    Ok(match sink {
        SinkPlan::ToArray { limit } => {
            let cap = match (*limit, cfg.max_output) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
            Value::Array(to_array(chain, cap)?)
        }
        SinkPlan::Reduce { reducer, initial } => {
            reduce(chain, initial.clone(), |acc, v| reducer.apply(acc, &v))?
        }
        SinkPlan::First(None) => first(chain)?.unwrap_or(Value::Null),
        SinkPlan::First(Some(p)) => first_where(chain, |v| p.matches(v))?.unwrap_or(Value::Null),
        SinkPlan::FirstOrDefault {
            default,
            predicate: None,
        } => first_or_default(chain, default.clone())?,
        SinkPlan::FirstOrDefault {
            default,
            predicate: Some(p),
        } => first_or_default_where(chain, default.clone(), |v| p.matches(v))?,
    })
}

/// Relay step that remembers the first terminal value flowing out of the chain.
struct TerminalCapture {
    slot: Rc<RefCell<Option<Option<Value>>>>,
}

impl<S> RelayStep<S> for TerminalCapture
where
    S: Cursor<Return = Value>,
{
    fn step(
        &mut self,
        source: &mut S,
        termination: &mut Termination<Value>,
        arg: Option<S::Next>,
    ) -> cursorflow_core::Result<IterationResult<S::Yield, Value>> {
        let result = termination.observe(source.next(arg)?);
        if let IterationResult::Done(v) = &result {
            *self.slot.borrow_mut() = Some(v.clone());
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursorflow_planner::parse_yaml_pipeline;
    use serde_json::json;

    fn run(doc: &str) -> RunReport {
        let pipeline = parse_yaml_pipeline(doc).unwrap();
        Engine::new(EngineConfig::default()).run(&pipeline).unwrap()
    }

    #[test]
    fn filter_map_limit_pipeline() {
        let report = run(
            r#"
source: { values: [1, 2, 3, 4, 5] }
steps:
  - { op: filter, expr: "value > 1" }
  - { op: map, expr: "value * 10" }
  - { op: tap }
  - { op: limit, count: 2 }
"#,
        );
        assert_eq!(report.output, json!([20, 30]));
        assert_eq!(report.pulled, 2);
        // The limit trips on the third pull and ends the chain with null.
        assert!(report.exhausted);
        assert_eq!(report.terminal, None);
    }

    #[test]
    fn exhausted_chain_reports_terminal() {
        let report = run(
            r#"
source: { values: [10, 20, 30, 40], start_index: 1, count: 2, end_of_iteration_value: "eos" }
"#,
        );
        assert_eq!(report.output, json!([20, 30]));
        assert!(report.exhausted);
        assert_eq!(report.terminal, Some(json!("eos")));
    }

    #[test]
    fn reduce_and_first_sinks() {
        let sum = run("source: { values: [] }\nsink: { op: reduce, expr: \"acc + value\", initial: 0 }\n");
        assert_eq!(sum.output, json!(0));

        let fallback = run(
            "source: { values: [1, 3, 5] }\nsink: { op: first_or_default, default: -1, expr: \"value > 5\" }\n",
        );
        assert_eq!(fallback.output, json!(-1));

        let found = run("source: { values: [1, 3, 5] }\nsink: { op: first, expr: \"value > 1\" }\n");
        assert_eq!(found.output, json!(3));
        assert!(!found.exhausted);
    }

    #[test]
    fn max_output_caps_to_array() {
        let report = run("config: { max_output: 2 }\nsource: { values: [1, 2, 3] }\n");
        assert_eq!(report.output, json!([1, 2]));

        let pipeline = parse_yaml_pipeline("source: { values: [1, 2, 3] }\nsink: { op: to_array, limit: 1 }\n").unwrap();
        let engine = Engine::new(EngineConfig {
            max_output: Some(2),
            trace_values: false,
        });
        assert_eq!(engine.run(&pipeline).unwrap().output, json!([1]));
    }

    #[test]
    fn scripted_source_is_validated() {
        let report = run(
            r#"
source:
  script:
    - { value: 1 }
    - { done: true, value: "end" }
"#,
        );
        assert_eq!(report.output, json!([1]));
        assert_eq!(report.terminal, Some(json!("end")));

        let pipeline = parse_yaml_pipeline("source:\n  script:\n    - { other: 1 }\n").unwrap();
        let err = Engine::new(EngineConfig::default()).run(&pipeline).unwrap_err();
        assert!(matches!(err, ExecError::Cursor(e) if e.is_protocol_violation()));
    }

    #[test]
    fn plan_errors_surface() {
        let pipeline = parse_yaml_pipeline("source: { values: [1] }\nsteps:\n  - { op: filter, expr: \"nope\" }\n").unwrap();
        let err = Engine::new(EngineConfig::default()).run(&pipeline).unwrap_err();
        assert!(matches!(err, ExecError::Plan(_)));
    }
}

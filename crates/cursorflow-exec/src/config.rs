//! Engine configuration.

use serde::{Deserialize, Serialize};

use cursorflow_planner::PipelineConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on the number of values a `to_array` sink collects, on top
    /// of the sink's own limit.
    pub max_output: Option<usize>,

    /// Emit a metric for every value passing a `tap` step.
    pub trace_values: bool,
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `CURSORFLOW_MAX_OUTPUT`: output cap for `to_array` sinks
    /// - `CURSORFLOW_TRACE_VALUES`: `true`/`1` to trace tapped values
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("CURSORFLOW_MAX_OUTPUT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_output = Some(v);
            }
        }

        if let Ok(s) = std::env::var("CURSORFLOW_TRACE_VALUES") {
            if let Some(v) = parse_flag(&s) {
                cfg.trace_values = v;
            }
        }

        cfg
    }

    /// This config with a pipeline's `config:` block applied on top.
    pub fn with_overrides(&self, overrides: &PipelineConfig) -> Self {
        Self {
            max_output: overrides.max_output.or(self.max_output),
            trace_values: overrides.trace_values.unwrap_or(self.trace_values),
        }
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

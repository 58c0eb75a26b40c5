//! YAML pipeline documents.
//!
//! Example:
//! ```yaml
//! config: { max_output: 100 }
//! source:
//!   values: [1, 2, 3, 4, 5]
//!   start_index: 0
//!   count: 4
//!   end_of_iteration_value: "eos"
//! steps:
//!   - op: filter
//!     expr: "value > 1"
//!   - op: map
//!     expr: "value * 10"
//!   - op: tap
//!   - op: limit
//!     count: 2
//! sink:
//!   op: to_array
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cursorflow_core::config::Window;

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub config: Option<PipelineConfig>,
    pub source: SourceDef,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub sink: Sink,
}

/// Per-pipeline overrides of the engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub max_output: Option<usize>,
    pub trace_values: Option<bool>,
}

/// Where values come from: a plain array (`values`, optionally windowed) or
/// a `script` of raw iteration-result objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDef {
    #[serde(default)]
    pub values: Option<Vec<Value>>,
    #[serde(default)]
    pub script: Option<Vec<Value>>,
    #[serde(flatten)]
    pub window: Window,
    #[serde(default)]
    pub end_of_iteration_value: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum Step {
    Filter { expr: String },
    Map { expr: String },
    Tap,
    Limit { count: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum Sink {
    ToArray {
        #[serde(default)]
        limit: Option<usize>,
    },
    Reduce {
        expr: String,
        #[serde(default)]
        initial: Value,
    },
    First {
        #[serde(default)]
        expr: Option<String>,
    },
    FirstOrDefault {
        default: Value,
        #[serde(default)]
        expr: Option<String>,
    },
}

impl Default for Sink {
    fn default() -> Self {
        Sink::ToArray { limit: None }
    }
}

pub fn parse_yaml_pipeline(yaml_src: &str) -> Result<Pipeline> {
    Ok(serde_yaml::from_str(yaml_src)?)
}

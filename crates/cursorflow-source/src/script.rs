//! Scripted cursors over JSON iteration-result objects.
//!
//! Each step hands the next scripted object to the validator, so a script
//! like `[{"value": 1}, {"done": true, "value": "end"}]` behaves exactly like
//! a step function returning those objects. A script that runs out before
//! reaching a terminal object ends with the null terminal.

use cursorflow_core::config::CursorOptions;
use cursorflow_core::{Cursor, RawResult};
use serde_json::Value;

use crate::create::create;

/// Cursor replaying `script`. Supports automatic early-stop.
pub fn scripted(
    script: Vec<Value>,
) -> impl Cursor<Yield = Value, Return = Value, Next = Value, Abort = Value> {
    let mut steps = script.into_iter();
    create(
        move |_: Option<Value>| match steps.next() {
            Some(obj) => RawResult::from_json(obj),
            None => RawResult::Finished(None),
        },
        CursorOptions::<Value, Value, Value>::new().handle_return(true),
    )
}

#![forbid(unsafe_code)]
//! cursorflow-operators: lazy combinators over any [`Cursor`].
//!
//! Design intent:
//! - Every wrapper exposes `stop`/`abort` iff its source does, read once from
//!   the source's capability descriptor at construction.
//! - Every wrapper keeps its own termination cache; once it reports `Done` it
//!   never touches its source again for `next`.
//! - `filter`, `reiterate` and `limit` share [`Relay`]; `map` has its own
//!   stop/abort handling because those paths can surface a mapped value.
//!
//! [`Cursor`]: cursorflow_core::Cursor

pub mod ext;
pub mod filter;
pub mod limit;
pub mod map;
pub mod relay;
pub mod tap;

pub use ext::CursorExt;
pub use filter::{filter, Filter, FilterStep};
pub use limit::{limit, Limit, LimitStep};
pub use map::{map, Map};
pub use relay::{relay, Relay, RelayStep};
pub use tap::{reiterate, Tap, TapStep};

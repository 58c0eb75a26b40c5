//! Eager consumers.
//!
//! Every consumer calls `next` without an argument, never stops or aborts its
//! source, and propagates the first error it sees. Pass `&mut cursor` to keep
//! using the cursor afterwards.

use std::fmt;

use cursorflow_core::{Cursor, IterationResult, Result};

/// Fold every yielded value into an accumulator.
pub fn reduce<C, A, F>(mut source: C, initial: A, mut reducer: F) -> Result<A>
where
    C: Cursor,
    F: FnMut(A, C::Yield) -> A,
{
    let mut acc = initial;
    loop {
        match source.next(None)? {
            IterationResult::Pending(v) => acc = reducer(acc, v),
            IterationResult::Done(_) => return Ok(acc),
        }
    }
}

/// First yielded value, or `None` if the cursor is already exhausted.
pub fn first<C: Cursor>(mut source: C) -> Result<Option<C::Yield>> {
    match source.next(None)? {
        IterationResult::Pending(v) => Ok(Some(v)),
        IterationResult::Done(_) => Ok(None),
    }
}

/// First yielded value matching `predicate`.
pub fn first_where<C, P>(mut source: C, mut predicate: P) -> Result<Option<C::Yield>>
where
    C: Cursor,
    P: FnMut(&C::Yield) -> bool,
{
    loop {
        match source.next(None)? {
            IterationResult::Pending(v) if predicate(&v) => return Ok(Some(v)),
            IterationResult::Pending(_) => {}
            IterationResult::Done(_) => return Ok(None),
        }
    }
}

/// Value used by `first_or_default` when nothing matches.
pub enum Fallback<Y> {
    Value(Y),
    /// Only evaluated when needed.
    Lazy(Box<dyn FnOnce() -> Y>),
}

impl<Y> Fallback<Y> {
    pub fn lazy(f: impl FnOnce() -> Y + 'static) -> Self {
        Fallback::Lazy(Box::new(f))
    }

    pub fn resolve(self) -> Y {
        match self {
            Fallback::Value(v) => v,
            Fallback::Lazy(f) => f(),
        }
    }
}

impl<Y> From<Y> for Fallback<Y> {
    fn from(value: Y) -> Self {
        Fallback::Value(value)
    }
}

impl<Y: fmt::Debug> fmt::Debug for Fallback<Y> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Fallback::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

pub fn first_or_default<C>(source: C, fallback: impl Into<Fallback<C::Yield>>) -> Result<C::Yield>
where
    C: Cursor,
{
    Ok(match first(source)? {
        Some(v) => v,
        None => fallback.into().resolve(),
    })
}

pub fn first_or_default_where<C, P>(
    source: C,
    fallback: impl Into<Fallback<C::Yield>>,
    predicate: P,
) -> Result<C::Yield>
where
    C: Cursor,
    P: FnMut(&C::Yield) -> bool,
{
    Ok(match first_where(source, predicate)? {
        Some(v) => v,
        None => fallback.into().resolve(),
    })
}

/// Collect yielded values until the cursor is exhausted or `limit` values
/// have been collected. No `next` call is made once the limit is reached.
pub fn to_array<C: Cursor>(mut source: C, limit: Option<usize>) -> Result<Vec<C::Yield>> {
    let mut out = Vec::new();
    if limit == Some(0) {
        return Ok(out);
    }
    loop {
        match source.next(None)? {
            IterationResult::Pending(v) => {
                out.push(v);
                if limit.map_or(false, |n| out.len() >= n) {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(collected = out.len(), "to_array limit reached");
                    return Ok(out);
                }
            }
            IterationResult::Done(_) => return Ok(out),
        }
    }
}

//! Method-chaining sugar over the combinator functions.

use cursorflow_core::Cursor;

use crate::filter::{filter, Filter};
use crate::limit::{limit, Limit};
use crate::map::{map, Map};
use crate::tap::{reiterate, Tap};

pub trait CursorExt: Cursor + Sized {
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        Self::Next: Clone,
        Self::Return: Clone,
        P: FnMut(&Self::Yield, Option<&Self::Next>) -> bool,
    {
        filter(self, predicate)
    }

    fn map<F, U>(self, mapper: F) -> Map<Self, F, U>
    where
        Self::Next: Clone,
        Self::Return: Clone,
        F: FnMut(Self::Yield, Option<&Self::Next>) -> U,
    {
        map(self, mapper)
    }

    fn reiterate<F>(self, callback: F) -> Tap<Self, F>
    where
        Self::Next: Clone,
        Self::Return: Clone,
        F: FnMut(&Self::Yield, Option<&Self::Next>),
    {
        reiterate(self, callback)
    }

    fn limit(self, count: usize) -> Limit<Self>
    where
        Self::Return: Clone,
    {
        limit(self, count)
    }

    /// Borrow the cursor so a combinator chain can be built without giving it up.
    fn by_ref(&mut self) -> &mut Self {
        self
    }

    /// Box the cursor behind a trait object.
    fn boxed<'a>(
        self,
    ) -> Box<dyn Cursor<Yield = Self::Yield, Return = Self::Return, Next = Self::Next, Abort = Self::Abort> + 'a>
    where
        Self: 'a,
    {
        Box::new(self)
    }
}

impl<C: Cursor> CursorExt for C {}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Type erasure for sources whose element types differ.

use crate::source::{BoxedSource, Source, TryReceive};
use core::any::{type_name, Any};
use core::fmt::{self, Debug};
use core::task::Context;

/// A received value whose concrete type is only known to the caller.
pub type Erased = Box<dyn Any + Send>;

/// A source of [`Erased`] values.
///
/// Sources of unrelated element types become interchangeable once erased,
/// which is what lets a single `all` collect a `Person`, an `Animal` and a
/// `Plant` side by side.
pub struct ErasedSource {
    inner: BoxedSource<Erased>,
    kind: &'static str,
}

impl ErasedSource {
    /// Erases `source`, boxing each value it produces.
    pub fn new<S>(source: S) -> Self
    where
        S: Source + Send + 'static,
        S::Item: Any + Send,
    {
        Self {
            inner: Box::new(Erase { source }),
            kind: type_name::<S>(),
        }
    }

    /// Wraps a source that already yields [`Erased`] values without boxing them again.
    pub fn from_erased<S>(source: S, kind: &'static str) -> Self
    where
        S: Source<Item = Erased> + Send + 'static,
    {
        Self {
            inner: Box::new(source),
            kind,
        }
    }

    /// Type name of the source that was erased
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    pub(crate) fn inner_mut(&mut self) -> &mut BoxedSource<Erased> {
        &mut self.inner
    }
}

impl Debug for ErasedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedSource")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

struct Erase<S> {
    source: S,
}

impl<S> Source for Erase<S>
where
    S: Source,
    S::Item: Any + Send,
{
    type Item = Erased;

    fn try_receive(&mut self, cx: &mut Context<'_>) -> TryReceive<Erased> {
        self.source
            .try_receive(cx)
            .map(|value| Box::new(value) as Erased)
    }
}

/// Recovers the concrete value from an [`Erased`] box.
///
/// # Errors
///
/// Returns the box unchanged when it does not hold a `T`.
pub fn downcast<T>(value: Erased) -> Result<T, Erased>
where
    T: Any,
{
    value.downcast::<T>().map(|boxed| *boxed)
}

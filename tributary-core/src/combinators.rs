// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Typed streams over the [`Multiplexer`], one per combinator.
//!
//! These run on the caller's task. To run a combinator on its own worker and
//! consume it through a channel, use `tributary-exec`.

use crate::multiplexer::{Emission, Multiplexer};
use crate::policy::Termination;
use crate::source::Source;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::{FusedStream, Stream};
use pin_project::pin_project;

/// Yields a single `Vec<Option<T>>` with one slot per source, then ends.
#[pin_project]
pub struct All<T> {
    #[pin]
    inner: Multiplexer<T>,
}

/// Yields the first value received from any source, if there is one, then ends.
#[pin_project]
pub struct Race<T> {
    #[pin]
    inner: Multiplexer<T>,
}

/// Yields every value from every source until they all close, or until the
/// cancellation signal fires when built with [`MultiplexExt::select_until`].
#[pin_project]
pub struct Select<T> {
    #[pin]
    inner: Multiplexer<T>,
}

macro_rules! combinator_accessors {
    ($name:ident) => {
        impl<T> $name<T> {
            /// Why the combinator stopped, once it has
            #[must_use]
            pub const fn termination(&self) -> Option<Termination> {
                self.inner.termination()
            }

            /// Underlying engine
            #[must_use]
            pub const fn multiplexer(&self) -> &Multiplexer<T> {
                &self.inner
            }

            pub fn into_multiplexer(self) -> Multiplexer<T> {
                self.inner
            }
        }

        impl<T> FusedStream for $name<T> {
            fn is_terminated(&self) -> bool {
                self.inner.is_terminated()
            }
        }
    };
}

combinator_accessors!(All);
combinator_accessors!(Race);
combinator_accessors!(Select);

impl<T> Stream for All<T> {
    type Item = Vec<Option<T>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project()
            .inner
            .poll_next(cx)
            .map(|emission| emission.and_then(Emission::into_collected))
    }
}

impl<T> Stream for Race<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project()
            .inner
            .poll_next(cx)
            .map(|emission| emission.and_then(Emission::into_value))
    }
}

impl<T> Stream for Select<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project()
            .inner
            .poll_next(cx)
            .map(|emission| emission.and_then(Emission::into_value))
    }
}

/// Extension trait turning a vector of sources into a combinator stream.
///
/// Vector order is source order: it fixes result positions for
/// [`all`](MultiplexExt::all) and breaks ties for the others.
pub trait MultiplexExt {
    type Item;

    /// `Promise.all`: one value per source, in source order.
    fn all(self) -> All<Self::Item>;

    /// `Promise.race`: the first value from any source.
    fn race(self) -> Race<Self::Item>;

    /// Fan-in: every value from every source.
    fn select(self) -> Select<Self::Item>;

    /// Fan-in that stops as soon as `signal` yields or closes.
    fn select_until<C>(self, signal: C) -> Select<Self::Item>
    where
        C: Source + Send + 'static;
}

impl<T, S> MultiplexExt for Vec<S>
where
    S: Source<Item = T> + Send + 'static,
    T: Send + 'static,
{
    type Item = T;

    fn all(self) -> All<T> {
        All {
            inner: Multiplexer::collect_all(self),
        }
    }

    fn race(self) -> Race<T> {
        Race {
            inner: Multiplexer::first_wins(self),
        }
    }

    fn select(self) -> Select<T> {
        Select {
            inner: Multiplexer::forward_all(self),
        }
    }

    fn select_until<C>(self, signal: C) -> Select<T>
    where
        C: Source + Send + 'static,
    {
        Select {
            inner: Multiplexer::forward_until(signal, self),
        }
    }
}

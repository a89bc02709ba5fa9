// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The readiness check shared by every combinator.
//!
//! A [`Source`] is a read-only, producer-driven channel endpoint. The engine
//! asks it for a value with [`Source::try_receive`], which must never suspend
//! and reports one of three outcomes through [`TryReceive`].

use crate::erased::{Erased, ErasedSource};
use core::any::Any;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::channel::{mpsc, oneshot};
use futures::future::FusedFuture;
use futures::stream::{Stream, StreamExt};
use futures::task::noop_waker_ref;
use futures::FutureExt;

/// Outcome of a single non-blocking receive attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryReceive<T> {
    /// A value was pending; ownership moves to the caller.
    Received(T),
    /// The source will never produce another value.
    Closed,
    /// Nothing available yet, the source is still open.
    NotReady,
}

impl<T> TryReceive<T> {
    /// Maps the received value, leaving `Closed` and `NotReady` untouched.
    pub fn map<U, F>(self, f: F) -> TryReceive<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Received(value) => TryReceive::Received(f(value)),
            Self::Closed => TryReceive::Closed,
            Self::NotReady => TryReceive::NotReady,
        }
    }

    #[must_use]
    pub const fn is_received(&self) -> bool {
        matches!(self, Self::Received(_))
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    #[must_use]
    pub const fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady)
    }

    /// Returns the received value, discarding the other outcomes.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Received(value) => Some(value),
            Self::Closed | Self::NotReady => None,
        }
    }
}

impl<T> From<Poll<Option<T>>> for TryReceive<T> {
    fn from(poll: Poll<Option<T>>) -> Self {
        match poll {
            Poll::Ready(Some(value)) => Self::Received(value),
            Poll::Ready(None) => Self::Closed,
            Poll::Pending => Self::NotReady,
        }
    }
}

/// A channel-like endpoint the multiplexer can receive from.
///
/// Implementations must not block. When they report
/// [`TryReceive::NotReady`] they must arrange for the waker in `cx` to be
/// woken once a value arrives or the source closes, exactly like
/// `Stream::poll_next`.
pub trait Source {
    /// Element type produced by this source
    type Item;

    /// Attempts to take one pending value without suspending.
    fn try_receive(&mut self, cx: &mut Context<'_>) -> TryReceive<Self::Item>;
}

/// A type-erased source with a known element type.
pub type BoxedSource<T> = Box<dyn Source<Item = T> + Send>;

impl<S> Source for Box<S>
where
    S: Source + ?Sized,
{
    type Item = S::Item;

    fn try_receive(&mut self, cx: &mut Context<'_>) -> TryReceive<Self::Item> {
        (**self).try_receive(cx)
    }
}

/// Convenience adapters available on every [`Source`].
pub trait SourceExt: Source {
    /// Boxes the source so sources of different concrete types can share a `Vec`.
    fn boxed(self) -> BoxedSource<Self::Item>
    where
        Self: Sized + Send + 'static,
    {
        Box::new(self)
    }

    /// Erases the element type, boxing every received value into [`Erased`].
    fn erase(self) -> ErasedSource
    where
        Self: Sized + Send + 'static,
        Self::Item: Any + Send,
    {
        ErasedSource::new(self)
    }

    /// Readiness check without a task context.
    ///
    /// No waker is registered, so a `NotReady` result will not be followed
    /// by a notification.
    fn try_receive_now(&mut self) -> TryReceive<Self::Item> {
        let mut cx = Context::from_waker(noop_waker_ref());
        self.try_receive(&mut cx)
    }
}

impl<S> SourceExt for S where S: Source + ?Sized {}

/// Adapts any [`Stream`] into a [`Source`].
///
/// The stream is pinned on the heap, so `!Unpin` streams are accepted. Once
/// the stream ends it is never polled again.
pub struct StreamSource<S> {
    stream: Pin<Box<S>>,
    closed: bool,
}

impl<S> StreamSource<S>
where
    S: Stream,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream: Box::pin(stream),
            closed: false,
        }
    }
}

impl<S> Source for StreamSource<S>
where
    S: Stream,
{
    type Item = S::Item;

    fn try_receive(&mut self, cx: &mut Context<'_>) -> TryReceive<Self::Item> {
        if self.closed {
            return TryReceive::Closed;
        }

        let outcome = TryReceive::from(self.stream.as_mut().poll_next(cx));
        if outcome.is_closed() {
            self.closed = true;
        }
        outcome
    }
}

/// Wraps a [`Stream`] as a [`Source`].
pub fn from_stream<S>(stream: S) -> StreamSource<S>
where
    S: Stream,
{
    StreamSource::new(stream)
}

impl<T> Source for mpsc::Receiver<T> {
    type Item = T;

    fn try_receive(&mut self, cx: &mut Context<'_>) -> TryReceive<T> {
        self.poll_next_unpin(cx).into()
    }
}

impl<T> Source for mpsc::UnboundedReceiver<T> {
    type Item = T;

    fn try_receive(&mut self, cx: &mut Context<'_>) -> TryReceive<T> {
        self.poll_next_unpin(cx).into()
    }
}

/// A oneshot yields its value once, then reports `Closed`. A dropped sender
/// is a close without value.
impl<T> Source for oneshot::Receiver<T> {
    type Item = T;

    fn try_receive(&mut self, cx: &mut Context<'_>) -> TryReceive<T> {
        if self.is_terminated() {
            return TryReceive::Closed;
        }

        match self.poll_unpin(cx) {
            Poll::Ready(Ok(value)) => TryReceive::Received(value),
            Poll::Ready(Err(oneshot::Canceled)) => TryReceive::Closed,
            Poll::Pending => TryReceive::NotReady,
        }
    }
}

#[cfg(feature = "runtime-tokio")]
impl<T> Source for tokio::sync::mpsc::Receiver<T> {
    type Item = T;

    fn try_receive(&mut self, cx: &mut Context<'_>) -> TryReceive<T> {
        self.poll_recv(cx).into()
    }
}

#[cfg(feature = "runtime-tokio")]
impl<T> Source for tokio::sync::mpsc::UnboundedReceiver<T> {
    type Item = T;

    fn try_receive(&mut self, cx: &mut Context<'_>) -> TryReceive<T> {
        self.poll_recv(cx).into()
    }
}

impl Source for ErasedSource {
    type Item = Erased;

    fn try_receive(&mut self, cx: &mut Context<'_>) -> TryReceive<Erased> {
        self.inner_mut().try_receive(cx)
    }
}

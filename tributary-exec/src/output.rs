// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::task::WorkerTask;
use async_channel::{Receiver, TryRecvError};
use core::fmt;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::{FusedStream, Stream};
use tributary_core::{Source, TryReceive};

/// Consumer end of a launched combinator.
///
/// Receives what the worker emits and reports the close once the worker
/// terminates. Dropping the `Output` cancels the worker, which then releases
/// every source it owns.
///
/// An `Output` is itself a [`Source`] and a [`Stream`], so it can feed another
/// combinator.
pub struct Output<T> {
    receiver: Pin<Box<Receiver<T>>>,
    task: WorkerTask,
    terminated: bool,
}

impl<T> Output<T> {
    pub(crate) fn new(receiver: Receiver<T>, task: WorkerTask) -> Self {
        Self {
            receiver: Box::pin(receiver),
            task,
            terminated: false,
        }
    }

    /// Waits for the next emission. `None` once the worker has closed the
    /// output and everything buffered has been received.
    pub async fn recv(&mut self) -> Option<T> {
        if self.terminated {
            return None;
        }
        match self.receiver.recv().await {
            Ok(value) => Some(value),
            Err(_) => {
                self.terminated = true;
                None
            }
        }
    }

    /// Non-blocking receive.
    pub fn try_recv(&mut self) -> TryReceive<T> {
        if self.terminated {
            return TryReceive::Closed;
        }
        match self.receiver.try_recv() {
            Ok(value) => TryReceive::Received(value),
            Err(TryRecvError::Empty) => TryReceive::NotReady,
            Err(TryRecvError::Closed) => {
                self.terminated = true;
                TryReceive::Closed
            }
        }
    }

    /// `true` once no further value can be received.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.terminated || (self.receiver.is_closed() && self.receiver.is_empty())
    }

    /// Number of emissions buffered and not yet received
    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Stops the worker early. Values already buffered stay receivable.
    pub fn cancel(&self) {
        self.task.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.task.is_cancelled()
    }
}

impl<T> fmt::Debug for Output<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("buffered", &self.receiver.len())
            .field("closed", &self.is_closed())
            .field("task", &self.task)
            .finish()
    }
}

impl<T> Stream for Output<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        if self.terminated {
            return Poll::Ready(None);
        }
        let polled = self.receiver.as_mut().poll_next(cx);
        if let Poll::Ready(None) = polled {
            self.terminated = true;
        }
        polled
    }
}

impl<T> FusedStream for Output<T> {
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl<T> Source for Output<T> {
    type Item = T;

    fn try_receive(&mut self, cx: &mut Context<'_>) -> TryReceive<T> {
        Pin::new(self).poll_next(cx).into()
    }
}

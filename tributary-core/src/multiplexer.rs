// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::completion::Completion;
use crate::policy::{Policy, Termination};
use crate::source::{BoxedSource, Source, TryReceive};
use core::mem;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::{FusedStream, Stream};

/// What the multiplexer hands to its consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission<T> {
    /// A single forwarded value (first-wins and forwarding policies).
    Value(T),
    /// One slot per source in source order (collect-all). `None` marks a
    /// source that closed without sending.
    Collected(Vec<Option<T>>),
}

impl<T> Emission<T> {
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Collected(_) => None,
        }
    }

    pub fn into_collected(self) -> Option<Vec<Option<T>>> {
        match self {
            Self::Collected(values) => Some(values),
            Self::Value(_) => None,
        }
    }
}

/// The sweep loop shared by every combinator.
///
/// Each call to `poll_next` continues the current sweep, checking sources in
/// index order with [`Source::try_receive`] and skipping those already
/// marked terminal. A sweep interrupted by a forwarded value resumes at the
/// next position on the following call, so every open source is retried
/// every sweep. When a full sweep receives nothing the multiplexer returns
/// `Pending`; every open source has registered the waker by then.
///
/// Once terminated, all sources and the signal are dropped and the stream
/// yields `None` forever.
pub struct Multiplexer<T> {
    policy: Policy,
    sources: Vec<BoxedSource<T>>,
    signal: Option<BoxedSource<()>>,
    completion: Completion,
    slots: Vec<Option<T>>,
    cursor: usize,
    progressed: bool,
    sweeps: u64,
    termination: Option<Termination>,
}

impl<T> Multiplexer<T>
where
    T: Send + 'static,
{
    /// Collect one value per source (`all`).
    pub fn collect_all<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Source<Item = T> + Send + 'static,
    {
        Self::with_policy(Policy::CollectAll, boxed(sources), None)
    }

    /// Emit the first value from any source (`race`).
    pub fn first_wins<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Source<Item = T> + Send + 'static,
    {
        Self::with_policy(Policy::FirstWins, boxed(sources), None)
    }

    /// Forward everything until all sources close (`select`).
    pub fn forward_all<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Source<Item = T> + Send + 'static,
    {
        Self::with_policy(Policy::ForwardAll, boxed(sources), None)
    }

    /// Forward everything until all sources close or `signal` yields (`select_until`).
    ///
    /// The signal's payload is ignored. A signal that closes without ever
    /// yielding also cancels.
    pub fn forward_until<C, I, S>(signal: C, sources: I) -> Self
    where
        C: Source + Send + 'static,
        I: IntoIterator<Item = S>,
        S: Source<Item = T> + Send + 'static,
    {
        let signal: BoxedSource<()> = Box::new(Discard { signal });
        Self::with_policy(Policy::ForwardUntil, boxed(sources), Some(signal))
    }

    fn with_policy(
        policy: Policy,
        sources: Vec<BoxedSource<T>>,
        signal: Option<BoxedSource<()>>,
    ) -> Self {
        let len = sources.len();
        debug!("{}: multiplexing {} sources", policy, len);

        let slots = if policy == Policy::CollectAll {
            (0..len).map(|_| None).collect()
        } else {
            Vec::new()
        };

        Self {
            policy,
            sources,
            signal,
            completion: Completion::new(len),
            slots,
            cursor: 0,
            progressed: false,
            sweeps: 0,
            termination: None,
        }
    }
}

impl<T> Multiplexer<T> {
    #[must_use]
    pub const fn policy(&self) -> Policy {
        self.policy
    }

    /// Number of sources supplied at construction
    #[must_use]
    pub fn len(&self) -> usize {
        self.completion.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completion.is_empty()
    }

    /// Sources not yet filled or closed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.completion.remaining()
    }

    /// Completed sweeps so far
    #[must_use]
    pub const fn sweeps(&self) -> u64 {
        self.sweeps
    }

    /// Why the multiplexer stopped, once it has
    #[must_use]
    pub const fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Drives the sweep loop until an emission is ready, the run ends, or
    /// nothing is ready.
    pub fn poll_emission(&mut self, cx: &mut Context<'_>) -> Poll<Option<Emission<T>>> {
        if self.termination.is_some() {
            return Poll::Ready(None);
        }

        if self.cancellation_requested(cx) {
            return Poll::Ready(None);
        }

        loop {
            if self.cursor == self.sources.len() {
                self.sweeps += 1;
                self.cursor = 0;
                let progressed = mem::take(&mut self.progressed);

                if self.completion.is_complete() {
                    return Poll::Ready(self.complete());
                }
                if !progressed {
                    trace!("{}: sweep {} idle, parking", self.policy, self.sweeps);
                    return Poll::Pending;
                }
                if self.cancellation_requested(cx) {
                    return Poll::Ready(None);
                }
                continue;
            }

            let position = self.cursor;
            self.cursor += 1;

            if self.completion.is_marked(position) {
                continue;
            }

            match self.sources[position].try_receive(cx) {
                TryReceive::Received(value) => {
                    self.progressed = true;
                    match self.policy {
                        Policy::CollectAll => {
                            self.slots[position] = Some(value);
                            self.completion.mark(position);
                        }
                        Policy::FirstWins => {
                            self.finish(Termination::FirstValue);
                            return Poll::Ready(Some(Emission::Value(value)));
                        }
                        Policy::ForwardAll | Policy::ForwardUntil => {
                            return Poll::Ready(Some(Emission::Value(value)));
                        }
                    }
                }
                TryReceive::Closed => {
                    if self.completion.mark(position) {
                        debug!("{}: source #{} closed", self.policy, position);
                    }
                }
                TryReceive::NotReady => {}
            }
        }
    }

    fn cancellation_requested(&mut self, cx: &mut Context<'_>) -> bool {
        let Some(signal) = self.signal.as_mut() else {
            return false;
        };

        match signal.try_receive(cx) {
            TryReceive::Received(()) => {
                debug!("{}: cancellation signal received", self.policy);
            }
            TryReceive::Closed => {
                debug!("{}: cancellation signal closed", self.policy);
            }
            TryReceive::NotReady => return false,
        }

        self.finish(Termination::Cancelled);
        true
    }

    fn complete(&mut self) -> Option<Emission<T>> {
        if self.policy == Policy::CollectAll {
            let values = mem::take(&mut self.slots);
            self.finish(Termination::AllFilled);
            Some(Emission::Collected(values))
        } else {
            self.finish(Termination::AllClosed);
            None
        }
    }

    fn finish(&mut self, termination: Termination) {
        debug!(
            "{}: terminated after {} sweeps ({})",
            self.policy, self.sweeps, termination
        );
        self.termination = Some(termination);
        self.sources.clear();
        self.signal = None;
        self.slots.clear();
    }
}

// `slots: Vec<Option<T>>` would make this Unpin only for `T: Unpin`. No field
// is ever pinned: sources are boxed and slots are moved out by value.
impl<T> Unpin for Multiplexer<T> {}

impl<T> Stream for Multiplexer<T> {
    type Item = Emission<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::into_inner(self).poll_emission(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.termination.is_some() {
            return (0, Some(0));
        }
        match self.policy {
            Policy::CollectAll => (1, Some(1)),
            Policy::FirstWins => (0, Some(1)),
            Policy::ForwardAll | Policy::ForwardUntil => (0, None),
        }
    }
}

impl<T> FusedStream for Multiplexer<T> {
    fn is_terminated(&self) -> bool {
        self.termination.is_some()
    }
}

struct Discard<C> {
    signal: C,
}

impl<C> Source for Discard<C>
where
    C: Source,
{
    type Item = ();

    fn try_receive(&mut self, cx: &mut Context<'_>) -> TryReceive<()> {
        self.signal.try_receive(cx).map(|_| ())
    }
}

fn boxed<T, I, S>(sources: I) -> Vec<BoxedSource<T>>
where
    I: IntoIterator<Item = S>,
    S: Source<Item = T> + Send + 'static,
{
    sources
        .into_iter()
        .map(|source| Box::new(source) as BoxedSource<T>)
        .collect()
}

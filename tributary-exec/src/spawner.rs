// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::ExecConfig;
use crate::output::Output;
use crate::task::WorkerTask;
use crate::worker;
use futures::stream::Stream;
use tributary_core::{into_sources, Arg, Erased, MultiplexExt, Policy, Source};
use tributary_error::Result;

/// Launches combinators as detached workers with a shared [`ExecConfig`].
///
/// Every operation validates its inputs and the runtime before anything is
/// spawned: an `Err` means no worker exists and every source was dropped.
///
/// ```
/// use tributary_exec::{ExecConfig, Spawner};
///
/// # #[tokio::main]
/// # async fn main() -> tributary_error::Result<()> {
/// let spawner = Spawner::new(ExecConfig::default().with_capacity(4))?;
///
/// let (tx_a, rx_a) = tokio::sync::mpsc::unbounded_channel();
/// let (tx_b, rx_b) = tokio::sync::mpsc::unbounded_channel();
/// let mut output = spawner.select(vec![rx_a, rx_b])?;
///
/// tx_a.send("left").unwrap();
/// tx_b.send("right").unwrap();
/// drop((tx_a, tx_b));
///
/// let mut values = Vec::new();
/// while let Some(value) = output.recv().await {
///     values.push(value);
/// }
/// values.sort();
/// assert_eq!(values, vec!["left", "right"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Spawner {
    config: ExecConfig,
}

impl Spawner {
    /// # Errors
    ///
    /// Returns [`TributaryError::InvalidConfig`](tributary_error::TributaryError::InvalidConfig)
    /// if `config` does not validate.
    pub fn new(config: ExecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &ExecConfig {
        &self.config
    }

    /// Emits one `Vec` holding a slot per source, in source order, then closes.
    ///
    /// A slot is `Some` with the first value that source produced, or `None`
    /// if the source closed first.
    ///
    /// # Errors
    ///
    /// Returns [`TributaryError::RuntimeUnavailable`](tributary_error::TributaryError::RuntimeUnavailable)
    /// if the worker cannot be spawned.
    pub fn all<T, S>(&self, sources: Vec<S>) -> Result<Output<Vec<Option<T>>>>
    where
        S: Source<Item = T> + Send + 'static,
        T: Send + 'static,
    {
        self.launch(Policy::CollectAll, sources.all())
    }

    /// Emits the first value any source produces, then closes. Closes without
    /// emitting if every source closes first.
    ///
    /// # Errors
    ///
    /// See [`Spawner::all`].
    pub fn race<T, S>(&self, sources: Vec<S>) -> Result<Output<T>>
    where
        S: Source<Item = T> + Send + 'static,
        T: Send + 'static,
    {
        self.launch(Policy::FirstWins, sources.race())
    }

    /// Forwards every value from every source, closing once all have closed.
    ///
    /// # Errors
    ///
    /// See [`Spawner::all`].
    pub fn select<T, S>(&self, sources: Vec<S>) -> Result<Output<T>>
    where
        S: Source<Item = T> + Send + 'static,
        T: Send + 'static,
    {
        self.launch(Policy::ForwardAll, sources.select())
    }

    /// Like [`Spawner::select`], but closes as soon as `signal` yields a value
    /// or closes. Values not yet forwarded are discarded.
    ///
    /// # Errors
    ///
    /// See [`Spawner::all`].
    pub fn select_until<T, S, C>(&self, signal: C, sources: Vec<S>) -> Result<Output<T>>
    where
        S: Source<Item = T> + Send + 'static,
        C: Source + Send + 'static,
        T: Send + 'static,
    {
        self.launch(Policy::ForwardUntil, sources.select_until(signal))
    }

    /// [`Spawner::all`] over dynamically typed arguments.
    ///
    /// # Errors
    ///
    /// Returns [`TributaryError::NotASource`](tributary_error::TributaryError::NotASource)
    /// naming the first argument that is not a receivable source.
    pub fn all_dyn(&self, args: Vec<Arg>) -> Result<Output<Vec<Option<Erased>>>> {
        self.all(into_sources(args)?)
    }

    /// [`Spawner::race`] over dynamically typed arguments.
    ///
    /// # Errors
    ///
    /// See [`Spawner::all_dyn`].
    pub fn race_dyn(&self, args: Vec<Arg>) -> Result<Output<Erased>> {
        self.race(into_sources(args)?)
    }

    /// [`Spawner::select`] over dynamically typed arguments.
    ///
    /// # Errors
    ///
    /// See [`Spawner::all_dyn`].
    pub fn select_dyn(&self, args: Vec<Arg>) -> Result<Output<Erased>> {
        self.select(into_sources(args)?)
    }

    /// [`Spawner::select_until`] over dynamically typed arguments.
    ///
    /// # Errors
    ///
    /// See [`Spawner::all_dyn`].
    pub fn select_until_dyn<C>(&self, signal: C, args: Vec<Arg>) -> Result<Output<Erased>>
    where
        C: Source + Send + 'static,
    {
        self.select_until(signal, into_sources(args)?)
    }

    fn launch<S>(&self, policy: Policy, emissions: S) -> Result<Output<S::Item>>
    where
        S: Stream + Unpin + Send + 'static,
        S::Item: Send + 'static,
    {
        let (sender, receiver) = async_channel::bounded(self.config.capacity());
        let task = WorkerTask::spawn(move |cancel| worker::run(policy, emissions, sender, cancel))?;
        Ok(Output::new(receiver, task))
    }
}

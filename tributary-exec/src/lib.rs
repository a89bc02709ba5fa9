// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Runs tributary combinators on a background worker and hands back an
//! [`Output`] channel.
//!
//! Each call spawns exactly one worker that owns the sources, drives a
//! [`Multiplexer`](tributary_core::Multiplexer) and writes into a bounded
//! output channel. The worker closes the output once the combinator
//! terminates, and stops early if the `Output` is dropped.
//!
//! The free functions use [`ExecConfig::default`]; build a [`Spawner`] to pick
//! another output capacity.

#[macro_use]
mod logging;

pub mod config;
pub mod output;
pub mod spawner;
pub mod task;
mod worker;

pub use self::config::{ExecConfig, DEFAULT_CAPACITY};
pub use self::output::Output;
pub use self::spawner::Spawner;
pub use self::task::WorkerTask;

use tributary_core::{Arg, Erased, Source};
use tributary_error::Result;

/// [`Spawner::all`] with the default configuration.
///
/// # Errors
///
/// See [`Spawner::all`].
pub fn all<T, S>(sources: Vec<S>) -> Result<Output<Vec<Option<T>>>>
where
    S: Source<Item = T> + Send + 'static,
    T: Send + 'static,
{
    Spawner::default().all(sources)
}

/// [`Spawner::race`] with the default configuration.
///
/// # Errors
///
/// See [`Spawner::race`].
pub fn race<T, S>(sources: Vec<S>) -> Result<Output<T>>
where
    S: Source<Item = T> + Send + 'static,
    T: Send + 'static,
{
    Spawner::default().race(sources)
}

/// [`Spawner::select`] with the default configuration.
///
/// # Errors
///
/// See [`Spawner::select`].
pub fn select<T, S>(sources: Vec<S>) -> Result<Output<T>>
where
    S: Source<Item = T> + Send + 'static,
    T: Send + 'static,
{
    Spawner::default().select(sources)
}

/// [`Spawner::select_until`] with the default configuration.
///
/// # Errors
///
/// See [`Spawner::select_until`].
pub fn select_until<T, S, C>(signal: C, sources: Vec<S>) -> Result<Output<T>>
where
    S: Source<Item = T> + Send + 'static,
    C: Source + Send + 'static,
    T: Send + 'static,
{
    Spawner::default().select_until(signal, sources)
}

/// # Errors
///
/// See [`Spawner::all_dyn`].
pub fn all_dyn(args: Vec<Arg>) -> Result<Output<Vec<Option<Erased>>>> {
    Spawner::default().all_dyn(args)
}

/// # Errors
///
/// See [`Spawner::race_dyn`].
pub fn race_dyn(args: Vec<Arg>) -> Result<Output<Erased>> {
    Spawner::default().race_dyn(args)
}

/// # Errors
///
/// See [`Spawner::select_dyn`].
pub fn select_dyn(args: Vec<Arg>) -> Result<Output<Erased>> {
    Spawner::default().select_dyn(args)
}

/// # Errors
///
/// See [`Spawner::select_until_dyn`].
pub fn select_until_dyn<C>(signal: C, args: Vec<Arg>) -> Result<Output<Erased>>
where
    C: Source + Send + 'static,
{
    Spawner::default().select_until_dyn(signal, args)
}

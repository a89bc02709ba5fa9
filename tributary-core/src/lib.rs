// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Channel multiplexing engine for the tributary combinators.
//!
//! A [`Multiplexer`] sweeps a fixed, ordered set of [`Source`]s with a
//! non-blocking readiness check and routes what it receives according to a
//! [`Policy`]:
//!
//! | Policy         | Emits                                   | Terminates when            |
//! |----------------|-----------------------------------------|----------------------------|
//! | `CollectAll`   | one `Vec<Option<T>>` in source order    | every source filled/closed |
//! | `FirstWins`    | the first value received, if any        | first value or all closed  |
//! | `ForwardAll`   | every value as soon as it is observed   | every source closed        |
//! | `ForwardUntil` | every value until the signal fires      | signal or all closed       |
//!
//! Sources that report [`TryReceive::NotReady`] register the task's waker, so
//! the engine parks instead of spinning while nothing is ready.
//!
//! ```
//! use futures::channel::mpsc;
//! use futures::StreamExt;
//! use tributary_core::MultiplexExt;
//!
//! # futures::executor::block_on(async {
//! let (tx_a, rx_a) = mpsc::unbounded::<u32>();
//! let (tx_b, rx_b) = mpsc::unbounded::<u32>();
//!
//! tx_a.unbounded_send(1).unwrap();
//! tx_b.unbounded_send(2).unwrap();
//! drop((tx_a, tx_b));
//!
//! let values = vec![rx_a, rx_b].all().next().await;
//! assert_eq!(values, Some(vec![Some(1), Some(2)]));
//! # });
//! ```

#[macro_use]
mod logging;

pub mod cancellation_token;
pub mod combinators;
pub mod completion;
pub mod dynamic;
pub mod erased;
pub mod multiplexer;
pub mod policy;
pub mod signal;
pub mod source;

pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::combinators::{All, MultiplexExt, Race, Select};
pub use self::completion::Completion;
pub use self::dynamic::{into_sources, Arg};
pub use self::erased::{downcast, Erased, ErasedSource};
pub use self::multiplexer::{Emission, Multiplexer};
pub use self::policy::{Policy, Termination};
pub use self::signal::CancelSignal;
#[cfg(feature = "runtime-tokio")]
pub use self::signal::{deadline, Deadline};
pub use self::source::{from_stream, BoxedSource, Source, SourceExt, StreamSource, TryReceive};
pub use tributary_error::{Result, TributaryError};

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Tributary
//!
//! Promise-style combinators over any number of independent channels.
//!
//! | Combinator     | Emits                                   | Closes                          |
//! |----------------|-----------------------------------------|---------------------------------|
//! | [`all`]        | one `Vec<Option<T>>` in source order    | right after the emission        |
//! | [`race`]       | the first value any source produces     | after it, or when all close     |
//! | [`select`]     | every value as soon as it arrives       | once every source has closed    |
//! | [`select_until`] | every value until the signal fires    | on signal or once all close     |
//!
//! Each call validates its inputs, spawns one worker and returns an
//! [`Output`]. Sources of different element types can be combined by erasing
//! them with [`SourceExt::erase`], or passed dynamically through the `_dyn`
//! variants and the [`args!`] macro.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use tributary::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> tributary::Result<()> {
//!     let (tx_one, one) = tokio::sync::mpsc::unbounded_channel();
//!     let (tx_two, two) = tokio::sync::mpsc::unbounded_channel();
//!
//!     tokio::spawn(async move {
//!         tokio::time::sleep(Duration::from_millis(20)).await;
//!         let _ = tx_one.send(124);
//!     });
//!     tokio::spawn(async move {
//!         tokio::time::sleep(Duration::from_millis(10)).await;
//!         let _ = tx_two.send(10_000);
//!     });
//!
//!     let mut output = tributary::all(vec![one, two])?;
//!     assert_eq!(output.recv().await, Some(vec![Some(124), Some(10_000)]));
//!     assert_eq!(output.recv().await, None);
//!     Ok(())
//! }
//! ```

pub use tributary_core::{
    args, downcast, from_stream, into_sources, Arg, BoxedSource, CancelSignal, CancellationToken,
    Erased, ErasedSource, MultiplexExt, Policy, Source, SourceExt, StreamSource, Termination,
    TryReceive,
};
#[cfg(feature = "runtime-tokio")]
pub use tributary_core::{deadline, Deadline};
pub use tributary_error::{Result, TributaryError};
pub use tributary_exec::{
    all, all_dyn, race, race_dyn, select, select_dyn, select_until, select_until_dyn, ExecConfig,
    Output, Spawner,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use tributary_core::{
        args, downcast, CancellationToken, Erased, MultiplexExt, Source, SourceExt, TryReceive,
    };
    pub use tributary_error::{Result, TributaryError};
    pub use tributary_exec::{ExecConfig, Output, Spawner};
}

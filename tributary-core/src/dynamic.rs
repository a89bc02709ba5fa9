// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Positional arguments whose type is only checked at runtime.
//!
//! The typed API accepts anything implementing [`Source`](crate::Source) and
//! is checked by the compiler. The dynamic API takes a list of [`Arg`]s
//! instead, so a call site can hand over whatever values it holds, and
//! [`into_sources`] checks each one before any work is scheduled.
//!
//! An argument is accepted when it is
//!
//! - an [`ErasedSource`] (see [`SourceExt::erase`](crate::SourceExt::erase)),
//! - a [`BoxedSource<Erased>`],
//! - a futures `mpsc` receiver, unbounded receiver or `oneshot` receiver of [`Erased`],
//! - with `runtime-tokio`, a tokio `mpsc` receiver or unbounded receiver of [`Erased`].
//!
//! A typed receiver is not recognised as is; wrap it with [`Arg::source`] or
//! erase it first.
//!
//! ```
//! use tributary_core::{args, into_sources, SourceExt};
//! use futures::channel::mpsc;
//!
//! let (_tx, rx) = mpsc::unbounded::<u32>();
//! let err = into_sources(args![rx.erase(), 42_i32]).unwrap_err();
//!
//! assert_eq!(err.position(), Some(1));
//! assert_eq!(err.to_string(), "argument #1 is not a receivable source (found `i32`)");
//! ```

use crate::erased::{Erased, ErasedSource};
use crate::source::{BoxedSource, Source};
use core::any::{type_name, Any};
use core::fmt::{self, Debug};
use futures::channel::{mpsc, oneshot};
use tributary_error::{Result, TributaryError};

type Unchecked = Box<dyn Any + Send>;

/// A positional argument of unknown type, with its type name captured for diagnostics.
pub struct Arg {
    value: Unchecked,
    kind: &'static str,
}

impl Arg {
    pub fn new<V>(value: V) -> Self
    where
        V: Any + Send,
    {
        Self {
            value: Box::new(value),
            kind: type_name::<V>(),
        }
    }

    /// Wraps a typed source, erasing it on the spot so it is always accepted.
    ///
    /// ```
    /// use tributary_core::{into_sources, Arg};
    /// use futures::channel::mpsc;
    ///
    /// let (_tx, rx) = mpsc::unbounded::<u32>();
    /// let sources = into_sources(vec![Arg::source(rx)]).unwrap();
    /// assert!(sources[0].kind().contains("UnboundedReceiver<u32>"));
    /// ```
    pub fn source<S>(source: S) -> Self
    where
        S: Source + Send + 'static,
        S::Item: Any + Send,
    {
        let erased = ErasedSource::new(source);
        let kind = erased.kind();
        Self {
            value: Box::new(erased),
            kind,
        }
    }

    /// Type name of the wrapped value
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Checks that the argument is a receivable source.
    ///
    /// # Errors
    ///
    /// Returns [`TributaryError::NotASource`] naming `position` and the
    /// argument's type when it is not channel-like.
    pub fn into_source(self, position: usize) -> Result<ErasedSource> {
        let kind = self.kind;

        let value = match self.value.downcast::<ErasedSource>() {
            Ok(source) => return Ok(*source),
            Err(value) => value,
        };

        recognise::<BoxedSource<Erased>>(value, kind)
            .or_else(|value| recognise::<mpsc::Receiver<Erased>>(value, kind))
            .or_else(|value| recognise::<mpsc::UnboundedReceiver<Erased>>(value, kind))
            .or_else(|value| recognise::<oneshot::Receiver<Erased>>(value, kind))
            .or_else(|value| recognise_runtime(value, kind))
            .map_err(|_| TributaryError::not_a_source(position, kind))
    }
}

impl Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arg").field("kind", &self.kind).finish()
    }
}

fn recognise<S>(value: Unchecked, kind: &'static str) -> core::result::Result<ErasedSource, Unchecked>
where
    S: Source<Item = Erased> + Send + 'static,
{
    value
        .downcast::<S>()
        .map(|source| ErasedSource::from_erased(*source, kind))
}

#[cfg(feature = "runtime-tokio")]
fn recognise_runtime(
    value: Unchecked,
    kind: &'static str,
) -> core::result::Result<ErasedSource, Unchecked> {
    recognise::<tokio::sync::mpsc::Receiver<Erased>>(value, kind)
        .or_else(|value| recognise::<tokio::sync::mpsc::UnboundedReceiver<Erased>>(value, kind))
}

#[cfg(not(feature = "runtime-tokio"))]
fn recognise_runtime(
    value: Unchecked,
    _kind: &'static str,
) -> core::result::Result<ErasedSource, Unchecked> {
    Err(value)
}

/// Validates every argument, stopping at the first one that is not a source.
///
/// Positions are zero-based.
///
/// # Errors
///
/// Returns [`TributaryError::NotASource`] for the first offending argument.
pub fn into_sources(args: Vec<Arg>) -> Result<Vec<ErasedSource>> {
    args.into_iter()
        .enumerate()
        .map(|(position, arg)| arg.into_source(position))
        .collect()
}

/// Builds a `Vec<Arg>` from a list of values of any types.
///
/// ```
/// use tributary_core::args;
///
/// let list = args![1_u8, "two", 3.0_f64];
/// assert_eq!(list.len(), 3);
/// assert_eq!(list[1].kind(), "&str");
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {{
        let args: ::std::vec::Vec<$crate::dynamic::Arg> =
            ::std::vec![$($crate::dynamic::Arg::new($arg)),*];
        args
    }};
}

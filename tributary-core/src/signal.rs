// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ready-made cancellation signals for `select_until`.
//!
//! Any [`Source`] can serve as a signal. These cover the two common cases:
//! an explicit [`CancellationToken`] and, with `runtime-tokio`, a timer.

use crate::cancellation_token::CancellationToken;
use crate::source::{Source, TryReceive};
use core::task::{Context, Poll};
use event_listener::EventListener;

/// Yields `()` once its token is cancelled, then reports `Closed`.
#[derive(Debug)]
pub struct CancelSignal {
    token: CancellationToken,
    listener: Option<EventListener>,
    fired: bool,
}

impl CancelSignal {
    #[must_use]
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            listener: None,
            fired: false,
        }
    }

    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Source for CancelSignal {
    type Item = ();

    fn try_receive(&mut self, cx: &mut Context<'_>) -> TryReceive<()> {
        if self.fired {
            return TryReceive::Closed;
        }

        match self.token.poll_cancelled(&mut self.listener, cx) {
            Poll::Ready(()) => {
                self.fired = true;
                self.listener = None;
                TryReceive::Received(())
            }
            Poll::Pending => TryReceive::NotReady,
        }
    }
}

#[cfg(feature = "runtime-tokio")]
pub use self::timer::{deadline, Deadline};

#[cfg(feature = "runtime-tokio")]
mod timer {
    use crate::source::{Source, TryReceive};
    use core::fmt;
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll};
    use std::time::Duration;
    use tokio::time::{sleep_until, Instant, Sleep};

    /// Yields `()` once its instant has passed, then reports `Closed`.
    ///
    /// The timer itself is registered on first poll, so a `Deadline` can be
    /// built outside a runtime.
    pub struct Deadline {
        at: Instant,
        sleep: Option<Pin<Box<Sleep>>>,
        fired: bool,
    }

    impl Deadline {
        #[must_use]
        pub fn at(at: Instant) -> Self {
            Self {
                at,
                sleep: None,
                fired: false,
            }
        }

        #[must_use]
        pub fn after(duration: Duration) -> Self {
            Self::at(Instant::now() + duration)
        }

        #[must_use]
        pub const fn instant(&self) -> Instant {
            self.at
        }
    }

    impl fmt::Debug for Deadline {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("Deadline")
                .field("at", &self.at)
                .field("fired", &self.fired)
                .finish_non_exhaustive()
        }
    }

    impl Source for Deadline {
        type Item = ();

        fn try_receive(&mut self, cx: &mut Context<'_>) -> TryReceive<()> {
            if self.fired {
                return TryReceive::Closed;
            }

            let at = self.at;
            let sleep = self.sleep.get_or_insert_with(|| Box::pin(sleep_until(at)));
            match sleep.as_mut().poll(cx) {
                Poll::Ready(()) => {
                    self.fired = true;
                    self.sleep = None;
                    TryReceive::Received(())
                }
                Poll::Pending => TryReceive::NotReady,
            }
        }
    }

    /// A signal that fires once `duration` has elapsed from now.
    #[must_use]
    pub fn deadline(duration: Duration) -> Deadline {
        Deadline::after(duration)
    }
}

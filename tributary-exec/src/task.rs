// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Detached worker tasks with cooperative cancellation.

use core::future::Future;
use tributary_core::CancellationToken;
use tributary_error::Result;

/// Handle to a detached worker. Dropping it cancels the worker.
///
/// The worker receives a [`CancellationToken`] and is expected to stop at its
/// next suspension point once the token fires.
///
/// Runtime selection: `runtime-tokio` spawns on the ambient tokio runtime,
/// `runtime-smol` (without tokio) spawns on smol's global executor.
#[derive(Debug)]
pub struct WorkerTask {
    cancel: CancellationToken,
}

impl WorkerTask {
    /// # Errors
    ///
    /// Returns [`TributaryError::RuntimeUnavailable`](tributary_error::TributaryError::RuntimeUnavailable)
    /// when no runtime can accept the task. The future built by `f` is dropped
    /// in that case.
    pub fn spawn<F, Fut>(f: F) -> Result<Self>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let future = f(cancel.clone());
        spawn_detached(future)?;
        Ok(Self { cancel })
    }

    /// Signals the worker to stop without waiting for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for WorkerTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(feature = "runtime-tokio")]
fn spawn_detached<Fut>(future: Fut) -> Result<()>
where
    Fut: Future<Output = ()> + Send + 'static,
{
    use tributary_error::TributaryError;

    let handle = tokio::runtime::Handle::try_current().map_err(|_| {
        warn!("no tokio runtime entered, combinator not started");
        TributaryError::runtime_unavailable("tokio")
    })?;
    // The JoinHandle is dropped, which detaches the task
    drop(handle.spawn(future));
    Ok(())
}

#[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
fn spawn_detached<Fut>(future: Fut) -> Result<()>
where
    Fut: Future<Output = ()> + Send + 'static,
{
    smol::spawn(future).detach();
    Ok(())
}

#[cfg(not(any(feature = "runtime-tokio", feature = "runtime-smol")))]
fn spawn_detached<Fut>(future: Fut) -> Result<()>
where
    Fut: Future<Output = ()> + Send + 'static,
{
    drop(future);
    warn!("no runtime feature enabled, combinator not started");
    Err(tributary_error::TributaryError::runtime_unavailable(
        "async",
    ))
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Producers that run on their own tokio task.
//!
//! Each one owns the sending half and closes it by dropping it when done, so
//! the returned receiver observes values followed by a close. Must be called
//! from inside a tokio runtime.

use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::sleep;

/// Sends `value` after `delay`, then closes.
pub fn delayed<T>(value: T, delay: Duration) -> UnboundedReceiver<T>
where
    T: Send + 'static,
{
    timed(vec![value], delay)
}

/// Sends each value `interval` apart (the first after one `interval`), then closes.
pub fn timed<T>(values: Vec<T>, interval: Duration) -> UnboundedReceiver<T>
where
    T: Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        for value in values {
            sleep(interval).await;
            if tx.send(value).is_err() {
                return;
            }
        }
    });
    rx
}

/// Closes after `delay` without ever sending.
pub fn closes_after<T>(delay: Duration) -> UnboundedReceiver<T>
where
    T: Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<T>();
    tokio::spawn(async move {
        sleep(delay).await;
        drop(tx);
    });
    rx
}

/// A source that is already closed.
pub fn closed<T>() -> UnboundedReceiver<T> {
    let (_tx, rx) = mpsc::unbounded_channel();
    rx
}

/// A source that stays open and silent for as long as the returned sender lives.
pub fn silent<T>() -> (UnboundedSender<T>, UnboundedReceiver<T>) {
    mpsc::unbounded_channel()
}

/// Sends all `values` immediately, then closes.
pub fn ready<T>(values: Vec<T>) -> UnboundedReceiver<T> {
    let (tx, rx) = mpsc::unbounded_channel();
    for value in values {
        // The receiver is alive until this function returns it
        let _ = tx.send(value);
    }
    rx
}

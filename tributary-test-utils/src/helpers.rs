// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::{Stream, StreamExt};
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Upper bound for anything a test expects to happen "soon".
pub const PATIENCE: Duration = Duration::from_secs(5);

pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            panic!("Unexpected emission, expected no output: {item:?}");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

pub async fn expect_next_value<S, T>(stream: &mut S, expected: T)
where
    S: Stream<Item = T> + Unpin,
    T: Debug + PartialEq,
{
    let item = timeout(PATIENCE, stream.next())
        .await
        .expect("timed out waiting for the next item")
        .expect("expected next item");
    assert_eq!(item, expected);
}

/// Asserts that the stream ends without emitting anything else.
pub async fn expect_closed<S, T>(stream: &mut S)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    let item = timeout(PATIENCE, stream.next())
        .await
        .expect("timed out waiting for the stream to close");
    assert!(item.is_none(), "Expected the stream to be closed, got {item:?}");
}

/// Drains the stream until it ends.
pub async fn collect_until_closed<S, T>(stream: S) -> Vec<T>
where
    S: Stream<Item = T>,
{
    timeout(PATIENCE, stream.collect::<Vec<_>>())
        .await
        .expect("timed out waiting for the stream to close")
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::sleep;
use tributary::prelude::*;
use tributary_test_utils::fixtures::multiples_of_four;
use tributary_test_utils::helpers::collect_until_closed;
use tributary_test_utils::producer::timed;

#[tokio::test]
async fn test_done_channel_stops_selection_early() -> anyhow::Result<()> {
    // Arrange
    let (done_tx, done_rx) = unbounded_channel::<i32>();
    let producer = timed(multiples_of_four(30), Duration::from_millis(5));
    tokio::spawn(async move {
        sleep(Duration::from_millis(40)).await;
        let _ = done_tx.send(1);
    });

    // Act
    let output = tributary::select_until(done_rx, vec![producer])?;
    let values = collect_until_closed(output).await;

    // Assert
    assert!(!values.is_empty(), "some values arrive before the signal");
    assert!(values.len() < 30, "the signal cuts the selection short");
    assert_eq!(values, multiples_of_four(i64::try_from(values.len())?));
    Ok(())
}

#[tokio::test]
async fn test_token_and_dynamic_sources() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let (tx, rx) = unbounded_channel::<&'static str>();
    let mut output = tributary::select_until_dyn(token.signal(), args![rx.erase()])?;

    // Act
    tx.send("before")?;
    let first = output.recv().await;
    token.cancel();
    let after = output.recv().await;

    // Assert
    assert_eq!(first.and_then(|v| downcast::<&str>(v).ok()), Some("before"));
    assert!(after.is_none());
    Ok(())
}

#[tokio::test]
async fn test_deadline_bounds_a_silent_selection() -> anyhow::Result<()> {
    // Arrange
    let (_keep_open, rx) = unbounded_channel::<u8>();

    // Act
    let output = tributary::select_until(tributary::deadline(Duration::from_millis(20)), vec![rx])?;
    let values = collect_until_closed(output).await;

    // Assert
    assert!(values.is_empty());
    Ok(())
}

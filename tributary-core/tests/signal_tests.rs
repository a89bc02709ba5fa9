// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use tokio::time::{sleep, timeout};
use tributary_core::{deadline, CancellationToken, Deadline, SourceExt, TryReceive};

#[test]
fn test_cancel_signal_fires_once_then_closes() {
    // Arrange
    let token = CancellationToken::new();
    let mut signal = token.signal();

    // Act & Assert
    assert_eq!(signal.try_receive_now(), TryReceive::NotReady);
    token.cancel();
    assert_eq!(signal.try_receive_now(), TryReceive::Received(()));
    assert_eq!(signal.try_receive_now(), TryReceive::Closed);
}

#[test]
fn test_signal_from_cancelled_token_fires_immediately() {
    // Arrange
    let token = CancellationToken::new();
    token.cancel();

    // Act
    let mut signal = token.signal();

    // Assert
    assert_eq!(signal.try_receive_now(), TryReceive::Received(()));
    assert!(signal.token().is_cancelled());
}

#[test]
fn test_cancel_is_idempotent() {
    let token = CancellationToken::default();
    token.cancel();
    token.cancel();
    assert!(token.is_cancelled());
}

#[tokio::test]
async fn test_cancelled_future_resolves_when_another_task_cancels() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let remote = token.clone();

    // Act
    let canceller = tokio::spawn(async move {
        sleep(Duration::from_millis(10)).await;
        remote.cancel();
    });

    // Assert
    timeout(Duration::from_secs(5), token.cancelled()).await?;
    canceller.await?;
    assert!(token.is_cancelled());
    Ok(())
}

#[tokio::test]
async fn test_every_waiter_is_woken() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let waiters: Vec<_> = (0..4)
        .map(|_| {
            let token = token.clone();
            tokio::spawn(async move { token.cancelled().await })
        })
        .collect();

    // Act
    sleep(Duration::from_millis(5)).await;
    token.cancel();

    // Assert
    for waiter in waiters {
        timeout(Duration::from_secs(5), waiter).await??;
    }
    Ok(())
}

#[tokio::test]
async fn test_deadline_fires_after_duration() {
    // Arrange
    let mut signal = deadline(Duration::from_millis(20));

    // Act & Assert
    assert_eq!(signal.try_receive_now(), TryReceive::NotReady);
    sleep(Duration::from_millis(40)).await;
    assert_eq!(signal.try_receive_now(), TryReceive::Received(()));
    assert_eq!(signal.try_receive_now(), TryReceive::Closed);
}

#[tokio::test]
async fn test_deadline_in_the_past_fires_on_first_poll() {
    // Arrange
    let mut signal = Deadline::at(tokio::time::Instant::now());

    // Act
    sleep(Duration::from_millis(1)).await;

    // Assert
    assert_eq!(signal.try_receive_now(), TryReceive::Received(()));
}

#[test]
fn test_deadline_can_be_built_outside_a_runtime() {
    let signal = Deadline::after(Duration::from_secs(1));
    assert!(signal.instant() > tokio::time::Instant::now());
    assert!(format!("{signal:?}").starts_with("Deadline"));
}

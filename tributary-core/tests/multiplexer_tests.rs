// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::channel::mpsc;
use futures::stream::{FusedStream, Stream, StreamExt};
use futures::task::noop_waker_ref;
use std::task::{Context, Poll};
use std::marker::PhantomPinned;
use tributary_core::{Emission, MultiplexExt, Multiplexer, Policy, Termination};

fn poll_once<T>(multiplexer: &mut Multiplexer<T>) -> Poll<Option<Emission<T>>> {
    let mut cx = Context::from_waker(noop_waker_ref());
    multiplexer.poll_emission(&mut cx)
}

#[test]
fn test_collect_all_waits_for_every_source() -> anyhow::Result<()> {
    // Arrange
    let (tx_a, rx_a) = mpsc::unbounded::<u8>();
    let (tx_b, rx_b) = mpsc::unbounded::<u8>();
    let mut multiplexer = Multiplexer::collect_all(vec![rx_a, rx_b]);

    // Act & Assert
    assert_eq!(multiplexer.policy(), Policy::CollectAll);
    assert!(poll_once(&mut multiplexer).is_pending());

    tx_b.unbounded_send(2)?;
    assert!(poll_once(&mut multiplexer).is_pending());
    assert_eq!(multiplexer.remaining(), 1);

    tx_a.unbounded_send(1)?;
    assert_eq!(
        poll_once(&mut multiplexer),
        Poll::Ready(Some(Emission::Collected(vec![Some(1), Some(2)])))
    );
    assert_eq!(multiplexer.termination(), Some(Termination::AllFilled));
    assert_eq!(poll_once(&mut multiplexer), Poll::Ready(None));
    Ok(())
}

#[test]
fn test_collect_all_keeps_first_value_per_source() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = mpsc::unbounded::<u8>();
    tx.unbounded_send(10)?;
    tx.unbounded_send(20)?;
    let mut multiplexer = Multiplexer::collect_all(vec![rx]);

    // Act
    let emission = poll_once(&mut multiplexer);

    // Assert
    assert_eq!(
        emission,
        Poll::Ready(Some(Emission::Collected(vec![Some(10)])))
    );
    Ok(())
}

#[test]
fn test_collect_all_marks_closed_source_as_none() -> anyhow::Result<()> {
    // Arrange
    let (tx_a, rx_a) = mpsc::unbounded::<&str>();
    let (tx_b, rx_b) = mpsc::unbounded::<&str>();
    let mut multiplexer = Multiplexer::collect_all(vec![rx_a, rx_b]);

    // Act
    drop(tx_a);
    tx_b.unbounded_send("b")?;

    // Assert
    assert_eq!(
        poll_once(&mut multiplexer),
        Poll::Ready(Some(Emission::Collected(vec![None, Some("b")])))
    );
    Ok(())
}

#[test]
fn test_collect_all_with_no_sources_emits_empty_vec() {
    // Arrange
    let mut multiplexer = Multiplexer::<u8>::collect_all(Vec::<mpsc::UnboundedReceiver<u8>>::new());

    // Act & Assert
    assert!(multiplexer.is_empty());
    assert_eq!(
        poll_once(&mut multiplexer),
        Poll::Ready(Some(Emission::Collected(vec![])))
    );
    assert_eq!(poll_once(&mut multiplexer), Poll::Ready(None));
    assert!(multiplexer.is_terminated());
}

#[test]
fn test_first_wins_breaks_ties_by_position() -> anyhow::Result<()> {
    // Arrange
    let (tx_a, rx_a) = mpsc::unbounded::<char>();
    let (tx_b, rx_b) = mpsc::unbounded::<char>();
    let (_tx_c, rx_c) = mpsc::unbounded::<char>();
    let mut multiplexer = Multiplexer::first_wins(vec![rx_a, rx_b, rx_c]);

    // Act
    tx_b.unbounded_send('b')?;
    tx_a.unbounded_send('a')?;

    // Assert
    assert_eq!(
        poll_once(&mut multiplexer),
        Poll::Ready(Some(Emission::Value('a')))
    );
    assert_eq!(multiplexer.termination(), Some(Termination::FirstValue));
    assert_eq!(poll_once(&mut multiplexer), Poll::Ready(None));
    Ok(())
}

#[test]
fn test_first_wins_stops_polling_after_winner() -> anyhow::Result<()> {
    // Arrange
    let (tx_a, rx_a) = mpsc::unbounded::<u8>();
    let (tx_b, rx_b) = mpsc::unbounded::<u8>();
    let mut multiplexer = Multiplexer::first_wins(vec![rx_a, rx_b]);

    // Act
    tx_a.unbounded_send(1)?;
    let winner = poll_once(&mut multiplexer);

    // Assert
    assert_eq!(winner, Poll::Ready(Some(Emission::Value(1))));
    assert!(
        tx_b.unbounded_send(2).is_err(),
        "losing sources are released once the race is decided"
    );
    Ok(())
}

#[test]
fn test_first_wins_all_closed_emits_nothing() {
    // Arrange
    let (tx_a, rx_a) = mpsc::unbounded::<u8>();
    let (tx_b, rx_b) = mpsc::unbounded::<u8>();
    let mut multiplexer = Multiplexer::first_wins(vec![rx_a, rx_b]);

    // Act
    drop(tx_a);
    assert!(poll_once(&mut multiplexer).is_pending());
    drop(tx_b);

    // Assert
    assert_eq!(poll_once(&mut multiplexer), Poll::Ready(None));
    assert_eq!(multiplexer.termination(), Some(Termination::AllClosed));
}

#[test]
fn test_forward_all_resumes_interrupted_sweep() -> anyhow::Result<()> {
    // Arrange
    let (tx_a, rx_a) = mpsc::unbounded::<u32>();
    let (tx_b, rx_b) = mpsc::unbounded::<u32>();
    for i in 0..3 {
        tx_a.unbounded_send(i)?;
    }
    tx_b.unbounded_send(100)?;
    let mut multiplexer = Multiplexer::forward_all(vec![rx_a, rx_b]);

    // Act
    let first = poll_once(&mut multiplexer);
    let second = poll_once(&mut multiplexer);
    let third = poll_once(&mut multiplexer);

    // Assert
    assert_eq!(first, Poll::Ready(Some(Emission::Value(0))));
    assert_eq!(
        second,
        Poll::Ready(Some(Emission::Value(100))),
        "position 1 is checked before position 0 is retried"
    );
    assert_eq!(third, Poll::Ready(Some(Emission::Value(1))));
    Ok(())
}

#[test]
fn test_forward_all_terminates_only_when_every_source_closed() -> anyhow::Result<()> {
    // Arrange
    let (tx_a, rx_a) = mpsc::unbounded::<u32>();
    let (tx_b, rx_b) = mpsc::unbounded::<u32>();
    let mut multiplexer = Multiplexer::forward_all(vec![rx_a, rx_b]);

    // Act & Assert
    tx_a.unbounded_send(1)?;
    drop(tx_a);
    assert_eq!(
        poll_once(&mut multiplexer),
        Poll::Ready(Some(Emission::Value(1)))
    );
    assert!(poll_once(&mut multiplexer).is_pending());
    assert_eq!(multiplexer.remaining(), 1);

    tx_b.unbounded_send(2)?;
    drop(tx_b);
    assert_eq!(
        poll_once(&mut multiplexer),
        Poll::Ready(Some(Emission::Value(2)))
    );
    assert_eq!(poll_once(&mut multiplexer), Poll::Ready(None));
    assert_eq!(multiplexer.termination(), Some(Termination::AllClosed));
    Ok(())
}

#[test]
fn test_forward_until_signal_discards_pending_values() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = mpsc::unbounded::<u32>();
    let (signal_tx, signal_rx) = mpsc::unbounded::<i32>();
    let mut multiplexer = Multiplexer::forward_until(signal_rx, vec![rx]);

    // Act & Assert
    tx.unbounded_send(1)?;
    assert_eq!(
        poll_once(&mut multiplexer),
        Poll::Ready(Some(Emission::Value(1)))
    );

    tx.unbounded_send(2)?;
    signal_tx.unbounded_send(1)?;
    assert_eq!(poll_once(&mut multiplexer), Poll::Ready(None));
    assert_eq!(multiplexer.termination(), Some(Termination::Cancelled));
    assert!(tx.unbounded_send(3).is_err(), "sources are dropped on cancel");
    Ok(())
}

#[test]
fn test_forward_until_closed_signal_cancels() {
    // Arrange
    let (_tx, rx) = mpsc::unbounded::<u32>();
    let (signal_tx, signal_rx) = mpsc::unbounded::<()>();
    let mut multiplexer = Multiplexer::forward_until(signal_rx, vec![rx]);

    // Act
    assert!(poll_once(&mut multiplexer).is_pending());
    drop(signal_tx);

    // Assert
    assert_eq!(poll_once(&mut multiplexer), Poll::Ready(None));
    assert_eq!(multiplexer.termination(), Some(Termination::Cancelled));
}

#[test]
fn test_sweeps_are_counted() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = mpsc::unbounded::<u8>();
    let mut multiplexer = Multiplexer::forward_all(vec![rx]);

    // Act
    assert!(poll_once(&mut multiplexer).is_pending());
    tx.unbounded_send(1)?;
    drop(tx);
    let _ = poll_once(&mut multiplexer);
    let _ = poll_once(&mut multiplexer);

    // Assert
    assert!(multiplexer.sweeps() >= 2);
    Ok(())
}

#[tokio::test]
async fn test_multiplexer_wakes_when_a_source_becomes_ready() -> anyhow::Result<()> {
    // Arrange
    let (tx_a, rx_a) = mpsc::unbounded::<u32>();
    let (tx_b, rx_b) = mpsc::unbounded::<u32>();
    let multiplexer = Multiplexer::forward_all(vec![rx_a, rx_b]);

    // Act
    let producer = tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        tx_b.unbounded_send(5).expect("multiplexer alive");
        drop(tx_b);
        drop(tx_a);
    });
    let emissions: Vec<_> = multiplexer.collect().await;
    producer.await?;

    // Assert
    assert_eq!(emissions, vec![Emission::Value(5)]);
    Ok(())
}

#[test]
fn test_size_hint_by_policy() {
    let (_tx, rx) = mpsc::unbounded::<u8>();
    assert_eq!(
        Multiplexer::collect_all(vec![rx]).size_hint(),
        (1, Some(1))
    );

    let (_tx, rx) = mpsc::unbounded::<u8>();
    assert_eq!(Multiplexer::first_wins(vec![rx]).size_hint(), (0, Some(1)));

    let (_tx, rx) = mpsc::unbounded::<u8>();
    assert_eq!(Multiplexer::forward_all(vec![rx]).size_hint(), (0, None));
}

#[test]
fn test_policy_names_match_combinators() {
    assert_eq!(Policy::CollectAll.to_string(), "all");
    assert_eq!(Policy::FirstWins.to_string(), "race");
    assert_eq!(Policy::ForwardAll.to_string(), "select");
    assert_eq!(Policy::ForwardUntil.to_string(), "select_until");
    assert!(Policy::ForwardUntil.is_cancellable());
    assert!(!Policy::ForwardAll.is_cancellable());
    assert!(Policy::ForwardAll.is_forwarding());
    assert!(!Policy::FirstWins.is_forwarding());
}

fn assert_unpin<T: Unpin>() {}

#[test]
fn test_engine_is_unpin_for_any_item_type() {
    assert_unpin::<Multiplexer<PhantomPinned>>();
    assert_unpin::<tributary_core::Select<PhantomPinned>>();
    assert_unpin::<tributary_core::All<PhantomPinned>>();
}

#[test]
fn test_combinator_hands_back_its_engine() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = mpsc::unbounded::<u8>();
    tx.unbounded_send(3)?;
    let select = vec![rx].select();

    // Act
    let mut multiplexer = select.into_multiplexer();

    // Assert
    assert_eq!(multiplexer.policy(), Policy::ForwardAll);
    assert_eq!(
        poll_once(&mut multiplexer),
        Poll::Ready(Some(Emission::Value(3)))
    );
    Ok(())
}

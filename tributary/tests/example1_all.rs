// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use tributary::prelude::*;
use tributary_test_utils::producer::delayed;

#[tokio::test]
async fn test_all_collects_heterogeneous_values_in_argument_order() -> anyhow::Result<()> {
    // Arrange
    let number = delayed(124_i32, Duration::from_millis(30)).erase();
    let flag = delayed(true, Duration::from_millis(20)).erase();
    let text = delayed("my string", Duration::from_millis(10)).erase();

    // Act
    let mut output = tributary::all_dyn(args![number, flag, text])?;
    let values = output.recv().await.expect("all emits once");

    // Assert
    let [number, flag, text]: [Option<Erased>; 3] = values
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected three slots"))?;
    assert_eq!(number.and_then(|v| downcast::<i32>(v).ok()), Some(124));
    assert_eq!(flag.and_then(|v| downcast::<bool>(v).ok()), Some(true));
    assert_eq!(
        text.and_then(|v| downcast::<&str>(v).ok()),
        Some("my string")
    );
    assert!(output.recv().await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_all_with_typed_sources_needs_no_downcast() -> anyhow::Result<()> {
    // Arrange
    let sources = vec![
        delayed(3_u64, Duration::from_millis(15)),
        delayed(2_u64, Duration::from_millis(10)),
        delayed(1_u64, Duration::from_millis(5)),
    ];

    // Act
    let mut output = tributary::all(sources)?;

    // Assert
    assert_eq!(output.recv().await, Some(vec![Some(3), Some(2), Some(1)]));
    assert_eq!(output.recv().await, None);
    Ok(())
}

#[tokio::test]
async fn test_all_rejects_a_value_that_is_not_a_channel() {
    // Arrange
    let text = delayed("fine", Duration::from_millis(5)).erase();

    // Act
    let err = tributary::all_dyn(args![text, 7_i32]).unwrap_err();

    // Assert
    assert_eq!(
        err.to_string(),
        "argument #1 is not a receivable source (found `i32`)"
    );
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::{Stream, StreamExt};
use ripple_error::{Result, SubjectError};
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::{sleep, timeout};

const STEP_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected element emitted, expected no output.");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

pub async fn expect_next_value<S, T>(stream: &mut S, expected: T)
where
    S: Stream<Item = Result<T>> + Unpin,
    T: PartialEq + Debug,
{
    let item = timeout(STEP_TIMEOUT, stream.next())
        .await
        .expect("timed out waiting for the next item")
        .expect("expected next item, stream ended");
    assert_eq!(item.expect("expected an item, got an error"), expected);
}

pub async fn expect_completed<S, T>(stream: &mut S)
where
    S: Stream<Item = Result<T>> + Unpin,
    T: Debug,
{
    let item = timeout(STEP_TIMEOUT, stream.next())
        .await
        .expect("timed out waiting for completion");
    assert!(item.is_none(), "expected completion, got {item:?}");
}

pub async fn expect_failure<S, T>(stream: &mut S) -> SubjectError
where
    S: Stream<Item = Result<T>> + Unpin,
    T: Debug,
{
    match timeout(STEP_TIMEOUT, stream.next())
        .await
        .expect("timed out waiting for failure")
    {
        Some(Err(error)) => error,
        other => panic!("expected a failure, got {other:?}"),
    }
}

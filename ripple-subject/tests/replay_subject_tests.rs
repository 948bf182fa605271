// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ripple_subject::{ReplayLimits, ReplaySubject, Subject, SubjectConfig, SubjectError, SubjectExt};
use ripple_test_utils::{expect_completed, expect_failure, expect_next_value, ManualClock};
use std::time::Duration;
use tokio::time::sleep;

fn replay_with_clock<T: Clone + Send + 'static>(
    limits: ReplayLimits,
    clock: &ManualClock,
) -> ReplaySubject<T> {
    ReplaySubject::with_config(limits, SubjectConfig::default().with_clock(clock.clone()))
}

#[tokio::test]
async fn test_size_bound_keeps_newest_items() -> anyhow::Result<()> {
    let subject = ReplaySubject::with_max_size(2);
    for i in 0..5 {
        subject.emit(i).await;
    }
    subject.complete().await;

    assert_eq!(subject.to_vec().await?, vec![3, 4]);
    Ok(())
}

#[tokio::test]
async fn test_unbounded_replays_everything_to_every_collector() -> anyhow::Result<()> {
    let subject = ReplaySubject::unbounded();
    for i in 0..100 {
        subject.emit(i).await;
    }
    subject.complete().await;

    let expected: Vec<i32> = (0..100).collect();
    assert_eq!(subject.to_vec().await?, expected);
    assert_eq!(subject.to_vec().await?, expected);
    assert_eq!(subject.history_len(), 100);
    Ok(())
}

#[tokio::test]
async fn test_time_bound_prunes_stale_items() -> anyhow::Result<()> {
    let subject = ReplaySubject::with_limits(10, Duration::from_millis(100));
    subject.emit(0).await;
    subject.emit(1).await;
    subject.emit(2).await;

    sleep(Duration::from_millis(300)).await;

    subject.emit(3).await;
    subject.emit(4).await;
    subject.complete().await;

    assert_eq!(subject.to_vec().await?, vec![3, 4]);
    Ok(())
}

#[tokio::test]
async fn test_time_bound_with_manual_clock() -> anyhow::Result<()> {
    let clock = ManualClock::new();
    let subject = replay_with_clock(
        ReplayLimits::size_and_age(10, Duration::from_millis(100)),
        &clock,
    );

    for i in 0..3 {
        subject.emit(i).await;
    }
    clock.advance(Duration::from_millis(300));
    subject.emit(3).await;
    subject.emit(4).await;
    subject.complete().await;

    assert_eq!(subject.to_vec().await?, vec![3, 4]);
    Ok(())
}

#[tokio::test]
async fn test_items_expire_at_exactly_max_age() -> anyhow::Result<()> {
    let clock = ManualClock::new();
    let subject = replay_with_clock(ReplayLimits::age(Duration::from_millis(100)), &clock);

    subject.emit("a").await;
    clock.advance(Duration::from_millis(99));
    subject.emit("b").await;
    subject.complete().await;

    assert_eq!(subject.to_vec().await?, vec!["a", "b"]);

    clock.advance(Duration::from_millis(1));
    assert_eq!(subject.to_vec().await?, vec!["b"]);

    clock.advance(Duration::from_millis(99));
    assert!(subject.to_vec().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_replay_then_live_items() -> anyhow::Result<()> {
    let subject = ReplaySubject::unbounded();
    subject.emit(1).await;
    subject.emit(2).await;

    let mut stream = Box::pin(subject.collector()?.into_stream());
    subject.emit(3).await;
    subject.complete().await;

    expect_next_value(&mut stream, 1).await;
    expect_next_value(&mut stream, 2).await;
    expect_next_value(&mut stream, 3).await;
    expect_completed(&mut stream).await;
    Ok(())
}

#[tokio::test]
async fn test_history_replayed_before_stored_error() -> anyhow::Result<()> {
    let subject = ReplaySubject::with_max_size(3);
    for i in 0..4 {
        subject.emit(i).await;
    }
    subject.emit_error(SubjectError::stream_error("halted")).await;

    let mut stream = Box::pin(subject.collector()?.into_stream());
    expect_next_value(&mut stream, 1).await;
    expect_next_value(&mut stream, 2).await;
    expect_next_value(&mut stream, 3).await;
    assert!(matches!(
        expect_failure(&mut stream).await,
        SubjectError::Stream { .. }
    ));
    Ok(())
}

// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ripple_subject::{MulticastSubject, Subject, SubjectError, SubjectExt};
use std::time::Duration;
use tokio::spawn;
use tokio::time::{sleep, timeout};

#[tokio::test]
async fn test_first_emit_waits_for_expected_collectors() -> anyhow::Result<()> {
    let subject = MulticastSubject::<i32>::new(2);

    let producer = spawn({
        let subject = subject.clone();
        async move {
            subject.emit(1).await;
            subject.complete().await;
        }
    });

    let mut first = subject.collector()?;
    sleep(Duration::from_millis(30)).await;
    assert!(!producer.is_finished());

    let mut second = subject.collector()?;
    producer.await?;

    for collector in [&mut first, &mut second] {
        assert_eq!(collector.next().await.transpose()?, Some(1));
        assert!(collector.next().await.is_none());
    }
    Ok(())
}

#[tokio::test]
async fn test_expected_count_is_at_least_one() {
    let subject = MulticastSubject::<u8>::new(0);
    assert_eq!(subject.expected_collectors(), 1);
}

#[tokio::test]
async fn test_gate_opens_only_once() -> anyhow::Result<()> {
    let subject = MulticastSubject::new(1);
    let collector = subject.collector()?;
    subject.emit(1).await;
    drop(collector);

    // No collector attached anymore: the item is dropped, emit does not wait.
    timeout(Duration::from_secs(1), subject.emit(2)).await?;
    assert_eq!(subject.collector_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_terminal_signal_does_not_wait_for_collectors() -> anyhow::Result<()> {
    let subject = MulticastSubject::<i32>::new(3);
    timeout(
        Duration::from_secs(1),
        subject.emit_error(SubjectError::stream_error("aborted")),
    )
    .await?;

    assert!(subject.is_terminated());
    assert!(matches!(
        subject.to_vec().await,
        Err(SubjectError::Stream { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_every_collector_sees_every_item() -> anyhow::Result<()> {
    let subject = MulticastSubject::<usize>::new(3);

    let collectors: Vec<_> = (0..3)
        .map(|_| {
            let subject = subject.clone();
            spawn(async move { subject.to_vec().await })
        })
        .collect();

    for i in 0..50 {
        subject.emit(i).await;
    }
    subject.complete().await;

    for collector in collectors {
        assert_eq!(collector.await??, (0..50).collect::<Vec<_>>());
    }
    Ok(())
}

#[tokio::test]
async fn test_collector_that_left_still_counts_toward_expected() -> anyhow::Result<()> {
    let subject = MulticastSubject::<i32>::new(2);

    drop(subject.collector()?);
    assert_eq!(subject.remaining_collectors(), 1);

    let mut late = subject.collector()?;
    assert_eq!(subject.remaining_collectors(), 0);

    timeout(Duration::from_millis(500), subject.emit(1)).await?;
    subject.complete().await;

    assert_eq!(late.next().await.transpose()?, Some(1));
    assert!(late.next().await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_collectors_of_terminated_subject_do_not_open_the_gate() -> anyhow::Result<()> {
    let subject = MulticastSubject::<i32>::new(1);
    subject.complete().await;

    let collector = subject.collector()?;
    assert_eq!(subject.remaining_collectors(), 1);
    assert_eq!(subject.collector_count(), 0);
    drop(collector);
    Ok(())
}

#[tokio::test]
async fn test_termination_releases_waiting_producer() -> anyhow::Result<()> {
    let subject = MulticastSubject::<i32>::new(2);

    let producer = spawn({
        let subject = subject.clone();
        async move { subject.emit(1).await }
    });
    sleep(Duration::from_millis(20)).await;
    assert!(!producer.is_finished());

    subject.complete().await;
    timeout(Duration::from_secs(1), producer).await??;
    Ok(())
}

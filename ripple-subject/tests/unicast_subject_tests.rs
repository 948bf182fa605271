// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ripple_subject::{Subject, SubjectConfig, SubjectError, SubjectExt, UnicastSubject};
use ripple_test_utils::{expect_failure, expect_next_value};
use std::time::Duration;
use tokio::spawn;
use tokio::time::sleep;

#[tokio::test]
async fn test_buffers_until_collected_then_refuses_second_collect() -> anyhow::Result<()> {
    let subject = UnicastSubject::new();
    for i in 0..5 {
        subject.emit(i).await;
    }
    subject.complete().await;
    assert_eq!(subject.buffered(), 5);

    assert_eq!(subject.to_vec().await?, vec![0, 1, 2, 3, 4]);
    assert!(subject.is_consumed());

    let second = subject.to_vec().await;
    assert!(matches!(second, Err(SubjectError::InvalidState { .. })));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_second_collector_is_refused() -> anyhow::Result<()> {
    let subject = UnicastSubject::<u8>::new();
    let first = subject.collector()?;
    assert_eq!(subject.collector_count(), 1);
    assert!(!subject.is_consumed());

    let refused = subject.collector();
    assert!(matches!(refused, Err(ref e) if e.is_protocol_violation()));
    assert_eq!(subject.collector_count(), 1);

    drop(first);
    assert!(subject.is_consumed());
    assert!(subject.collector().is_err());
    Ok(())
}

#[tokio::test]
async fn test_items_emitted_after_error_are_delivered_before_it() -> anyhow::Result<()> {
    let subject = UnicastSubject::new();
    for i in 0..5 {
        subject.emit(i).await;
    }
    subject.emit_error(SubjectError::stream_error("broken")).await;
    subject.emit(6).await;
    assert!(subject.is_terminated());

    let mut stream = Box::pin(subject.collector()?.into_stream());
    for expected in [0, 1, 2, 3, 4, 6] {
        expect_next_value(&mut stream, expected).await;
    }
    let error = expect_failure(&mut stream).await;
    assert_eq!(error.to_string(), "Stream error: broken");
    Ok(())
}

#[tokio::test]
async fn test_full_buffer_suspends_producer_until_collected() -> anyhow::Result<()> {
    let subject = UnicastSubject::with_config(SubjectConfig::default().with_capacity(4));

    let producer = spawn({
        let subject = subject.clone();
        async move {
            for i in 0..10 {
                subject.emit(i).await;
            }
            subject.complete().await;
        }
    });

    sleep(Duration::from_millis(30)).await;
    assert!(!producer.is_finished());
    assert_eq!(subject.buffered(), 4);

    assert_eq!(subject.to_vec().await?, (0..10).collect::<Vec<_>>());
    producer.await?;
    Ok(())
}

#[tokio::test]
async fn test_live_items_reach_attached_collector() -> anyhow::Result<()> {
    let subject = UnicastSubject::<String>::new();

    let collector = spawn({
        let subject = subject.clone();
        async move { subject.to_vec().await }
    });
    subject.await_collector().await;

    subject.emit("x".to_string()).await;
    subject.emit("y".to_string()).await;
    subject.complete().await;

    assert_eq!(collector.await??, vec!["x".to_string(), "y".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_cancelling_callback_consumes_the_subject() -> anyhow::Result<()> {
    let subject = UnicastSubject::new();
    for i in 0..5 {
        subject.emit(i).await;
    }

    subject
        .collect(|value| async move {
            if value == 1 {
                Err(SubjectError::Cancelled)
            } else {
                Ok(())
            }
        })
        .await?;

    assert!(subject.is_consumed());
    assert!(subject.collector().is_err());
    Ok(())
}

#[tokio::test]
async fn test_dropped_subject_completes_its_collector() -> anyhow::Result<()> {
    let subject = UnicastSubject::new();
    subject.emit(1).await;
    let mut collector = subject.collector()?;
    drop(subject);

    assert_eq!(collector.next().await.transpose()?, Some(1));
    assert!(collector.next().await.is_none());
    assert!(collector.next().await.is_none());
    Ok(())
}

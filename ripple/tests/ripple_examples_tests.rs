// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use ripple::prelude::*;
use ripple::ReplayLimits;
use ripple_test_utils::{ManualClock, TestError};
use std::sync::Arc;
use std::time::Duration;
use tokio::spawn;
use tokio::time::sleep;

/// A sensor feed: dashboards attach at any time and start from the latest reading.
#[tokio::test]
async fn test_sensor_dashboard_example() -> anyhow::Result<()> {
    let readings = BehaviorSubject::with_value(20.0_f64);

    let dashboard = spawn({
        let readings = readings.clone();
        async move {
            let shown = Arc::new(Mutex::new(Vec::new()));
            let sink = shown.clone();
            readings
                .collect(move |celsius| {
                    let sink = sink.clone();
                    async move {
                        sink.lock().push(celsius);
                        Ok::<(), SubjectError>(())
                    }
                })
                .await?;
            let shown = shown.lock().clone();
            Ok::<Vec<f64>, SubjectError>(shown)
        }
    });

    readings.await_collector().await;
    readings.emit(21.5).await;
    readings.emit(22.0).await;
    readings.complete().await;

    assert_eq!(dashboard.await??, vec![20.0, 21.5, 22.0]);
    assert_eq!(readings.value()?, 22.0);
    Ok(())
}

/// An audit trail that only shows what happened in the last minute.
#[tokio::test]
async fn test_recent_events_example() -> anyhow::Result<()> {
    let clock = ManualClock::new();
    let events = ReplaySubject::with_config(
        ReplayLimits::age(Duration::from_secs(60)),
        SubjectConfig::default().with_clock(clock.clone()),
    );

    events.emit("login").await;
    clock.advance(Duration::from_secs(45));
    events.emit("upload").await;
    clock.advance(Duration::from_secs(30));
    events.emit("logout").await;
    events.complete().await;

    assert_eq!(events.to_vec().await?, vec!["upload", "logout"]);
    Ok(())
}

/// A job queue drained by workers that come and go.
#[tokio::test]
async fn test_work_queue_example() -> anyhow::Result<()> {
    let jobs = UnicastWorkSubject::with_config(SubjectConfig::default().with_capacity(8));

    let producer = spawn({
        let jobs = jobs.clone();
        async move {
            for job in 0..20_u32 {
                jobs.emit(job).await;
            }
            jobs.complete().await;
        }
    });

    let mut done = Vec::new();
    loop {
        let mut worker = jobs.collector()?;
        let mut handled = 0;
        let mut finished = true;
        while let Some(job) = worker.next().await {
            done.push(job?);
            handled += 1;
            if handled == 7 {
                finished = false;
                break;
            }
        }
        drop(worker);
        if finished {
            break;
        }
        sleep(Duration::from_millis(1)).await;
    }
    producer.await?;

    assert_eq!(done, (0..20).collect::<Vec<_>>());
    Ok(())
}

/// A producer failure reaches the consumer as a wrapped user error.
#[tokio::test]
async fn test_producer_failure_example() -> anyhow::Result<()> {
    let uploads = UnicastSubject::<u64>::new();
    uploads.emit(512).await;
    uploads
        .emit_error(SubjectError::user_error(TestError::producer("connection reset")))
        .await;

    let error = uploads.to_vec().await.unwrap_err();
    assert!(matches!(error, SubjectError::User(_)));
    assert_eq!(error.to_string(), "User error: producer failed: connection reset");
    Ok(())
}

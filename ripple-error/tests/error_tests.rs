// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ripple_error::{IntoSubjectError, Result, SubjectError};
use std::error::Error;
use std::io;

#[test]
fn test_error_display() {
    let err = SubjectError::stream_error("boom");
    assert_eq!(err.to_string(), "Stream error: boom");

    let err = SubjectError::invalid_state("already collected");
    assert_eq!(err.to_string(), "Invalid state: already collected");

    assert_eq!(SubjectError::Cancelled.to_string(), "Collector cancelled");
}

#[test]
fn test_user_error_keeps_source() {
    let err = io::Error::other("disk on fire").into_subject_error();

    assert!(matches!(err, SubjectError::User(_)));
    assert_eq!(err.to_string(), "User error: disk on fire");
    assert!(err.source().is_some());
}

#[test]
fn test_clone_shares_user_error() {
    let err = SubjectError::user_error(io::Error::other("shared"));
    let cloned = err.clone();

    match (&err, &cloned) {
        (SubjectError::User(a), SubjectError::User(b)) => {
            assert!(std::sync::Arc::ptr_eq(a, b));
        }
        _ => panic!("expected user errors"),
    }
}

#[test]
fn test_classification() {
    assert!(SubjectError::Cancelled.is_cancellation());
    assert!(!SubjectError::stream_error("x").is_cancellation());

    assert!(SubjectError::invalid_state("x").is_protocol_violation());
    assert!(!SubjectError::Cancelled.is_protocol_violation());
}

#[test]
fn test_result_alias_with_question_mark() {
    fn inner() -> Result<()> {
        Err(SubjectError::stream_error("inner"))
    }

    fn outer() -> Result<u8> {
        inner()?;
        Ok(1)
    }

    assert!(matches!(outer(), Err(SubjectError::Stream { .. })));
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SubjectError>();
}

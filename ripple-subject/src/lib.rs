// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Hot-stream subjects with per-collector backpressure.
//!
//! | Subject | Collectors | Late collectors receive |
//! |---|---|---|
//! | [`PublishSubject`] | many | live items only |
//! | [`MulticastSubject`] | many, first emit waits for N | live items only |
//! | [`BehaviorSubject`] | many | the latest item, then live items |
//! | [`ReplaySubject`] | many | bounded history, then live items |
//! | [`UnicastSubject`] | one, ever | everything buffered since creation |
//! | [`UnicastWorkSubject`] | one at a time | everything not yet taken |
//!
//! Every subject implements [`Subject`]; [`SubjectExt`] adds `collect` and `to_vec`.

mod broadcast;
pub mod behavior_subject;
pub mod collector;
pub mod config;
pub mod history;
mod logging;
pub mod multicast_subject;
pub mod publish_subject;
pub mod replay_subject;
pub mod subject;
mod unicast;
pub mod unicast_subject;
pub mod unicast_work_subject;

pub use self::behavior_subject::BehaviorSubject;
pub use self::collector::Collector;
pub use self::config::{ReplayLimits, SubjectConfig, DEFAULT_CAPACITY};
pub use self::history::{HistoryPolicy, LatestValue, NoHistory, ReplayBuffer};
pub use self::multicast_subject::MulticastSubject;
pub use self::publish_subject::PublishSubject;
pub use self::replay_subject::ReplaySubject;
pub use self::subject::{Subject, SubjectExt};
pub use self::unicast_subject::UnicastSubject;
pub use self::unicast_work_subject::UnicastWorkSubject;
pub use ripple_core::{CancellationToken, Clock, CollectorId, SystemClock, TerminalSignal};
pub use ripple_error::{IntoSubjectError, Result, SubjectError};

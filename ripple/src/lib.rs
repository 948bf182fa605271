// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Ripple
//!
//! Hot-stream subjects for async Rust, with bounded per-collector buffers.
//!
//! ## Overview
//!
//! A subject is both the producer side of a stream (`emit`, `complete`,
//! `emit_error`) and a source of collectors. Producers run independently of
//! consumers; a consumer that falls behind fills its own bounded buffer and
//! then suspends the producer, never another consumer.
//!
//! - [`PublishSubject`]: live items only.
//! - [`MulticastSubject`]: like publish, but the first emit waits for N collectors.
//! - [`BehaviorSubject`]: late collectors start from the latest item.
//! - [`ReplaySubject`]: late collectors replay a size and/or age bounded history.
//! - [`UnicastSubject`]: a single collector, ever; items are buffered until it arrives.
//! - [`UnicastWorkSubject`]: one collector at a time, each resuming where the last stopped.
//!
//! ## Quick Start
//!
//! ```rust
//! use ripple::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> ripple::Result<()> {
//!     let subject = ReplaySubject::with_max_size(2);
//!     for i in 0..5 {
//!         subject.emit(i).await;
//!     }
//!     subject.complete().await;
//!
//!     assert_eq!(subject.to_vec().await?, vec![3, 4]);
//!     Ok(())
//! }
//! ```

// Re-export the primitives
pub use ripple_core::{
    bounded_ring, resumable_channel, CancellationToken, ChannelReceiver, ChannelSender, Clock,
    CollectorGate, CollectorId, RingConsumer, RingProducer, SystemClock, TerminalSignal, TryRecv,
};

// Re-export the subjects
pub use ripple_subject::{
    BehaviorSubject, Collector, MulticastSubject, PublishSubject, ReplayLimits, ReplaySubject,
    Subject, SubjectConfig, SubjectExt, UnicastSubject, UnicastWorkSubject, DEFAULT_CAPACITY,
};

pub use ripple_error::{IntoSubjectError, Result, SubjectError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use ripple_core::CancellationToken;
    pub use ripple_error::SubjectError;
    pub use ripple_subject::{
        BehaviorSubject, MulticastSubject, PublishSubject, ReplaySubject, Subject, SubjectConfig,
        SubjectExt, UnicastSubject, UnicastWorkSubject,
    };
}

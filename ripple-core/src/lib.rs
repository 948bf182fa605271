// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Backpressure primitives underneath Ripple subjects.
//!
//! - [`bounded_ring`]: lock-free single-producer/single-consumer array queue.
//! - [`resumable_channel`]: a ring plus suspension on full/empty and a terminal slot.
//! - [`CollectorGate`]: attach/detach bookkeeping with an awaitable collector count.
//! - [`CancellationToken`]: runtime-agnostic cooperative cancellation signal.
//! - [`Clock`]: time source for timestamped history.

pub mod bounded_ring;
pub mod cancellation_token;
pub mod clock;
pub mod collector_gate;
mod logging;
pub mod resumable_channel;
pub mod terminal_signal;

pub use self::bounded_ring::{bounded_ring, RingConsumer, RingProducer};
pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::clock::{Clock, SystemClock};
pub use self::collector_gate::{CollectorGate, CollectorHandle, CollectorId};
pub use self::resumable_channel::{resumable_channel, ChannelReceiver, ChannelSender, TryRecv};
pub use self::terminal_signal::TerminalSignal;
pub use ripple_error::{IntoSubjectError, Result, SubjectError};

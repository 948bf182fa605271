// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Single-collector subject that buffers items until it is collected.
//!
//! Items emitted before the collector attaches are kept (up to the configured
//! capacity, after which `emit` suspends). Only one collector may ever attach;
//! a second attempt fails with `SubjectError::InvalidState`, even after the
//! first collector has gone away.
//!
//! Items emitted after the terminal signal are still delivered, ahead of it.
//!
//! ```
//! use ripple_subject::{Subject, SubjectExt, UnicastSubject};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = UnicastSubject::new();
//! subject.emit("a").await;
//! subject.emit("b").await;
//! subject.complete().await;
//!
//! assert_eq!(subject.to_vec().await.unwrap(), vec!["a", "b"]);
//! assert!(subject.to_vec().await.is_err());
//! # }
//! ```

use crate::unicast::{Admission, UnicastCore};
use crate::{Collector, Subject, SubjectConfig};
use async_trait::async_trait;
use ripple_core::TerminalSignal;
use ripple_error::{Result, SubjectError};
use std::sync::Arc;

pub struct UnicastSubject<T: Send + 'static> {
    core: Arc<UnicastCore<T>>,
}

impl<T: Send + 'static> UnicastSubject<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SubjectConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SubjectConfig) -> Self {
        Self {
            core: Arc::new(UnicastCore::new(Admission::Once, config)),
        }
    }

    /// `true` once the single collector has attached and gone away.
    pub fn is_consumed(&self) -> bool {
        self.core.is_consumed()
    }

    /// Items emitted but not yet taken by a collector.
    pub fn buffered(&self) -> usize {
        self.core.buffered()
    }
}

#[async_trait]
impl<T: Send + 'static> Subject<T> for UnicastSubject<T> {
    async fn emit(&self, value: T) {
        self.core.emit(value).await;
    }

    async fn complete(&self) {
        self.core.terminate(TerminalSignal::Completed).await;
    }

    async fn emit_error(&self, error: SubjectError) {
        self.core.terminate(TerminalSignal::Failed(error)).await;
    }

    fn collector(&self) -> Result<Collector<T>> {
        self.core.attach("UnicastSubject")
    }

    fn collector_count(&self) -> usize {
        self.core.collector_count()
    }

    async fn await_collectors(&self, count: usize) {
        self.core.await_collectors(count).await;
    }

    fn is_terminated(&self) -> bool {
        self.core.is_terminated()
    }
}

impl<T: Send + 'static> Default for UnicastSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> Clone for UnicastSubject<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

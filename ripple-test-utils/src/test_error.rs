// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Error raised by test producers and collector callbacks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TestError {
    #[error("producer failed: {0}")]
    Producer(String),

    #[error("collector rejected item {0}")]
    Rejected(i64),
}

impl TestError {
    pub fn producer(message: impl Into<String>) -> Self {
        Self::Producer(message.into())
    }
}

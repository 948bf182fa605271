// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the Ripple subject library.
//!
//! Intended for `dev-dependencies` only.
//!
//! - [`ManualClock`]: a [`Clock`](ripple_core::Clock) that only moves when told to,
//!   for driving replay age eviction without sleeping.
//! - [`TestError`]: a concrete `std::error::Error` to wrap in `SubjectError::User`.
//! - [`helpers`]: assertions over collector streams.

pub mod helpers;
pub mod manual_clock;
pub mod test_error;

pub use self::helpers::{
    assert_no_element_emitted, expect_completed, expect_failure, expect_next_value,
};
pub use self::manual_clock::ManualClock;
pub use self::test_error::TestError;

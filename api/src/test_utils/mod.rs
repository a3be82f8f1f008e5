//! Test utilities
//!
//! Fixtures and hand-written doubles for unit testing. The in-memory
//! repositories in `adapters::memory` double as the default test stores;
//! the doubles here cover the cases they cannot, such as a fixed "today"
//! or a store that answers with stale reads.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;

//! Test utilities
//!
//! Manual mock sources and test fixtures for unit testing.
//!
//! Sources are mocked by hand rather than with a mocking framework: a scripted
//! source is a few lines, and tests can flip its behaviour between refreshes.
//! Adapter tests talk to a real axum server on a loopback port instead.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;

//! Crate-level test suites: shared fixtures and property tests.

pub(crate) mod common;
mod property;

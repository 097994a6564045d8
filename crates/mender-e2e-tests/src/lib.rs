//! End-to-end integration tests for mender.
//!
//! This crate has no library code; tests live in `tests/`.

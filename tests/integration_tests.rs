//! Integration test entry point
//!
//! Compiles the `integration` module as a single test binary, mirroring the
//! crate's module layout.

mod integration;

//! Command orchestration layer.
//!
//! Each command validates its input, drives the store inside a single
//! transaction and re-reads the expanded result after commit.

pub mod course;
